mod common;

#[cfg(test)]
pub mod db_tests {
    use std::sync::Arc;

    use sqlx::PgPool;

    use super::common::*;

    use pontonovo::client::*;
    use pontonovo::db::*;
    use pontonovo::models::*;

    fn backend(pool: PgPool) -> Arc<PgBackend> {
        Arc::new(PgBackend::new(pool))
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_store_round_trip(pool: PgPool) {
        let stores = EntityClient::<Store>::new(backend(pool));
        let created = stores.create(&get_seed_store_1()).await.unwrap();

        let listed = stores.list(None).await.unwrap();
        assert_eq!(listed, vec![created.clone()]);
        assert_eq!(
            Store {
                id: None,
                ..created
            },
            get_seed_store_1()
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_update_merges_fields(pool: PgPool) {
        let stores = EntityClient::<Store>::new(backend(pool));
        let created = stores.create(&get_seed_store_2()).await.unwrap();
        let id = created.id.clone().unwrap();

        let changed = Store {
            phone: "(19) 3862-0000".to_string(),
            ..created
        };
        let updated = stores.update(&id, &changed).await.unwrap();
        assert_eq!(updated, changed);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_list_sorts_by_json_field(pool: PgPool) {
        let brands = EntityClient::<OwnBrand>::new(backend(pool));
        for (name, order) in [("Casa", 2), ("Bom Preço", 0), ("Fresco", 1)] {
            brands.create(&get_seed_brand(name, order)).await.unwrap();
        }

        let names: Vec<_> = brands
            .list(Some("-order"))
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, ["Casa", "Fresco", "Bom Preço"]);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_delete_missing_is_not_found(pool: PgPool) {
        let backend = backend(pool);
        let err = backend
            .delete(EntityKind::Store, "00000000-0000-0000-0000-000000000000")
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let err = backend.delete(EntityKind::Store, "S1").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_concurrent_logo_upserts_keep_one_row(pool: PgPool) {
        let settings = EntityClient::<Setting>::new(backend(pool.clone()));

        let logo_a = Setting::logo("/a.png");
        let logo_b = Setting::logo("/b.png");
        let (a, b) = tokio::join!(
            settings.upsert_by_key("key", &logo_a),
            settings.upsert_by_key("key", &logo_b)
        );
        assert_eq!(a.unwrap().id, b.unwrap().id);

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM entities WHERE kind = 'Setting'")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_find_by_uses_json_field(pool: PgPool) {
        let settings = EntityClient::<Setting>::new(backend(pool));
        settings.create(&Setting::new("theme", "red")).await.unwrap();
        settings.create(&Setting::logo("/a.png")).await.unwrap();

        let found = settings.find_by("key", LOGO_KEY).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, "/a.png");
    }
}
