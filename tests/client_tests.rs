mod common;

#[cfg(test)]
pub mod client_tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::common::*;

    use pontonovo::client::*;
    use pontonovo::common::*;
    use pontonovo::models::*;

    #[tokio::test]
    async fn test_store_round_trip() {
        let stores = EntityClient::<Store>::new(Arc::new(MemoryBackend::new()));
        let created = stores.create(&get_seed_store_1()).await.unwrap();
        assert!(created.id.is_some());

        let listed = stores.list(None).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(
            Store {
                id: None,
                ..listed[0].clone()
            },
            get_seed_store_1()
        );
        assert_eq!(listed[0].id, created.id);
    }

    #[tokio::test]
    async fn test_delete_missing_record_reports_not_found() {
        let stores = EntityClient::<Store>::new(Arc::new(MemoryBackend::new()));
        let err = stores.delete("nope").await.unwrap_err();
        assert!(matches!(err, SaveError::Delete { source, .. } if source.is_not_found()));
    }

    #[tokio::test]
    async fn test_find_by_filters_on_field() {
        let backend = Arc::new(MemoryBackend::new());
        let settings = EntityClient::<Setting>::new(backend);
        settings.create(&Setting::new("theme", "red")).await.unwrap();
        settings.create(&Setting::logo("/a.png")).await.unwrap();

        let found = settings.find_by("key", LOGO_KEY).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, "/a.png");
    }

    #[tokio::test]
    async fn test_upsert_by_key_updates_in_place() {
        let backend = Arc::new(MemoryBackend::new());
        let settings = EntityClient::<Setting>::new(backend.clone());

        let first = settings.upsert_by_key("key", &Setting::logo("/a.png")).await.unwrap();
        let second = settings.upsert_by_key("key", &Setting::logo("/b.png")).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.value, "/b.png");
        assert_eq!(backend.count(EntityKind::Setting), 1);
    }

    #[tokio::test]
    async fn test_check_then_act_updates_existing_row() {
        let backend = MemoryBackend::new();
        backend
            .create(EntityKind::Setting, to_record(&Setting::logo("/a.png")).unwrap())
            .await
            .unwrap();

        let record = check_then_act(
            &backend,
            EntityKind::Setting,
            "key",
            to_record(&Setting::logo("/b.png")).unwrap(),
        )
        .await
        .unwrap();

        assert_eq!(record.get("value"), Some(&json!("/b.png")));
        assert_eq!(backend.count(EntityKind::Setting), 1);
    }

    #[tokio::test]
    async fn test_list_failure_carries_kind() {
        let flyers = EntityClient::<Flyer>::new(Arc::new(FailingBackend));
        let err = flyers.list(Some("order")).await.unwrap_err();
        assert_eq!(err.kind, EntityKind::Flyer);
    }

    #[test]
    fn test_backend_fields_are_tolerated() {
        let record = match json!({
            "id": "b1",
            "image_url": "https://cdn/b1.jpg",
            "order": 3,
            "created_date": "2024-05-01T10:00:00Z",
            "created_by": "admin@pontonovo.com.br"
        }) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };

        let banner: Banner = from_record(record).unwrap();
        assert_eq!(banner.id.as_deref(), Some("b1"));
        assert_eq!(banner.order, 3);
        assert!(banner.active);
    }

    #[test]
    fn test_opaque_records_keep_unknown_fields() {
        let record = match json!({"id": "p1", "headline": "Semana do Hortifruti"}) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };

        let settings: PromotionSettings = from_record(record).unwrap();
        assert_eq!(settings.id(), Some("p1"));
        assert_eq!(settings.fields.get("headline"), Some(&json!("Semana do Hortifruti")));
        assert!(!to_record(&settings).unwrap().contains_key("id"));
    }
}
