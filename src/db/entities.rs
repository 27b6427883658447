//! Entity collections stored as JSONB rows in one Postgres table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::client::{check_then_act, EntityBackend};
use crate::common::ClientError;
use crate::models::{EntityKind, Record};

/// Keys owned by the table rather than the JSON document.
const RESERVED_KEYS: [&str; 3] = ["id", "created_date", "updated_date"];

#[derive(Debug, FromRow)]
struct EntityRow {
    id: Uuid,
    data: Json<Record>,
    created_at: DateTime<Utc>,
    edited_at: DateTime<Utc>,
}

impl EntityRow {
    fn into_record(self) -> Record {
        let mut record = self.data.0;
        record.insert("id".to_string(), self.id.to_string().into());
        record.insert("created_date".to_string(), self.created_at.to_rfc3339().into());
        record.insert("updated_date".to_string(), self.edited_at.to_rfc3339().into());
        record
    }
}

fn document(mut fields: Record) -> Json<Record> {
    for key in RESERVED_KEYS {
        fields.remove(key);
    }
    Json(fields)
}

fn parse_id(kind: EntityKind, id: &str) -> Result<Uuid, ClientError> {
    // An id that is not a UUID cannot name a stored row.
    Uuid::parse_str(id).map_err(|_| ClientError::NotFound(format!("{kind} {id}")))
}

/// Unique indexes declared by the migrations, as (kind, field) pairs.
fn has_unique_index(kind: EntityKind, field: &str) -> bool {
    matches!((kind, field), (EntityKind::Setting, "key"))
}

#[derive(Debug, Clone)]
pub struct PgBackend {
    pool: PgPool,
}

impl PgBackend {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityBackend for PgBackend {
    async fn list(&self, kind: EntityKind, sort: Option<&str>) -> Result<Vec<Record>, ClientError> {
        let mut query_builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, data, created_at, edited_at FROM entities WHERE kind = ",
        );
        query_builder.push_bind(kind.as_str());

        match sort {
            Some(sort) => {
                let (field, direction) = match sort.strip_prefix('-') {
                    Some(field) => (field, " DESC NULLS LAST"),
                    None => (sort, " ASC NULLS LAST"),
                };
                query_builder
                    .push(" ORDER BY data -> ")
                    .push_bind(field.to_string())
                    .push(direction)
                    .push(", created_at ASC");
            }
            None => {
                query_builder.push(" ORDER BY created_at ASC");
            }
        }

        let rows = query_builder
            .build_query_as::<EntityRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(EntityRow::into_record).collect())
    }

    async fn create(&self, kind: EntityKind, fields: Record) -> Result<Record, ClientError> {
        let row = sqlx::query_as::<_, EntityRow>(
            r#"
            INSERT INTO entities (kind, data)
            VALUES ($1, $2)
            RETURNING id, data, created_at, edited_at
            "#,
        )
        .bind(kind.as_str())
        .bind(document(fields))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_record())
    }

    async fn update(
        &self,
        kind: EntityKind,
        id: &str,
        fields: Record,
    ) -> Result<Record, ClientError> {
        let uuid = parse_id(kind, id)?;
        let row = sqlx::query_as::<_, EntityRow>(
            r#"
            UPDATE entities
            SET
                data = data || $1,
                edited_at = now()
            WHERE kind = $2 AND id = $3
            RETURNING id, data, created_at, edited_at
            "#,
        )
        .bind(document(fields))
        .bind(kind.as_str())
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await?;

        row.map(EntityRow::into_record)
            .ok_or_else(|| ClientError::NotFound(format!("{kind} {id}")))
    }

    async fn delete(&self, kind: EntityKind, id: &str) -> Result<(), ClientError> {
        let uuid = parse_id(kind, id)?;
        let result = sqlx::query(
            r#"
            DELETE FROM entities
            WHERE kind = $1 AND id = $2
            "#,
        )
        .bind(kind.as_str())
        .bind(uuid)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ClientError::NotFound(format!("{kind} {id}")));
        }
        Ok(())
    }

    async fn find_by(
        &self,
        kind: EntityKind,
        field: &str,
        value: &str,
    ) -> Result<Vec<Record>, ClientError> {
        let rows = sqlx::query_as::<_, EntityRow>(
            r#"
            SELECT id, data, created_at, edited_at
            FROM entities
            WHERE kind = $1 AND data ->> $2 = $3
            ORDER BY created_at ASC
            "#,
        )
        .bind(kind.as_str())
        .bind(field)
        .bind(value)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(EntityRow::into_record).collect())
    }

    async fn upsert_by_key(
        &self,
        kind: EntityKind,
        key_field: &str,
        fields: Record,
    ) -> Result<Record, ClientError> {
        if !has_unique_index(kind, key_field) {
            tracing::warn!(
                kind = %kind,
                key_field,
                "no unique index, falling back to check-then-act"
            );
            return check_then_act(self, kind, key_field, fields).await;
        }

        let row = sqlx::query_as::<_, EntityRow>(
            r#"
            INSERT INTO entities (kind, data)
            VALUES ($1, $2)
            ON CONFLICT ((data ->> 'key')) WHERE kind = 'Setting'
            DO UPDATE SET
                data = entities.data || EXCLUDED.data,
                edited_at = now()
            RETURNING id, data, created_at, edited_at
            "#,
        )
        .bind(kind.as_str())
        .bind(document(fields))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_record())
    }
}
