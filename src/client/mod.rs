//! Entity and upload clients.
//!
//! Every collection is reached through [`EntityBackend`], a record-level
//! interface shared by the remote HTTP API, the Postgres store and the
//! in-memory store. [`EntityClient`] layers typed models on top of it.

mod http;
mod memory;
mod upload;

pub use http::*;
pub use memory::*;
pub use upload::*;

use std::cmp::Ordering;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::common::{ClientError, FetchError, SaveError};
use crate::models::{from_record, to_record, Entity, EntityKind, Record};

#[async_trait]
pub trait EntityBackend: Send + Sync {
    /// Lists a collection. `sort` names a field; a leading `-` sorts
    /// descending. `None` keeps the backend's own order.
    async fn list(&self, kind: EntityKind, sort: Option<&str>) -> Result<Vec<Record>, ClientError>;

    async fn create(&self, kind: EntityKind, fields: Record) -> Result<Record, ClientError>;

    /// Replaces the named fields of an existing record.
    async fn update(&self, kind: EntityKind, id: &str, fields: Record)
        -> Result<Record, ClientError>;

    async fn delete(&self, kind: EntityKind, id: &str) -> Result<(), ClientError>;

    /// Records whose `field` equals `value`.
    async fn find_by(
        &self,
        kind: EntityKind,
        field: &str,
        value: &str,
    ) -> Result<Vec<Record>, ClientError> {
        let records = self.list(kind, None).await?;
        Ok(records
            .into_iter()
            .filter(|r| field_matches(r, field, value))
            .collect())
    }

    /// Creates the record unless one with the same `key_field` value exists,
    /// in which case that one is updated.
    ///
    /// The default is check-then-act: two concurrent callers can both see no
    /// match and both create. Backends with a uniqueness guarantee override it.
    async fn upsert_by_key(
        &self,
        kind: EntityKind,
        key_field: &str,
        fields: Record,
    ) -> Result<Record, ClientError> {
        check_then_act(self, kind, key_field, fields).await
    }
}

/// Non-atomic upsert: look the key up, then update or create.
pub async fn check_then_act<B: EntityBackend + ?Sized>(
    backend: &B,
    kind: EntityKind,
    key_field: &str,
    fields: Record,
) -> Result<Record, ClientError> {
    let key = fields
        .get(key_field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let existing = backend.find_by(kind, key_field, &key).await?;
    match existing.first().and_then(record_id) {
        Some(id) => backend.update(kind, &id, fields).await,
        None => backend.create(kind, fields).await,
    }
}

pub fn record_id(record: &Record) -> Option<String> {
    match record.get("id") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn field_matches(record: &Record, field: &str, value: &str) -> bool {
    match record.get(field) {
        Some(Value::String(s)) => s == value,
        Some(other) => other.to_string() == value,
        None => false,
    }
}

/// Orders records by a sort spec such as `order` or `-order`.
pub(crate) fn sort_records(records: &mut [Record], sort: &str) {
    let (field, descending) = match sort.strip_prefix('-') {
        Some(field) => (field, true),
        None => (sort, false),
    };

    // Records without the field go last in either direction.
    records.sort_by(|a, b| match (a.get(field), b.get(field)) {
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (x, y) if descending => compare_values(x, y).reverse(),
        (x, y) => compare_values(x, y),
    });
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or_default();
            let y = y.as_f64().unwrap_or_default();
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

/// Typed view of one collection.
pub struct EntityClient<T> {
    backend: Arc<dyn EntityBackend>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for EntityClient<T> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            _marker: PhantomData,
        }
    }
}

impl<T: Entity> EntityClient<T> {
    pub fn new(backend: Arc<dyn EntityBackend>) -> Self {
        Self {
            backend,
            _marker: PhantomData,
        }
    }

    pub async fn list(&self, sort: Option<&str>) -> Result<Vec<T>, FetchError> {
        let fetch_err = |source| FetchError {
            kind: T::KIND,
            source,
        };

        let records = self.backend.list(T::KIND, sort).await.map_err(fetch_err)?;
        records
            .into_iter()
            .map(|r| from_record(r).map_err(|e| fetch_err(e.into())))
            .collect()
    }

    pub async fn find_by(&self, field: &str, value: &str) -> Result<Vec<T>, FetchError> {
        let fetch_err = |source| FetchError {
            kind: T::KIND,
            source,
        };

        let records = self
            .backend
            .find_by(T::KIND, field, value)
            .await
            .map_err(fetch_err)?;
        records
            .into_iter()
            .map(|r| from_record(r).map_err(|e| fetch_err(e.into())))
            .collect()
    }

    pub async fn create(&self, entity: &T) -> Result<T, SaveError> {
        let create_err = |source| SaveError::Create {
            kind: T::KIND,
            source,
        };

        let fields = self.encode(entity)?;
        let record = self.backend.create(T::KIND, fields).await.map_err(create_err)?;
        from_record(record).map_err(|e| create_err(e.into()))
    }

    /// Sends every field of `entity` so backends that replace whole records
    /// keep the untouched ones.
    pub async fn update(&self, id: &str, entity: &T) -> Result<T, SaveError> {
        let update_err = |source| SaveError::Update {
            kind: T::KIND,
            id: id.to_string(),
            source,
        };

        let fields = self.encode(entity)?;
        let record = self
            .backend
            .update(T::KIND, id, fields)
            .await
            .map_err(update_err)?;
        from_record(record).map_err(|e| update_err(e.into()))
    }

    pub async fn delete(&self, id: &str) -> Result<(), SaveError> {
        self.backend
            .delete(T::KIND, id)
            .await
            .map_err(|source| SaveError::Delete {
                kind: T::KIND,
                id: id.to_string(),
                source,
            })
    }

    pub async fn upsert_by_key(&self, key_field: &str, entity: &T) -> Result<T, SaveError> {
        let create_err = |source| SaveError::Create {
            kind: T::KIND,
            source,
        };

        let fields = self.encode(entity)?;
        let record = self
            .backend
            .upsert_by_key(T::KIND, key_field, fields)
            .await
            .map_err(create_err)?;
        from_record(record).map_err(|e| create_err(e.into()))
    }

    fn encode(&self, entity: &T) -> Result<Record, SaveError> {
        to_record(entity).map_err(|source| SaveError::Encode {
            kind: T::KIND,
            source,
        })
    }
}
