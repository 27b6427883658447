//! Process-local entity store used for development and tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::common::ClientError;
use crate::models::{EntityKind, Record};

use super::{field_matches, record_id, sort_records, EntityBackend};

#[derive(Debug, Default)]
pub struct MemoryBackend {
    collections: Mutex<HashMap<EntityKind, Vec<Record>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<EntityKind, Vec<Record>>> {
        self.collections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of records currently stored for `kind`.
    pub fn count(&self, kind: EntityKind) -> usize {
        self.lock().get(&kind).map_or(0, Vec::len)
    }

    fn insert(collection: &mut Vec<Record>, mut fields: Record) -> Record {
        fields.insert("id".to_string(), Uuid::new_v4().to_string().into());
        collection.push(fields.clone());
        fields
    }

    fn merge(
        collection: &mut [Record],
        kind: EntityKind,
        id: &str,
        fields: Record,
    ) -> Result<Record, ClientError> {
        let record = collection
            .iter_mut()
            .find(|r| record_id(r).as_deref() == Some(id))
            .ok_or_else(|| ClientError::NotFound(format!("{kind} {id}")))?;

        for (k, v) in fields {
            if k != "id" {
                record.insert(k, v);
            }
        }
        Ok(record.clone())
    }
}

#[async_trait]
impl EntityBackend for MemoryBackend {
    async fn list(&self, kind: EntityKind, sort: Option<&str>) -> Result<Vec<Record>, ClientError> {
        let mut records = self.lock().get(&kind).cloned().unwrap_or_default();
        if let Some(sort) = sort {
            sort_records(&mut records, sort);
        }
        Ok(records)
    }

    async fn create(&self, kind: EntityKind, fields: Record) -> Result<Record, ClientError> {
        let mut collections = self.lock();
        Ok(Self::insert(collections.entry(kind).or_default(), fields))
    }

    async fn update(
        &self,
        kind: EntityKind,
        id: &str,
        fields: Record,
    ) -> Result<Record, ClientError> {
        let mut collections = self.lock();
        let collection = collections.entry(kind).or_default();
        Self::merge(collection, kind, id, fields)
    }

    async fn delete(&self, kind: EntityKind, id: &str) -> Result<(), ClientError> {
        let mut collections = self.lock();
        let collection = collections.entry(kind).or_default();
        let before = collection.len();
        collection.retain(|r| record_id(r).as_deref() != Some(id));

        if collection.len() == before {
            return Err(ClientError::NotFound(format!("{kind} {id}")));
        }
        Ok(())
    }

    /// Lookup and write happen under one lock, so concurrent callers cannot
    /// both create.
    async fn upsert_by_key(
        &self,
        kind: EntityKind,
        key_field: &str,
        fields: Record,
    ) -> Result<Record, ClientError> {
        let key = fields
            .get(key_field)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        let mut collections = self.lock();
        let collection = collections.entry(kind).or_default();

        let existing = collection
            .iter()
            .find(|r| field_matches(r, key_field, &key))
            .and_then(record_id);

        match existing {
            Some(id) => Self::merge(collection, kind, &id, fields),
            None => Ok(Self::insert(collection, fields)),
        }
    }
}
