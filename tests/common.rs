use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::Barrier;

use pontonovo::client::{EntityBackend, MemoryBackend, UploadFile};
use pontonovo::common::ClientError;
use pontonovo::models::*;

pub fn get_seed_store_1() -> Store {
    Store {
        id: None,
        short_name: "SPN Loja 1".to_string(),
        name: "Supermercado Ponto Novo - Centro".to_string(),
        address: "Av. Emilia Marchi Martini, 199".to_string(),
        neighborhood: "Centro".to_string(),
        city: "Mogi Guaçu".to_string(),
        phone: "(19) 3851-5530".to_string(),
        hours: "Segunda à Domingo: 7h às 21h".to_string(),
        image_url: "https://cdn.example/loja1.jpg".to_string(),
        maps_url: "https://maps.example/?q=loja1".to_string(),
    }
}

pub fn get_seed_store_2() -> Store {
    Store {
        id: None,
        short_name: "SPN Loja 2".to_string(),
        name: "Supermercado Ponto Novo - Jardim".to_string(),
        address: "Rua das Flores, 45".to_string(),
        neighborhood: "Jardim Camboriú".to_string(),
        city: "Mogi Mirim".to_string(),
        phone: "(19) 3862-1100".to_string(),
        hours: "Segunda à Sábado: 7h às 22h".to_string(),
        image_url: String::new(),
        maps_url: String::new(),
    }
}

pub fn get_seed_brand(name: &str, order: i64) -> OwnBrand {
    OwnBrand {
        id: None,
        name: name.to_string(),
        description: format!("Linha {name}"),
        image_url: String::new(),
        order,
    }
}

pub fn get_seed_banner(url: &str, order: i64) -> Banner {
    Banner {
        id: None,
        image_url: url.to_string(),
        order,
        active: true,
    }
}

pub fn png(name: &str) -> UploadFile {
    UploadFile::new(name, Some("image/png".to_string()), vec![0x89, b'P', b'N', b'G'])
}

/// Memory backend that remembers every update it receives.
#[derive(Default)]
pub struct RecordingBackend {
    pub inner: MemoryBackend,
    pub updates: Mutex<Vec<(EntityKind, String, Record)>>,
}

#[async_trait]
impl EntityBackend for RecordingBackend {
    async fn list(&self, kind: EntityKind, sort: Option<&str>) -> Result<Vec<Record>, ClientError> {
        self.inner.list(kind, sort).await
    }

    async fn create(&self, kind: EntityKind, fields: Record) -> Result<Record, ClientError> {
        self.inner.create(kind, fields).await
    }

    async fn update(
        &self,
        kind: EntityKind,
        id: &str,
        fields: Record,
    ) -> Result<Record, ClientError> {
        self.updates
            .lock()
            .unwrap()
            .push((kind, id.to_string(), fields.clone()));
        self.inner.update(kind, id, fields).await
    }

    async fn delete(&self, kind: EntityKind, id: &str) -> Result<(), ClientError> {
        self.inner.delete(kind, id).await
    }
}

/// Memory backend that only offers check-then-act upserts, and holds the
/// first two lookups until both have run. Two concurrent upserts therefore
/// both see "no row" before either writes.
pub struct RacyBackend {
    pub inner: MemoryBackend,
    barrier: Barrier,
    lookups: AtomicUsize,
}

impl RacyBackend {
    pub fn new() -> Self {
        Self {
            inner: MemoryBackend::new(),
            barrier: Barrier::new(2),
            lookups: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl EntityBackend for RacyBackend {
    async fn list(&self, kind: EntityKind, sort: Option<&str>) -> Result<Vec<Record>, ClientError> {
        self.inner.list(kind, sort).await
    }

    async fn create(&self, kind: EntityKind, fields: Record) -> Result<Record, ClientError> {
        self.inner.create(kind, fields).await
    }

    async fn update(
        &self,
        kind: EntityKind,
        id: &str,
        fields: Record,
    ) -> Result<Record, ClientError> {
        self.inner.update(kind, id, fields).await
    }

    async fn delete(&self, kind: EntityKind, id: &str) -> Result<(), ClientError> {
        self.inner.delete(kind, id).await
    }

    async fn find_by(
        &self,
        kind: EntityKind,
        field: &str,
        value: &str,
    ) -> Result<Vec<Record>, ClientError> {
        let rows = self.inner.find_by(kind, field, value).await?;
        if self.lookups.fetch_add(1, Ordering::SeqCst) < 2 {
            self.barrier.wait().await;
        }
        Ok(rows)
    }
}

/// Backend whose every call fails, as when the entity API is down.
pub struct FailingBackend;

fn unavailable() -> ClientError {
    ClientError::Api {
        status: 503,
        message: "service unavailable".to_string(),
    }
}

#[async_trait]
impl EntityBackend for FailingBackend {
    async fn list(
        &self,
        _kind: EntityKind,
        _sort: Option<&str>,
    ) -> Result<Vec<Record>, ClientError> {
        Err(unavailable())
    }

    async fn create(&self, _kind: EntityKind, _fields: Record) -> Result<Record, ClientError> {
        Err(unavailable())
    }

    async fn update(
        &self,
        _kind: EntityKind,
        _id: &str,
        _fields: Record,
    ) -> Result<Record, ClientError> {
        Err(unavailable())
    }

    async fn delete(&self, _kind: EntityKind, _id: &str) -> Result<(), ClientError> {
        Err(unavailable())
    }
}
