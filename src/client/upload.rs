//! File upload service.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{ClientError, UploadError};

use super::http::handle_response;
use super::HttpBackend;

/// Largest accepted upload.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// A file received from the operator, held in memory.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    /// Only non-empty images are accepted. A missing content type is let
    /// through and left to the storage service.
    pub fn validate(&self) -> Result<(), UploadError> {
        if self.bytes.is_empty() {
            return Err(UploadError::Empty);
        }
        if self.bytes.len() > MAX_UPLOAD_BYTES {
            return Err(UploadError::TooLarge {
                file_name: self.file_name.clone(),
                limit: MAX_UPLOAD_BYTES,
            });
        }
        match self.content_type.as_deref() {
            Some(ct) if !ct.starts_with("image/") => Err(UploadError::NotAnImage {
                file_name: self.file_name.clone(),
                content_type: ct.to_string(),
            }),
            _ => Ok(()),
        }
    }

    fn extension(&self) -> String {
        Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .filter(|e| {
                !e.is_empty() && e.len() <= 8 && e.chars().all(|c| c.is_ascii_alphanumeric())
            })
            .unwrap_or_else(|| "bin".to_string())
    }
}

/// Where the stored file can be fetched from.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UploadResponse")]
pub struct UploadedFile {
    pub url: String,
}

/// Upload services answer with `url`, `file_url`, or both.
#[derive(Deserialize)]
struct UploadResponse {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    file_url: Option<String>,
}

impl TryFrom<UploadResponse> for UploadedFile {
    type Error = String;

    fn try_from(raw: UploadResponse) -> Result<Self, Self::Error> {
        raw.url
            .or(raw.file_url)
            .filter(|url| !url.is_empty())
            .map(|url| Self { url })
            .ok_or_else(|| "upload response has no url".to_string())
    }
}

#[async_trait]
pub trait Uploader: Send + Sync {
    async fn upload(&self, file: UploadFile) -> Result<UploadedFile, UploadError>;
}

/// Upload integration of the remote entity API.
#[derive(Debug, Clone)]
pub struct HttpUploader {
    backend: HttpBackend,
}

impl HttpUploader {
    pub fn new(backend: HttpBackend) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Uploader for HttpUploader {
    async fn upload(&self, file: UploadFile) -> Result<UploadedFile, UploadError> {
        file.validate()?;

        let mut part = Part::bytes(file.bytes).file_name(file.file_name);
        if let Some(ct) = file.content_type.as_deref() {
            part = part.mime_str(ct).map_err(ClientError::from)?;
        }

        let response = self
            .backend
            .request(Method::POST, "/integrations/Core/UploadFile")
            .multipart(Form::new().part("file", part))
            .send()
            .await
            .map_err(ClientError::from)?;

        Ok(handle_response(response).await?)
    }
}

/// Stores files in a local directory that the web server exposes under
/// `public_prefix`.
#[derive(Debug, Clone)]
pub struct DiskUploader {
    dir: PathBuf,
    public_prefix: String,
}

impl DiskUploader {
    pub fn new(dir: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        let public_prefix = public_prefix.into();
        Self {
            dir: dir.into(),
            public_prefix: public_prefix.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl Uploader for DiskUploader {
    async fn upload(&self, file: UploadFile) -> Result<UploadedFile, UploadError> {
        file.validate()?;

        let name = format!("{}.{}", Uuid::new_v4(), file.extension());
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(ClientError::from)?;
        tokio::fs::write(self.dir.join(&name), &file.bytes)
            .await
            .map_err(ClientError::from)?;

        tracing::info!(file = %name, bytes = file.bytes.len(), "stored upload");
        Ok(UploadedFile {
            url: format!("{}/{}", self.public_prefix, name),
        })
    }
}

/// Keeps uploads in memory and hands out `memory://` URLs.
#[derive(Debug, Default)]
pub struct MemoryUploader {
    stored: Mutex<Vec<UploadFile>>,
    unavailable: bool,
}

impl MemoryUploader {
    pub fn new() -> Self {
        Self::default()
    }

    /// An uploader whose service is down: every upload fails.
    pub fn unavailable() -> Self {
        Self {
            stored: Mutex::default(),
            unavailable: true,
        }
    }

    pub fn stored(&self) -> Vec<String> {
        self.stored
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .map(|f| f.file_name.clone())
            .collect()
    }
}

#[async_trait]
impl Uploader for MemoryUploader {
    async fn upload(&self, file: UploadFile) -> Result<UploadedFile, UploadError> {
        file.validate()?;
        if self.unavailable {
            return Err(ClientError::Api {
                status: 503,
                message: "upload service unavailable".to_string(),
            }
            .into());
        }

        let url = format!("memory://{}/{}", Uuid::new_v4(), file.file_name);
        self.stored
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(file);
        Ok(UploadedFile { url })
    }
}
