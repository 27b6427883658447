use thiserror::Error;

use crate::models::EntityKind;

#[derive(Error, Debug)]
pub enum GeneralError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Client error: {0}")]
    Client(#[from] ClientError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} is required when ENTITY_BACKEND={backend}")]
    Missing { name: &'static str, backend: String },

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Failure talking to an entity backend or upload service.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Deserialization error: {0}")]
    Deserialize(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::Api { status, .. } => *status == 404,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        Self::Deserialize(e.to_string())
    }
}

/// A collection could not be listed.
#[derive(Error, Debug)]
#[error("Failed to load {kind}: {source}")]
pub struct FetchError {
    pub kind: EntityKind,
    #[source]
    pub source: ClientError,
}

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("No file was selected")]
    Empty,

    #[error("File {file_name} is not an image ({content_type})")]
    NotAnImage {
        file_name: String,
        content_type: String,
    },

    #[error("File {file_name} exceeds {limit} bytes")]
    TooLarge { file_name: String, limit: usize },

    #[error("Upload failed: {0}")]
    Transport(#[from] ClientError),
}

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("Failed to create {kind}: {source}")]
    Create {
        kind: EntityKind,
        #[source]
        source: ClientError,
    },

    #[error("Failed to update {kind} {id}: {source}")]
    Update {
        kind: EntityKind,
        id: String,
        #[source]
        source: ClientError,
    },

    #[error("Failed to delete {kind} {id}: {source}")]
    Delete {
        kind: EntityKind,
        id: String,
        #[source]
        source: ClientError,
    },

    #[error("Invalid {kind} record: {source}")]
    Encode {
        kind: EntityKind,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum EditorError {
    #[error("Nothing is being edited")]
    NotEditing,

    #[error("A save is already in progress")]
    SaveInProgress,

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Anything the admin panel reports back to the operator.
#[derive(Error, Debug)]
pub enum AdminError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: String },
}
