//! Error types for persistence, ingestion and reminder delivery.
//!
//! Every fallible layer gets its own `thiserror` enum. Callers on the event
//! loop catch these at the call site and log them; none of them are fatal.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from reading or writing the JSON document.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No platform data directory and no override configured
    #[error("Could not determine a data directory")]
    NoDataDir,

    #[error("Failed to replace {path}: {message}")]
    Persist { path: PathBuf, message: String },
}

impl StorageError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors from the remote fetch collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Server answered with a non-OK status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// DNS, TLS, connect or read failure
    #[error("Transport error for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("Response for {url} exceeds {limit} bytes")]
    TooLarge { url: String, limit: u64 },
}

/// Errors that abort the ingestion of a single dropped asset.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Neither an image nor a video
    #[error("Unsupported asset type: {0}")]
    Unsupported(String),

    #[error("Malformed data URI: {0}")]
    InvalidDataUri(String),
}

impl IngestError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for ingestion operations
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors from delivering a reminder.
#[derive(Error, Debug)]
pub enum ReminderError {
    #[error("No webhook configured")]
    NoWebhook,

    #[error("Notification permission denied")]
    PermissionDenied,

    #[error(transparent)]
    Fetch(#[from] FetchError),
}
