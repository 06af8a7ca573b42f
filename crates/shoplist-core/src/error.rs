//! Error types for the core crate.

use thiserror::Error;

/// Failure reading or writing the persistence slot.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize list: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failure turning a share token back into a payload.
#[derive(Debug, Error)]
pub enum ShareError {
    #[error("share token is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("share payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("share payload is not a list")]
    NotAnArray,
}

/// Text that is not a known category id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);
