//! Core error types for studentos-core.
//!
//! One enum per concern, folded into [`CoreError`] with `#[from]`.
//! Storage failures are normally swallowed by the persistence adapter and
//! only surface here when a caller talks to a [`BlobStore`] directly.
//!
//! [`BlobStore`]: crate::storage::BlobStore

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studentos-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Blob storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Contest / profile feed errors
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by a blob store backend.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the backing database
    #[error("Failed to open blob store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Read or write against the backend failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Backend refused the operation (disabled or full)
    #[error("Blob store unavailable: {0}")]
    Unavailable(String),

    /// Could not resolve the data directory
    #[error("Failed to access data directory: {0}")]
    DataDir(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors, returned to the caller with a readable message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A patch produced a record that no longer fits its type
    #[error("Patch rejected for {entity}: {message}")]
    InvalidPatch { entity: &'static str, message: String },

    /// Patch text was not a JSON object
    #[error("Patch must be a JSON object: {0}")]
    MalformedPatch(String),

    /// Unknown enum value (e.g. a task type or tone)
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Errors from the external contest/profile feed.
#[derive(Error, Debug)]
pub enum FeedError {
    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-OK status
    #[error("{service} API error: {comment}")]
    Api { service: &'static str, comment: String },

    /// Base URL could not be joined with an endpoint
    #[error("Invalid feed URL: {0}")]
    Url(#[from] url::ParseError),

    /// The API returned no result for the request
    #[error("No result for '{0}'")]
    NotFound(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(inner, _msg)
                if matches!(
                    inner.code,
                    rusqlite::ErrorCode::DiskFull | rusqlite::ErrorCode::ReadOnly
                ) =>
            {
                StorageError::Unavailable(err.to_string())
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_message_names_field() {
        let err = ValidationError::InvalidValue {
            field: "tone".into(),
            message: "expected gentle, firm or savage".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for 'tone': expected gentle, firm or savage"
        );
    }

    #[test]
    fn core_error_wraps_storage_error() {
        let err: CoreError = StorageError::Unavailable("quota exceeded".into()).into();
        assert!(err.to_string().contains("quota exceeded"));
    }
}
