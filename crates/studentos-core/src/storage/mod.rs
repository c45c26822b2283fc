//! Blob persistence and application configuration.
//!
//! The whole store state is one JSON document kept under a single key in a
//! [`BlobStore`]. [`Persistence`] wraps a backend and never lets a backend
//! failure escape to the caller.

pub mod codec;
mod config;
pub mod database;
pub mod memory;
pub mod persistence;

pub use config::{Config, FeedsConfig, LoggingConfig, RemindersConfig, StorageConfig};
pub use database::SqliteBlobStore;
pub use memory::MemoryBlobStore;
pub use persistence::{
    Persistence, CORRUPT_BACKUP_SUFFIX, DEFAULT_BLOB_KEY, KEY_PREFIX, PRESERVED_KEYS,
};

use std::path::PathBuf;

use crate::error::StorageError;

/// Key/value backend for serialized blobs.
pub trait BlobStore: Send {
    /// Value stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;

    /// Every key currently stored.
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

/// Returns `~/.config/studentos[-dev]/` based on STUDENTOS_ENV.
///
/// Set STUDENTOS_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("STUDENTOS_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("studentos-dev")
    } else {
        base_dir.join("studentos")
    };

    std::fs::create_dir_all(&dir).map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
