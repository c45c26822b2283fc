//! Snapshot persistence over a [`BlobStore`].
//!
//! Saves and loads never fail from the caller's point of view: a backend
//! or decode failure is logged and degrades to a dropped write or an empty
//! load. A snapshot that cannot be decoded is copied to a backup key before
//! anything else is written over it.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::codec;
use super::BlobStore;

/// Key the store snapshot lives under.
pub const DEFAULT_BLOB_KEY: &str = "studentos_data";

/// Prefix shared by every key this application writes.
pub const KEY_PREFIX: &str = "studentos_";

/// Keys that survive [`Persistence::clear_all`] by default.
pub const PRESERVED_KEYS: [&str; 1] = ["studentos_theme"];

/// Appended to the snapshot key to name the copy of an undecodable snapshot.
pub const CORRUPT_BACKUP_SUFFIX: &str = "_corrupt";

pub struct Persistence {
    store: Box<dyn BlobStore>,
    key: String,
}

impl Persistence {
    pub fn new(store: Box<dyn BlobStore>) -> Self {
        Self::with_key(store, DEFAULT_BLOB_KEY)
    }

    pub fn with_key(store: Box<dyn BlobStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backup_key(&self) -> String {
        format!("{}{CORRUPT_BACKUP_SUFFIX}", self.key)
    }

    /// Write `state` under the snapshot key. Failures are logged and dropped.
    pub fn save<T: Serialize>(&mut self, state: &T) {
        let text = match codec::encode(state) {
            Ok(text) => text,
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to encode snapshot, write dropped");
                return;
            }
        };
        match self.store.write(&self.key, &text) {
            Ok(()) => debug!(key = %self.key, bytes = text.len(), "snapshot saved"),
            Err(e) => warn!(key = %self.key, error = %e, "failed to save snapshot, write dropped"),
        }
    }

    /// Read and decode the snapshot. `None` when absent, unreadable or corrupt.
    ///
    /// Corrupt text is copied to [`Persistence::backup_key`] so the next save
    /// does not destroy it.
    pub fn load<T: DeserializeOwned>(&mut self) -> Option<T> {
        let text = match self.store.read(&self.key) {
            Ok(Some(text)) => text,
            Ok(None) => {
                debug!(key = %self.key, "no stored snapshot");
                return None;
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to read snapshot");
                return None;
            }
        };
        match codec::decode(&text) {
            Ok(state) => Some(state),
            Err(e) => {
                warn!(key = %self.key, error = %e, "stored snapshot is corrupt, ignoring it");
                self.back_up(&text);
                None
            }
        }
    }

    fn back_up(&mut self, text: &str) {
        let backup = self.backup_key();
        match self.store.write(&backup, text) {
            Ok(()) => warn!(key = %backup, bytes = text.len(), "corrupt snapshot backed up"),
            Err(e) => warn!(key = %backup, error = %e, "failed to back up corrupt snapshot"),
        }
    }

    /// Remove every `studentos_` key except those in `keep`. Returns how many
    /// keys were removed.
    pub fn clear_all(&mut self, keep: &[&str]) -> usize {
        let keys = match self.store.keys() {
            Ok(keys) => keys,
            Err(e) => {
                warn!(error = %e, "failed to list stored keys");
                return 0;
            }
        };
        let mut removed = 0;
        for key in keys
            .iter()
            .filter(|k| k.starts_with(KEY_PREFIX) && !keep.contains(&k.as_str()))
        {
            match self.store.remove(key) {
                Ok(()) => removed += 1,
                Err(e) => warn!(key = %key, error = %e, "failed to remove key"),
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBlobStore;
    use std::collections::BTreeMap;

    #[test]
    fn missing_and_corrupt_snapshots_load_as_none() {
        let mut store = MemoryBlobStore::new();
        store.write("other", "x").unwrap();
        store.write(DEFAULT_BLOB_KEY, "{not json").unwrap();
        let mut persistence = Persistence::new(Box::new(store));
        assert!(persistence.load::<BTreeMap<String, u32>>().is_none());
    }

    #[test]
    fn corrupt_snapshot_survives_the_next_save() {
        let mut store = MemoryBlobStore::new();
        store.write(DEFAULT_BLOB_KEY, "{not json").unwrap();
        let mut persistence = Persistence::new(Box::new(store));
        assert!(persistence.load::<BTreeMap<String, u32>>().is_none());

        persistence.save(&BTreeMap::from([("a", 1)]));
        assert_eq!(persistence.backup_key(), "studentos_data_corrupt");
        assert_eq!(
            persistence.store.read("studentos_data_corrupt").unwrap().as_deref(),
            Some("{not json")
        );
        let reloaded: BTreeMap<String, u32> = persistence.load().unwrap();
        assert_eq!(reloaded["a"], 1);
    }

    #[test]
    fn missing_snapshot_writes_no_backup() {
        let mut persistence = Persistence::new(Box::new(MemoryBlobStore::new()));
        assert!(persistence.load::<u32>().is_none());
        assert_eq!(persistence.store.keys().unwrap(), Vec::<String>::new());
    }

    #[test]
    fn failing_backend_never_panics() {
        let mut store = MemoryBlobStore::new();
        store.set_failing(true);
        let mut persistence = Persistence::new(Box::new(store));
        persistence.save(&BTreeMap::from([("a", 1)]));
        assert!(persistence.load::<BTreeMap<String, u32>>().is_none());
        assert_eq!(persistence.clear_all(&PRESERVED_KEYS), 0);
    }

    #[test]
    fn clear_all_keeps_theme_and_foreign_keys() {
        let mut store = MemoryBlobStore::new();
        for key in ["studentos_data", "studentos_user", "studentos_theme", "unrelated"] {
            store.write(key, "1").unwrap();
        }
        let mut persistence = Persistence::new(Box::new(store));
        assert_eq!(persistence.clear_all(&PRESERVED_KEYS), 2);
        assert!(persistence.load::<u32>().is_none());
    }
}
