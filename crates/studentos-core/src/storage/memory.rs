use std::collections::HashMap;

use super::BlobStore;
use crate::error::StorageError;

/// In-process blob store. `set_failing(true)` makes every call fail the way
/// a full or disabled backend would.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    entries: HashMap<String, String>,
    failing: bool,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.failing {
            return Err(StorageError::Unavailable("memory store disabled".into()));
        }
        Ok(())
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        self.check()?;
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failing_store_rejects_everything() {
        let mut store = MemoryBlobStore::new();
        store.write("k", "v").unwrap();
        store.set_failing(true);
        assert!(matches!(store.read("k"), Err(StorageError::Unavailable(_))));
        assert!(store.write("k", "w").is_err());
        store.set_failing(false);
        assert_eq!(store.read("k").unwrap().as_deref(), Some("v"));
    }
}
