//! SQLite-backed blob store.
//!
//! A single `kv` table holds the serialized store snapshot (and anything
//! else keyed under the `studentos_` prefix).

use std::path::Path;

use rusqlite::{params, Connection};

use super::{data_dir, BlobStore};
use crate::error::StorageError;

/// Database file name inside the data directory.
pub const DEFAULT_DATABASE_FILE: &str = "studentos.db";

pub struct SqliteBlobStore {
    conn: Connection,
}

impl SqliteBlobStore {
    /// Open `<data_dir>/<file_name>`, creating the file and schema if needed.
    ///
    /// # Errors
    /// Returns an error if the data directory or database cannot be opened.
    pub fn open_default(file_name: &str) -> Result<Self, StorageError> {
        Self::open(&data_dir()?.join(file_name))
    }

    /// Open the database at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if SQLite cannot allocate the database.
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }
}

impl BlobStore for SqliteBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT key FROM kv ORDER BY key")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut keys = Vec::new();
        for key in rows {
            keys.push(key?);
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_store() {
        let mut db = SqliteBlobStore::open_memory().unwrap();
        assert!(db.read("test").unwrap().is_none());
        db.write("test", "hello").unwrap();
        assert_eq!(db.read("test").unwrap().unwrap(), "hello");
        db.write("test", "again").unwrap();
        assert_eq!(db.read("test").unwrap().unwrap(), "again");
    }

    #[test]
    fn remove_and_keys() {
        let mut db = SqliteBlobStore::open_memory().unwrap();
        db.write("b", "2").unwrap();
        db.write("a", "1").unwrap();
        assert_eq!(db.keys().unwrap(), vec!["a", "b"]);
        db.remove("a").unwrap();
        db.remove("missing").unwrap();
        assert_eq!(db.keys().unwrap(), vec!["b"]);
    }

    #[test]
    fn file_backed_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_DATABASE_FILE);
        {
            let mut db = SqliteBlobStore::open(&path).unwrap();
            db.write("studentos_data", "{}").unwrap();
        }
        let db = SqliteBlobStore::open(&path).unwrap();
        assert_eq!(db.read("studentos_data").unwrap().as_deref(), Some("{}"));
    }
}
