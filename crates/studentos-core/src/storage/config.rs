//! TOML-based application configuration.
//!
//! Covers wiring only:
//! - Where the snapshot lives (blob key, database file)
//! - Reminder tick interval and due-soon window
//! - Log level
//! - Contest feed endpoint
//!
//! Configuration is stored at `~/.config/studentos/config.toml`. The user's
//! in-app settings live in the snapshot, not here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::data_dir;
use super::database::DEFAULT_DATABASE_FILE;
use super::persistence::DEFAULT_BLOB_KEY;
use crate::error::{ConfigError, CoreError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_blob_key")]
    pub blob_key: String,
    #[serde(default = "default_database_file")]
    pub database_file: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemindersConfig {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_due_soon_minutes")]
    pub due_soon_minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedsConfig {
    #[serde(default = "default_codeforces_base_url")]
    pub codeforces_base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_upcoming_limit")]
    pub upcoming_limit: usize,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/studentos/config.toml`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub reminders: RemindersConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub feeds: FeedsConfig,
}

// Default functions
fn default_blob_key() -> String {
    DEFAULT_BLOB_KEY.into()
}
fn default_database_file() -> String {
    DEFAULT_DATABASE_FILE.into()
}
fn default_interval_secs() -> u64 {
    60
}
fn default_due_soon_minutes() -> i64 {
    90
}
fn default_log_level() -> String {
    "info".into()
}
fn default_codeforces_base_url() -> String {
    "https://codeforces.com/api/".into()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_upcoming_limit() -> usize {
    5
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            blob_key: default_blob_key(),
            database_file: default_database_file(),
        }
    }
}

impl Default for RemindersConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            due_soon_minutes: default_due_soon_minutes(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            codeforces_base_url: default_codeforces_base_url(),
            timeout_secs: default_timeout_secs(),
            upcoming_limit: default_upcoming_limit(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(root: &'a Value, key: &str) -> Option<&'a Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(root: &mut Value, key: &str, value: &str) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    Value::Bool(_) => Value::Bool(value.parse::<bool>().map_err(|e| invalid(e.to_string()))?),
                    Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<i64>() {
                            Value::Number(n.into())
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    Value::Object(_) | Value::Array(_) => {
                        return Err(invalid("expected a leaf key, not a section".into()));
                    }
                    _ => Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Path of the config file in the data directory.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created.
    pub fn path() -> Result<PathBuf, CoreError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the data directory, writing defaults when the file is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, CoreError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults when the file is absent.
    ///
    /// # Errors
    /// Same as [`Config::load`].
    pub fn load_from(path: &Path) -> Result<Self, CoreError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), CoreError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    /// Same as [`Config::save`].
    pub fn save_to(&self, path: &Path) -> Result<(), CoreError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key, in memory only.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit
    /// the field's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_default_values() {
        let cfg = Config::default();
        assert_eq!(cfg.storage.blob_key, "studentos_data");
        assert_eq!(cfg.storage.database_file, "studentos.db");
        assert_eq!(cfg.reminders.interval_secs, 60);
        assert_eq!(cfg.reminders.due_soon_minutes, 90);
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.feeds.timeout_secs, 10);
        assert_eq!(cfg.feeds.upcoming_limit, 5);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let cfg: Config = toml::from_str("[reminders]\ninterval_secs = 5\n").unwrap();
        assert_eq!(cfg.reminders.interval_secs, 5);
        assert_eq!(cfg.reminders.due_soon_minutes, 90);
        assert_eq!(cfg.storage, StorageConfig::default());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("reminders.interval_secs").as_deref(), Some("60"));
        assert_eq!(cfg.get("logging.level").as_deref(), Some("info"));
        assert!(cfg.get("reminders.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_number_and_string() {
        let mut cfg = Config::default();
        cfg.set("reminders.interval_secs", "30").unwrap();
        cfg.set("logging.level", "debug").unwrap();
        assert_eq!(cfg.reminders.interval_secs, 30);
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        let err = cfg.set("reminders.nonexistent_key", "1").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKey(_)));
        assert!(cfg.set("", "1").is_err());
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        let err = cfg.set("reminders.interval_secs", "soon").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        // negative value does not fit an unsigned field
        assert!(cfg.set("feeds.timeout_secs", "-1").is_err());
        assert_eq!(cfg.feeds.timeout_secs, 10);
    }

    #[test]
    fn set_rejects_section() {
        let mut cfg = Config::default();
        assert!(cfg.set("reminders", "1").is_err());
    }

    #[test]
    fn load_from_writes_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());

        let mut changed = cfg.clone();
        changed.set("feeds.upcoming_limit", "3").unwrap();
        changed.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().feeds.upcoming_limit, 3);
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "reminders = [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(CoreError::Config(ConfigError::LoadFailed { .. }))
        ));
    }
}
