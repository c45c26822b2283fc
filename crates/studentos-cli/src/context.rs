//! Shared plumbing for the command handlers: opening the store and parsing
//! the loosely typed values accepted on the command line.

use std::error::Error;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use studentos_core::model::parse_enum;
use studentos_core::storage::codec::parse_date_time;
use studentos_core::{Config, DataStore, Persistence, SqliteBlobStore};

pub type CliResult = Result<(), Box<dyn Error>>;

/// Open and hydrate the store configured in `config`.
pub fn open_store(config: &Config) -> Result<DataStore, Box<dyn Error>> {
    let db = SqliteBlobStore::open_default(&config.storage.database_file)?;
    let persistence = Persistence::with_key(Box::new(db), config.storage.blob_key.clone());
    Ok(DataStore::open(persistence))
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM[:SS]` in local time, or a bare
/// `YYYY-MM-DD` (local midnight).
pub fn parse_when(text: &str) -> Result<DateTime<Utc>, String> {
    if let Some(at) = parse_date_time(text) {
        return Ok(at);
    }
    let naive = chrono::NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| format!("unrecognized date: {text}"))?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|at| at.with_timezone(&Utc))
        .ok_or_else(|| format!("date does not exist in the local time zone: {text}"))
}

/// Parse a lowercase wire name for one of the model enums.
pub fn parse_choice<T: DeserializeOwned>(field: &str, value: &str) -> Result<T, String> {
    parse_enum(field, value).map_err(|e| e.to_string())
}

/// Comma-separated weekday indices, 0 = Sunday.
pub fn parse_weekdays(text: &str) -> Result<std::collections::BTreeSet<u8>, String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| match s.parse::<u8>() {
            Ok(day) if day <= 6 => Ok(day),
            _ => Err(format!("invalid weekday '{s}', expected 0-6")),
        })
        .collect()
}

/// A `key=value` assignment. The value is read as JSON when it parses,
/// otherwise as a plain string.
pub fn parse_assignment(text: &str) -> Result<(String, Value), String> {
    let (key, raw) = text
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{text}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{text}'"));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}
