//! JSON encoding of the store snapshot with date revival.
//!
//! The blob has no date type, so on load every string that starts like an
//! ISO-8601 date-time (`YYYY-MM-DDTHH:MM:SS`) is rewritten into canonical
//! UTC form before typed deserialization. The walk is schema-blind: a free
//! text field holding such a string is normalized too (for example
//! `"2024-03-03T10:00:00Z"` comes back as `"2024-03-03T10:00:00.000Z"`).
//! Strings that match the prefix but do not parse are left untouched.

use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::{self, DeserializeOwned, Deserializer, Visitor};
use serde::Serialize;
use serde_json::Value;

static ISO_DATE_TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}").expect("valid ISO date-time regex"));

const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parse a date-time string. Text without an offset is local wall time.
pub fn parse_date_time(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(text, NAIVE_FORMAT).ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

fn canonical(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Rewrite every ISO-looking string in `value` to canonical UTC, in place.
pub fn revive_dates(value: &mut Value) {
    match value {
        Value::String(text) => {
            if ISO_DATE_TIME.is_match(text) {
                if let Some(at) = parse_date_time(text) {
                    *text = canonical(&at);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(revive_dates),
        Value::Object(map) => map.values_mut().for_each(revive_dates),
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

/// Serialize a snapshot to its blob text.
pub fn encode<T: Serialize>(state: &T) -> serde_json::Result<String> {
    serde_json::to_string(state)
}

/// Parse blob text, revive dates, then deserialize.
pub fn decode<T: DeserializeOwned>(text: &str) -> serde_json::Result<T> {
    let mut value: Value = serde_json::from_str(text)?;
    revive_dates(&mut value);
    serde_json::from_value(value)
}

/// Deserialize a timestamp written as RFC 3339 text, offset-less local
/// text, a bare `YYYY-MM-DD` date (midnight UTC) or epoch milliseconds.
pub fn deserialize_flexible_datetime<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    struct FlexibleVisitor;

    impl Visitor<'_> for FlexibleVisitor {
        type Value = DateTime<Utc>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a date-time string, a date or epoch milliseconds")
        }

        fn visit_str<E: de::Error>(self, text: &str) -> Result<Self::Value, E> {
            if let Some(at) = parse_date_time(text) {
                return Ok(at);
            }
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| Utc.from_utc_datetime(&naive))
                .ok_or_else(|| E::custom(format!("unrecognized date-time: {text}")))
        }

        fn visit_i64<E: de::Error>(self, millis: i64) -> Result<Self::Value, E> {
            DateTime::from_timestamp_millis(millis).ok_or_else(|| E::custom(format!("timestamp out of range: {millis}")))
        }

        fn visit_u64<E: de::Error>(self, millis: u64) -> Result<Self::Value, E> {
            let millis = i64::try_from(millis).map_err(|_| E::custom("timestamp out of range"))?;
            self.visit_i64(millis)
        }

        fn visit_f64<E: de::Error>(self, millis: f64) -> Result<Self::Value, E> {
            if !millis.is_finite() {
                return Err(E::custom(format!("timestamp is not a finite number: {millis}")));
            }
            self.visit_i64(millis.round() as i64)
        }
    }

    deserializer.deserialize_any(FlexibleVisitor)
}
