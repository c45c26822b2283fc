//! Shallow partial updates for store records.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::storage::codec::revive_dates;

/// A set of top-level fields to overwrite on a record, keyed by their wire
/// (camelCase) names. A `null` value removes an optional field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch(Map<String, Value>);

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object. Date-time strings are normalized the same way
    /// a stored snapshot is.
    pub fn from_json(text: &str) -> Result<Self, ValidationError> {
        let mut value: Value =
            serde_json::from_str(text).map_err(|e| ValidationError::MalformedPatch(e.to_string()))?;
        revive_dates(&mut value);
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ValidationError::MalformedPatch(format!("got {other}"))),
        }
    }

    /// Builder-style field setter.
    pub fn set(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.0.insert(field.to_string(), value.into());
        self
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overlay this patch on `record`, skipping `protected` fields.
    ///
    /// The record is untouched when the result no longer deserializes.
    pub(crate) fn apply<T>(&self, record: &T, entity: &'static str, protected: &[&str]) -> Result<T, ValidationError>
    where
        T: Serialize + DeserializeOwned,
    {
        let invalid = |e: serde_json::Error| ValidationError::InvalidPatch {
            entity,
            message: e.to_string(),
        };

        let mut fields = match serde_json::to_value(record).map_err(invalid)? {
            Value::Object(map) => map,
            _ => {
                return Err(ValidationError::InvalidPatch {
                    entity,
                    message: "record is not an object".into(),
                })
            }
        };

        for (field, value) in &self.0 {
            if protected.contains(&field.as_str()) {
                continue;
            }
            if value.is_null() {
                fields.remove(field);
            } else {
                fields.insert(field.clone(), value.clone());
            }
        }

        serde_json::from_value(Value::Object(fields)).map_err(invalid)
    }
}

impl From<Map<String, Value>> for Patch {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, Task, TaskDraft, TaskType};
    use chrono::Utc;

    fn task() -> Task {
        TaskDraft::new("Essay", TaskType::Assignment, Priority::Low).into_task("t1".into(), Utc::now())
    }

    #[test]
    fn only_given_fields_change() {
        let original = task();
        let patched = Patch::new()
            .set("priority", "critical")
            .apply(&original, "task", &["id"])
            .unwrap();
        assert_eq!(patched.priority, Priority::Critical);
        assert_eq!(patched.title, original.title);
        assert_eq!(patched.created_at, original.created_at);
    }

    #[test]
    fn protected_fields_are_ignored() {
        let patched = Patch::new().set("id", "other").apply(&task(), "task", &["id"]).unwrap();
        assert_eq!(patched.id, "t1");
    }

    #[test]
    fn null_clears_optional_field() {
        let mut original = task();
        original.description = Some("draft".into());
        let patched = Patch::new()
            .set("description", Value::Null)
            .apply(&original, "task", &[])
            .unwrap();
        assert!(patched.description.is_none());
    }

    #[test]
    fn ill_typed_patch_is_rejected() {
        let err = Patch::new().set("priority", "urgent").apply(&task(), "task", &[]).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidPatch { entity: "task", .. }));
        // required field cannot be removed
        assert!(Patch::new().set("title", Value::Null).apply(&task(), "task", &[]).is_err());
    }

    #[test]
    fn from_json_requires_object() {
        assert!(Patch::from_json(r#"{"completed":true}"#).unwrap().contains("completed"));
        assert!(matches!(Patch::from_json("[1]"), Err(ValidationError::MalformedPatch(_))));
        assert!(matches!(Patch::from_json("{"), Err(ValidationError::MalformedPatch(_))));
    }
}
