use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::null_as_default;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitFrequency {
    #[default]
    Daily,
    Weekly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitCategory {
    Health,
    Career,
    Academic,
    Life,
}

/// A recurring habit with derived streak counters.
///
/// `current_streak` and `longest_streak` change only through
/// `DataStore::mark_habit_complete`; `longest_streak >= current_streak`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub frequency: HabitFrequency,
    /// Weekday indices (0 = Sunday) for weekly habits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_days: Option<BTreeSet<u8>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_streak: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub longest_streak: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed_dates: Vec<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<HabitCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub frequency: HabitFrequency,
    #[serde(default)]
    pub target_days: Option<BTreeSet<u8>>,
    #[serde(default)]
    pub category: Option<HabitCategory>,
}

impl HabitDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            icon: String::new(),
            color: String::new(),
            frequency: HabitFrequency::Daily,
            target_days: None,
            category: None,
        }
    }

    pub(crate) fn into_habit(self, id: String) -> Habit {
        Habit {
            id,
            name: self.name,
            description: self.description,
            icon: self.icon,
            color: self.color,
            frequency: self.frequency,
            target_days: self.target_days,
            current_streak: 0,
            longest_streak: 0,
            completed_dates: Vec::new(),
            category: self.category,
        }
    }
}
