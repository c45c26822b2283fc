use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Global,
    Personal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Fest,
    Talk,
    Exam,
    Viva,
    Presentation,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub category: EventCategory,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub is_all_day: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub category: EventCategory,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub is_all_day: bool,
}

impl EventDraft {
    pub fn new(
        title: impl Into<String>,
        category: EventCategory,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            description: None,
            event_type: EventType::Personal,
            category,
            start_time,
            end_time,
            location: None,
            is_all_day: false,
        }
    }

    pub(crate) fn into_event(self, id: String) -> Event {
        Event {
            id,
            title: self.title,
            description: self.description,
            event_type: self.event_type,
            category: self.category,
            start_time: self.start_time,
            end_time: self.end_time,
            location: self.location,
            is_all_day: self.is_all_day,
        }
    }
}
