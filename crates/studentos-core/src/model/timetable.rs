use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    Lecture,
    Tutorial,
    Lab,
    Other,
}

/// One cell of the weekly timetable. At most one entry per `(day, start)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableEntry {
    pub id: String,
    /// Weekday index, 0 = Sunday; the grid uses 1..=5.
    pub day: u8,
    /// `HH:MM`, 24h.
    pub start: String,
    pub end: String,
    pub title: String,
    #[serde(rename = "type")]
    pub session_type: SessionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,
}

impl TimetableEntry {
    pub fn occupies(&self, day: u8, start: &str) -> bool {
        self.day == day && self.start == start
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableDraft {
    pub day: u8,
    pub start: String,
    pub end: String,
    pub title: String,
    #[serde(rename = "type")]
    pub session_type: SessionType,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub course_id: Option<String>,
}

impl TimetableDraft {
    /// Draft for a slot of the fixed grid.
    pub fn for_slot(day: u8, slot: &TimetableSlot, title: impl Into<String>, session_type: SessionType) -> Self {
        Self {
            day,
            start: slot.start.to_string(),
            end: slot.end.to_string(),
            title: title.into(),
            session_type,
            location: None,
            course_id: None,
        }
    }

    pub(crate) fn into_entry(self, id: String) -> TimetableEntry {
        TimetableEntry {
            id,
            day: self.day,
            start: self.start,
            end: self.end,
            title: self.title,
            session_type: self.session_type,
            location: self.location,
            course_id: self.course_id,
        }
    }
}

/// A 90-minute block of the weekday grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimetableSlot {
    pub start: &'static str,
    pub end: &'static str,
}

/// 08:30 to 19:00 in 90-minute blocks, Monday (1) to Friday (5).
pub const TIMETABLE_SLOTS: [TimetableSlot; 7] = [
    TimetableSlot { start: "08:30", end: "10:00" },
    TimetableSlot { start: "10:00", end: "11:30" },
    TimetableSlot { start: "11:30", end: "13:00" },
    TimetableSlot { start: "13:00", end: "14:30" },
    TimetableSlot { start: "14:30", end: "16:00" },
    TimetableSlot { start: "16:00", end: "17:30" },
    TimetableSlot { start: "17:30", end: "19:00" },
];
