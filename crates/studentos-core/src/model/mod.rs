//! Domain records owned by the data store.
//!
//! Field names serialize in camelCase and enums in lowercase so the
//! persisted blob keeps the same shape the dashboard has always written.

mod contest;
mod course;
mod event;
mod habit;
mod notification;
mod progress;
mod settings;
mod task;
mod timetable;

pub use contest::{Contest, ContestDraft, Platform};
pub use course::{AttendanceEntry, ClassSchedule, Course, CourseDraft, CourseType, DEFAULT_MIN_ATTENDANCE};
pub use event::{Event, EventCategory, EventDraft, EventType};
pub use habit::{Habit, HabitCategory, HabitDraft, HabitFrequency};
pub use notification::{Notification, NotificationDraft, NotificationKind, MAX_NOTIFICATIONS};
pub use progress::{Goal, GoalDraft, GoalType, StreakLog, StudyTrack, StudyTrackDraft, TrackType};
pub use settings::{
    BacklogTone, HealthTargets, Intensity, LaundryPlan, ModuleVisibility, NotificationPreferences,
    QuietHours, SettingsPatch, Theme, UserSettings,
};
pub use task::{Priority, Task, TaskCategory, TaskDraft, TaskType};
pub use timetable::{SessionType, TimetableDraft, TimetableEntry, TimetableSlot, TIMETABLE_SLOTS};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::error::ValidationError;

/// Reads an explicit `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A record addressed by an opaque string ID.
pub trait Identified {
    fn id(&self) -> &str;
}

macro_rules! identified {
    ($($ty:ty),* $(,)?) => {
        $(impl Identified for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })*
    };
}

identified!(Course, Task, Habit, Event, Contest, Notification, TimetableEntry, StudyTrack, Goal);

/// Parse a lowercase wire name (`"exam"`, `"savage"`) into one of the model enums.
pub fn parse_enum<T: DeserializeOwned>(field: &str, value: &str) -> Result<T, ValidationError> {
    serde_json::from_value(serde_json::Value::String(value.trim().to_lowercase())).map_err(|e| {
        ValidationError::InvalidValue {
            field: field.to_string(),
            message: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_enum_accepts_wire_names() {
        let tone: BacklogTone = parse_enum("tone", "Savage").unwrap();
        assert_eq!(tone, BacklogTone::Savage);
        let kind: TaskType = parse_enum("type", "exam").unwrap();
        assert_eq!(kind, TaskType::Exam);
    }

    #[test]
    fn parse_enum_rejects_unknown_value() {
        let err = parse_enum::<Priority>("priority", "urgent").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { ref field, .. } if field == "priority"));
    }
}
