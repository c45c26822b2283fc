use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::null_as_default;

/// Attendance threshold applied when a course does not set one.
pub const DEFAULT_MIN_ATTENDANCE: u32 = 75;

fn default_min_attendance() -> u32 {
    DEFAULT_MIN_ATTENDANCE
}

/// Accepts `null` and fractional percentages; anything unusable falls back
/// to the default threshold.
fn min_attendance_or_default<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let percent = Option::<f64>::deserialize(deserializer)?;
    Ok(percent
        .filter(|p| p.is_finite() && *p >= 0.0)
        .map_or(DEFAULT_MIN_ATTENDANCE, |p| p.round().min(100.0) as u32))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseType {
    Core,
    Elective,
}

/// A weekly class slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSchedule {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub location: String,
}

/// One line of the append-only attendance log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    pub date: DateTime<Utc>,
    pub present: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub name: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub course_type: Option<CourseType>,
    /// Percentage threshold the course must stay at or above.
    #[serde(default = "default_min_attendance", deserialize_with = "min_attendance_or_default")]
    pub min_attendance: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub schedule: Vec<ClassSchedule>,
    /// Older blobs may lack this field; it loads as an empty log.
    #[serde(default, deserialize_with = "null_as_default")]
    pub attendance_records: Vec<AttendanceEntry>,
    /// Free-text "don't forget" note shown on the course card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dont_forget: Option<String>,
}

impl Course {
    /// Number of classes marked present.
    pub fn attended(&self) -> u32 {
        let present = self.attendance_records.iter().filter(|r| r.present).count();
        u32::try_from(present).unwrap_or(u32::MAX)
    }

    /// Number of classes recorded.
    pub fn total(&self) -> u32 {
        u32::try_from(self.attendance_records.len()).unwrap_or(u32::MAX)
    }
}

/// Fields a caller supplies when adding a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDraft {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub instructor: Option<String>,
    #[serde(default)]
    pub credits: Option<u32>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(rename = "type", default)]
    pub course_type: Option<CourseType>,
    #[serde(default = "default_min_attendance", deserialize_with = "min_attendance_or_default")]
    pub min_attendance: u32,
    #[serde(default)]
    pub schedule: Vec<ClassSchedule>,
    #[serde(default)]
    pub dont_forget: Option<String>,
}

impl CourseDraft {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            instructor: None,
            credits: None,
            color: None,
            course_type: None,
            min_attendance: DEFAULT_MIN_ATTENDANCE,
            schedule: Vec::new(),
            dont_forget: None,
        }
    }

    pub(crate) fn into_course(self, id: String) -> Course {
        Course {
            id,
            name: self.name,
            code: self.code,
            instructor: self.instructor,
            credits: self.credits,
            color: self.color,
            course_type: self.course_type,
            min_attendance: self.min_attendance,
            schedule: self.schedule,
            attendance_records: Vec::new(),
            dont_forget: self.dont_forget,
        }
    }
}
