//! Study tracks, goals and the per-day activity log behind the heatmap.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackType {
    Cp,
    Ml,
    Web,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyTrack {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub track_type: TrackType,
    pub total_items: u32,
    #[serde(default)]
    pub completed_items: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyTrackDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub track_type: TrackType,
    pub total_items: u32,
    #[serde(default)]
    pub link: Option<String>,
}

impl StudyTrackDraft {
    pub(crate) fn into_track(self, id: String) -> StudyTrack {
        StudyTrack {
            id,
            name: self.name,
            description: self.description,
            track_type: self.track_type,
            total_items: self.total_items,
            completed_items: 0,
            link: self.link,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    Daily,
    Weekly,
    Monthly,
    Annual,
    Vacation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub goal_type: GoalType,
    pub target_value: f64,
    #[serde(default)]
    pub current_value: f64,
    pub unit: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub goal_type: GoalType,
    pub target_value: f64,
    pub unit: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl GoalDraft {
    pub(crate) fn into_goal(self, id: String) -> Goal {
        Goal {
            id,
            title: self.title,
            description: self.description,
            goal_type: self.goal_type,
            target_value: self.target_value,
            current_value: 0.0,
            unit: self.unit,
            start_date: self.start_date,
            end_date: self.end_date,
            completed: false,
        }
    }
}

/// Activity tallies for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakLog {
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub activity_count: u32,
    #[serde(default)]
    pub tasks_completed: u32,
    #[serde(default)]
    pub classes_attended: u32,
    #[serde(default)]
    pub habits_completed: u32,
    #[serde(default)]
    pub problems_solved: u32,
}
