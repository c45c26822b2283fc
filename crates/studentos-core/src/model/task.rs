use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Assignment,
    Quiz,
    Exam,
    Upsolve,
    Chore,
    Todo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Academic,
    Career,
    Life,
    #[default]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Multiplier used by the workload score.
    pub fn weight(&self) -> f64 {
        match self {
            Priority::Low => 1.0,
            Priority::Medium => 2.0,
            Priority::High => 3.0,
            Priority::Critical => 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    /// Missing on older blobs; loads as `Other`.
    #[serde(default)]
    pub category: TaskCategory,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: bool,
    /// Present only while `completed` is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contest_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Incomplete with a due date strictly before `now`.
    pub fn is_overdue(&self, now: &DateTime<Utc>) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < *now)
    }
}

/// Fields a caller supplies when adding a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    #[serde(default)]
    pub category: TaskCategory,
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub course_id: Option<String>,
    #[serde(default)]
    pub contest_id: Option<String>,
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    #[serde(default)]
    pub attachment_url: Option<String>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, task_type: TaskType, priority: Priority) -> Self {
        Self {
            title: title.into(),
            description: None,
            task_type,
            category: TaskCategory::default(),
            priority,
            due_date: None,
            completed: false,
            course_id: None,
            contest_id: None,
            estimated_hours: None,
            attachment_url: None,
        }
    }

    pub fn due(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn hours(mut self, hours: f64) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    pub(crate) fn into_task(self, id: String, created_at: DateTime<Utc>) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            task_type: self.task_type,
            category: self.category,
            priority: self.priority,
            due_date: self.due_date,
            completed: self.completed,
            completed_at: self.completed.then_some(created_at),
            course_id: self.course_id,
            contest_id: self.contest_id,
            estimated_hours: self.estimated_hours,
            attachment_url: self.attachment_url,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn task_without_category_defaults_to_other() {
        let json = r#"{
            "id": "1", "title": "Lab report", "type": "assignment",
            "priority": "high", "completed": false,
            "createdAt": "2024-03-01T10:00:00.000Z"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.category, TaskCategory::Other);
        assert!(task.due_date.is_none());
    }

    #[test]
    fn overdue_requires_incomplete_and_past_due() {
        let now = Utc::now();
        let mut task = TaskDraft::new("Quiz prep", TaskType::Quiz, Priority::Low)
            .due(now - Duration::hours(1))
            .into_task("t1".into(), now);
        assert!(task.is_overdue(&now));
        task.completed = true;
        assert!(!task.is_overdue(&now));
    }

    #[test]
    fn priority_weights_escalate() {
        assert_eq!(Priority::Low.weight(), 1.0);
        assert_eq!(Priority::Critical.weight(), 4.0);
        assert!(Priority::High > Priority::Medium);
    }
}
