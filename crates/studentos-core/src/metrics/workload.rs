//! "Brain bandwidth": a capped workload score over the coming week.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::model::{Contest, Course, Event, Habit, Task, TaskType};

/// Ceiling of the score.
pub const MAX_LOAD: f64 = 100.0;

const CLASS_POINTS: f64 = 2.0;
const CONTEST_POINTS: f64 = 3.0;
const HABIT_POINTS: f64 = 1.0;
const EVENT_POINTS: f64 = 2.0;
const DEFAULT_TASK_HOURS: f64 = 2.0;
const WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LoadBreakdown {
    pub classes: f64,
    pub assignments: f64,
    pub exams: f64,
    pub contests: f64,
    pub habits: f64,
    pub events: f64,
}

impl LoadBreakdown {
    pub fn sum(&self) -> f64 {
        self.classes + self.assignments + self.exams + self.contests + self.habits + self.events
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrainBandwidth {
    pub total_load: f64,
    pub max_load: f64,
    pub breakdown: LoadBreakdown,
}

fn in_window(at: &DateTime<Utc>, now: &DateTime<Utc>, end: &DateTime<Utc>) -> bool {
    at > now && at < end
}

/// Score the next seven days, exclusive of `now` and of `now + 7d`.
///
/// Courses and habits count in full; tasks, events and contests only when
/// they land inside the window. Exams are tallied apart from other tasks.
pub fn brain_bandwidth(
    tasks: &[Task],
    events: &[Event],
    contests: &[Contest],
    habits: &[Habit],
    courses: &[Course],
    now: DateTime<Utc>,
) -> BrainBandwidth {
    let end = now + Duration::days(WINDOW_DAYS);

    let mut breakdown = LoadBreakdown {
        classes: courses.len() as f64 * CLASS_POINTS,
        habits: habits.len() as f64 * HABIT_POINTS,
        ..LoadBreakdown::default()
    };

    breakdown.events = events
        .iter()
        .filter(|e| in_window(&e.start_time, &now, &end))
        .count() as f64
        * EVENT_POINTS;

    breakdown.contests = contests
        .iter()
        .filter(|c| !c.participated && in_window(&c.start_time, &now, &end))
        .count() as f64
        * CONTEST_POINTS;

    for task in tasks.iter().filter(|t| !t.completed) {
        let Some(due) = task.due_date else { continue };
        if !in_window(&due, &now, &end) {
            continue;
        }
        let load = task.priority.weight() * task.estimated_hours.unwrap_or(DEFAULT_TASK_HOURS);
        match task.task_type {
            TaskType::Exam => breakdown.exams += load,
            TaskType::Assignment | TaskType::Quiz | TaskType::Upsolve | TaskType::Chore | TaskType::Todo => {
                breakdown.assignments += load
            }
        }
    }

    BrainBandwidth {
        total_load: breakdown.sum().min(MAX_LOAD),
        max_load: MAX_LOAD,
        breakdown,
    }
}
