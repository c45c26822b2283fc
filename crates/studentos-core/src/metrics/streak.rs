//! Habit streaks and the daily activity heatmap.

use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use crate::calendar::{calendar_days_between, day_of};
use crate::model::{Course, Habit, StreakLog, Task};

/// Days synthesized when no streak logs are stored.
pub const DERIVED_LOG_DAYS: u32 = 30;

/// Twelve weeks.
pub const GRID_DAYS: u32 = 84;

/// Consecutive calendar days ending at the most recent date.
///
/// Counting stops at the first step that is not exactly one day, so a
/// repeated date ends the streak like any other gap.
pub fn streak_from_dates<Tz: TimeZone>(dates: &[DateTime<Utc>], tz: &Tz) -> u32 {
    let mut days: Vec<NaiveDate> = dates.iter().map(|d| day_of(d, tz)).collect();
    if days.is_empty() {
        return 0;
    }
    days.sort_unstable_by(|a, b| b.cmp(a));

    let mut streak = 1;
    for pair in days.windows(2) {
        if calendar_days_between(pair[1], pair[0]) != 1 {
            break;
        }
        streak += 1;
    }
    streak
}

/// Per-day activity for the `days` days ending at `now`, newest first.
///
/// Counts tasks whose `completed_at` falls on the day, habits completed on
/// the day (once per habit) and classes attended on the day.
pub fn derive_streak_logs<Tz: TimeZone>(
    courses: &[Course],
    tasks: &[Task],
    habits: &[Habit],
    now: &DateTime<Tz>,
    days: u32,
) -> Vec<StreakLog> {
    let tz = now.timezone();
    let now_utc = now.with_timezone(&Utc);
    let on = |at: &DateTime<Utc>, day: NaiveDate| day_of(at, &tz) == day;

    (0..days)
        .map(|offset| {
            let date = now_utc - Duration::days(i64::from(offset));
            let day = day_of(&date, &tz);

            let tasks_completed = count(tasks.iter().filter(|t| t.completed_at.is_some_and(|at| on(&at, day))));
            let habits_completed = count(habits.iter().filter(|h| h.completed_dates.iter().any(|d| on(d, day))));
            let classes_attended = count(
                courses
                    .iter()
                    .flat_map(|c| c.attendance_records.iter())
                    .filter(|r| r.present && on(&r.date, day)),
            );

            StreakLog {
                date,
                activity_count: tasks_completed + habits_completed + classes_attended,
                tasks_completed,
                classes_attended,
                habits_completed,
                problems_solved: 0,
            }
        })
        .collect()
}

fn count<I: Iterator>(iter: I) -> u32 {
    u32::try_from(iter.count()).unwrap_or(u32::MAX)
}

/// Heatmap shade for an activity count, 0 (none) to 4 (busiest).
pub fn activity_level(count: u32) -> u8 {
    match count {
        0 => 0,
        1..=4 => 1,
        5..=9 => 2,
        10..=14 => 3,
        _ => 4,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub date: NaiveDate,
    pub count: u32,
    pub level: u8,
}

/// One cell per day for the `days` days ending today, oldest first.
///
/// When several logs share a date the last one in `logs` wins.
pub fn consistency_grid<Tz: TimeZone>(logs: &[StreakLog], now: &DateTime<Tz>, days: u32) -> Vec<GridCell> {
    let tz = now.timezone();
    let today = now.date_naive();

    let by_day: HashMap<NaiveDate, u32> = logs
        .iter()
        .map(|log| (day_of(&log.date, &tz), log.activity_count))
        .collect();

    (0..days)
        .rev()
        .filter_map(|back| today.checked_sub_days(chrono::Days::new(u64::from(back))))
        .map(|date| {
            let count = by_day.get(&date).copied().unwrap_or(0);
            GridCell {
                date,
                count,
                level: activity_level(count),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AttendanceEntry, CourseDraft, HabitDraft, Priority, TaskDraft, TaskType};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 18, 0, 0).unwrap()
    }

    fn days_ago(n: i64) -> DateTime<Utc> {
        now() - Duration::days(n)
    }

    #[test]
    fn three_consecutive_days() {
        assert_eq!(streak_from_dates(&[days_ago(1), now(), days_ago(2)], &Utc), 3);
    }

    #[test]
    fn gap_breaks_streak() {
        assert_eq!(streak_from_dates(&[now(), days_ago(3)], &Utc), 1);
        assert_eq!(streak_from_dates(&[], &Utc), 0);
    }

    #[test]
    fn consecutive_calendar_days_less_than_24h_apart_count() {
        let late = Utc.with_ymd_and_hms(2024, 3, 9, 23, 30, 0).unwrap();
        let early = Utc.with_ymd_and_hms(2024, 3, 10, 0, 15, 0).unwrap();
        assert_eq!(streak_from_dates(&[late, early], &Utc), 2);
    }

    #[test]
    fn same_day_duplicate_stops_streak() {
        assert_eq!(streak_from_dates(&[now(), now(), days_ago(1)], &Utc), 1);
    }

    #[test]
    fn derived_logs_count_each_source() {
        let mut task = TaskDraft::new("t", TaskType::Todo, Priority::Low).into_task("t".into(), days_ago(5));
        task.completed = true;
        task.completed_at = Some(days_ago(1));

        let mut habit = HabitDraft::new("Run").into_habit("h".into());
        habit.completed_dates = vec![days_ago(1), days_ago(1)];

        let mut course = CourseDraft::new("OS", "CS1").into_course("c".into());
        course.attendance_records = vec![
            AttendanceEntry { date: days_ago(1), present: true },
            AttendanceEntry { date: days_ago(1), present: false },
            AttendanceEntry { date: now(), present: true },
        ];

        let logs = derive_streak_logs(&[course], &[task], &[habit], &now(), DERIVED_LOG_DAYS);
        assert_eq!(logs.len(), 30);
        assert_eq!(logs[0].activity_count, 1);
        assert_eq!(logs[1].tasks_completed, 1);
        assert_eq!(logs[1].habits_completed, 1);
        assert_eq!(logs[1].classes_attended, 1);
        assert_eq!(logs[1].activity_count, 3);
        assert_eq!(logs[2].activity_count, 0);
    }

    #[test]
    fn grid_is_oldest_first_and_last_duplicate_wins() {
        let log = |date, activity_count| StreakLog {
            date,
            activity_count,
            tasks_completed: 0,
            classes_attended: 0,
            habits_completed: 0,
            problems_solved: 0,
        };
        let logs = vec![log(now(), 3), log(now(), 12), log(days_ago(83), 20)];
        let grid = consistency_grid(&logs, &now(), GRID_DAYS);
        assert_eq!(grid.len(), 84);
        assert_eq!(grid[0].date, days_ago(83).date_naive());
        assert_eq!(grid[0].level, 4);
        let last = grid.last().unwrap();
        assert_eq!(last.count, 12);
        assert_eq!(last.level, 3);
    }

    #[test]
    fn level_buckets() {
        assert_eq!(activity_level(0), 0);
        assert_eq!(activity_level(4), 1);
        assert_eq!(activity_level(5), 2);
        assert_eq!(activity_level(14), 3);
        assert_eq!(activity_level(15), 4);
    }
}
