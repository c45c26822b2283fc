//! Merged view of tasks, events and contests on a single timeline.
//!
//! Feeds both the dashboard's "upcoming" list and the same-day overload
//! detector.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use crate::calendar::{calendar_days_between, day_of, floor_days_between};
use crate::model::{Contest, Event, EventCategory, Platform, Priority, Task};

/// Dashboard list length.
pub const DEFAULT_UPCOMING_LIMIT: usize = 8;

/// More than this many items on one date is an overload.
const OVERLOAD_THRESHOLD: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum UpcomingItem {
    Task {
        title: String,
        date: DateTime<Utc>,
        priority: Priority,
    },
    Event {
        title: String,
        date: DateTime<Utc>,
        category: EventCategory,
    },
    Contest {
        title: String,
        date: DateTime<Utc>,
        platform: Platform,
    },
}

impl UpcomingItem {
    pub fn title(&self) -> &str {
        match self {
            UpcomingItem::Task { title, .. }
            | UpcomingItem::Event { title, .. }
            | UpcomingItem::Contest { title, .. } => title,
        }
    }

    pub fn date(&self) -> DateTime<Utc> {
        match self {
            UpcomingItem::Task { date, .. }
            | UpcomingItem::Event { date, .. }
            | UpcomingItem::Contest { date, .. } => *date,
        }
    }
}

/// Incomplete dated tasks, every event, and contests not yet taken part in.
pub fn schedule_items(tasks: &[Task], events: &[Event], contests: &[Contest]) -> Vec<UpcomingItem> {
    let tasks = tasks.iter().filter(|t| !t.completed).filter_map(|t| {
        t.due_date.map(|date| UpcomingItem::Task {
            title: t.title.clone(),
            date,
            priority: t.priority,
        })
    });
    let events = events.iter().map(|e| UpcomingItem::Event {
        title: e.title.clone(),
        date: e.start_time,
        category: e.category,
    });
    let contests = contests.iter().filter(|c| !c.participated).map(|c| UpcomingItem::Contest {
        title: c.name.clone(),
        date: c.start_time,
        platform: c.platform,
    });
    tasks.chain(events).chain(contests).collect()
}

/// Items dated at or after `now`, soonest first, at most `limit`.
pub fn upcoming_items(
    tasks: &[Task],
    events: &[Event],
    contests: &[Contest],
    now: &DateTime<Utc>,
    limit: usize,
) -> Vec<UpcomingItem> {
    let mut items: Vec<UpcomingItem> = schedule_items(tasks, events, contests)
        .into_iter()
        .filter(|item| item.date() >= *now)
        .collect();
    items.sort_by_key(UpcomingItem::date);
    items.truncate(limit);
    items
}

/// "Today", "Tomorrow", "In N days" within a week, else "Mar 4".
pub fn date_label<Tz: TimeZone>(date: &DateTime<Utc>, now: &DateTime<Tz>) -> String {
    let tz = now.timezone();
    let now_utc = now.with_timezone(&Utc);
    let day = day_of(date, &tz);
    match calendar_days_between(day_of(&now_utc, &tz), day) {
        0 => return "Today".to_string(),
        1 => return "Tomorrow".to_string(),
        _ => {}
    }
    let days = floor_days_between(&now_utc, date);
    if days <= 7 {
        format!("In {days} days")
    } else {
        day.format("%b %-d").to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictKind {
    Overload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    #[serde(rename = "type")]
    pub kind: ConflictKind,
    pub items: Vec<String>,
    pub date: NaiveDate,
}

/// Calendar dates after `now` carrying more than two items, in date order.
///
/// Dates are compared in `now`'s time zone, ignoring time of day.
pub fn detect_conflicts<Tz: TimeZone>(
    tasks: &[Task],
    events: &[Event],
    contests: &[Contest],
    now: &DateTime<Tz>,
) -> Vec<Conflict> {
    let tz = now.timezone();
    let now_utc = now.with_timezone(&Utc);

    let mut by_date: BTreeMap<NaiveDate, Vec<String>> = BTreeMap::new();
    for item in schedule_items(tasks, events, contests) {
        if item.date() > now_utc {
            by_date
                .entry(day_of(&item.date(), &tz))
                .or_default()
                .push(item.title().to_string());
        }
    }

    by_date
        .into_iter()
        .filter(|(_, items)| items.len() > OVERLOAD_THRESHOLD)
        .map(|(date, items)| Conflict {
            kind: ConflictKind::Overload,
            items,
            date,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContestDraft, EventDraft, TaskDraft, TaskType};
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap()
    }

    fn task_due(title: &str, due: DateTime<Utc>) -> Task {
        TaskDraft::new(title, TaskType::Assignment, Priority::High)
            .due(due)
            .into_task(title.into(), now())
    }

    fn event_at(title: &str, at: DateTime<Utc>) -> Event {
        EventDraft::new(title, EventCategory::Talk, at, at + Duration::hours(1)).into_event(title.into())
    }

    fn contest_at(title: &str, at: DateTime<Utc>) -> Contest {
        ContestDraft::new(title, Platform::Codeforces, at, 120).into_contest(title.into())
    }

    #[test]
    fn three_items_on_one_day_conflict() {
        let day = now() + Duration::days(2);
        let conflicts = detect_conflicts(
            &[task_due("Essay", day)],
            &[event_at("Guest talk", day + Duration::hours(3))],
            &[contest_at("Div 2", day + Duration::hours(8))],
            &now(),
        );
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::Overload);
        assert_eq!(conflicts[0].items, vec!["Essay", "Guest talk", "Div 2"]);
        assert_eq!(conflicts[0].date, day.date_naive());
    }

    #[test]
    fn two_items_do_not_conflict() {
        let day = now() + Duration::days(2);
        let conflicts = detect_conflicts(&[task_due("Essay", day)], &[event_at("Talk", day)], &[], &now());
        assert!(conflicts.is_empty());
    }

    #[test]
    fn past_completed_and_participated_items_are_ignored() {
        let day = now() + Duration::days(1);
        let mut done = task_due("Done", day);
        done.completed = true;
        let mut sat = contest_at("Sat", day);
        sat.participated = true;
        let conflicts = detect_conflicts(
            &[done, task_due("Open", day), task_due("Past", now() - Duration::hours(1))],
            &[event_at("Talk", day)],
            &[sat],
            &now(),
        );
        assert!(conflicts.is_empty());
    }

    #[test]
    fn conflicts_come_out_in_date_order() {
        let d1 = now() + Duration::days(5);
        let d2 = now() + Duration::days(1);
        let events: Vec<Event> = ["a", "b", "c"]
            .iter()
            .flat_map(|t| [event_at(&format!("{t}1"), d1), event_at(&format!("{t}2"), d2)])
            .collect();
        let conflicts = detect_conflicts(&[], &events, &[], &now());
        assert_eq!(conflicts.len(), 2);
        assert!(conflicts[0].date < conflicts[1].date);
    }

    #[test]
    fn upcoming_sorted_and_limited() {
        let items = upcoming_items(
            &[task_due("Later", now() + Duration::days(3))],
            &[event_at("Soon", now() + Duration::hours(2))],
            &[contest_at("Gone", now() - Duration::hours(2))],
            &now(),
            DEFAULT_UPCOMING_LIMIT,
        );
        let titles: Vec<&str> = items.iter().map(UpcomingItem::title).collect();
        assert_eq!(titles, vec!["Soon", "Later"]);
        assert!(matches!(items[0], UpcomingItem::Event { .. }));

        let limited = upcoming_items(
            &[task_due("Later", now() + Duration::days(3))],
            &[event_at("Soon", now() + Duration::hours(2))],
            &[],
            &now(),
            1,
        );
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn date_labels() {
        assert_eq!(date_label(&(now() + Duration::hours(3)), &now()), "Today");
        assert_eq!(date_label(&(now() + Duration::days(1)), &now()), "Tomorrow");
        assert_eq!(date_label(&(now() + Duration::days(4)), &now()), "In 4 days");
        assert_eq!(date_label(&(now() + Duration::days(20)), &now()), "Mar 24");
    }

    #[test]
    fn distant_date_label_uses_local_calendar_day() {
        let ist = chrono::FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let local_now = now().with_timezone(&ist);
        // 20:00 UTC on Mar 23 is already Mar 24 in IST.
        let due = Utc.with_ymd_and_hms(2024, 3, 23, 20, 0, 0).unwrap();
        assert_eq!(date_label(&due, &local_now), "Mar 24");
        assert_eq!(date_label(&due, &now()), "Mar 23");
    }
}
