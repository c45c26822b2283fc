//! Time-based reminders for due tasks, upcoming events and the laundry loop.
//!
//! The scheduler has no thread of its own. The caller invokes
//! [`ReminderScheduler::tick`] once at startup and then on a fixed interval
//! (60 seconds by default), never overlapping two ticks.
//!
//! Which reminders already fired is kept in memory for the life of the
//! scheduler and never persisted. A restarted process therefore fires each
//! pending reminder once more; that is the accepted behavior.

use std::collections::HashSet;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::calendar::{calendar_days_between, day_of, next_occurrence};
use crate::model::{NotificationDraft, NotificationKind};
use crate::store::DataStore;

/// Default "due soon" window.
pub const DEFAULT_DUE_SOON_MINUTES: i64 = 90;

/// Receives transient toast messages. Rendering is up to the implementor.
pub trait ToastSink {
    fn toast(&mut self, title: &str, description: &str);
}

impl<F> ToastSink for F
where
    F: FnMut(&str, &str),
{
    fn toast(&mut self, title: &str, description: &str) {
        self(title, description)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ReminderKind {
    TaskDueSoon,
    TaskOverdue,
    EventUpcoming,
    LaundryDrop,
    LaundryPickup,
}

/// One reminder fired by a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reminder {
    pub kind: ReminderKind,
    /// Task or event ID, or `drop-YYYY-MM-DD` / `pickup-YYYY-MM-DD`.
    pub key: String,
    pub title: String,
    pub description: String,
}

/// Keys that already fired, one set per condition.
#[derive(Debug, Default)]
pub struct FiredReminders {
    task_soon: HashSet<String>,
    task_overdue: HashSet<String>,
    events: HashSet<String>,
    laundry: HashSet<String>,
}

impl FiredReminders {
    fn set_for(&mut self, kind: ReminderKind) -> &mut HashSet<String> {
        match kind {
            ReminderKind::TaskDueSoon => &mut self.task_soon,
            ReminderKind::TaskOverdue => &mut self.task_overdue,
            ReminderKind::EventUpcoming => &mut self.events,
            ReminderKind::LaundryDrop | ReminderKind::LaundryPickup => &mut self.laundry,
        }
    }

    /// Marks `key` for `kind`; false when it was already marked.
    fn claim(&mut self, kind: ReminderKind, key: &str) -> bool {
        self.set_for(kind).insert(key.to_string())
    }

    pub fn has_fired(&self, kind: ReminderKind, key: &str) -> bool {
        match kind {
            ReminderKind::TaskDueSoon => self.task_soon.contains(key),
            ReminderKind::TaskOverdue => self.task_overdue.contains(key),
            ReminderKind::EventUpcoming => self.events.contains(key),
            ReminderKind::LaundryDrop | ReminderKind::LaundryPickup => self.laundry.contains(key),
        }
    }

    pub fn len(&self) -> usize {
        self.task_soon.len() + self.task_overdue.len() + self.events.len() + self.laundry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A reminder about to fire, before it is claimed.
struct Pending {
    reminder: Reminder,
    notification: Option<NotificationDraft>,
}

pub struct ReminderScheduler {
    fired: FiredReminders,
    due_soon: Duration,
}

impl Default for ReminderScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl ReminderScheduler {
    pub fn new() -> Self {
        Self::with_due_soon_window(Duration::minutes(DEFAULT_DUE_SOON_MINUTES))
    }

    pub fn with_due_soon_window(due_soon: Duration) -> Self {
        Self {
            fired: FiredReminders::default(),
            due_soon,
        }
    }

    pub fn fired(&self) -> &FiredReminders {
        &self.fired
    }

    /// Scan the store against `now`, post notifications and toasts for every
    /// reminder not fired before, and return them in firing order.
    ///
    /// Does nothing while in-app notifications are switched off.
    pub fn tick<Tz: TimeZone>(
        &mut self,
        store: &mut DataStore,
        now: &DateTime<Tz>,
        toasts: &mut dyn ToastSink,
    ) -> Vec<Reminder> {
        if !store.settings().notification_preferences.in_app {
            debug!("in-app notifications disabled, skipping reminder tick");
            return Vec::new();
        }

        let tz = now.timezone();
        let now_utc = now.with_timezone(&Utc);
        let today = day_of(&now_utc, &tz);

        let mut pending = self.task_reminders(store, &now_utc);
        pending.extend(self.event_reminders(store, &tz, today));
        pending.extend(self.laundry_reminders(store, today));

        let mut fired = Vec::new();
        for Pending { reminder, notification } in pending {
            if !self.fired.claim(reminder.kind, &reminder.key) {
                continue;
            }
            info!(kind = ?reminder.kind, key = %reminder.key, "reminder fired");
            toasts.toast(&reminder.title, &reminder.description);
            if let Some(draft) = notification {
                store.add_notification(draft);
            }
            fired.push(reminder);
        }
        debug!(fired = fired.len(), "reminder tick complete");
        fired
    }

    fn task_reminders(&self, store: &DataStore, now: &DateTime<Utc>) -> Vec<Pending> {
        let minutes = self.due_soon.num_minutes();
        let mut pending = Vec::new();
        for task in store.tasks().iter().filter(|t| !t.completed) {
            let Some(due) = task.due_date else { continue };
            let left = due - *now;

            if left > Duration::zero()
                && left <= self.due_soon
                && !self.fired.has_fired(ReminderKind::TaskDueSoon, &task.id)
            {
                pending.push(Pending {
                    reminder: Reminder {
                        kind: ReminderKind::TaskDueSoon,
                        key: task.id.clone(),
                        title: format!("⏰ {}", task.title),
                        description: format!("Due within {minutes} minutes. Take action now."),
                    },
                    notification: Some(
                        NotificationDraft::new(
                            "Task due soon",
                            format!("{} is due within {minutes} minutes", task.title),
                            NotificationKind::Warning,
                        )
                        .link("/tasks"),
                    ),
                });
            }

            if left < Duration::zero() && !self.fired.has_fired(ReminderKind::TaskOverdue, &task.id) {
                pending.push(Pending {
                    reminder: Reminder {
                        kind: ReminderKind::TaskOverdue,
                        key: task.id.clone(),
                        title: format!("⚠️ {}", task.title),
                        description: "This task is overdue. Finish it ASAP.".into(),
                    },
                    notification: Some(
                        NotificationDraft::new(
                            "Task overdue",
                            format!("{} is overdue. Finish it now.", task.title),
                            NotificationKind::Error,
                        )
                        .link("/tasks"),
                    ),
                });
            }
        }
        pending
    }

    fn event_reminders<Tz: TimeZone>(&self, store: &DataStore, tz: &Tz, today: NaiveDate) -> Vec<Pending> {
        let mut pending = Vec::new();
        for event in store.events() {
            let (description, phrase) = match calendar_days_between(today, day_of(&event.start_time, tz)) {
                0 => ("Happening today", "is today"),
                1 => ("Happening tomorrow", "is tomorrow"),
                _ => continue,
            };
            if self.fired.has_fired(ReminderKind::EventUpcoming, &event.id) {
                continue;
            }
            pending.push(Pending {
                reminder: Reminder {
                    kind: ReminderKind::EventUpcoming,
                    key: event.id.clone(),
                    title: format!("📅 {}", event.title),
                    description: description.into(),
                },
                notification: Some(
                    NotificationDraft::new(
                        "Event reminder",
                        format!("{} {phrase}.", event.title),
                        NotificationKind::Info,
                    )
                    .link("/life"),
                ),
            });
        }
        pending
    }

    /// Laundry reminders are toast-only.
    fn laundry_reminders(&self, store: &DataStore, today: NaiveDate) -> Vec<Pending> {
        let plan = &store.settings().laundry_plan;
        let loops = [
            (
                ReminderKind::LaundryDrop,
                &plan.drop_days,
                "drop",
                "🧺 Laundry drop tomorrow",
                "Bag your clothes tonight so you do not miss pickup.",
            ),
            (
                ReminderKind::LaundryPickup,
                &plan.pickup_days,
                "pickup",
                "🧺 Laundry pickup tomorrow",
                "Be home and keep tokens ready for collection.",
            ),
        ];

        let mut pending = Vec::new();
        for (kind, days, prefix, title, description) in loops {
            let Some(next) = next_occurrence(days, today) else { continue };
            if calendar_days_between(today, next) != 1 {
                continue;
            }
            let key = format!("{prefix}-{next}");
            if self.fired.has_fired(kind, &key) {
                continue;
            }
            pending.push(Pending {
                reminder: Reminder {
                    kind,
                    key,
                    title: title.into(),
                    description: description.into(),
                },
                notification: None,
            });
        }
        pending
    }
}
