//! The domain store: every collection the dashboard reads, plus the
//! mutations that change them.
//!
//! Lifecycle: a store starts empty and unhydrated, [`DataStore::hydrate`]
//! loads the snapshot (or starts fresh), and from then on every mutation
//! writes the full snapshot through [`Persistence`] before returning.
//! Mutations made before hydration stay in memory only, so an empty
//! default state can never overwrite stored data.
//!
//! Updates are shallow merges of a [`Patch`]; an update or delete aimed at
//! an unknown ID reports `false` and changes nothing.

mod ids;
mod normalize;
mod patch;

pub use patch::Patch;

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ValidationError;
use crate::metrics::streak_from_dates;
use crate::model::{
    AttendanceEntry, Contest, ContestDraft, Course, CourseDraft, Event, EventDraft, Goal, GoalDraft, Habit,
    HabitDraft, Identified, Notification, NotificationDraft, NotificationKind, SettingsPatch, StreakLog,
    StudyTrack, StudyTrackDraft, Task, TaskDraft, TimetableDraft, TimetableEntry, UserSettings, MAX_NOTIFICATIONS,
};
use crate::storage::{Persistence, PRESERVED_KEYS};
use ids::IdGenerator;

/// Source of "now" for timestamps the store assigns.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Everything persisted in the snapshot blob.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreState {
    pub courses: Vec<Course>,
    pub tasks: Vec<Task>,
    pub habits: Vec<Habit>,
    pub events: Vec<Event>,
    pub contests: Vec<Contest>,
    pub study_tracks: Vec<StudyTrack>,
    pub goals: Vec<Goal>,
    pub streak_logs: Vec<StreakLog>,
    pub notifications: Vec<Notification>,
    pub timetable: Vec<TimetableEntry>,
    pub settings: UserSettings,
}

const ID_ONLY: &[&str] = &["id"];
const TASK_PROTECTED: &[&str] = &["id", "createdAt"];
const HABIT_PROTECTED: &[&str] = &["id", "completedDates", "currentStreak", "longestStreak"];

fn update_in<T>(
    items: &mut [T],
    id: &str,
    patch: &Patch,
    entity: &'static str,
    protected: &[&str],
) -> Result<bool, ValidationError>
where
    T: Identified + Serialize + DeserializeOwned,
{
    let Some(item) = items.iter_mut().find(|item| item.id() == id) else {
        debug!(entity, id, "update target not found");
        return Ok(false);
    };
    *item = patch.apply(&*item, entity, protected)?;
    Ok(true)
}

fn delete_in<T: Identified>(items: &mut Vec<T>, id: &str) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}

pub struct DataStore {
    state: StoreState,
    persistence: Persistence,
    hydrated: bool,
    ids: IdGenerator,
    clock: Clock,
}

impl DataStore {
    /// An empty, unhydrated store over `persistence`.
    pub fn new(persistence: Persistence) -> Self {
        Self {
            state: StoreState::default(),
            persistence,
            hydrated: false,
            ids: IdGenerator::default(),
            clock: Arc::new(Utc::now),
        }
    }

    /// New store, hydrated immediately.
    pub fn open(persistence: Persistence) -> Self {
        let mut store = Self::new(persistence);
        store.hydrate();
        store
    }

    /// Replace the wall clock, mostly for tests.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Load the stored snapshot, or keep an empty state when there is none.
    ///
    /// Anything mutated before this call is discarded in favor of the
    /// stored data. Calling it again is a no-op.
    pub fn hydrate(&mut self) {
        if self.hydrated {
            return;
        }
        match self.persistence.load::<StoreState>() {
            Some(mut state) => {
                normalize::normalize(&mut state);
                info!(
                    courses = state.courses.len(),
                    tasks = state.tasks.len(),
                    habits = state.habits.len(),
                    "store hydrated from snapshot"
                );
                self.state = state;
            }
            None => {
                info!("no usable snapshot, starting with an empty store");
                self.state = StoreState::default();
            }
        }
        self.observe_ids();
        self.hydrated = true;
    }

    /// Re-read the stored snapshot so writes made by another process since
    /// hydration are seen before the next mutation.
    ///
    /// Keeps the in-memory state when nothing usable is stored. Hydrates on
    /// first use.
    pub fn reload(&mut self) {
        if !self.hydrated {
            self.hydrate();
            return;
        }
        match self.persistence.load::<StoreState>() {
            Some(mut state) => {
                normalize::normalize(&mut state);
                debug!(tasks = state.tasks.len(), "store reloaded from snapshot");
                self.state = state;
                self.observe_ids();
            }
            None => debug!("no usable snapshot on reload, keeping in-memory state"),
        }
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    fn observe_ids(&mut self) {
        let s = &self.state;
        let ids = s
            .courses
            .iter()
            .map(|x| x.id())
            .chain(s.tasks.iter().map(|x| x.id()))
            .chain(s.habits.iter().map(|x| x.id()))
            .chain(s.events.iter().map(|x| x.id()))
            .chain(s.contests.iter().map(|x| x.id()))
            .chain(s.study_tracks.iter().map(|x| x.id()))
            .chain(s.goals.iter().map(|x| x.id()))
            .chain(s.timetable.iter().map(|x| x.id()));
        self.ids.observe(ids);
    }

    fn next_id(&mut self) -> String {
        let now = self.now();
        self.ids.next(&now)
    }

    /// Write-through after a mutation, once hydrated.
    fn commit(&mut self) {
        if self.hydrated {
            self.persistence.save(&self.state);
        } else {
            debug!("store not hydrated yet, skipping save");
        }
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn courses(&self) -> &[Course] {
        &self.state.courses
    }

    pub fn tasks(&self) -> &[Task] {
        &self.state.tasks
    }

    pub fn habits(&self) -> &[Habit] {
        &self.state.habits
    }

    pub fn events(&self) -> &[Event] {
        &self.state.events
    }

    pub fn contests(&self) -> &[Contest] {
        &self.state.contests
    }

    pub fn study_tracks(&self) -> &[StudyTrack] {
        &self.state.study_tracks
    }

    pub fn goals(&self) -> &[Goal] {
        &self.state.goals
    }

    pub fn streak_logs(&self) -> &[StreakLog] {
        &self.state.streak_logs
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.state.notifications
    }

    pub fn timetable(&self) -> &[TimetableEntry] {
        &self.state.timetable
    }

    pub fn settings(&self) -> &UserSettings {
        &self.state.settings
    }

    // ===================================================================
    // Courses
    // ===================================================================

    /// Replace every course at once (onboarding).
    pub fn set_courses(&mut self, courses: Vec<Course>) {
        debug!(count = courses.len(), "replacing courses");
        self.state.courses = courses;
        self.commit();
    }

    /// Replace every course with freshly numbered ones built from `drafts`.
    pub fn onboard_courses(&mut self, drafts: Vec<CourseDraft>) -> Vec<Course> {
        let courses: Vec<Course> = drafts
            .into_iter()
            .map(|draft| draft.into_course(self.next_id()))
            .collect();
        self.set_courses(courses.clone());
        courses
    }

    pub fn add_course(&mut self, draft: CourseDraft) -> Course {
        let course = draft.into_course(self.next_id());
        debug!(id = %course.id, "course added");
        self.state.courses.push(course.clone());
        self.commit();
        course
    }

    pub fn update_course(&mut self, id: &str, patch: &Patch) -> Result<bool, ValidationError> {
        let found = update_in(&mut self.state.courses, id, patch, "course", ID_ONLY)?;
        if found {
            self.commit();
        }
        Ok(found)
    }

    pub fn delete_course(&mut self, id: &str) -> bool {
        let found = delete_in(&mut self.state.courses, id);
        if found {
            self.commit();
        }
        found
    }

    /// Append one class to a course's attendance log.
    pub fn record_attendance(&mut self, course_id: &str, date: DateTime<Utc>, present: bool) -> bool {
        let Some(course) = self.state.courses.iter_mut().find(|c| c.id == course_id) else {
            return false;
        };
        course.attendance_records.push(AttendanceEntry { date, present });
        debug!(course_id, present, "attendance recorded");
        self.commit();
        true
    }

    // ===================================================================
    // Tasks
    // ===================================================================

    /// Add a task and post a "New task added" notification.
    pub fn add_task(&mut self, draft: TaskDraft) -> Task {
        let now = self.now();
        let task = draft.into_task(self.next_id(), now);
        debug!(id = %task.id, "task added");
        self.state.tasks.push(task.clone());
        self.push_notification(
            NotificationDraft::new("New task added", task.title.clone(), NotificationKind::Info).link("/tasks"),
        );
        self.commit();
        task
    }

    /// Shallow-merge `patch` onto a task.
    ///
    /// `completedAt` follows `completed`: stamped with the current time when
    /// the task becomes complete (unless the patch sets it), cleared when it
    /// becomes incomplete.
    pub fn update_task(&mut self, id: &str, patch: &Patch) -> Result<bool, ValidationError> {
        let now = self.now();
        let Some(task) = self.state.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        let was_completed = task.completed;
        let mut next: Task = patch.apply(&*task, "task", TASK_PROTECTED)?;
        if !next.completed {
            next.completed_at = None;
        } else if !was_completed && !patch.contains("completedAt") {
            next.completed_at = Some(now);
        }
        *task = next;
        self.commit();
        Ok(true)
    }

    pub fn delete_task(&mut self, id: &str) -> bool {
        let found = delete_in(&mut self.state.tasks, id);
        if found {
            self.commit();
        }
        found
    }

    // ===================================================================
    // Habits
    // ===================================================================

    pub fn add_habit(&mut self, draft: HabitDraft) -> Habit {
        let habit = draft.into_habit(self.next_id());
        self.state.habits.push(habit.clone());
        self.commit();
        habit
    }

    /// Streak counters and completion dates are not patchable.
    pub fn update_habit(&mut self, id: &str, patch: &Patch) -> Result<bool, ValidationError> {
        let found = update_in(&mut self.state.habits, id, patch, "habit", HABIT_PROTECTED)?;
        if found {
            self.commit();
        }
        Ok(found)
    }

    pub fn delete_habit(&mut self, id: &str) -> bool {
        let found = delete_in(&mut self.state.habits, id);
        if found {
            self.commit();
        }
        found
    }

    /// Record a completion on `date` and recompute the streaks, counting
    /// calendar days in `tz`.
    pub fn mark_habit_complete<Tz: TimeZone>(&mut self, id: &str, date: DateTime<Utc>, tz: &Tz) -> bool {
        let Some(habit) = self.state.habits.iter_mut().find(|h| h.id == id) else {
            return false;
        };
        habit.completed_dates.push(date);
        habit.current_streak = streak_from_dates(&habit.completed_dates, tz);
        habit.longest_streak = habit.longest_streak.max(habit.current_streak);
        debug!(id, current = habit.current_streak, longest = habit.longest_streak, "habit completed");
        self.commit();
        true
    }

    // ===================================================================
    // Events
    // ===================================================================

    /// Add an event and post an "Event added" notification.
    pub fn add_event(&mut self, draft: EventDraft) -> Event {
        let event = draft.into_event(self.next_id());
        self.state.events.push(event.clone());
        self.push_notification(
            NotificationDraft::new("Event added", event.title.clone(), NotificationKind::Info).link("/life"),
        );
        self.commit();
        event
    }

    pub fn update_event(&mut self, id: &str, patch: &Patch) -> Result<bool, ValidationError> {
        let found = update_in(&mut self.state.events, id, patch, "event", ID_ONLY)?;
        if found {
            self.commit();
        }
        Ok(found)
    }

    pub fn delete_event(&mut self, id: &str) -> bool {
        let found = delete_in(&mut self.state.events, id);
        if found {
            self.commit();
        }
        found
    }

    // ===================================================================
    // Contests
    // ===================================================================

    pub fn add_contest(&mut self, draft: ContestDraft) -> Contest {
        let contest = draft.into_contest(self.next_id());
        self.state.contests.push(contest.clone());
        self.commit();
        contest
    }

    pub fn update_contest(&mut self, id: &str, patch: &Patch) -> Result<bool, ValidationError> {
        let found = update_in(&mut self.state.contests, id, patch, "contest", ID_ONLY)?;
        if found {
            self.commit();
        }
        Ok(found)
    }

    pub fn delete_contest(&mut self, id: &str) -> bool {
        let found = delete_in(&mut self.state.contests, id);
        if found {
            self.commit();
        }
        found
    }

    /// Upsert contests by ID, keeping the local `registered` and
    /// `participated` flags of known ones. Returns how many were new.
    pub fn merge_contests(&mut self, incoming: Vec<Contest>) -> usize {
        let mut added = 0;
        for contest in incoming {
            match self.state.contests.iter_mut().find(|c| c.id == contest.id) {
                Some(existing) => {
                    *existing = Contest {
                        registered: existing.registered,
                        participated: existing.participated,
                        rank: existing.rank.or(contest.rank),
                        problems_solved: existing.problems_solved.or(contest.problems_solved),
                        ..contest
                    };
                }
                None => {
                    self.state.contests.push(contest);
                    added += 1;
                }
            }
        }
        debug!(added, total = self.state.contests.len(), "contests merged");
        self.commit();
        added
    }

    // ===================================================================
    // Timetable
    // ===================================================================

    /// Insert an entry, evicting whatever occupied its (day, start) slot.
    pub fn add_timetable_entry(&mut self, draft: TimetableDraft) -> TimetableEntry {
        let entry = draft.into_entry(self.next_id());
        self.state
            .timetable
            .retain(|e| !e.occupies(entry.day, &entry.start));
        self.state.timetable.push(entry.clone());
        self.commit();
        entry
    }

    /// Moving an entry onto an occupied slot evicts the occupant.
    pub fn update_timetable_entry(&mut self, id: &str, patch: &Patch) -> Result<bool, ValidationError> {
        let found = update_in(&mut self.state.timetable, id, patch, "timetable entry", ID_ONLY)?;
        if !found {
            return Ok(false);
        }
        if let Some((day, start)) = self
            .state
            .timetable
            .iter()
            .find(|e| e.id == id)
            .map(|e| (e.day, e.start.clone()))
        {
            self.state
                .timetable
                .retain(|e| e.id == id || !e.occupies(day, &start));
        }
        self.commit();
        Ok(true)
    }

    pub fn delete_timetable_entry(&mut self, id: &str) -> bool {
        let found = delete_in(&mut self.state.timetable, id);
        if found {
            self.commit();
        }
        found
    }

    // ===================================================================
    // Study tracks and goals
    // ===================================================================

    pub fn add_study_track(&mut self, draft: StudyTrackDraft) -> StudyTrack {
        let track = draft.into_track(self.next_id());
        self.state.study_tracks.push(track.clone());
        self.commit();
        track
    }

    pub fn update_study_track(&mut self, id: &str, patch: &Patch) -> Result<bool, ValidationError> {
        let found = update_in(&mut self.state.study_tracks, id, patch, "study track", ID_ONLY)?;
        if found {
            self.commit();
        }
        Ok(found)
    }

    pub fn delete_study_track(&mut self, id: &str) -> bool {
        let found = delete_in(&mut self.state.study_tracks, id);
        if found {
            self.commit();
        }
        found
    }

    pub fn add_goal(&mut self, draft: GoalDraft) -> Goal {
        let goal = draft.into_goal(self.next_id());
        self.state.goals.push(goal.clone());
        self.commit();
        goal
    }

    pub fn update_goal(&mut self, id: &str, patch: &Patch) -> Result<bool, ValidationError> {
        let found = update_in(&mut self.state.goals, id, patch, "goal", ID_ONLY)?;
        if found {
            self.commit();
        }
        Ok(found)
    }

    pub fn delete_goal(&mut self, id: &str) -> bool {
        let found = delete_in(&mut self.state.goals, id);
        if found {
            self.commit();
        }
        found
    }

    pub fn add_streak_log(&mut self, log: StreakLog) {
        self.state.streak_logs.push(log);
        self.commit();
    }

    // ===================================================================
    // Settings
    // ===================================================================

    /// Top-level merge; nested sections in the patch replace the old ones.
    pub fn update_settings(&mut self, patch: SettingsPatch) {
        self.state.settings = self.state.settings.merged(patch);
        debug!("settings updated");
        self.commit();
    }

    // ===================================================================
    // Notifications
    // ===================================================================

    fn push_notification(&mut self, draft: NotificationDraft) -> Notification {
        let notification = draft.into_notification(uuid::Uuid::new_v4().to_string(), self.now());
        self.state.notifications.insert(0, notification.clone());
        self.state.notifications.truncate(MAX_NOTIFICATIONS);
        notification
    }

    /// Prepend an unread notification, keeping the newest 50.
    pub fn add_notification(&mut self, draft: NotificationDraft) -> Notification {
        let notification = self.push_notification(draft);
        self.commit();
        notification
    }

    pub fn mark_notification_read(&mut self, id: &str) -> bool {
        let Some(notification) = self.state.notifications.iter_mut().find(|n| n.id == id) else {
            return false;
        };
        notification.read = true;
        self.commit();
        true
    }

    pub fn mark_all_notifications_read(&mut self) {
        for notification in &mut self.state.notifications {
            notification.read = true;
        }
        self.commit();
    }

    pub fn unread_count(&self) -> usize {
        self.state.notifications.iter().filter(|n| !n.read).count()
    }

    // ===================================================================
    // Data
    // ===================================================================

    /// Remove every stored `studentos_` key except the theme and reset to
    /// an empty state. Nothing is written back. Returns the number of keys
    /// removed.
    pub fn clear_all_data(&mut self) -> usize {
        let removed = self.persistence.clear_all(&PRESERVED_KEYS);
        self.state = StoreState::default();
        info!(removed, "all stored data cleared");
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EventCategory, HabitFrequency, Priority, SessionType, TaskType, TIMETABLE_SLOTS};
    use crate::storage::MemoryBlobStore;
    use chrono::Duration;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap()
    }

    fn store() -> DataStore {
        DataStore::open(Persistence::new(Box::new(MemoryBlobStore::new()))).with_clock(fixed_now)
    }

    #[test]
    fn add_task_posts_notification_and_assigns_ids() {
        let mut store = store();
        let a = store.add_task(TaskDraft::new("Essay", TaskType::Assignment, Priority::High));
        let b = store.add_task(TaskDraft::new("Quiz", TaskType::Quiz, Priority::Low));
        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, fixed_now());
        assert_eq!(store.notifications().len(), 2);
        assert_eq!(store.notifications()[0].message, "Quiz");
        assert_eq!(store.notifications()[0].title, "New task added");
        assert_eq!(store.notifications()[0].action_link.as_deref(), Some("/tasks"));
    }

    #[test]
    fn onboarding_replaces_courses() {
        let mut store = store();
        store.add_course(CourseDraft::new("Old", "X100"));
        let courses = store.onboard_courses(vec![
            CourseDraft::new("Operating Systems", "CS301"),
            CourseDraft::new("Networks", "CS305"),
        ]);
        assert_eq!(courses.len(), 2);
        assert_ne!(courses[0].id, courses[1].id);
        let codes: Vec<_> = store.courses().iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["CS301", "CS305"]);
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let mut store = store();
        let found = store.update_task("nope", &Patch::new().set("completed", true)).unwrap();
        assert!(!found);
        assert!(store.tasks().is_empty());
        assert!(!store.delete_course("nope"));
    }

    #[test]
    fn completing_a_task_stamps_completed_at() {
        let mut store = store();
        let task = store.add_task(TaskDraft::new("Essay", TaskType::Assignment, Priority::High));
        store.update_task(&task.id, &Patch::new().set("completed", true)).unwrap();
        assert_eq!(store.tasks()[0].completed_at, Some(fixed_now()));

        store.update_task(&task.id, &Patch::new().set("completed", false)).unwrap();
        assert!(store.tasks()[0].completed_at.is_none());
    }

    #[test]
    fn task_patch_cannot_touch_id_or_created_at() {
        let mut store = store();
        let task = store.add_task(TaskDraft::new("Essay", TaskType::Assignment, Priority::High));
        let patch = Patch::new()
            .set("id", "hijack")
            .set("createdAt", "2020-01-01T00:00:00.000Z")
            .set("title", "Final essay");
        assert!(store.update_task(&task.id, &patch).unwrap());
        let stored = &store.tasks()[0];
        assert_eq!(stored.id, task.id);
        assert_eq!(stored.created_at, task.created_at);
        assert_eq!(stored.title, "Final essay");
    }

    #[test]
    fn habit_streak_over_consecutive_days() {
        let mut store = store();
        let habit = store.add_habit(HabitDraft::new("Run"));
        assert_eq!(habit.frequency, HabitFrequency::Daily);
        let day = fixed_now();
        assert!(store.mark_habit_complete(&habit.id, day - Duration::days(1), &Utc));
        assert!(store.mark_habit_complete(&habit.id, day, &Utc));
        let stored = &store.habits()[0];
        assert_eq!(stored.current_streak, 2);
        assert_eq!(stored.longest_streak, 2);

        // a gap resets the current streak but never the longest
        store.mark_habit_complete(&habit.id, day + Duration::days(3), &Utc);
        let stored = &store.habits()[0];
        assert_eq!(stored.current_streak, 1);
        assert_eq!(stored.longest_streak, 2);
    }

    #[test]
    fn habit_patch_cannot_change_streaks() {
        let mut store = store();
        let habit = store.add_habit(HabitDraft::new("Run"));
        let patch = Patch::new().set("currentStreak", 9).set("name", "Jog");
        store.update_habit(&habit.id, &patch).unwrap();
        assert_eq!(store.habits()[0].current_streak, 0);
        assert_eq!(store.habits()[0].name, "Jog");
    }

    #[test]
    fn timetable_slot_is_replaced() {
        let mut store = store();
        let slot = &TIMETABLE_SLOTS[1];
        store.add_timetable_entry(TimetableDraft::for_slot(1, slot, "Maths", SessionType::Lecture));
        let lab = store.add_timetable_entry(TimetableDraft::for_slot(1, slot, "Lab", SessionType::Lab));
        assert_eq!(store.timetable().len(), 1);
        assert_eq!(store.timetable()[0].id, lab.id);
    }

    #[test]
    fn moving_timetable_entry_evicts_occupant() {
        let mut store = store();
        let a = store.add_timetable_entry(TimetableDraft::for_slot(1, &TIMETABLE_SLOTS[0], "A", SessionType::Lecture));
        store.add_timetable_entry(TimetableDraft::for_slot(2, &TIMETABLE_SLOTS[0], "B", SessionType::Lecture));
        store.update_timetable_entry(&a.id, &Patch::new().set("day", 2)).unwrap();
        assert_eq!(store.timetable().len(), 1);
        assert_eq!(store.timetable()[0].title, "A");
    }

    #[test]
    fn notifications_capped_newest_first() {
        let mut store = store();
        for i in 0..55 {
            store.add_notification(NotificationDraft::new(format!("n{i}"), "m", NotificationKind::Info));
        }
        assert_eq!(store.notifications().len(), MAX_NOTIFICATIONS);
        assert_eq!(store.notifications()[0].title, "n54");
        assert_eq!(store.unread_count(), 50);

        let id = store.notifications()[3].id.clone();
        assert!(store.mark_notification_read(&id));
        assert_eq!(store.unread_count(), 49);
        store.mark_all_notifications_read();
        assert_eq!(store.unread_count(), 0);
    }

    #[test]
    fn add_event_posts_notification() {
        let mut store = store();
        let start = fixed_now() + Duration::days(1);
        store.add_event(EventDraft::new("Hackathon", EventCategory::Fest, start, start + Duration::hours(5)));
        assert_eq!(store.notifications()[0].title, "Event added");
        assert_eq!(store.notifications()[0].action_link.as_deref(), Some("/life"));
    }

    #[test]
    fn merge_contests_upserts_and_keeps_local_flags() {
        let mut store = store();
        let start = fixed_now() + Duration::days(2);
        let mut seen = ContestDraft::new("Round 1", crate::model::Platform::Codeforces, start, 120)
            .into_contest("cf-1".into());
        store.merge_contests(vec![seen.clone()]);
        store.update_contest("cf-1", &Patch::new().set("registered", true)).unwrap();

        seen.name = "Round 1 (Div. 2)".into();
        let fresh = ContestDraft::new("Round 2", crate::model::Platform::Codeforces, start, 90)
            .into_contest("cf-2".into());
        assert_eq!(store.merge_contests(vec![seen, fresh]), 1);
        assert_eq!(store.contests().len(), 2);
        assert_eq!(store.contests()[0].name, "Round 1 (Div. 2)");
        assert!(store.contests()[0].registered);
    }

    #[test]
    fn settings_patch_is_shallow() {
        let mut store = store();
        let mut prefs = store.settings().notification_preferences.clone();
        prefs.in_app = false;
        store.update_settings(SettingsPatch {
            notification_preferences: Some(prefs.clone()),
            ..SettingsPatch::default()
        });
        assert_eq!(store.settings().notification_preferences, prefs);
        assert_eq!(store.settings().accent_color, UserSettings::default().accent_color);
    }
}
