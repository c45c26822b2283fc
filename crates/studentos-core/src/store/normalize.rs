//! Repairs applied to a snapshot on load.
//!
//! Field-level defaults (attendance log, task category, laundry day sets,
//! contest start coercion) are handled by the model's serde attributes;
//! this pass fixes cross-record invariants a hand-edited or older blob may
//! break.

use tracing::debug;

use super::StoreState;
use crate::model::{TimetableEntry, MAX_NOTIFICATIONS};

pub(crate) fn normalize(state: &mut StoreState) {
    for habit in &mut state.habits {
        if habit.longest_streak < habit.current_streak {
            habit.longest_streak = habit.current_streak;
        }
    }

    // later entries win a contested slot
    let mut kept: Vec<TimetableEntry> = Vec::with_capacity(state.timetable.len());
    for entry in state.timetable.drain(..) {
        kept.retain(|e| !e.occupies(entry.day, &entry.start));
        kept.push(entry);
    }
    state.timetable = kept;

    if state.notifications.len() > MAX_NOTIFICATIONS {
        debug!(count = state.notifications.len(), "truncating stored notifications");
        state.notifications.truncate(MAX_NOTIFICATIONS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HabitDraft, SessionType, TimetableDraft, TIMETABLE_SLOTS};

    #[test]
    fn repairs_streaks_and_slot_collisions() {
        let mut state = StoreState::default();
        let mut habit = HabitDraft::new("Read").into_habit("h".into());
        habit.current_streak = 4;
        habit.longest_streak = 2;
        state.habits.push(habit);
        state.timetable = vec![
            TimetableDraft::for_slot(1, &TIMETABLE_SLOTS[0], "Old", SessionType::Lecture).into_entry("a".into()),
            TimetableDraft::for_slot(2, &TIMETABLE_SLOTS[0], "Other", SessionType::Lab).into_entry("b".into()),
            TimetableDraft::for_slot(1, &TIMETABLE_SLOTS[0], "New", SessionType::Tutorial).into_entry("c".into()),
        ];

        normalize(&mut state);

        assert_eq!(state.habits[0].longest_streak, 4);
        let titles: Vec<&str> = state.timetable.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Other", "New"]);
    }
}
