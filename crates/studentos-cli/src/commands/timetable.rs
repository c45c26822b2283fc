use clap::Subcommand;
use studentos_core::model::{SessionType, TimetableDraft, TimetableEntry, TIMETABLE_SLOTS};
use studentos_core::Config;

use crate::context::{open_store, parse_choice, print_json, CliResult};

#[derive(Subcommand)]
pub enum TimetableAction {
    /// Put a session in a grid slot, replacing whatever was there
    Add {
        /// Weekday, 1 = Monday .. 5 = Friday
        #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
        day: u8,
        /// Slot number from `timetable slots` (1-7)
        #[arg(value_parser = clap::value_parser!(u8).range(1..=7))]
        slot: u8,
        /// Session title
        title: String,
        /// lecture, tutorial, lab or other
        #[arg(long = "type", default_value = "lecture", value_parser = |s: &str| parse_choice::<SessionType>("type", s))]
        session_type: SessionType,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        course_id: Option<String>,
    },
    /// Show the week, ordered by day and start time
    List,
    /// Delete a session
    Delete {
        /// Entry ID
        id: String,
    },
    /// Show the fixed slot grid
    Slots,
}

pub fn run(action: TimetableAction, config: &Config) -> CliResult {
    match action {
        TimetableAction::Slots => {
            let slots: Vec<_> = TIMETABLE_SLOTS
                .iter()
                .enumerate()
                .map(|(i, slot)| serde_json::json!({ "slot": i + 1, "start": slot.start, "end": slot.end }))
                .collect();
            return print_json(&slots);
        }
        TimetableAction::Add {
            day,
            slot,
            title,
            session_type,
            location,
            course_id,
        } => {
            let mut store = open_store(config)?;
            let slot = TIMETABLE_SLOTS
                .get(usize::from(slot) - 1)
                .ok_or_else(|| format!("No such slot: {slot}"))?;
            let draft = TimetableDraft {
                location,
                course_id,
                ..TimetableDraft::for_slot(day, slot, title, session_type)
            };
            print_json(&store.add_timetable_entry(draft))?;
        }
        TimetableAction::List => {
            let store = open_store(config)?;
            let mut entries: Vec<&TimetableEntry> = store.timetable().iter().collect();
            entries.sort_by(|a, b| (a.day, &a.start).cmp(&(b.day, &b.start)));
            print_json(&entries)?;
        }
        TimetableAction::Delete { id } => {
            let mut store = open_store(config)?;
            if !store.delete_timetable_entry(&id) {
                return Err(format!("Timetable entry not found: {id}").into());
            }
            println!("Timetable entry deleted: {id}");
        }
    }
    Ok(())
}
