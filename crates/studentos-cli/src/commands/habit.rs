use std::collections::BTreeSet;

use chrono::{DateTime, Local, Utc};
use clap::Subcommand;
use studentos_core::model::{HabitCategory, HabitDraft, HabitFrequency};
use studentos_core::Config;

use crate::context::{open_store, parse_choice, parse_weekdays, parse_when, print_json, CliResult};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Add a habit
    Add {
        /// Habit name
        name: String,
        /// daily or weekly
        #[arg(long, default_value = "daily", value_parser = |s: &str| parse_choice::<HabitFrequency>("frequency", s))]
        frequency: HabitFrequency,
        /// Target weekdays for weekly habits, comma-separated (0 = Sunday)
        #[arg(long, value_parser = parse_weekdays)]
        days: Option<BTreeSet<u8>>,
        /// health, career, academic or life
        #[arg(long, value_parser = |s: &str| parse_choice::<HabitCategory>("category", s))]
        category: Option<HabitCategory>,
        #[arg(long, default_value = "")]
        icon: String,
        #[arg(long, default_value = "")]
        color: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// List habits with their streaks
    List,
    /// Mark a habit done
    Done {
        /// Habit ID
        id: String,
        /// Completion date (defaults to now)
        #[arg(long, value_parser = parse_when)]
        date: Option<DateTime<Utc>>,
    },
    /// Delete a habit
    Delete {
        /// Habit ID
        id: String,
    },
}

pub fn run(action: HabitAction, config: &Config) -> CliResult {
    let mut store = open_store(config)?;

    match action {
        HabitAction::Add {
            name,
            frequency,
            days,
            category,
            icon,
            color,
            description,
        } => {
            let draft = HabitDraft {
                frequency,
                target_days: days,
                category,
                icon,
                color,
                description,
                ..HabitDraft::new(name)
            };
            print_json(&store.add_habit(draft))?;
        }
        HabitAction::List => print_json(store.habits())?,
        HabitAction::Done { id, date } => {
            let date = date.unwrap_or_else(Utc::now);
            if !store.mark_habit_complete(&id, date, &Local) {
                return Err(format!("Habit not found: {id}").into());
            }
            let habit = store
                .habits()
                .iter()
                .find(|h| h.id == id)
                .ok_or_else(|| format!("Habit not found: {id}"))?;
            print_json(habit)?;
        }
        HabitAction::Delete { id } => {
            if !store.delete_habit(&id) {
                return Err(format!("Habit not found: {id}").into());
            }
            println!("Habit deleted: {id}");
        }
    }
    Ok(())
}
