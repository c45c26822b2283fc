use chrono::{DateTime, Duration, Utc};
use clap::Subcommand;
use studentos_core::model::{EventCategory, EventDraft, EventType};
use studentos_core::Config;

use crate::context::{open_store, parse_choice, parse_when, print_json, CliResult};

#[derive(Subcommand)]
pub enum EventAction {
    /// Add an event
    Add {
        /// Event title
        title: String,
        /// Start time
        #[arg(long, value_parser = parse_when)]
        start: DateTime<Utc>,
        /// End time (defaults to one hour after start)
        #[arg(long, value_parser = parse_when)]
        end: Option<DateTime<Utc>>,
        /// fest, talk, exam, viva, presentation or other
        #[arg(long, default_value = "other", value_parser = |s: &str| parse_choice::<EventCategory>("category", s))]
        category: EventCategory,
        /// Campus-wide event rather than a personal one
        #[arg(long)]
        global: bool,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        all_day: bool,
        #[arg(long)]
        description: Option<String>,
    },
    /// List events, soonest first
    List,
    /// Delete an event
    Delete {
        /// Event ID
        id: String,
    },
}

pub fn run(action: EventAction, config: &Config) -> CliResult {
    let mut store = open_store(config)?;

    match action {
        EventAction::Add {
            title,
            start,
            end,
            category,
            global,
            location,
            all_day,
            description,
        } => {
            let end = end.unwrap_or(start + Duration::hours(1));
            if end < start {
                return Err("event ends before it starts".into());
            }
            let draft = EventDraft {
                event_type: if global { EventType::Global } else { EventType::Personal },
                location,
                is_all_day: all_day,
                description,
                ..EventDraft::new(title, category, start, end)
            };
            print_json(&store.add_event(draft))?;
        }
        EventAction::List => {
            let mut events = store.events().to_vec();
            events.sort_by_key(|e| e.start_time);
            print_json(&events)?;
        }
        EventAction::Delete { id } => {
            if !store.delete_event(&id) {
                return Err(format!("Event not found: {id}").into());
            }
            println!("Event deleted: {id}");
        }
    }
    Ok(())
}
