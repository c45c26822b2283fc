//! Read-only views over the derived metrics.

use chrono::{Local, Utc};
use clap::Subcommand;
use serde::Serialize;
use studentos_core::metrics::{
    brain_bandwidth, consistency_grid, date_label, derive_streak_logs, detect_conflicts, panic_mode_advice,
    upcoming_items, UpcomingItem, DEFAULT_UPCOMING_LIMIT, DERIVED_LOG_DAYS, GRID_DAYS,
};
use studentos_core::Config;

use crate::context::{open_store, print_json, CliResult};

#[derive(Subcommand)]
pub enum DashboardAction {
    /// Workload score for the coming week
    Bandwidth,
    /// Days with more than two deadlines
    Conflicts,
    /// Next tasks, events and contests
    Upcoming {
        #[arg(long, default_value_t = DEFAULT_UPCOMING_LIMIT)]
        limit: usize,
    },
    /// Daily activity grid
    Heatmap {
        #[arg(long, default_value_t = GRID_DAYS)]
        days: u32,
    },
    /// Study plan before an exam
    Panic {
        /// Days left until the exam
        days: i64,
        /// Chapters still to cover
        chapters: u32,
    },
}

#[derive(Serialize)]
struct Labeled<'a> {
    label: String,
    #[serde(flatten)]
    item: &'a UpcomingItem,
}

pub fn run(action: DashboardAction, config: &Config) -> CliResult {
    if let DashboardAction::Panic { days, chapters } = action {
        println!("{}", panic_mode_advice(days, chapters));
        return Ok(());
    }

    let store = open_store(config)?;
    let now = Local::now();
    let now_utc = now.with_timezone(&Utc);

    match action {
        DashboardAction::Bandwidth => {
            let load = brain_bandwidth(
                store.tasks(),
                store.events(),
                store.contests(),
                store.habits(),
                store.courses(),
                now_utc,
            );
            print_json(&load)?;
        }
        DashboardAction::Conflicts => {
            print_json(&detect_conflicts(store.tasks(), store.events(), store.contests(), &now))?;
        }
        DashboardAction::Upcoming { limit } => {
            let items = upcoming_items(store.tasks(), store.events(), store.contests(), &now_utc, limit);
            let labeled: Vec<Labeled> = items
                .iter()
                .map(|item| Labeled {
                    label: date_label(&item.date(), &now),
                    item,
                })
                .collect();
            print_json(&labeled)?;
        }
        DashboardAction::Heatmap { days } => {
            let grid = if store.streak_logs().is_empty() {
                let derived =
                    derive_streak_logs(store.courses(), store.tasks(), store.habits(), &now, DERIVED_LOG_DAYS);
                consistency_grid(&derived, &now, days)
            } else {
                consistency_grid(store.streak_logs(), &now, days)
            };
            print_json(&grid)?;
        }
        DashboardAction::Panic { .. } => {}
    }
    Ok(())
}
