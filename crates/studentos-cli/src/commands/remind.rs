//! Reminder commands. `watch` ticks on the configured interval until
//! interrupted, printing each toast to stdout. Every tick starts from the
//! stored snapshot so edits made by other commands are not overwritten.

use std::time::Duration;

use chrono::Local;
use clap::Subcommand;
use studentos_core::{Config, ReminderScheduler};
use tokio::time::MissedTickBehavior;
use tracing::info;

use crate::context::{open_store, print_json, CliResult};

#[derive(Subcommand)]
pub enum RemindAction {
    /// Run a single reminder tick and print what fired
    Once,
    /// Keep ticking on `reminders.interval_secs`
    Watch,
}

fn print_toast(title: &str, description: &str) {
    println!("{title} | {description}");
}

fn scheduler(config: &Config) -> ReminderScheduler {
    ReminderScheduler::with_due_soon_window(chrono::Duration::minutes(config.reminders.due_soon_minutes))
}

pub fn run(action: RemindAction, config: &Config) -> CliResult {
    let mut store = open_store(config)?;
    let mut scheduler = scheduler(config);

    match action {
        RemindAction::Once => {
            let fired = scheduler.tick(&mut store, &Local::now(), &mut |_: &str, _: &str| {});
            print_json(&fired)?;
        }
        RemindAction::Watch => {
            let period = Duration::from_secs(config.reminders.interval_secs.max(1));
            info!(interval_secs = period.as_secs(), "watching for reminders");
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(async {
                let mut interval = tokio::time::interval(period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
                loop {
                    // the first tick completes immediately
                    interval.tick().await;
                    store.reload();
                    scheduler.tick(&mut store, &Local::now(), &mut print_toast);
                }
            });
        }
    }
    Ok(())
}
