use clap::Subcommand;
use studentos_core::model::Notification;
use studentos_core::Config;

use crate::context::{open_store, print_json, CliResult};

#[derive(Subcommand)]
pub enum NotifyAction {
    /// List notifications, newest first
    List {
        /// Only unread ones
        #[arg(long)]
        unread: bool,
    },
    /// Mark one notification read
    Read {
        /// Notification ID
        id: String,
    },
    /// Mark every notification read
    ReadAll,
}

pub fn run(action: NotifyAction, config: &Config) -> CliResult {
    let mut store = open_store(config)?;

    match action {
        NotifyAction::List { unread } => {
            let list: Vec<&Notification> = store
                .notifications()
                .iter()
                .filter(|n| !unread || !n.read)
                .collect();
            print_json(&list)?;
        }
        NotifyAction::Read { id } => {
            if !store.mark_notification_read(&id) {
                return Err(format!("Notification not found: {id}").into());
            }
            println!("{} unread", store.unread_count());
        }
        NotifyAction::ReadAll => {
            store.mark_all_notifications_read();
            println!("{} unread", store.unread_count());
        }
    }
    Ok(())
}
