use clap::Subcommand;
use serde_json::Value;
use studentos_core::model::SettingsPatch;
use studentos_core::Config;

use crate::context::{open_store, parse_assignment, print_json, CliResult};

/// Top-level settings a patch may replace.
const SETTINGS_KEYS: [&str; 8] = [
    "theme",
    "accentColor",
    "notificationPreferences",
    "moduleVisibility",
    "backlogBurnerTone",
    "codeforcesHandle",
    "healthTargets",
    "laundryPlan",
];

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print the current settings
    Show,
    /// Replace one top-level setting (e.g. backlogBurnerTone=savage,
    /// laundryPlan='{"dropDays":[2],"pickupDays":[4]}')
    Set {
        /// key=value, value read as JSON when possible
        #[arg(value_parser = parse_assignment)]
        assignment: (String, Value),
    },
}

pub fn run(action: SettingsAction, config: &Config) -> CliResult {
    let mut store = open_store(config)?;

    match action {
        SettingsAction::Show => print_json(store.settings())?,
        SettingsAction::Set { assignment: (key, value) } => {
            if !SETTINGS_KEYS.contains(&key.as_str()) {
                return Err(format!("Unknown setting: {key} (expected one of {})", SETTINGS_KEYS.join(", ")).into());
            }
            let mut fields = serde_json::Map::new();
            fields.insert(key, value);
            let patch: SettingsPatch = serde_json::from_value(Value::Object(fields))?;
            store.update_settings(patch);
            print_json(store.settings())?;
        }
    }
    Ok(())
}
