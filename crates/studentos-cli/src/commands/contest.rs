//! Contest commands. `sync` and `profile` talk to Codeforces; a failed
//! request is logged and the stored contests are shown instead.

use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::Subcommand;
use serde_json::{Map, Value};
use studentos_core::model::{Contest, ContestDraft, Platform};
use studentos_core::{CodeforcesClient, Config, Patch};
use tracing::warn;

use crate::context::{open_store, parse_assignment, parse_choice, parse_when, print_json, CliResult};

#[derive(Subcommand)]
pub enum ContestAction {
    /// List stored contests
    List {
        /// Only contests that have not started
        #[arg(long)]
        upcoming: bool,
    },
    /// Add a contest by hand
    Add {
        name: String,
        /// codeforces, codechef, atcoder or leetcode
        #[arg(long, value_parser = |s: &str| parse_choice::<Platform>("platform", s))]
        platform: Platform,
        #[arg(long, value_parser = parse_when)]
        start: DateTime<Utc>,
        /// Duration in minutes
        #[arg(long)]
        duration: u32,
        #[arg(long)]
        url: Option<String>,
    },
    /// Patch contest fields (e.g. --set registered=true --set rank=412)
    Update {
        /// Contest ID
        id: String,
        #[arg(long = "set", value_parser = parse_assignment, required = true)]
        fields: Vec<(String, Value)>,
    },
    /// Fetch upcoming Codeforces contests into the store
    Sync {
        /// How many contests to fetch (defaults to feeds.upcoming_limit)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show a Codeforces profile
    Profile {
        /// Handle (defaults to the one in settings)
        handle: Option<String>,
    },
}

fn client(config: &Config) -> Result<CodeforcesClient, Box<dyn std::error::Error>> {
    let timeout = Duration::from_secs(config.feeds.timeout_secs);
    Ok(CodeforcesClient::with_base_url(&config.feeds.codeforces_base_url, timeout)?)
}

pub fn run(action: ContestAction, config: &Config) -> CliResult {
    let mut store = open_store(config)?;

    match action {
        ContestAction::List { upcoming } => {
            let now = Utc::now();
            let mut contests: Vec<&Contest> = store
                .contests()
                .iter()
                .filter(|c| !upcoming || c.start_time > now)
                .collect();
            contests.sort_by_key(|c| c.start_time);
            print_json(&contests)?;
        }
        ContestAction::Add {
            name,
            platform,
            start,
            duration,
            url,
        } => {
            let draft = ContestDraft {
                url,
                ..ContestDraft::new(name, platform, start, duration)
            };
            print_json(&store.add_contest(draft))?;
        }
        ContestAction::Update { id, fields } => {
            let map: Map<String, Value> = fields.into_iter().collect();
            let patch = Patch::from_json(&Value::Object(map).to_string())?;
            if !store.update_contest(&id, &patch)? {
                return Err(format!("Contest not found: {id}").into());
            }
            let contest = store.contests().iter().find(|c| c.id == id);
            print_json(&contest)?;
        }
        ContestAction::Sync { limit } => {
            let limit = limit.unwrap_or(config.feeds.upcoming_limit);
            let client = client(config)?;
            let rt = tokio::runtime::Runtime::new()?;
            match rt.block_on(client.upcoming_contests(limit)) {
                Ok(fetched) => {
                    let added = store.merge_contests(fetched);
                    eprintln!("{added} new contest(s) added");
                }
                Err(e) => warn!(error = %e, "contest sync failed, showing stored contests"),
            }
            print_json(store.contests())?;
        }
        ContestAction::Profile { handle } => {
            let handle = handle
                .or_else(|| store.settings().codeforces_handle.clone())
                .ok_or("no handle given and settings.codeforcesHandle is not set")?;
            let client = client(config)?;
            let rt = tokio::runtime::Runtime::new()?;
            let profile = rt.block_on(client.user_info(&handle))?;
            print_json(&profile)?;
        }
    }
    Ok(())
}
