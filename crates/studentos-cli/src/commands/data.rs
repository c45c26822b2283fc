use clap::Subcommand;
use studentos_core::Config;

use crate::context::{open_store, CliResult};

#[derive(Subcommand)]
pub enum DataAction {
    /// Delete every stored record (the theme is kept)
    Clear {
        /// Required confirmation
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: DataAction, config: &Config) -> CliResult {
    match action {
        DataAction::Clear { yes } => {
            if !yes {
                return Err("refusing to clear data without --yes".into());
            }
            let mut store = open_store(config)?;
            let removed = store.clear_all_data();
            println!("cleared {removed} key(s)");
        }
    }
    Ok(())
}
