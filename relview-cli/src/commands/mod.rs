//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod cache;
mod versions;

pub use cache::CacheCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show the versions released to an environment
    Versions {
        /// Environment name (e.g., DEV, INT, PERF1, PROD1_2)
        environment: String,

        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Server cache administration
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Versions { environment, json } => {
            versions::show_versions(config, &environment, json).await
        }
        Commands::Cache { command } => cache::handle_cache_command(command, config).await,
    }
}
