//! Cache command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use relview_client::RelviewClient;

use crate::config::Config;

/// Cache subcommands
#[derive(Subcommand)]
pub enum CacheCommands {
    /// Drop cached upstream data so the next request refetches it
    Clear {
        /// Only drop cache keys containing this text
        #[arg(short, long)]
        pattern: Option<String>,
    },
}

/// Handle cache commands
pub async fn handle_cache_command(command: CacheCommands, config: &Config) -> Result<()> {
    let client = RelviewClient::new(&config.server_url);

    match command {
        CacheCommands::Clear { pattern } => {
            client
                .clear_cache(pattern.as_deref())
                .await
                .context("Failed to clear server cache")?;

            match pattern {
                Some(pattern) => println!(
                    "{}",
                    format!("✓ Cleared cache entries matching '{}'", pattern)
                        .green()
                        .bold()
                ),
                None => println!("{}", "✓ Cache cleared".green().bold()),
            }

            Ok(())
        }
    }
}
