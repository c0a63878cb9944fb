//! Released versions command handler

use anyhow::Result;
use colored::*;
use relview_client::{ClientError, RelviewClient};
use relview_core::domain::release::ReleasedVersion;

use crate::config::Config;

/// Fetch and print the versions released to `environment`
pub async fn show_versions(config: &Config, environment: &str, json: bool) -> Result<()> {
    let client = RelviewClient::new(&config.server_url);

    let versions = released_or_error(client.released_versions(environment).await, environment)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&versions)?);
        return Ok(());
    }

    if versions.is_empty() {
        println!(
            "{}",
            format!("Nothing released to {}.", environment.to_uppercase()).yellow()
        );
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "{} repositor{} released to {}:",
            versions.len(),
            if versions.len() == 1 { "y" } else { "ies" },
            environment.to_uppercase()
        )
        .bold()
    );
    println!();

    for line in format_table(&versions) {
        println!("  {}", line);
    }

    Ok(())
}

/// Every server error fails the command; known codes get a clearer context
fn released_or_error(
    result: std::result::Result<Vec<ReleasedVersion>, ClientError>,
    environment: &str,
) -> Result<Vec<ReleasedVersion>> {
    result.map_err(|err| {
        let context = match err.code() {
            Some("pipelines-not-found") => "No pipelines found in the project".to_string(),
            Some("release-pipelines-not-found") => {
                "No release pipelines found in the release directories".to_string()
            }
            _ => format!("Failed to get released versions for {}", environment),
        };
        anyhow::Error::new(err).context(context)
    })
}

/// Aligned rows: repository, version, then the release run
fn format_table(versions: &[ReleasedVersion]) -> Vec<String> {
    let repo_width = versions.iter().map(|v| v.repo.len()).max().unwrap_or(0);
    let version_width = versions.iter().map(|v| v.version.len()).max().unwrap_or(0);

    let mut sorted: Vec<&ReleasedVersion> = versions.iter().collect();
    sorted.sort_by(|a, b| a.repo.cmp(&b.repo));

    sorted
        .into_iter()
        .map(|v| {
            format!(
                "{}  {}  {}",
                format!("{:<width$}", v.repo, width = repo_width).bold(),
                format!("{:<width$}", v.version, width = version_width).cyan(),
                format!("{} #{} ({})", v.pipeline_name, v.run_id, v.run_name).dimmed()
            )
        })
        .collect()
}
