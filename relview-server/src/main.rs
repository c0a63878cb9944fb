//! Relview Server
//!
//! Serves the versions currently released to each deployment environment,
//! aggregated from the release pipelines of an Azure DevOps project.
//!
//! Architecture:
//! - Configuration: Load settings from environment
//! - Repository: HTTP communication with the Azure DevOps API
//! - Services: Pipeline cache, run resolution and release aggregation
//! - API: axum router exposing the aggregation

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod config;
pub mod repository;
pub mod service;

use crate::config::Config;
use crate::repository::{HttpPipelineRepository, PipelineRepository};
use crate::service::release::ReleaseService;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "relview_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Relview Server...");

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    tracing::info!(
        "Loaded configuration: organization_url={}, project={}, cache_ttl={:?}, failure_policy={:?}",
        config.organization_url,
        config.project,
        config.pipeline_cache_ttl,
        config.failure_policy
    );

    let repository: Arc<dyn PipelineRepository> =
        Arc::new(HttpPipelineRepository::from_config(&config));
    let service = Arc::new(ReleaseService::from_config(&config, repository));

    // Build router with all API endpoints
    let app = api::create_router(service);

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
