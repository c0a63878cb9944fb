//! Server configuration
//!
//! Defines all configurable parameters for the server including the upstream
//! Azure DevOps connection, the release directories and cache lifetime.

use std::time::Duration;

use crate::service::release::FailurePolicy;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP API binds to
    pub bind_addr: String,

    /// Organization URL (e.g., "https://dev.azure.com/contoso")
    pub organization_url: String,

    /// Project holding the release pipelines
    pub project: String,

    /// Personal access token used for upstream requests
    pub personal_access_token: String,

    /// Upstream REST API version
    pub api_version: String,

    /// Folder of release pipelines triggered by hand with an `env` parameter
    pub manual_release_directory: String,

    /// Folder of release pipelines deploying through named stages
    pub automated_release_directory: String,

    /// How long the pipeline list is served from cache
    pub pipeline_cache_ttl: Duration,

    /// What a single pipeline's resolution failure does to the aggregation
    pub failure_policy: FailurePolicy,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(organization_url: String, project: String, personal_access_token: String) -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            organization_url,
            project,
            personal_access_token,
            api_version: "7.1".to_string(),
            manual_release_directory: "\\Release\\Manual".to_string(),
            automated_release_directory: "\\Release\\Automated".to_string(),
            pipeline_cache_ttl: Duration::from_secs(300), // 5 minutes
            failure_policy: FailurePolicy::Isolate,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - AZURE_DEVOPS_ORG_URL (required)
    /// - AZURE_DEVOPS_PROJECT (required)
    /// - AZURE_DEVOPS_PAT (required)
    /// - AZURE_DEVOPS_API_VERSION (optional, default: 7.1)
    /// - RELVIEW_BIND_ADDR (optional, default: 0.0.0.0:8080)
    /// - RELVIEW_MANUAL_RELEASE_DIR (optional, default: \Release\Manual)
    /// - RELVIEW_AUTOMATED_RELEASE_DIR (optional, default: \Release\Automated)
    /// - RELVIEW_PIPELINE_CACHE_TTL (optional, seconds, default: 300)
    /// - RELVIEW_FAILURE_POLICY (optional, isolate | fail-fast, default: isolate)
    pub fn from_env() -> anyhow::Result<Self> {
        let organization_url = std::env::var("AZURE_DEVOPS_ORG_URL")
            .map_err(|_| anyhow::anyhow!("AZURE_DEVOPS_ORG_URL environment variable not set"))?;

        let project = std::env::var("AZURE_DEVOPS_PROJECT")
            .map_err(|_| anyhow::anyhow!("AZURE_DEVOPS_PROJECT environment variable not set"))?;

        let personal_access_token = std::env::var("AZURE_DEVOPS_PAT")
            .map_err(|_| anyhow::anyhow!("AZURE_DEVOPS_PAT environment variable not set"))?;

        let mut config = Self::new(organization_url, project, personal_access_token);

        if let Ok(bind_addr) = std::env::var("RELVIEW_BIND_ADDR") {
            config.bind_addr = bind_addr;
        }

        if let Ok(api_version) = std::env::var("AZURE_DEVOPS_API_VERSION") {
            config.api_version = api_version;
        }

        if let Ok(dir) = std::env::var("RELVIEW_MANUAL_RELEASE_DIR") {
            config.manual_release_directory = dir;
        }

        if let Ok(dir) = std::env::var("RELVIEW_AUTOMATED_RELEASE_DIR") {
            config.automated_release_directory = dir;
        }

        config.pipeline_cache_ttl = std::env::var("RELVIEW_PIPELINE_CACHE_TTL")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(config.pipeline_cache_ttl);

        if let Ok(policy) = std::env::var("RELVIEW_FAILURE_POLICY") {
            config.failure_policy = policy.parse()?;
        }

        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.organization_url.starts_with("http://")
            && !self.organization_url.starts_with("https://")
        {
            anyhow::bail!("organization_url must start with http:// or https://");
        }

        if self.project.trim().is_empty() {
            anyhow::bail!("project cannot be empty");
        }

        if self.personal_access_token.is_empty() {
            anyhow::bail!("personal_access_token cannot be empty");
        }

        if self.manual_release_directory.is_empty() || self.automated_release_directory.is_empty()
        {
            anyhow::bail!("release directories cannot be empty");
        }

        if self.manual_release_directory == self.automated_release_directory {
            anyhow::bail!("manual and automated release directories must differ");
        }

        if self.pipeline_cache_ttl.is_zero() {
            anyhow::bail!("pipeline_cache_ttl must be greater than 0");
        }

        Ok(())
    }
}
