//! Pipelines repository
//!
//! Handles communication with the Azure DevOps pipelines API:
//! - Listing pipeline definitions
//! - Listing the runs of a pipeline
//! - Fetching a single run with its resources
//! - Fetching the build timeline of a run

use async_trait::async_trait;
use reqwest::Client;
use relview_core::domain::pipeline::Pipeline;
use relview_core::dto::azure::{ListResponse, RunDetail, RunSummary, Timeline};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::repository::error::{Result, UpstreamError};

/// Repository trait for read operations against the upstream pipeline API
#[async_trait]
pub trait PipelineRepository: Send + Sync {
    /// Lists every pipeline definition of the project
    async fn list_pipelines(&self) -> Result<Vec<Pipeline>>;

    /// Lists the runs of a pipeline, in upstream order
    ///
    /// # Arguments
    /// * `pipeline_id` - The pipeline definition ID
    async fn list_pipeline_runs(&self, pipeline_id: i64) -> Result<Vec<RunSummary>>;

    /// Fetches a single run including its consumed resources
    ///
    /// # Arguments
    /// * `pipeline_id` - The pipeline definition ID
    /// * `run_id` - The run ID
    async fn get_pipeline_run_detail(&self, pipeline_id: i64, run_id: i64) -> Result<RunDetail>;

    /// Fetches the stage/job/task timeline of a build
    ///
    /// # Arguments
    /// * `build_id` - The build ID (equal to the run ID of a YAML pipeline)
    async fn get_build_timeline(&self, build_id: i64) -> Result<Timeline>;
}

/// HTTP implementation of PipelineRepository
pub struct HttpPipelineRepository {
    client: Client,
    /// Project API root (e.g., "https://dev.azure.com/contoso/platform/_apis")
    api_url: String,
    api_version: String,
    personal_access_token: String,
}

impl HttpPipelineRepository {
    /// Creates a new HTTP pipeline repository
    ///
    /// # Arguments
    /// * `organization_url` - Organization URL (e.g., "https://dev.azure.com/contoso")
    /// * `project` - Project name
    /// * `personal_access_token` - Token sent as the basic auth password
    pub fn new(
        organization_url: &str,
        project: &str,
        personal_access_token: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_url: format!("{}/{}/_apis", organization_url.trim_end_matches('/'), project),
            api_version: "7.1".to_string(),
            personal_access_token: personal_access_token.into(),
        }
    }

    /// Creates a repository from the server configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.organization_url,
            &config.project,
            config.personal_access_token.clone(),
        )
        .with_api_version(config.api_version.clone())
    }

    /// Overrides the REST API version sent with every request
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Get the project API root
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}/{}", self.api_url, path);

        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .basic_auth("", Some(&self.personal_access_token))
            .query(&[("api-version", &self.api_version)])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(UpstreamError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| UpstreamError::Parse(format!("Failed to parse JSON response: {}", e)))
    }
}

#[async_trait]
impl PipelineRepository for HttpPipelineRepository {
    async fn list_pipelines(&self) -> Result<Vec<Pipeline>> {
        let list: ListResponse<Pipeline> = self.get("pipelines").await?;
        Ok(list.value)
    }

    async fn list_pipeline_runs(&self, pipeline_id: i64) -> Result<Vec<RunSummary>> {
        let list: ListResponse<RunSummary> =
            self.get(&format!("pipelines/{}/runs", pipeline_id)).await?;
        Ok(list.value)
    }

    async fn get_pipeline_run_detail(&self, pipeline_id: i64, run_id: i64) -> Result<RunDetail> {
        self.get(&format!("pipelines/{}/runs/{}", pipeline_id, run_id))
            .await
    }

    async fn get_build_timeline(&self, build_id: i64) -> Result<Timeline> {
        self.get(&format!("build/builds/{}/timeline", build_id))
            .await
    }
}
