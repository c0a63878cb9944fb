//! Release-related API endpoints

use relview_core::domain::release::ReleasedVersion;

use crate::RelviewClient;
use crate::error::{ClientError, Result};

impl RelviewClient {
    // =============================================================================
    // Released Versions
    // =============================================================================

    /// Versions currently released to an environment
    ///
    /// # Arguments
    /// * `environment` - Environment name (e.g., "DEV", "PERF1")
    ///
    /// # Example
    /// ```no_run
    /// # use relview_client::RelviewClient;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = RelviewClient::new("http://localhost:8080");
    /// let versions = client.released_versions("INT").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn released_versions(&self, environment: &str) -> Result<Vec<ReleasedVersion>> {
        let environment = environment.trim();
        if environment.is_empty() {
            return Err(ClientError::InvalidRequest(
                "environment cannot be empty".to_string(),
            ));
        }
        // Same alphabet the server accepts; keeps the name a single path segment
        if !environment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ClientError::InvalidRequest(format!(
                "invalid environment '{}'",
                environment
            )));
        }

        let url = format!("{}/released-versions/{}", self.base_url, environment);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Administration
    // =============================================================================

    /// Drop cached upstream data on the server
    ///
    /// # Arguments
    /// * `pattern` - Only drop keys containing this; everything when `None`
    pub async fn clear_cache(&self, pattern: Option<&str>) -> Result<()> {
        let url = format!("{}/cache/clear", self.base_url);
        let mut request = self.client.post(&url);
        if let Some(pattern) = pattern {
            request = request.query(&[("pattern", pattern)]);
        }
        let response = request.send().await?;

        self.handle_empty_response(response).await
    }

    /// Check that the server is up
    pub async fn health(&self) -> Result<serde_json::Value> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }
}
