//! Relview HTTP Client
//!
//! A simple, type-safe HTTP client for the Relview server API.
//!
//! # Example
//!
//! ```no_run
//! use relview_client::RelviewClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = RelviewClient::new("http://localhost:8080");
//!
//!     for version in client.released_versions("PROD1").await? {
//!         println!("{} {}", version.repo, version.version);
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
mod releases;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use relview_core::domain::release::ReleasedVersion;

use relview_core::dto::api::ErrorBody;
use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the Relview server API
#[derive(Debug, Clone)]
pub struct RelviewClient {
    /// Base URL of the server (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl RelviewClient {
    /// Create a new Relview client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the server (e.g., "http://localhost:8080")
    ///
    /// # Example
    /// ```
    /// use relview_client::RelviewClient;
    ///
    /// let client = RelviewClient::new("http://localhost:8080");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new Relview client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let response = Self::check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that returns no content
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        Self::check_status(response).await.map(|_| ())
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        tracing::debug!("Server returned {}: {}", status, text);

        Err(ClientError::from_response(status.as_u16(), &text))
    }
}

impl ClientError {
    /// Build an error from a failed response, reading the server's error body when present
    fn from_response(status: u16, text: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(text) {
            Ok(body) => ClientError::api_error(status, Some(body.code), body.error),
            Err(_) => ClientError::api_error(status, None, text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = RelviewClient::new("http://localhost:8080");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = RelviewClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_with_custom_client() {
        let client = RelviewClient::with_client("http://localhost:8080", Client::new());
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_error_from_server_body() {
        let err = ClientError::from_response(
            404,
            r#"{"error": "No pipelines found", "code": "pipelines-not-found"}"#,
        );
        assert!(err.is_not_found());
        assert_eq!(err.code(), Some("pipelines-not-found"));
        assert!(err.to_string().contains("No pipelines found"));
    }

    #[test]
    fn test_error_from_plain_body() {
        let err = ClientError::from_response(502, "Bad Gateway");
        assert!(err.is_server_error());
        assert_eq!(err.code(), None);
    }
}
