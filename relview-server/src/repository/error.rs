//! Upstream API error types

use thiserror::Error;

/// Result type alias for upstream operations
pub type Result<T> = std::result::Result<T, UpstreamError>;

/// Errors that can occur when calling the upstream pipeline API
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl UpstreamError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// HTTP status associated with the failure, when there is one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request(err) => err.status().map(|status| status.as_u16()),
            Self::Api { status, .. } => Some(*status),
            Self::Parse(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_status() {
        let err = UpstreamError::api_error(401, "unauthorized");
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.to_string(), "API error (status 401): unauthorized");
    }

    #[test]
    fn test_parse_error_has_no_status() {
        assert_eq!(UpstreamError::Parse("bad json".to_string()).status(), None);
    }
}
