//! Service errors
//!
//! Two kinds of failure reach callers: `NotFound` when there is nothing to
//! report on, and `ExternalApi` when the upstream API could not be read. Both
//! carry a stable machine-readable code.

use std::fmt;
use thiserror::Error;

use crate::repository::UpstreamError;

/// Status reported for upstream failures that carry none
pub const DEFAULT_UPSTREAM_STATUS: u16 = 503;

/// Machine-readable error code, sent to clients as its kebab-case name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    PipelinesNotFound,
    ReleasePipelinesNotFound,
    PipelineFetch,
    RunFetch,
    RunDetailFetch,
    TimelineFetch,
    ReleasedVersionsFetch,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::PipelinesNotFound => "pipelines-not-found",
            ErrorCode::ReleasePipelinesNotFound => "release-pipelines-not-found",
            ErrorCode::PipelineFetch => "pipeline-fetch",
            ErrorCode::RunFetch => "run-fetch",
            ErrorCode::RunDetailFetch => "run-detail-fetch",
            ErrorCode::TimelineFetch => "timeline-fetch",
            ErrorCode::ReleasedVersionsFetch => "released-versions-fetch",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service error type
#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("{message}")]
    NotFound { code: ErrorCode, message: String },

    #[error("{message}")]
    ExternalApi {
        code: ErrorCode,
        message: String,
        status: u16,
    },
}

impl ReleaseError {
    pub fn not_found(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            message: message.into(),
        }
    }

    /// Wrap an upstream failure, keeping its status (503 when it has none)
    pub fn external(code: ErrorCode, context: impl fmt::Display, err: &UpstreamError) -> Self {
        Self::ExternalApi {
            code,
            message: format!("{}: {}", context, err),
            status: err.status().unwrap_or(DEFAULT_UPSTREAM_STATUS),
        }
    }

    /// Wrap a failure of the aggregation itself for `environment`
    pub fn aggregation(environment: &str, err: impl fmt::Display) -> Self {
        Self::ExternalApi {
            code: ErrorCode::ReleasedVersionsFetch,
            message: format!(
                "Failed to get released versions for environment {}: {}",
                environment, err
            ),
            status: DEFAULT_UPSTREAM_STATUS,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { code, .. } | Self::ExternalApi { code, .. } => *code,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, ReleaseError>;
