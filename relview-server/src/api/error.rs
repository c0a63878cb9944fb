//! API Error Handling
//!
//! Unified error types and conversion for API responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use relview_core::dto::api::ErrorBody;

use crate::service::ReleaseError;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: &'static str, message: String },
    Release(ReleaseError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, code.to_string(), message)
            }
            ApiError::Release(ReleaseError::NotFound { code, message }) => {
                (StatusCode::NOT_FOUND, code.to_string(), message)
            }
            ApiError::Release(ReleaseError::ExternalApi {
                code,
                message,
                status,
            }) => {
                tracing::error!("Upstream error ({}): {}", code, message);
                (upstream_status(status), code.to_string(), message)
            }
        };

        (
            status,
            Json(ErrorBody {
                error: message,
                code,
            }),
        )
            .into_response()
    }
}

impl From<ReleaseError> for ApiError {
    fn from(err: ReleaseError) -> Self {
        ApiError::Release(err)
    }
}

/// Status to answer with for an upstream failure
///
/// The upstream status is passed through when it is an error status.
fn upstream_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status)
        .ok()
        .filter(|status| status.is_client_error() || status.is_server_error())
        .unwrap_or(StatusCode::SERVICE_UNAVAILABLE)
}

pub type ApiResult<T> = Result<T, ApiError>;
