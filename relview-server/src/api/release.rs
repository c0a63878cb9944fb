//! Release API Handlers
//!
//! HTTP endpoints for released versions and cache administration.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use relview_core::domain::release::ReleasedVersion;
use relview_core::dto::api::ClearCache;
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::service::release::ReleaseService;

/// GET /released-versions/{environment}
/// Versions currently released to an environment
pub async fn get_released_versions(
    State(service): State<Arc<ReleaseService>>,
    Path(environment): Path<String>,
) -> ApiResult<Json<Vec<ReleasedVersion>>> {
    let environment = normalize_environment(&environment)?;

    tracing::debug!("Getting released versions for {}", environment);

    let versions = service.get_released_versions(&environment).await?;

    Ok(Json(versions))
}

/// POST /cache/clear?pattern=
/// Drop cached upstream data
pub async fn clear_cache(
    State(service): State<Arc<ReleaseService>>,
    Query(req): Query<ClearCache>,
) -> StatusCode {
    tracing::info!("Clearing cache (pattern: {:?})", req.pattern);

    service.clear_cache(req.pattern.as_deref());

    StatusCode::NO_CONTENT
}

/// Upper-cased environment name made of ASCII letters, digits and underscores
fn normalize_environment(raw: &str) -> ApiResult<String> {
    let environment = raw.trim().to_ascii_uppercase();

    if environment.is_empty()
        || !environment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(ApiError::BadRequest {
            code: "invalid-environment",
            message: format!("Invalid environment '{}'", raw),
        });
    }

    Ok(environment)
}
