//! Health Check API Handler
//!
//! Simple health check endpoint for monitoring.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::service::release::ReleaseService;

/// GET /health
/// Health check endpoint, also reporting the pipeline cache lifetime
pub async fn health_check(State(service): State<Arc<ReleaseService>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "ok",
            "pipelineCacheTtlSeconds": service.cache().ttl().as_secs(),
        })),
    )
}
