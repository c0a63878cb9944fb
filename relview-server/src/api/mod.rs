//! API Module
//!
//! HTTP API layer for the server.
//! Each submodule handles endpoints for a specific domain.

pub mod error;
pub mod health;
pub mod release;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::service::release::ReleaseService;

/// Create the main API router with all endpoints
pub fn create_router(service: Arc<ReleaseService>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Release endpoints
        .route(
            "/released-versions/{environment}",
            get(release::get_released_versions),
        )
        .route("/cache/clear", post(release::clear_cache))
        // Add state and middleware
        .with_state(service)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
