//! Service Module
//!
//! Business logic layer for the server.
//! Services sit between the upstream repository and the HTTP API and hold
//! the release aggregation: pipeline caching, release pipeline selection,
//! per-pipeline run resolution, and deduplication by repository.

pub mod cache;
pub mod dedupe;
pub mod error;
pub mod release;
pub mod resolver;
pub mod selector;

#[cfg(test)]
pub(crate) mod testing;

// Re-export for convenience
pub use error::{ErrorCode, ReleaseError};
