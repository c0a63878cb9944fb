//! Repository Module
//!
//! Data access layer for the server. Repositories are stateless HTTP clients
//! over the upstream pipeline-orchestration API: four read operations, no
//! business logic, failures reported as a single `UpstreamError` taxonomy.
//!
//! The repository is trait-based so the service layer can be tested against
//! in-memory fakes.

mod error;
mod pipelines;

pub use error::{Result, UpstreamError};
pub use pipelines::{HttpPipelineRepository, PipelineRepository};
