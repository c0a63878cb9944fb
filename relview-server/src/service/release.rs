//! Release Service
//!
//! Aggregates the versions currently released to an environment:
//! 1. Fetch the pipeline list (through the cache)
//! 2. Keep the release pipelines
//! 3. Resolve each pipeline's most recent qualifying run concurrently
//! 4. Collapse to one run per repository and project to `ReleasedVersion`

use relview_core::domain::pipeline::Pipeline;
use relview_core::domain::release::ReleasedVersion;
use relview_core::domain::run::PipelineRun;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::config::Config;
use crate::repository::PipelineRepository;
use crate::service::cache::{DEFAULT_TTL, TtlCache};
use crate::service::dedupe::{dedupe_by_repo, project};
use crate::service::error::{ErrorCode, ReleaseError, Result};
use crate::service::resolver::RunResolver;
use crate::service::selector::{ReleaseDirectories, select_release_pipelines};

/// Cache key of the upstream pipeline list
pub const PIPELINES_CACHE_KEY: &str = "pipelines";

/// What a failed per-pipeline resolution does to the whole aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the failure and report nothing for that pipeline
    Isolate,
    /// Fail the aggregation with the first error, cancelling the rest
    FailFast,
}

impl FromStr for FailurePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "isolate" => Ok(Self::Isolate),
            "fail-fast" | "failfast" => Ok(Self::FailFast),
            other => anyhow::bail!(
                "invalid failure policy '{}', expected 'isolate' or 'fail-fast'",
                other
            ),
        }
    }
}

/// Pipeline list cache shared by everything aggregating releases
pub type PipelineCache = TtlCache<Vec<Pipeline>>;

pub struct ReleaseService {
    repository: Arc<dyn PipelineRepository>,
    resolver: Arc<RunResolver>,
    cache: Arc<PipelineCache>,
    directories: ReleaseDirectories,
    failure_policy: FailurePolicy,
}

impl ReleaseService {
    /// Creates a service with a fresh five minute pipeline cache
    pub fn new(repository: Arc<dyn PipelineRepository>, directories: ReleaseDirectories) -> Self {
        let resolver = Arc::new(RunResolver::new(
            Arc::clone(&repository),
            directories.clone(),
        ));

        Self {
            repository,
            resolver,
            cache: Arc::new(TtlCache::new(DEFAULT_TTL)),
            directories,
            failure_policy: FailurePolicy::Isolate,
        }
    }

    /// Creates a service from the server configuration
    pub fn from_config(config: &Config, repository: Arc<dyn PipelineRepository>) -> Self {
        let directories = ReleaseDirectories::new(
            config.manual_release_directory.clone(),
            config.automated_release_directory.clone(),
        );

        Self::new(repository, directories)
            .with_cache(Arc::new(TtlCache::new(config.pipeline_cache_ttl)))
            .with_failure_policy(config.failure_policy)
    }

    /// Uses `cache` for the pipeline list instead of the service's own
    pub fn with_cache(mut self, cache: Arc<PipelineCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    pub fn cache(&self) -> &Arc<PipelineCache> {
        &self.cache
    }

    /// Versions currently released to `environment`, one per repository
    ///
    /// An empty list is a valid answer: no release pipeline has a qualifying
    /// run for the environment.
    pub async fn get_released_versions(&self, environment: &str) -> Result<Vec<ReleasedVersion>> {
        tracing::info!("Resolving released versions for {}", environment);

        let pipelines = self.fetch_pipelines().await?;
        let release_pipelines = select_release_pipelines(pipelines, &self.directories)?;
        let runs = self.resolve_runs(release_pipelines, environment).await?;
        let versions = project(dedupe_by_repo(runs));

        tracing::info!(
            "Found {} released version(s) for {}",
            versions.len(),
            environment
        );

        Ok(versions)
    }

    /// Drops cached entries whose key contains `pattern`, or all of them
    pub fn clear_cache(&self, pattern: Option<&str>) -> usize {
        let removed = self.cache.invalidate(pattern);
        tracing::info!("Cleared {} cache entries", removed);
        removed
    }

    async fn fetch_pipelines(&self) -> Result<Vec<Pipeline>> {
        if let Some(pipelines) = self.cache.get(PIPELINES_CACHE_KEY) {
            tracing::debug!("Pipeline list served from cache");
            return Ok(pipelines);
        }

        tracing::debug!("Pipeline list not cached, fetching from upstream");

        let pipelines = self.repository.list_pipelines().await.map_err(|e| {
            ReleaseError::external(ErrorCode::PipelineFetch, "Failed to fetch pipelines", &e)
        })?;

        Ok(self.cache.set(PIPELINES_CACHE_KEY, pipelines))
    }

    /// Resolve every pipeline concurrently and wait for all of them
    ///
    /// Results are put back in pipeline order so the output does not depend
    /// on which task finished first.
    async fn resolve_runs(
        &self,
        pipelines: Vec<Pipeline>,
        environment: &str,
    ) -> Result<Vec<PipelineRun>> {
        let mut tasks = JoinSet::new();
        let mut pipelines_by_task = HashMap::new();

        for (index, pipeline) in pipelines.into_iter().enumerate() {
            let resolver = Arc::clone(&self.resolver);
            let environment = environment.to_string();
            let name = pipeline.name.clone();

            let handle = tasks.spawn(async move {
                resolver
                    .resolve_most_recent_run(&pipeline, &environment)
                    .await
            });
            pipelines_by_task.insert(handle.id(), (index, name));
        }

        let mut resolved = Vec::new();

        while let Some(joined) = tasks.join_next_with_id().await {
            let (id, outcome) = match joined {
                Ok((id, result)) => (id, Ok(result)),
                Err(join_err) => (join_err.id(), Err(join_err)),
            };
            let Some((index, name)) = pipelines_by_task.remove(&id) else {
                continue;
            };

            match outcome {
                Ok(Ok(Some(run))) => resolved.push((index, run)),
                Ok(Ok(None)) => {
                    tracing::debug!("Pipeline {} has nothing released", name);
                }
                Ok(Err(err)) => match self.failure_policy {
                    FailurePolicy::Isolate => {
                        tracing::warn!("Skipping pipeline {} ({}): {}", name, err.code(), err);
                    }
                    FailurePolicy::FailFast => {
                        tasks.abort_all();
                        return Err(err);
                    }
                },
                Err(join_err) => match self.failure_policy {
                    FailurePolicy::Isolate => {
                        tracing::warn!(
                            "Skipping pipeline {}: resolution task failed: {}",
                            name,
                            join_err
                        );
                    }
                    FailurePolicy::FailFast => {
                        tasks.abort_all();
                        return Err(ReleaseError::aggregation(environment, join_err));
                    }
                },
            }
        }

        resolved.sort_by_key(|(index, _)| *index);
        Ok(resolved.into_iter().map(|(_, run)| run).collect())
    }
}
