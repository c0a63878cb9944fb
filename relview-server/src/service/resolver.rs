//! Run resolution
//!
//! Finds, for one release pipeline, the most recent successful run that
//! deployed to the requested environment, and resolves the CI artifact it
//! deployed. Manual releases are matched on their `env` parameter, automated
//! releases on a succeeded deployment stage in their build timeline.

use relview_core::domain::environment::{deployment_stage, matches_environment};
use relview_core::domain::pipeline::Pipeline;
use relview_core::domain::run::{PipelineRun, PipelineRunDetail};
use relview_core::dto::azure::RunSummary;
use std::sync::Arc;

use crate::repository::PipelineRepository;
use crate::service::error::{ErrorCode, ReleaseError, Result};
use crate::service::selector::{ReleaseCategory, ReleaseDirectories};

/// Resolves the most recent qualifying run of a release pipeline
pub struct RunResolver {
    repository: Arc<dyn PipelineRepository>,
    directories: ReleaseDirectories,
}

impl RunResolver {
    pub fn new(repository: Arc<dyn PipelineRepository>, directories: ReleaseDirectories) -> Self {
        Self {
            repository,
            directories,
        }
    }

    /// Most recent successful run of `pipeline` for `environment`
    ///
    /// Returns `Ok(None)` when no run qualifies or the winning run links no
    /// CI artifact. Only upstream failures are errors.
    pub async fn resolve_most_recent_run(
        &self,
        pipeline: &Pipeline,
        environment: &str,
    ) -> Result<Option<PipelineRun>> {
        let runs = self
            .repository
            .list_pipeline_runs(pipeline.id)
            .await
            .map_err(|e| {
                ReleaseError::external(
                    ErrorCode::RunFetch,
                    format!("Failed to fetch runs for pipeline {}", pipeline.name),
                    &e,
                )
            })?;

        if runs.is_empty() {
            tracing::debug!("Pipeline {} has no runs", pipeline.name);
            return Ok(None);
        }

        let runs = successful_runs_newest_first(runs);

        let winner = match self.directories.category(&pipeline.folder) {
            Some(ReleaseCategory::Manual) => find_manual_run(&runs, environment),
            Some(ReleaseCategory::Automated) => {
                self.find_automated_run(pipeline, &runs, environment)
                    .await?
            }
            None => None,
        };

        let Some(run) = winner else {
            tracing::debug!(
                "No qualifying run of pipeline {} for {}",
                pipeline.name,
                environment
            );
            return Ok(None);
        };

        let detail = self
            .repository
            .get_pipeline_run_detail(pipeline.id, run.id)
            .await
            .map_err(|e| {
                ReleaseError::external(
                    ErrorCode::RunDetailFetch,
                    format!(
                        "Failed to fetch run {} of pipeline {}",
                        run.id, pipeline.name
                    ),
                    &e,
                )
            })?;

        let Some(artifact) = detail.ci_artifact() else {
            tracing::debug!(
                "Run {} of pipeline {} links no CI artifact",
                run.id,
                pipeline.name
            );
            return Ok(None);
        };

        Ok(Some(PipelineRun {
            id: run.id,
            name: run.name.clone(),
            pipeline_id: pipeline.id,
            pipeline_name: pipeline.name.clone(),
            environment: run.environment().unwrap_or(environment).to_string(),
            created_date: run.created_date,
            pipeline_run_detail: PipelineRunDetail {
                id: detail.id,
                name: detail.name.clone(),
                repo: artifact.pipeline.name.clone(),
                version: artifact.version.clone(),
            },
        }))
    }

    /// Newest run whose timeline has a succeeded deployment stage
    ///
    /// Timelines are fetched one at a time, newest first, and scanning stops
    /// at the first match.
    async fn find_automated_run<'a>(
        &self,
        pipeline: &Pipeline,
        runs: &'a [RunSummary],
        environment: &str,
    ) -> Result<Option<&'a RunSummary>> {
        let Some(stage_name) = deployment_stage(environment) else {
            return Ok(None);
        };

        for run in runs {
            let timeline = self
                .repository
                .get_build_timeline(run.id)
                .await
                .map_err(|e| {
                    ReleaseError::external(
                        ErrorCode::TimelineFetch,
                        format!(
                            "Failed to fetch timeline of run {} of pipeline {}",
                            run.id, pipeline.name
                        ),
                        &e,
                    )
                })?;

            if timeline.has_succeeded_stage(stage_name) {
                return Ok(Some(run));
            }
        }

        Ok(None)
    }
}

/// Completed, succeeded runs sorted newest first
///
/// The sort is stable: runs created at the same instant keep upstream order.
fn successful_runs_newest_first(runs: Vec<RunSummary>) -> Vec<RunSummary> {
    let mut runs: Vec<RunSummary> = runs.into_iter().filter(RunSummary::is_successful).collect();
    runs.sort_by(|a, b| b.created_date.cmp(&a.created_date));
    runs
}

fn find_manual_run<'a>(runs: &'a [RunSummary], environment: &str) -> Option<&'a RunSummary> {
    runs.iter().find(|run| {
        run.environment()
            .is_some_and(|run_env| matches_environment(environment, run_env))
    })
}
