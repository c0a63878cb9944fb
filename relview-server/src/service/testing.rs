//! In-memory pipeline repository for service tests
//!
//! Records how many times the pipeline list and each build timeline were
//! requested so caching and short-circuiting can be asserted.

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use relview_core::domain::pipeline::Pipeline;
use relview_core::domain::run::{RunResult, RunState};
use relview_core::domain::timeline::BuildTimelineRecord;
use relview_core::dto::azure::{
    CI_ARTIFACT_PIPELINE, PipelineReference, PipelineResource, RunDetail, RunResources,
    RunSummary, Timeline,
};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::repository::{PipelineRepository, Result, UpstreamError};

pub const MANUAL_DIR: &str = "\\Release\\Manual";
pub const AUTOMATED_DIR: &str = "\\Release\\Automated";

/// Timestamp `minutes` after a fixed base instant
pub fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap() + Duration::minutes(minutes)
}

/// A completed, succeeded run created at `at(minutes)`
pub fn run(id: i64, minutes: i64, env: Option<&str>) -> RunSummary {
    run_with(id, minutes, env, RunState::Completed, RunResult::Succeeded)
}

pub fn run_with(
    id: i64,
    minutes: i64,
    env: Option<&str>,
    state: RunState,
    result: RunResult,
) -> RunSummary {
    let mut template_parameters = HashMap::new();
    if let Some(env) = env {
        template_parameters.insert("env".to_string(), serde_json::json!(env));
    }

    RunSummary {
        id,
        name: format!("run-{}", id),
        created_date: at(minutes),
        state: Some(state),
        result: Some(result),
        template_parameters,
    }
}

#[derive(Default)]
pub struct FakeRepository {
    pipelines: Vec<Pipeline>,
    runs: HashMap<i64, Vec<RunSummary>>,
    details: HashMap<i64, RunDetail>,
    timelines: HashMap<i64, Timeline>,
    failing_pipelines: bool,
    failing_runs: HashSet<i64>,
    failing_timelines: HashSet<i64>,
    panicking_runs: HashSet<i64>,
    stalled_runs: HashSet<i64>,
    pipeline_calls: AtomicUsize,
    timeline_calls: Mutex<Vec<i64>>,
}

impl FakeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pipeline(mut self, id: i64, name: &str, folder: &str) -> Self {
        self.pipelines.push(Pipeline::new(id, name, folder));
        self
    }

    pub fn with_run(mut self, pipeline_id: i64, run: RunSummary) -> Self {
        self.runs.entry(pipeline_id).or_default().push(run);
        self
    }

    /// Links run `run_id` to a CI artifact of `repo` at `version`
    pub fn with_artifact(mut self, run_id: i64, repo: &str, version: &str) -> Self {
        let mut pipelines = HashMap::new();
        pipelines.insert(
            CI_ARTIFACT_PIPELINE.to_string(),
            PipelineResource {
                pipeline: PipelineReference {
                    id: None,
                    name: repo.to_string(),
                    folder: None,
                },
                version: version.to_string(),
            },
        );
        self.details.insert(
            run_id,
            RunDetail {
                id: run_id,
                name: format!("run-{}", run_id),
                resources: RunResources { pipelines },
            },
        );
        self
    }

    /// Run detail for `run_id` without any linked CI artifact
    pub fn without_artifact(mut self, run_id: i64) -> Self {
        self.details.insert(
            run_id,
            RunDetail {
                id: run_id,
                name: format!("run-{}", run_id),
                resources: RunResources::default(),
            },
        );
        self
    }

    /// Timeline of `build_id` with one top-level stage per `(name, result)`
    pub fn with_stages(mut self, build_id: i64, stages: &[(&str, RunResult)]) -> Self {
        let records = stages
            .iter()
            .enumerate()
            .map(|(i, (name, result))| stage(&format!("{}-{}", build_id, i), None, name, *result))
            .collect();
        self.timelines.insert(build_id, Timeline { records });
        self
    }

    pub fn with_timeline(mut self, build_id: i64, records: Vec<BuildTimelineRecord>) -> Self {
        self.timelines.insert(build_id, Timeline { records });
        self
    }

    pub fn failing_pipelines(mut self) -> Self {
        self.failing_pipelines = true;
        self
    }

    pub fn failing_runs(mut self, pipeline_id: i64) -> Self {
        self.failing_runs.insert(pipeline_id);
        self
    }

    /// Listing runs of `pipeline_id` panics inside the resolution task
    pub fn panicking_runs(mut self, pipeline_id: i64) -> Self {
        self.panicking_runs.insert(pipeline_id);
        self
    }

    /// Listing runs of `pipeline_id` never completes
    pub fn stalled_runs(mut self, pipeline_id: i64) -> Self {
        self.stalled_runs.insert(pipeline_id);
        self
    }

    pub fn failing_timeline(mut self, build_id: i64) -> Self {
        self.failing_timelines.insert(build_id);
        self
    }

    pub fn pipeline_calls(&self) -> usize {
        self.pipeline_calls.load(Ordering::SeqCst)
    }

    pub fn timeline_calls(&self) -> Vec<i64> {
        self.timeline_calls.lock().unwrap().clone()
    }
}

pub fn stage(id: &str, parent_id: Option<&str>, name: &str, result: RunResult) -> BuildTimelineRecord {
    BuildTimelineRecord {
        id: id.to_string(),
        parent_id: parent_id.map(str::to_string),
        record_type: "Stage".to_string(),
        name: name.to_string(),
        state: Some(RunState::Completed),
        result: Some(result),
    }
}

#[async_trait]
impl PipelineRepository for FakeRepository {
    async fn list_pipelines(&self) -> Result<Vec<Pipeline>> {
        self.pipeline_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_pipelines {
            return Err(UpstreamError::api_error(401, "unauthorized"));
        }
        Ok(self.pipelines.clone())
    }

    async fn list_pipeline_runs(&self, pipeline_id: i64) -> Result<Vec<RunSummary>> {
        if self.panicking_runs.contains(&pipeline_id) {
            panic!("runs of pipeline {} exploded", pipeline_id);
        }
        if self.stalled_runs.contains(&pipeline_id) {
            std::future::pending::<()>().await;
        }
        if self.failing_runs.contains(&pipeline_id) {
            return Err(UpstreamError::api_error(500, "runs unavailable"));
        }
        Ok(self.runs.get(&pipeline_id).cloned().unwrap_or_default())
    }

    async fn get_pipeline_run_detail(&self, _pipeline_id: i64, run_id: i64) -> Result<RunDetail> {
        self.details
            .get(&run_id)
            .cloned()
            .ok_or_else(|| UpstreamError::api_error(404, format!("run {} not found", run_id)))
    }

    async fn get_build_timeline(&self, build_id: i64) -> Result<Timeline> {
        self.timeline_calls.lock().unwrap().push(build_id);
        if self.failing_timelines.contains(&build_id) {
            return Err(UpstreamError::Parse("truncated timeline".to_string()));
        }
        Ok(self.timelines.get(&build_id).cloned().unwrap_or_default())
    }
}
