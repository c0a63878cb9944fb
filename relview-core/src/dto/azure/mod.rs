//! Azure DevOps pipeline API payloads
//!
//! Only the fields Relview reads are modelled; everything else in the
//! upstream responses is ignored on deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::run::{RunResult, RunState};
use crate::domain::timeline::BuildTimelineRecord;

/// Resource key under which a release run links the CI build it deployed
pub const CI_ARTIFACT_PIPELINE: &str = "ci-artifact-pipeline";

/// Template parameter carrying the target environment of a manual release
pub const ENV_PARAMETER: &str = "env";

/// Envelope of every upstream list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

/// Run as returned by the runs list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    pub created_date: DateTime<Utc>,
    #[serde(default)]
    pub state: Option<RunState>,
    #[serde(default)]
    pub result: Option<RunResult>,
    #[serde(default)]
    pub template_parameters: HashMap<String, serde_json::Value>,
}

impl RunSummary {
    pub fn is_successful(&self) -> bool {
        self.state == Some(RunState::Completed) && self.result == Some(RunResult::Succeeded)
    }

    /// Target environment of the run, when it was triggered with one
    pub fn environment(&self) -> Option<&str> {
        self.template_parameters
            .get(ENV_PARAMETER)
            .and_then(|value| value.as_str())
    }
}

/// Run as returned by the single-run endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunDetail {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub resources: RunResources,
}

impl RunDetail {
    /// The CI build this run deployed, if it links one
    pub fn ci_artifact(&self) -> Option<&PipelineResource> {
        self.resources.pipelines.get(CI_ARTIFACT_PIPELINE)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunResources {
    #[serde(default)]
    pub pipelines: HashMap<String, PipelineResource>,
}

/// A pipeline resource consumed by a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResource {
    pub pipeline: PipelineReference,
    #[serde(default)]
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineReference {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub folder: Option<String>,
}

/// Build timeline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timeline {
    #[serde(default)]
    pub records: Vec<BuildTimelineRecord>,
}

impl Timeline {
    pub fn has_succeeded_stage(&self, stage_name: &str) -> bool {
        self.records
            .iter()
            .any(|record| record.is_succeeded_stage(stage_name))
    }
}
