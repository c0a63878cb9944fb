//! Pipeline run domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of an upstream run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RunState {
    InProgress,
    Canceling,
    Completed,
    #[serde(other)]
    Unknown,
}

/// Outcome of an upstream run (or timeline record)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RunResult {
    Succeeded,
    SucceededWithIssues,
    Failed,
    Canceled,
    Skipped,
    Abandoned,
    #[serde(other)]
    Unknown,
}

/// Build artifact identity a release run deployed
///
/// `repo` is the name of the CI pipeline that produced the artifact and is
/// the grouping key when collapsing runs to one per repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineRunDetail {
    pub id: i64,
    pub name: String,
    pub repo: String,
    pub version: String,
}

/// A successful, environment-matched release run with its linked artifact
///
/// Only ever built once the artifact has been resolved; a run that cannot be
/// traced back to a CI build is never represented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineRun {
    pub id: i64,
    pub name: String,
    pub pipeline_id: i64,
    pub pipeline_name: String,
    pub environment: String,
    pub created_date: DateTime<Utc>,
    pub pipeline_run_detail: PipelineRunDetail,
}
