//! Released version output type

use serde::{Deserialize, Serialize};

use crate::domain::run::PipelineRun;

/// The most recent release of one repository to an environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleasedVersion {
    pub repo: String,
    pub pipeline_id: i64,
    pub pipeline_name: String,
    pub run_id: i64,
    pub run_name: String,
    pub version: String,
}

impl From<PipelineRun> for ReleasedVersion {
    fn from(run: PipelineRun) -> Self {
        ReleasedVersion {
            repo: run.pipeline_run_detail.repo,
            pipeline_id: run.pipeline_id,
            pipeline_name: run.pipeline_name,
            run_id: run.id,
            run_name: run.name,
            version: run.pipeline_run_detail.version,
        }
    }
}
