//! Build timeline domain types

use serde::{Deserialize, Serialize};

use crate::domain::run::{RunResult, RunState};

/// A node of a build's stage/job/task tree
///
/// Records without a parent are the top-level stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildTimelineRecord {
    pub id: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(rename = "type", default)]
    pub record_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub state: Option<RunState>,
    #[serde(default)]
    pub result: Option<RunResult>,
}

impl BuildTimelineRecord {
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    /// True for a top-level record with the given name that succeeded
    pub fn is_succeeded_stage(&self, stage_name: &str) -> bool {
        self.is_top_level() && self.name == stage_name && self.result == Some(RunResult::Succeeded)
    }
}
