//! Relview HTTP API shapes

use serde::{Deserialize, Serialize};

/// Error body returned by every failing Relview endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
}

/// Request to drop cached upstream data
///
/// Without a pattern every entry is dropped; otherwise only keys containing it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClearCache {
    #[serde(default)]
    pub pattern: Option<String>,
}
