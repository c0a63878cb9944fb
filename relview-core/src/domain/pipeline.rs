//! Pipeline domain types

use serde::{Deserialize, Serialize};

/// Pipeline definition as listed by the upstream API
///
/// Identity is `id`. `folder` is the directory the definition lives in and is
/// what marks a pipeline as a release pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub folder: String,
}

impl Pipeline {
    pub fn new(id: i64, name: impl Into<String>, folder: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            folder: folder.into(),
        }
    }
}
