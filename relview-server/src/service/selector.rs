//! Release pipeline selection
//!
//! A pipeline is a release pipeline when its folder is exactly one of the two
//! configured release directories. The directory also decides how its runs
//! are matched to an environment.

use relview_core::domain::pipeline::Pipeline;

use crate::service::error::{ErrorCode, ReleaseError, Result};

/// How a release pipeline's runs are tied to an environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseCategory {
    /// Runs carry an `env` template parameter set by whoever triggered them
    Manual,
    /// Runs are matched through a succeeded deployment stage in their timeline
    Automated,
}

/// The two folders release pipelines live in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDirectories {
    pub manual: String,
    pub automated: String,
}

impl ReleaseDirectories {
    pub fn new(manual: impl Into<String>, automated: impl Into<String>) -> Self {
        Self {
            manual: manual.into(),
            automated: automated.into(),
        }
    }

    /// Category of pipelines in `folder`, if it is a release directory
    pub fn category(&self, folder: &str) -> Option<ReleaseCategory> {
        if folder == self.manual {
            Some(ReleaseCategory::Manual)
        } else if folder == self.automated {
            Some(ReleaseCategory::Automated)
        } else {
            None
        }
    }

    pub fn contains(&self, folder: &str) -> bool {
        self.category(folder).is_some()
    }
}

/// Keep only pipelines located in a release directory
///
/// Fails with `NotFound` when there are no pipelines at all, and with a
/// distinct `NotFound` when none of them is a release pipeline.
pub fn select_release_pipelines(
    pipelines: Vec<Pipeline>,
    directories: &ReleaseDirectories,
) -> Result<Vec<Pipeline>> {
    if pipelines.is_empty() {
        return Err(ReleaseError::not_found(
            ErrorCode::PipelinesNotFound,
            "No pipelines found",
        ));
    }

    let total = pipelines.len();
    let selected: Vec<Pipeline> = pipelines
        .into_iter()
        .filter(|pipeline| directories.contains(&pipeline.folder))
        .collect();

    if selected.is_empty() {
        return Err(ReleaseError::not_found(
            ErrorCode::ReleasePipelinesNotFound,
            format!(
                "No release pipelines found in {} or {}",
                directories.manual, directories.automated
            ),
        ));
    }

    tracing::debug!(
        "Selected {} release pipeline(s) out of {}",
        selected.len(),
        total
    );

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directories() -> ReleaseDirectories {
        ReleaseDirectories::new("\\Release\\Manual", "\\Release\\Automated")
    }

    #[test]
    fn test_category() {
        let dirs = directories();
        assert_eq!(dirs.category("\\Release\\Manual"), Some(ReleaseCategory::Manual));
        assert_eq!(
            dirs.category("\\Release\\Automated"),
            Some(ReleaseCategory::Automated)
        );
        assert_eq!(dirs.category("\\CI"), None);
    }

    #[test]
    fn test_selects_exact_folder_matches_only() {
        let pipelines = vec![
            Pipeline::new(1, "api-release", "\\Release\\Manual"),
            Pipeline::new(2, "web-release", "\\Release\\Automated"),
            Pipeline::new(3, "nested", "\\Release\\Manual\\Legacy"),
            Pipeline::new(4, "prefix", "\\Release"),
            Pipeline::new(5, "ci", "\\CI"),
            Pipeline::new(6, "case", "\\release\\manual"),
        ];

        let selected = select_release_pipelines(pipelines, &directories()).unwrap();
        let ids: Vec<i64> = selected.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_no_pipelines_is_not_found() {
        let err = select_release_pipelines(vec![], &directories()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::PipelinesNotFound);
        assert!(err.is_not_found());
    }

    #[test]
    fn test_no_release_pipelines_is_distinct_not_found() {
        let pipelines = vec![Pipeline::new(5, "ci", "\\CI")];
        let err = select_release_pipelines(pipelines, &directories()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ReleasePipelinesNotFound);
        assert!(err.is_not_found());
    }
}
