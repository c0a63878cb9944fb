//! Deduplication and projection of resolved runs

use relview_core::domain::release::ReleasedVersion;
use relview_core::domain::run::PipelineRun;
use std::collections::HashMap;

/// Keep the most recently created run of each repository
///
/// Repositories come out in order of first appearance. Between runs created
/// at the same instant the earlier one in `runs` is kept.
pub fn dedupe_by_repo(runs: Vec<PipelineRun>) -> Vec<PipelineRun> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut latest: Vec<PipelineRun> = Vec::with_capacity(runs.len());

    for run in runs {
        match positions.get(&run.pipeline_run_detail.repo) {
            Some(&pos) => {
                if run.created_date > latest[pos].created_date {
                    latest[pos] = run;
                }
            }
            None => {
                positions.insert(run.pipeline_run_detail.repo.clone(), latest.len());
                latest.push(run);
            }
        }
    }

    latest
}

pub fn project(runs: Vec<PipelineRun>) -> Vec<ReleasedVersion> {
    runs.into_iter().map(ReleasedVersion::from).collect()
}
