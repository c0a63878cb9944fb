//! Fixed environment lookup tables
//!
//! Environments that share deployment infrastructure are paired: a manual
//! release targeting either side satisfies a request for the other. Automated
//! releases carry no environment parameter and are matched by the name of the
//! deployment stage they ran instead.

/// Shared environments and the environments deploying onto them
const SHARED_ENVIRONMENTS: &[(&str, &[&str])] = &[
    ("PERF1_2", &["PERF1", "PERF2"]),
    ("PROD1_2", &["PROD1", "PROD2"]),
];

const DEPLOYMENT_STAGES: &[(&str, &str)] = &[("DEV", "DevDeploy"), ("INT", "IntDeploy")];

/// Shared environment `environment` deploys onto, if any
pub fn paired_environment(environment: &str) -> Option<&'static str> {
    SHARED_ENVIRONMENTS
        .iter()
        .find(|(_, members)| members.contains(&environment))
        .map(|(shared, _)| *shared)
}

/// Deployment stage an automated release runs for `environment`, if any
pub fn deployment_stage(environment: &str) -> Option<&'static str> {
    DEPLOYMENT_STAGES
        .iter()
        .find(|(env, _)| *env == environment)
        .map(|(_, stage)| *stage)
}

/// True if a run tagged `run_environment` satisfies a request for `requested`
///
/// A member environment accepts runs on its shared environment and a shared
/// environment accepts runs on any of its members.
pub fn matches_environment(requested: &str, run_environment: &str) -> bool {
    run_environment == requested
        || paired_environment(requested) == Some(run_environment)
        || paired_environment(run_environment) == Some(requested)
}
