use crate::config::SuiteConfig;
use crate::error::{Error, Result};
use crate::git;
use crate::utils::command::CommandRunner;

use super::types::{RepoCheck, RunOptions};

/// Gate a single repository: it must be synced and clean unless overridden.
pub fn check_clean(
    runner: &dyn CommandRunner,
    config: &SuiteConfig,
    artifact: &str,
    options: &RunOptions,
) -> Result<RepoCheck> {
    log_status!("check", "Checking repo {}", artifact);
    let status = git::status(runner, artifact, &config.repo_path(artifact))?;
    log_status!(
        "check",
        "  Current {}: {}",
        status.head.label(),
        status.head.name()
    );

    if let Some(blocker) = status.blocker(options.skip_up_to_date, options.skip_unstaged) {
        log_status!("check", "  {}. Aborting.", blocker.describe());
        return Err(Error::repo_not_clean(artifact, blocker.as_str()));
    }

    log_status!("check", "  All good.");
    Ok(RepoCheck {
        artifact: artifact.to_string(),
        head: status.head,
    })
}

/// Gate every core artifact, stopping at the first failure.
pub fn check_all(
    runner: &dyn CommandRunner,
    config: &SuiteConfig,
    options: &RunOptions,
) -> Result<Vec<RepoCheck>> {
    config
        .artifacts
        .iter()
        .map(|artifact| check_clean(runner, config, artifact, options))
        .collect()
}
