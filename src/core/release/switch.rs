use crate::build::BuildCommand;
use crate::config::SuiteConfig;
use crate::error::{Error, Result};
use crate::git;
use crate::utils::command::CommandRunner;
use crate::version::PinnedVersion;

use super::types::{SwitchAction, SwitchOutcome};

/// Check out the release tag for one pinned artifact.
///
/// Snapshot versions track the development branch and are left alone.
pub fn switch_version(
    runner: &dyn CommandRunner,
    config: &SuiteConfig,
    pinned: &PinnedVersion,
    build_after_checkout: bool,
) -> Result<SwitchOutcome> {
    if pinned.is_snapshot(&config.snapshot_marker) {
        log_status!(
            "checkout",
            "Not checking out {} version {} of module {}",
            config.snapshot_marker,
            pinned.version,
            pinned.artifact
        );
        return Ok(SwitchOutcome {
            artifact: pinned.artifact.clone(),
            version: pinned.version.clone(),
            action: SwitchAction::SkippedSnapshot,
            tag: None,
            built: false,
        });
    }

    if pinned.version.is_empty() {
        return Err(Error::version_missing(
            &pinned.artifact,
            config.descriptor_path().display().to_string(),
        ));
    }

    let repo = config.repo_path(&pinned.artifact);

    log_status!("checkout", "Getting tags from remote for {}", pinned.artifact);
    if let Err(e) = git::pull_tags(runner, &repo) {
        // A missing tag is reported by the checkout below.
        log_status!("checkout", "  Could not pull tags: {}", e);
    }

    let tag = pinned.tag();
    log_status!(
        "checkout",
        "Checking out version {} of module {}",
        pinned.version,
        pinned.artifact
    );
    git::checkout_detached(runner, &repo, &tag)?;

    if build_after_checkout {
        log_status!("checkout", "  Building artifact.");
        BuildCommand::from_config(&config.install).run(runner, &repo)?;
    }

    Ok(SwitchOutcome {
        artifact: pinned.artifact.clone(),
        version: pinned.version.clone(),
        action: SwitchAction::CheckedOut,
        tag: Some(tag),
        built: build_after_checkout,
    })
}

/// Switch every artifact in order, stopping at the first failure.
///
/// Artifacts switched before a failure stay at their new refs.
pub fn switch_all(
    runner: &dyn CommandRunner,
    config: &SuiteConfig,
    versions: &[PinnedVersion],
    build_after_checkout: bool,
) -> Result<Vec<SwitchOutcome>> {
    versions
        .iter()
        .map(|pinned| switch_version(runner, config, pinned, build_after_checkout))
        .collect()
}
