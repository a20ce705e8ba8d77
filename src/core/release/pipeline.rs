use chrono::NaiveDate;

use crate::config::SuiteConfig;
use crate::error::Result;
use crate::install;
use crate::utils::command::CommandRunner;
use crate::version;

use super::checks::check_all;
use super::restore::restore_branches;
use super::switch::switch_all;
use super::types::{RunMode, RunOptions, RunReport};

/// Run the release sequence.
///
/// Full run: read versions, gate every repo, switch to pinned tags, install,
/// then restore development branches. Preview run: install only, from
/// whatever is on disk.
///
/// Gate and switch failures abort before install. An install failure is
/// returned only after branches have been restored. Nothing is rolled back.
pub fn run(
    runner: &dyn CommandRunner,
    config: &SuiteConfig,
    options: &RunOptions,
    today: NaiveDate,
) -> Result<RunReport> {
    let mode = options.mode();
    let mut versions = Vec::new();
    let mut checked = Vec::new();
    let mut switched = Vec::new();

    if mode == RunMode::Full {
        versions = version::read_pinned_versions(config)?;
        log_status!("versions", "Version specified for artifacts:");
        for pinned in &versions {
            log_status!("versions", " {:>30} -> {}", pinned.artifact, pinned.version);
        }

        log_status!("check", "Checking repos for cleanliness");
        checked = check_all(runner, config, options)?;

        log_status!("checkout", "Checking out the specified versions:");
        switched = switch_all(runner, config, &versions, options.build_after_checkout)?;
        log_status!("checkout", "Done.");
    }

    log_status!("install", "Installing");
    let installed = install::install(runner, config, options.install_mode(), today);

    let restored = if mode == RunMode::Full {
        log_status!("restore", "Switching back to {} branches", config.development_branch);
        restore_branches(runner, config)
    } else {
        Vec::new()
    };

    let install = installed?;
    log_status!("install", "Install finished.");

    Ok(RunReport {
        mode,
        versions,
        checked,
        switched,
        install,
        restored,
    })
}
