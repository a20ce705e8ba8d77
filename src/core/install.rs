//! Aggregate install, either to the build tool's default location or to a
//! dated local bundle directory.

use chrono::NaiveDate;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::build::BuildCommand;
use crate::config::{InstallConfig, SuiteConfig};
use crate::error::{Error, Result};
use crate::git;
use crate::utils::artifact;
use crate::utils::command::CommandRunner;
use crate::utils::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallMode {
    DefaultLocation,
    LocalDirectory,
}

#[derive(Debug, Clone, Serialize)]
pub struct InstallOutcome {
    pub mode: InstallMode,
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy_dir: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub copied: Vec<String>,
}

/// Name of the local bundle directory for a ref checked out on `date`.
///
/// The display prefix is prepended unless the ref already starts with it.
/// Path separators in the ref (`origin/master`, `feature/x`) become `-` so
/// the name stays a single path component.
pub fn bundle_dir_name(ref_name: &str, date: NaiveDate, install: &InstallConfig) -> String {
    let ref_name = ref_name.replace(&['/', '\\'][..], "-");
    let date = date.format("%Y-%m-%d");
    let prefix = install.display_prefix.to_lowercase();
    if prefix.is_empty() || ref_name.to_lowercase().starts_with(&prefix) {
        format!("{}-{}{}", ref_name, date, install.bundle_suffix)
    } else {
        format!(
            "{}-{}-{}{}",
            install.display_prefix, ref_name, date, install.bundle_suffix
        )
    }
}

/// Sibling directory that receives the copied suite jars: the bundle name
/// without its suffix.
pub fn copy_dir_name(bundle_name: &str, suffix: &str) -> String {
    bundle_name
        .strip_suffix(suffix)
        .unwrap_or(bundle_name)
        .to_string()
}

/// Run the aggregate install in the umbrella repository.
pub fn install(
    runner: &dyn CommandRunner,
    config: &SuiteConfig,
    mode: InstallMode,
    today: NaiveDate,
) -> Result<InstallOutcome> {
    let umbrella = config.repo_path(&config.umbrella_artifact);
    let command = BuildCommand::from_config(&config.install);

    match mode {
        InstallMode::DefaultLocation => {
            log_status!("install", "Installing to default location");
            command.run(runner, &umbrella)?;
            Ok(InstallOutcome {
                mode,
                command: command.display(),
                destination: None,
                copy_dir: None,
                copied: Vec::new(),
            })
        }
        InstallMode::LocalDirectory => {
            install_local(runner, config, command, &umbrella, today)
        }
    }
}

fn install_local(
    runner: &dyn CommandRunner,
    config: &SuiteConfig,
    command: BuildCommand,
    umbrella: &Path,
    today: NaiveDate,
) -> Result<InstallOutcome> {
    let primary = &config.primary_artifact;
    let head = git::current_ref(runner, primary, &config.repo_path(primary))?;

    let bundle_name = bundle_dir_name(head.name(), today, &config.install);
    let destination = absolute(&config.output_root().join(&bundle_name))?;
    log_status!("install", "Installing to {}", destination.display());

    let command = command.with_destination(&config.install.app_directory_property, &destination);
    command.run(runner, umbrella)?;

    let copy_dir = destination.with_file_name(copy_dir_name(
        &bundle_name,
        &config.install.bundle_suffix,
    ));
    let copied = copy_suite_jars(config, &destination, &copy_dir)?;

    Ok(InstallOutcome {
        mode: InstallMode::LocalDirectory,
        command: command.display(),
        destination: Some(destination.display().to_string()),
        copy_dir: Some(copy_dir.display().to_string()),
        copied,
    })
}

/// Create `dir` if needed and return its canonical form.
fn absolute(dir: &Path) -> Result<PathBuf> {
    io::ensure_dir(dir)?;
    fs::canonicalize(dir).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("resolve {}", dir.display())))
    })
}

/// Copy core and extra jars out of the bundle's jar folder into `copy_dir`.
fn copy_suite_jars(config: &SuiteConfig, bundle: &Path, copy_dir: &Path) -> Result<Vec<String>> {
    io::ensure_dir(copy_dir)?;

    let jars_dir = bundle.join(&config.install.jars_subdir);
    let escaped = glob::Pattern::escape(&jars_dir.to_string_lossy());
    let patterns: Vec<String> = config
        .bundled_artifacts()
        .map(|name| format!("{}/{}-*.jar", escaped, glob::Pattern::escape(name)))
        .collect();

    log_status!(
        "install",
        "Copying artifacts from {} to {}",
        jars_dir.display(),
        copy_dir.display()
    );
    let files = artifact::expand_patterns(&patterns)?;
    let copied = artifact::copy_into(&files, copy_dir)?;
    for name in &copied {
        log_status!("install", "  Copied {}", name);
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn ref_with_prefix_is_used_as_is() {
        let name = bundle_dir_name("mastodon-dev", date(2024, 1, 15), &InstallConfig::default());
        assert_eq!(name, "mastodon-dev-2024-01-15-all");
        assert_eq!(copy_dir_name(&name, "-all"), "mastodon-dev-2024-01-15");
    }

    #[test]
    fn prefix_match_ignores_case() {
        let name = bundle_dir_name("Mastodon-1.0.0", date(2024, 3, 2), &InstallConfig::default());
        assert_eq!(name, "Mastodon-1.0.0-2024-03-02-all");
    }

    #[test]
    fn other_refs_get_the_display_prefix() {
        let name = bundle_dir_name("master", date(2024, 1, 15), &InstallConfig::default());
        assert_eq!(name, "Mastodon-master-2024-01-15-all");
        assert_eq!(copy_dir_name(&name, "-all"), "Mastodon-master-2024-01-15");
    }

    #[test]
    fn slashed_refs_stay_one_path_component() {
        let install = InstallConfig::default();
        let name = bundle_dir_name("origin/master", date(2024, 1, 15), &install);
        assert_eq!(name, "Mastodon-origin-master-2024-01-15-all");
        assert!(!name.contains('/'));
        assert_eq!(copy_dir_name(&name, "-all"), "Mastodon-origin-master-2024-01-15");

        let name = bundle_dir_name("mastodon/feature\\x", date(2024, 1, 15), &install);
        assert_eq!(name, "mastodon-feature-x-2024-01-15-all");
    }

    #[test]
    fn copy_dir_name_strips_only_the_named_suffix() {
        assert_eq!(copy_dir_name("bundle-2024-01-15", "-all"), "bundle-2024-01-15");
        assert_eq!(copy_dir_name("x-full", "-full"), "x");
    }

    #[test]
    fn custom_suffix_and_prefix() {
        let install = InstallConfig {
            display_prefix: "Suite".to_string(),
            bundle_suffix: "-bundle".to_string(),
            ..InstallConfig::default()
        };
        let name = bundle_dir_name("release", date(2025, 12, 31), &install);
        assert_eq!(name, "Suite-release-2025-12-31-bundle");
        assert_eq!(copy_dir_name(&name, &install.bundle_suffix), "Suite-release-2025-12-31");
    }
}
