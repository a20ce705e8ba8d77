use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::utils::io;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "mastodon-deploy.json";

/// Static description of the suite being released.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteConfig {
    #[serde(default = "default_artifacts")]
    pub artifacts: Vec<String>,

    #[serde(default = "default_extras")]
    pub extras: Vec<String>,

    #[serde(default = "default_repo_root")]
    pub repo_root: String,

    #[serde(default = "default_descriptor")]
    pub descriptor: String,

    #[serde(default = "default_primary_artifact")]
    pub primary_artifact: String,

    #[serde(default = "default_umbrella_artifact")]
    pub umbrella_artifact: String,

    #[serde(default = "default_development_branch")]
    pub development_branch: String,

    #[serde(default = "default_snapshot_marker")]
    pub snapshot_marker: String,

    #[serde(default)]
    pub install: InstallConfig,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            artifacts: default_artifacts(),
            extras: default_extras(),
            repo_root: default_repo_root(),
            descriptor: default_descriptor(),
            primary_artifact: default_primary_artifact(),
            umbrella_artifact: default_umbrella_artifact(),
            development_branch: default_development_branch(),
            snapshot_marker: default_snapshot_marker(),
            install: InstallConfig::default(),
        }
    }
}

/// Settings for the aggregate install and the local bundle layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallConfig {
    #[serde(default = "default_output_root")]
    pub output_root: String,

    #[serde(default = "default_display_prefix")]
    pub display_prefix: String,

    #[serde(default = "default_bundle_suffix")]
    pub bundle_suffix: String,

    #[serde(default = "default_app_directory_property")]
    pub app_directory_property: String,

    #[serde(default = "default_jars_subdir")]
    pub jars_subdir: String,

    #[serde(default = "default_build_program")]
    pub build_program: String,

    #[serde(default = "default_build_args")]
    pub build_args: Vec<String>,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            output_root: default_output_root(),
            display_prefix: default_display_prefix(),
            bundle_suffix: default_bundle_suffix(),
            app_directory_property: default_app_directory_property(),
            jars_subdir: default_jars_subdir(),
            build_program: default_build_program(),
            build_args: default_build_args(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_artifacts() -> Vec<String> {
    strings(&[
        "mastodon-collection",
        "mastodon-graph",
        "mastodon",
        "mastodon-tracking",
        "mastodon-ellipsoid-fitting",
        "mastodon-selection-creator",
        "mastodon-pasteur",
        "mastodon-tomancak",
        "mastodon-app",
    ])
}

// Needed by Mastodon but not shipped with Fiji.
fn default_extras() -> Vec<String> {
    strings(&["mobie-io", "humble-video-all", "humble-video-noarch"])
}

fn default_repo_root() -> String {
    "..".to_string()
}

fn default_descriptor() -> String {
    "pom.xml".to_string()
}

fn default_primary_artifact() -> String {
    "mastodon".to_string()
}

fn default_umbrella_artifact() -> String {
    "mastodon-app".to_string()
}

fn default_development_branch() -> String {
    "master".to_string()
}

fn default_snapshot_marker() -> String {
    "SNAPSHOT".to_string()
}

fn default_output_root() -> String {
    ".".to_string()
}

fn default_display_prefix() -> String {
    "Mastodon".to_string()
}

fn default_bundle_suffix() -> String {
    "-all".to_string()
}

fn default_app_directory_property() -> String {
    "scijava.app.directory".to_string()
}

fn default_jars_subdir() -> String {
    "jars".to_string()
}

fn default_build_program() -> String {
    "mvn".to_string()
}

fn default_build_args() -> Vec<String> {
    strings(&["clean", "install"])
}

// =============================================================================
// Path resolution
// =============================================================================

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).to_string())
}

impl SuiteConfig {
    /// Directory of the repository cloned for `artifact`.
    pub fn repo_path(&self, artifact: &str) -> PathBuf {
        expand(&self.repo_root).join(artifact)
    }

    pub fn descriptor_path(&self) -> PathBuf {
        expand(&self.descriptor)
    }

    pub fn output_root(&self) -> PathBuf {
        expand(&self.install.output_root)
    }

    /// Core artifacts followed by extras, the set whose jars get bundled.
    pub fn bundled_artifacts(&self) -> impl Iterator<Item = &str> {
        self.artifacts
            .iter()
            .chain(self.extras.iter())
            .map(String::as_str)
    }

    pub fn validate(&self) -> Result<()> {
        if self.artifacts.is_empty() {
            return Err(Error::config_invalid_value(
                "artifacts",
                None,
                "at least one artifact is required",
            ));
        }
        for (key, name) in [
            ("primary_artifact", &self.primary_artifact),
            ("umbrella_artifact", &self.umbrella_artifact),
        ] {
            if !self.artifacts.contains(name) {
                return Err(Error::config_invalid_value(
                    key,
                    Some(name.clone()),
                    format!("'{}' is not listed in artifacts", name),
                ));
            }
        }
        if self.install.bundle_suffix.is_empty() {
            return Err(Error::config_invalid_value(
                "install.bundle_suffix",
                None,
                "bundle suffix must not be empty",
            ));
        }
        if self.install.build_program.trim().is_empty() {
            return Err(Error::config_invalid_value(
                "install.build_program",
                None,
                "build program must not be empty",
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Loading functions
// =============================================================================

/// Load the suite config.
///
/// An explicit path must exist. Without one, `mastodon-deploy.json` in the
/// working directory is used when present, otherwise built-in defaults.
pub fn load(explicit: Option<&Path>) -> Result<SuiteConfig> {
    load_in(explicit, Path::new("."))
}

/// Same as [`load`], looking for the default config file in `dir`.
pub fn load_in(explicit: Option<&Path>, dir: &Path) -> Result<SuiteConfig> {
    let config = match explicit {
        Some(path) => load_from_file(path)?,
        None => {
            let path = dir.join(DEFAULT_CONFIG_FILE);
            if path.exists() {
                load_from_file(&path)?
            } else {
                SuiteConfig::default()
            }
        }
    };
    config.validate()?;
    Ok(config)
}

/// Parse a config file; absent keys take their defaults.
pub fn load_from_file(path: &Path) -> Result<SuiteConfig> {
    let content = io::read_file(path, &format!("read {}", path.display()))?;
    parse(&content, &path.display().to_string())
}

fn parse(content: &str, origin: &str) -> Result<SuiteConfig> {
    serde_json::from_str(content).map_err(|e| Error::config_invalid_json(origin, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_describe_the_mastodon_suite() {
        let config = SuiteConfig::default();
        assert_eq!(config.artifacts.len(), 9);
        assert_eq!(config.artifacts.last().map(String::as_str), Some("mastodon-app"));
        assert_eq!(config.extras.len(), 3);
        assert_eq!(config.install.build_args, vec!["clean", "install"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let config = parse(
            r#"{"repo_root": "/work", "install": {"display_prefix": "Suite"}}"#,
            "inline",
        )
        .unwrap();

        assert_eq!(config.repo_root, "/work");
        assert_eq!(config.install.display_prefix, "Suite");
        assert_eq!(config.install.bundle_suffix, "-all");
        assert_eq!(config.development_branch, "master");
        assert_eq!(config.repo_path("mastodon"), PathBuf::from("/work/mastodon"));
    }

    #[test]
    fn paths_expand_home_directory() {
        let home = std::env::var("HOME").unwrap();
        let mut config = SuiteConfig {
            repo_root: "~/src".to_string(),
            descriptor: "~/src/mastodon-app/pom.xml".to_string(),
            ..SuiteConfig::default()
        };
        config.install.output_root = "~/bundles".to_string();

        assert_eq!(
            config.repo_path("mastodon"),
            PathBuf::from(&home).join("src").join("mastodon")
        );
        assert_eq!(
            config.descriptor_path(),
            PathBuf::from(&home).join("src/mastodon-app/pom.xml")
        );
        assert_eq!(config.output_root(), PathBuf::from(&home).join("bundles"));
    }

    #[test]
    fn default_file_is_used_when_present() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            r#"{"repo_root": "/work", "development_branch": "main"}"#,
        )
        .unwrap();

        let config = load_in(None, dir.path()).unwrap();
        assert_eq!(config.repo_root, "/work");
        assert_eq!(config.development_branch, "main");
        assert_eq!(config.artifacts.len(), 9);
    }

    #[test]
    fn builtin_defaults_without_default_file() {
        let dir = TempDir::new().unwrap();

        let config = load_in(None, dir.path()).unwrap();
        assert_eq!(config.repo_root, "..");
        assert_eq!(config.descriptor, "pom.xml");
    }

    #[test]
    fn explicit_path_wins_over_default_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), r#"{"repo_root": "/a"}"#).unwrap();
        let explicit = dir.path().join("other.json");
        std::fs::write(&explicit, r#"{"repo_root": "/b"}"#).unwrap();

        let config = load_in(Some(&explicit), dir.path()).unwrap();
        assert_eq!(config.repo_root, "/b");
    }

    #[test]
    fn invalid_json_is_reported_with_origin() {
        let err = parse("{not json", "suite.json").unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_json");
        assert_eq!(err.details["path"], "suite.json");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = load(Some(&dir.path().join("absent.json"))).unwrap_err();
        assert_eq!(err.code.as_str(), "internal.io_error");
    }

    #[test]
    fn load_validates_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("suite.json");
        std::fs::write(&path, r#"{"artifacts": ["a", "b"]}"#).unwrap();

        let err = load(Some(&path)).unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_value");
        assert_eq!(err.details["key"], "primary_artifact");
    }

    #[test]
    fn empty_bundle_suffix_is_rejected() {
        let mut config = SuiteConfig::default();
        config.install.bundle_suffix.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn bundled_artifacts_lists_core_then_extras() {
        let config = SuiteConfig::default();
        let all: Vec<&str> = config.bundled_artifacts().collect();
        assert_eq!(all.len(), 12);
        assert_eq!(all[0], "mastodon-collection");
        assert_eq!(all[11], "humble-video-noarch");
    }
}
