//! Pinned version lookup in the build descriptor.
//!
//! The descriptor is scanned as text for `<artifact.version>` properties;
//! nothing else in it matters here.

use regex::Regex;
use serde::Serialize;

use crate::config::SuiteConfig;
use crate::error::{Error, Result};
use crate::utils::io;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PinnedVersion {
    pub artifact: String,
    /// Empty when the descriptor has no entry for the artifact.
    pub version: String,
}

impl PinnedVersion {
    pub fn is_snapshot(&self, marker: &str) -> bool {
        !marker.is_empty() && self.version.ends_with(marker)
    }

    /// Release tag name, `<artifact>-<version>`.
    pub fn tag(&self) -> String {
        format!("{}-{}", self.artifact, self.version)
    }
}

/// Return the text of the first `<artifact.version>` element, or an empty string.
pub fn artifact_version(descriptor: &str, artifact: &str) -> Result<String> {
    let name = regex::escape(&format!("{}.version", artifact));
    let pattern = format!(r"<{name}>(.+)</{name}>");
    let re = Regex::new(&pattern)
        .map_err(|e| Error::internal_unexpected(format!("Invalid version pattern: {}", e)))?;

    Ok(re
        .captures(descriptor)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default())
}

/// Read the pinned version of every core artifact, in configured order.
pub fn read_pinned_versions(config: &SuiteConfig) -> Result<Vec<PinnedVersion>> {
    let path = config.descriptor_path();
    let descriptor = io::read_file(&path, &format!("read {}", path.display()))?;

    config
        .artifacts
        .iter()
        .map(|artifact| {
            Ok(PinnedVersion {
                artifact: artifact.clone(),
                version: artifact_version(&descriptor, artifact)?,
            })
        })
        .collect()
}
