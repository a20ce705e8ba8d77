//! Artifact copying with glob pattern support.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Expand every pattern and return the matching files, deduplicated and sorted.
///
/// Directories and unreadable entries are ignored. A pattern that matches
/// nothing contributes nothing.
pub fn expand_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut matches = BTreeSet::new();
    for pattern in patterns {
        let entries = glob::glob(pattern).map_err(|e| {
            Error::validation_invalid_argument(
                "artifact_pattern",
                format!("Invalid glob pattern '{}': {}", pattern, e),
            )
        })?;
        matches.extend(entries.filter_map(|entry| entry.ok()).filter(|p| p.is_file()));
    }
    Ok(matches.into_iter().collect())
}

/// Copy each file into `dest_dir`, keeping its file name.
///
/// Returns the copied file names in order.
pub fn copy_into(files: &[PathBuf], dest_dir: &Path) -> Result<Vec<String>> {
    let mut copied = Vec::with_capacity(files.len());
    for file in files {
        let name = file.file_name().ok_or_else(|| {
            Error::internal_io(
                format!("Invalid path: {}", file.display()),
                Some("copy artifact".to_string()),
            )
        })?;
        let target = dest_dir.join(name);
        fs::copy(file, &target).map_err(|e| {
            Error::internal_io(
                e.to_string(),
                Some(format!("copy {} to {}", file.display(), dest_dir.display())),
            )
        })?;
        copied.push(name.to_string_lossy().to_string());
    }
    Ok(copied)
}
