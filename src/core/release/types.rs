use serde::Serialize;

use crate::git::HeadRef;
use crate::install::{InstallMode, InstallOutcome};
use crate::version::PinnedVersion;

/// Flags for one run, fixed once parsed from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub install_to_default: bool,
    pub preview: bool,
    pub build_after_checkout: bool,
    pub skip_up_to_date: bool,
    pub skip_unstaged: bool,
}

impl RunOptions {
    pub fn install_mode(&self) -> InstallMode {
        if self.install_to_default {
            InstallMode::DefaultLocation
        } else {
            InstallMode::LocalDirectory
        }
    }

    pub fn mode(&self) -> RunMode {
        if self.preview {
            RunMode::Preview
        } else {
            RunMode::Full
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    Full,
    Preview,
}

/// A repository that passed the pre-flight gate.
#[derive(Debug, Clone, Serialize)]
pub struct RepoCheck {
    pub artifact: String,
    pub head: HeadRef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchAction {
    CheckedOut,
    SkippedSnapshot,
}

#[derive(Debug, Clone, Serialize)]
pub struct SwitchOutcome {
    pub artifact: String,
    pub version: String,
    pub action: SwitchAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub built: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RestoreOutcome {
    pub artifact: String,
    pub branch: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub mode: RunMode,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub versions: Vec<PinnedVersion>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub checked: Vec<RepoCheck>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub switched: Vec<SwitchOutcome>,
    pub install: InstallOutcome,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub restored: Vec<RestoreOutcome>,
}
