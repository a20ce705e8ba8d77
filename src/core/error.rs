use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigInvalidJson,
    ConfigInvalidValue,

    ValidationInvalidArgument,

    RepoNotClean,
    RepoStateUnrecognized,
    VersionMissing,

    GitCommandFailed,
    BuildFailed,

    InternalIoError,
    InternalJsonError,
    InternalUnexpected,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigInvalidJson => "config.invalid_json",
            ErrorCode::ConfigInvalidValue => "config.invalid_value",

            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",

            ErrorCode::RepoNotClean => "repo.not_clean",
            ErrorCode::RepoStateUnrecognized => "repo.state_unrecognized",
            ErrorCode::VersionMissing => "version.missing",

            ErrorCode::GitCommandFailed => "git.command_failed",
            ErrorCode::BuildFailed => "build.failed",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
            ErrorCode::InternalUnexpected => "internal.unexpected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidJsonDetails {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidValueDetails {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoNotCleanDetails {
    pub artifact: String,
    pub reason: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandFailedDetails {
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
    pub output: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

fn to_details<T: Serialize>(details: T) -> Value {
    serde_json::to_value(details).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
        }
    }

    pub fn config_invalid_json(path: impl Into<String>, err: serde_json::Error) -> Self {
        let details = to_details(ConfigInvalidJsonDetails {
            path: path.into(),
            error: err.to_string(),
        });

        Self::new(
            ErrorCode::ConfigInvalidJson,
            "Invalid JSON in configuration",
            details,
        )
    }

    pub fn config_invalid_value(
        key: impl Into<String>,
        value: Option<String>,
        problem: impl Into<String>,
    ) -> Self {
        let problem = problem.into();
        let details = to_details(ConfigInvalidValueDetails {
            key: key.into(),
            value,
            problem: problem.clone(),
        });

        Self::new(
            ErrorCode::ConfigInvalidValue,
            format!("Invalid configuration value: {}", problem),
            details,
        )
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
    ) -> Self {
        let details = to_details(InvalidArgumentDetails {
            field: field.into(),
            problem: problem.into(),
        });

        Self::new(
            ErrorCode::ValidationInvalidArgument,
            "Invalid argument",
            details,
        )
    }

    /// Repository is behind its remote or has unstaged changes.
    pub fn repo_not_clean(artifact: impl Into<String>, reason: impl Into<String>) -> Self {
        let artifact = artifact.into();
        let reason = reason.into();
        let message = format!("Repository '{}' is not clean ({})", artifact, reason);
        let details = to_details(RepoNotCleanDetails { artifact, reason });

        Self::new(ErrorCode::RepoNotClean, message, details)
            .with_hint("Pass --skip-up-to-date or --skip-unstaged to bypass this check")
    }

    pub fn repo_state_unrecognized(artifact: impl Into<String>, status: impl Into<String>) -> Self {
        let artifact = artifact.into();
        Self::new(
            ErrorCode::RepoStateUnrecognized,
            format!(
                "Could not determine branch or tag of repository '{}'",
                artifact
            ),
            serde_json::json!({ "artifact": artifact, "status": status.into() }),
        )
    }

    pub fn version_missing(artifact: impl Into<String>, descriptor: impl Into<String>) -> Self {
        let artifact = artifact.into();
        let descriptor = descriptor.into();
        Self::new(
            ErrorCode::VersionMissing,
            format!("No pinned version for '{}'", artifact),
            serde_json::json!({ "artifact": artifact, "descriptor": descriptor.clone() }),
        )
        .with_hint(format!(
            "Add a <{}.version> property to {}",
            artifact, descriptor
        ))
    }

    pub fn git_command_failed(command: impl Into<String>, output: impl Into<String>) -> Self {
        let command = command.into();
        let message = format!("{} failed", command);
        let details = to_details(CommandFailedDetails {
            command,
            directory: None,
            output: output.into(),
        });

        Self::new(ErrorCode::GitCommandFailed, message, details)
    }

    pub fn build_failed(
        command: impl Into<String>,
        directory: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        let command = command.into();
        let directory = directory.into();
        let message = format!("{} failed in {}", command, directory);
        let details = to_details(CommandFailedDetails {
            command,
            directory: Some(directory),
            output: output.into(),
        });

        Self::new(ErrorCode::BuildFailed, message, details)
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let details = to_details(InternalIoErrorDetails {
            error: error.into(),
            context,
        });

        Self::new(ErrorCode::InternalIoError, "IO error", details)
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        Self::new(
            ErrorCode::InternalJsonError,
            "JSON error",
            serde_json::json!({ "error": error.into(), "context": context }),
        )
    }

    pub fn internal_unexpected(error: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InternalUnexpected,
            "Unexpected error",
            serde_json::json!({ "error": error.into() }),
        )
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }
}
