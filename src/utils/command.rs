//! Command execution primitives behind an injectable runner.

use std::path::Path;
use std::process::{Command, Output};

use serde::Serialize;

/// Captured result of a single external command.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommandOutput {
    pub success: bool,
    pub exit_code: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stdout: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stderr: String,
}

impl CommandOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            exit_code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            exit_code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Stdout followed by stderr, trimmed.
    pub fn combined(&self) -> String {
        let stdout = self.stdout.trim();
        let stderr = self.stderr.trim();
        match (stdout.is_empty(), stderr.is_empty()) {
            (true, _) => stderr.to_string(),
            (false, true) => stdout.to_string(),
            (false, false) => format!("{}\n{}", stdout, stderr),
        }
    }

    fn from_output(output: &Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

/// Synchronous capability to run an external program in a directory.
///
/// No timeout is applied; a hung command blocks the caller.
pub trait CommandRunner {
    fn run(&self, dir: &Path, program: &str, args: &[&str]) -> CommandOutput;
}

/// Runs commands as real child processes, without a shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, dir: &Path, program: &str, args: &[&str]) -> CommandOutput {
        match Command::new(program).args(args).current_dir(dir).output() {
            Ok(output) => CommandOutput::from_output(&output),
            Err(e) => CommandOutput::failed(
                -1,
                format!("Failed to run {}: {}", display(program, args), e),
            ),
        }
    }
}

/// Render a program and its arguments the way a user would type them.
pub fn display(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}
