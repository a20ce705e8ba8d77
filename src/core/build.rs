use std::path::Path;

use crate::config::InstallConfig;
use crate::error::{Error, Result};
use crate::utils::command::{self, CommandRunner};

/// Build-tool invocation: program plus the aggregate build/install arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl BuildCommand {
    pub fn from_config(install: &InstallConfig) -> Self {
        Self {
            program: install.build_program.clone(),
            args: install.build_args.clone(),
        }
    }

    /// Same command with `-D<property>=<dir>` appended.
    pub fn with_destination(mut self, property: &str, dir: &Path) -> Self {
        self.args
            .push(format!("-D{}={}", property, dir.to_string_lossy()));
        self
    }

    pub fn display(&self) -> String {
        command::display(&self.program, &self.arg_refs())
    }

    fn arg_refs(&self) -> Vec<&str> {
        self.args.iter().map(String::as_str).collect()
    }

    /// Run in `dir`; a nonzero exit becomes `build.failed` with the raw output.
    pub fn run(&self, runner: &dyn CommandRunner, dir: &Path) -> Result<()> {
        let output = runner.run(dir, &self.program, &self.arg_refs());
        if output.success {
            Ok(())
        } else {
            Err(Error::build_failed(
                self.display(),
                dir.display().to_string(),
                output.combined(),
            ))
        }
    }
}
