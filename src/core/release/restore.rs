use crate::config::SuiteConfig;
use crate::git;
use crate::utils::command::CommandRunner;

use super::types::RestoreOutcome;

/// Check out the development branch in every core artifact.
///
/// Best effort: a failure is recorded and the next artifact is still restored.
pub fn restore_branches(runner: &dyn CommandRunner, config: &SuiteConfig) -> Vec<RestoreOutcome> {
    let branch = &config.development_branch;
    config
        .artifacts
        .iter()
        .map(|artifact| {
            let result = git::checkout_branch(runner, &config.repo_path(artifact), branch);
            match &result {
                Ok(()) => log_status!("restore", "{:>30} -> done.", artifact),
                Err(e) => log_status!(
                    "restore",
                    "{:>30} -> could not checkout {}: {}",
                    artifact,
                    branch,
                    e.details["output"].as_str().unwrap_or_default()
                ),
            }
            RestoreOutcome {
                artifact: artifact.clone(),
                branch: branch.clone(),
                success: result.is_ok(),
                error: result.err().map(|e| e.to_string()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::command::CommandOutput;
    use std::cell::Cell;
    use std::path::Path;

    struct FailSecond {
        calls: Cell<usize>,
    }

    impl CommandRunner for FailSecond {
        fn run(&self, _dir: &Path, _program: &str, _args: &[&str]) -> CommandOutput {
            let n = self.calls.get();
            self.calls.set(n + 1);
            if n == 1 {
                CommandOutput::failed(1, "error: Your local changes would be overwritten")
            } else {
                CommandOutput::ok("")
            }
        }
    }

    #[test]
    fn failure_does_not_stop_restore() {
        let runner = FailSecond {
            calls: Cell::new(0),
        };
        let config = SuiteConfig::default();
        let outcomes = restore_branches(&runner, &config);

        assert_eq!(outcomes.len(), config.artifacts.len());
        assert_eq!(runner.calls.get(), config.artifacts.len());
        assert!(outcomes[0].success);
        assert!(!outcomes[1].success);
        assert!(outcomes[1].error.is_some());
        assert!(outcomes[2..].iter().all(|o| o.success && o.branch == "master"));
    }
}
