//! Git invocations against an artifact's repository.

mod status;

pub use status::{parse_status, Blocker, HeadRef, RepoStatus, SyncState, Worktree};

use std::path::Path;

use crate::error::{Error, Result};
use crate::utils::command::{self, CommandOutput, CommandRunner};

fn git(runner: &dyn CommandRunner, repo: &Path, args: &[&str]) -> Result<CommandOutput> {
    let output = runner.run(repo, "git", args);
    if output.success {
        Ok(output)
    } else {
        Err(Error::git_command_failed(
            command::display("git", args),
            output.combined(),
        ))
    }
}

/// Query and parse the working-tree status of `repo`.
pub fn status(runner: &dyn CommandRunner, artifact: &str, repo: &Path) -> Result<RepoStatus> {
    let output = git(runner, repo, &["status", "-uno"])?;
    parse_status(&output.stdout)
        .ok_or_else(|| Error::repo_state_unrecognized(artifact, output.combined()))
}

/// Current branch or detached tag of `repo`.
pub fn current_ref(runner: &dyn CommandRunner, artifact: &str, repo: &Path) -> Result<HeadRef> {
    Ok(status(runner, artifact, repo)?.head)
}

/// Pull remote tags (and the current branch, if any).
pub fn pull_tags(runner: &dyn CommandRunner, repo: &Path) -> Result<()> {
    git(runner, repo, &["pull", "--tags"]).map(|_| ())
}

/// Check out `tag` as a detached head, without the detached-head advice.
pub fn checkout_detached(runner: &dyn CommandRunner, repo: &Path, tag: &str) -> Result<()> {
    git(
        runner,
        repo,
        &["-c", "advice.detachedHead=false", "checkout", tag],
    )
    .map(|_| ())
}

pub fn checkout_branch(runner: &dyn CommandRunner, repo: &Path, branch: &str) -> Result<()> {
    git(runner, repo, &["checkout", branch]).map(|_| ())
}
