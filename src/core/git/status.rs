//! Structured view of `git status -uno` output.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

const UP_TO_DATE_MARKER: &str = "Your branch is up to date with";
const NOTHING_TO_COMMIT_MARKER: &str = "nothing to commit";
const UNSTAGED_MARKER: &str = "Changes not staged for commit:";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum HeadRef {
    OnBranch(String),
    DetachedAt(String),
}

impl HeadRef {
    pub fn name(&self) -> &str {
        match self {
            HeadRef::OnBranch(name) | HeadRef::DetachedAt(name) => name,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HeadRef::OnBranch(_) => "branch",
            HeadRef::DetachedAt(_) => "tag",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    Synced,
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Worktree {
    Clean,
    Dirty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoStatus {
    pub head: HeadRef,
    pub sync: SyncState,
    pub worktree: Worktree,
}

/// Reason a repository fails the pre-flight gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blocker {
    Stale,
    Unstaged,
}

impl Blocker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Blocker::Stale => "stale",
            Blocker::Unstaged => "unstaged",
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Blocker::Stale => "Repo not up to date with remote",
            Blocker::Unstaged => "There are unstaged changes",
        }
    }
}

impl RepoStatus {
    /// First gate failure, honouring the two overrides. Staleness is checked first.
    pub fn blocker(&self, skip_up_to_date: bool, skip_unstaged: bool) -> Option<Blocker> {
        if !skip_up_to_date && self.sync == SyncState::Stale {
            return Some(Blocker::Stale);
        }
        if !skip_unstaged && self.worktree == Worktree::Dirty {
            return Some(Blocker::Unstaged);
        }
        None
    }
}

fn branch_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^On branch (.+)$").expect("valid regex"))
}

fn detached_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^HEAD detached (?:at|from) (.+)$").expect("valid regex"))
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim_end_matches('\r').to_string())
}

/// Parse status text. Returns None when neither a branch nor a detached-head
/// line is present.
///
/// On a branch, sync means the upstream line says it is up to date. Detached
/// heads have no upstream, so a tree with nothing to commit counts as synced.
pub fn parse_status(text: &str) -> Option<RepoStatus> {
    let (head, sync) = if let Some(branch) = capture(branch_re(), text) {
        (HeadRef::OnBranch(branch), text.contains(UP_TO_DATE_MARKER))
    } else {
        let tag = capture(detached_re(), text)?;
        (HeadRef::DetachedAt(tag), text.contains(NOTHING_TO_COMMIT_MARKER))
    };

    Some(RepoStatus {
        head,
        sync: if sync {
            SyncState::Synced
        } else {
            SyncState::Stale
        },
        worktree: if text.contains(UNSTAGED_MARKER) {
            Worktree::Dirty
        } else {
            Worktree::Clean
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAN_BRANCH: &str = "On branch master\n\
Your branch is up to date with 'origin/master'.\n\
\n\
nothing to commit (use -u to show untracked files)\n";

    const BEHIND_BRANCH: &str = "On branch master\n\
Your branch is behind 'origin/master' by 2 commits, and can be fast-forwarded.\n\
  (use \"git pull\" to update your local branch)\n\
\n\
nothing to commit (use -u to show untracked files)\n";

    const DIRTY_BRANCH: &str = "On branch mastodon-dev\n\
Your branch is up to date with 'origin/mastodon-dev'.\n\
\n\
Changes not staged for commit:\n\
  (use \"git add <file>...\" to update what will be committed)\n\
\tmodified:   pom.xml\n\
\n\
no changes added to commit (use \"git add\" and/or \"git commit -a\")\n";

    const DETACHED_CLEAN: &str = "HEAD detached at mastodon-1.0.0-beta-30\n\
nothing to commit (use -u to show untracked files)\n";

    #[test]
    fn clean_branch_is_synced_and_clean() {
        let status = parse_status(CLEAN_BRANCH).unwrap();
        assert_eq!(status.head, HeadRef::OnBranch("master".to_string()));
        assert_eq!(status.sync, SyncState::Synced);
        assert_eq!(status.worktree, Worktree::Clean);
        assert_eq!(status.blocker(false, false), None);
    }

    #[test]
    fn behind_branch_is_stale() {
        let status = parse_status(BEHIND_BRANCH).unwrap();
        assert_eq!(status.sync, SyncState::Stale);
        assert_eq!(status.blocker(false, false), Some(Blocker::Stale));
        assert_eq!(status.blocker(true, false), None);
    }

    #[test]
    fn unstaged_changes_mark_dirty() {
        let status = parse_status(DIRTY_BRANCH).unwrap();
        assert_eq!(status.head.name(), "mastodon-dev");
        assert_eq!(status.worktree, Worktree::Dirty);
        assert_eq!(status.blocker(false, false), Some(Blocker::Unstaged));
        assert_eq!(status.blocker(false, true), None);
    }

    #[test]
    fn stale_is_reported_before_unstaged() {
        let text = "On branch master\nChanges not staged for commit:\n";
        let status = parse_status(text).unwrap();
        assert_eq!(status.blocker(false, false), Some(Blocker::Stale));
        assert_eq!(status.blocker(true, false), Some(Blocker::Unstaged));
        assert_eq!(status.blocker(true, true), None);
    }

    #[test]
    fn detached_head_uses_nothing_to_commit_for_sync() {
        let status = parse_status(DETACHED_CLEAN).unwrap();
        assert_eq!(
            status.head,
            HeadRef::DetachedAt("mastodon-1.0.0-beta-30".to_string())
        );
        assert_eq!(status.head.label(), "tag");
        assert_eq!(status.sync, SyncState::Synced);

        let dirty = "HEAD detached at v1\nChanges not staged for commit:\n";
        let status = parse_status(dirty).unwrap();
        assert_eq!(status.sync, SyncState::Stale);
    }

    #[test]
    fn detached_from_is_recognized() {
        let status = parse_status("HEAD detached from 1a2b3c4\nnothing to commit\n").unwrap();
        assert_eq!(status.head.name(), "1a2b3c4");
    }

    #[test]
    fn no_sync_indicator_blocks_without_override() {
        let status = parse_status("On branch feature\n").unwrap();
        assert_eq!(status.blocker(false, true), Some(Blocker::Stale));
        assert_eq!(status.blocker(true, true), None);
    }

    #[test]
    fn unrecognized_output_yields_none() {
        assert!(parse_status("fatal: not a git repository").is_none());
        assert!(parse_status("").is_none());
    }

    #[test]
    fn windows_line_endings_are_trimmed() {
        let status = parse_status("On branch master\r\nYour branch is up to date with 'origin/master'.\r\n").unwrap();
        assert_eq!(status.head.name(), "master");
    }
}
