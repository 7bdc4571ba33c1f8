//! Advisory worktree status

use std::fmt;
use std::path::Path;
use tracing::debug;

use crate::git::Git;

/// Summary of pending changes in a worktree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorktreeStatus {
    Clean,
    /// Count of changed or untracked entries
    Modified(usize),
    /// The status query itself failed
    Unknown,
}

impl WorktreeStatus {
    /// Summarize `git status --porcelain` output.
    pub fn from_porcelain(output: &str) -> Self {
        let count = output.lines().filter(|l| !l.trim().is_empty()).count();
        if count == 0 {
            WorktreeStatus::Clean
        } else {
            WorktreeStatus::Modified(count)
        }
    }

    pub fn is_clean(&self) -> bool {
        matches!(self, WorktreeStatus::Clean)
    }
}

impl fmt::Display for WorktreeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorktreeStatus::Clean => write!(f, "clean"),
            WorktreeStatus::Modified(n) => write!(f, "{n} modified"),
            WorktreeStatus::Unknown => write!(f, "unknown"),
        }
    }
}

impl Git {
    /// Status of the worktree at `path`. Never fails: a failed query is
    /// [`WorktreeStatus::Unknown`].
    pub fn worktree_status(&self, path: &Path) -> WorktreeStatus {
        match self.run(Some(path), &["status", "--porcelain"]) {
            Ok(output) => WorktreeStatus::from_porcelain(&output),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Status query failed");
                WorktreeStatus::Unknown
            }
        }
    }
}
