//! Worktree output parsing
//!
//! Parses `git worktree list --porcelain` output into structured data.

use std::path::PathBuf;

/// One worktree as reported by git
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Worktree {
    pub path: PathBuf,
    /// Short branch name with slashes preserved; `None` when detached or bare
    pub branch: Option<String>,
    /// Checked-out commit; `None` when git did not report one
    pub commit: Option<String>,
    pub is_bare: bool,
}

impl Worktree {
    /// Branch name, or empty when detached
    pub fn branch_name(&self) -> &str {
        self.branch.as_deref().unwrap_or("")
    }
}

#[derive(Default)]
struct Record {
    path: Option<PathBuf>,
    branch: Option<String>,
    commit: Option<String>,
    is_bare: bool,
}

impl Record {
    fn finish(self) -> Option<Worktree> {
        Some(Worktree {
            path: self.path?,
            branch: self.branch,
            commit: self.commit,
            is_bare: self.is_bare,
        })
    }
}

/// Parse `git worktree list --porcelain` output.
///
/// Records are separated by blank lines. A record with no `worktree` line is
/// dropped. Order is preserved.
///
/// Example input:
/// ```text
/// worktree /home/user/project/.bare
/// bare
///
/// worktree /home/user/project/main
/// HEAD abc123def456
/// branch refs/heads/main
/// ```
pub fn parse_worktree_list(output: &str) -> Vec<Worktree> {
    let mut worktrees = Vec::new();
    let mut current = Record::default();

    for line in output.lines().map(str::trim) {
        if line.is_empty() {
            if let Some(wt) = std::mem::take(&mut current).finish() {
                worktrees.push(wt);
            }
            continue;
        }

        if let Some(path) = line.strip_prefix("worktree ") {
            current.path = Some(PathBuf::from(path));
        } else if let Some(head) = line.strip_prefix("HEAD ") {
            current.commit = Some(head.to_string());
        } else if let Some(branch) = line.strip_prefix("branch ") {
            let short = branch.strip_prefix("refs/heads/").unwrap_or(branch);
            current.branch = Some(short.to_string());
        } else if line == "bare" {
            current.is_bare = true;
        }
    }

    if let Some(wt) = current.finish() {
        worktrees.push(wt);
    }

    worktrees
}
