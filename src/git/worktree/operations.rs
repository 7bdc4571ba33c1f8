//! Core worktree operations
//!
//! Removal of a worktree and deletion of its branch are separate calls.
//! Neither rolls the other back, and the worktree must go first: git refuses
//! to delete a branch that is still checked out.

use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use super::parser::{parse_worktree_list, Worktree};
use crate::error::{Error, Result};
use crate::git::{flatten_branch_name, validate_branch_name, Git, DEFAULT_BRANCH, FALLBACK_BRANCH};

/// Directory a worktree for `branch` lives in: `<project_root>/<flattened>`
pub fn worktree_path(project_root: &Path, branch: &str) -> PathBuf {
    project_root.join(flatten_branch_name(branch))
}

impl Git {
    /// Create a worktree on a new branch named `branch`.
    ///
    /// The branch starts from `base` when given, HEAD otherwise. Uses
    /// `--relative-paths` so the layout survives moving the project root.
    #[instrument(skip_all, fields(project_root = %project_root.display(), branch = %branch, base = ?base))]
    pub fn create_worktree(
        &self,
        project_root: &Path,
        branch: &str,
        base: Option<&str>,
    ) -> Result<PathBuf> {
        validate_branch_name(branch)?;
        let path = self.prepare_worktree_path(project_root, branch)?;
        let path_str = path.to_string_lossy().into_owned();

        let mut args = vec!["-b", branch];
        if let Some(base) = base.filter(|b| !b.is_empty()) {
            args.push(base);
        }

        self.add_worktree(project_root, &path_str, &args)?;
        info!(path = %path.display(), "Created worktree");
        Ok(path)
    }

    /// Create a worktree checking out an existing local branch.
    #[instrument(skip_all, fields(project_root = %project_root.display(), branch = %branch))]
    pub fn create_worktree_from_branch(&self, project_root: &Path, branch: &str) -> Result<PathBuf> {
        validate_branch_name(branch)?;

        let local_ref = format!("refs/heads/{branch}");
        if !self.succeeds(project_root, &["rev-parse", "--verify", &local_ref]) {
            return Err(Error::NotFound(format!("branch {branch}")));
        }

        let path = self.prepare_worktree_path(project_root, branch)?;
        let path_str = path.to_string_lossy().into_owned();

        self.add_worktree(project_root, &path_str, &[branch])?;
        info!(path = %path.display(), "Created worktree from existing branch");
        Ok(path)
    }

    /// List worktrees in the order git reports them.
    #[instrument(skip_all, fields(project_root = %project_root.display()))]
    pub fn list_worktrees(&self, project_root: &Path) -> Result<Vec<Worktree>> {
        let output = self.run(Some(project_root), &["worktree", "list", "--porcelain"])?;
        Ok(parse_worktree_list(&output))
    }

    /// Remove the worktree at `path`.
    ///
    /// Without `force`, git refuses when the worktree has uncommitted or
    /// untracked changes.
    #[instrument(skip_all, fields(project_root = %project_root.display(), path = %path.display(), force = force))]
    pub fn remove_worktree(&self, project_root: &Path, path: &Path, force: bool) -> Result<()> {
        let path_str = path.to_string_lossy().into_owned();
        let mut args = vec!["worktree", "remove"];
        if force {
            args.push("--force");
        }
        args.push(path_str.as_str());

        self.run(Some(project_root), &args)?;
        info!("Removed worktree");
        Ok(())
    }

    /// Force-delete a local branch regardless of merge status.
    #[instrument(skip_all, fields(project_root = %project_root.display(), branch = %branch))]
    pub fn delete_branch(&self, project_root: &Path, branch: &str) -> Result<()> {
        self.run(Some(project_root), &["branch", "-D", branch])?;
        info!("Deleted branch");
        Ok(())
    }

    /// Clear administrative entries for worktrees deleted out-of-band.
    #[instrument(skip_all, fields(project_root = %project_root.display()))]
    pub fn prune_worktrees(&self, project_root: &Path) -> Result<()> {
        self.run(Some(project_root), &["worktree", "prune"])?;
        Ok(())
    }

    /// Re-link worktree pointers after the project root moved.
    ///
    /// Returns git's raw report; empty means nothing needed repair.
    #[instrument(skip_all, fields(project_root = %project_root.display()))]
    pub fn repair_worktrees(&self, project_root: &Path) -> Result<String> {
        self.run(Some(project_root), &["worktree", "repair"])
    }

    /// Path of the existing worktree for `branch`, or [`Error::NotFound`].
    pub fn locate_worktree(&self, project_root: &Path, branch: &str) -> Result<PathBuf> {
        let path = worktree_path(project_root, branch);
        if path.is_dir() {
            Ok(path)
        } else {
            Err(Error::NotFound(format!("worktree {branch}")))
        }
    }

    /// `git fetch --prune` with the long timeout.
    #[instrument(skip_all, fields(project_root = %project_root.display()))]
    pub fn fetch_prune(&self, project_root: &Path) -> Result<()> {
        self.run_long(Some(project_root), &["fetch", "--prune"])?;
        Ok(())
    }

    /// Worktrees whose branch no longer exists on `remote`.
    ///
    /// The default branches, detached worktrees and the bare entry are never
    /// reported. Run [`Git::fetch_prune`] first for an up-to-date answer.
    #[instrument(skip_all, fields(project_root = %project_root.display(), remote = %remote))]
    pub fn find_stale_worktrees(&self, project_root: &Path, remote: &str) -> Result<Vec<Worktree>> {
        let mut stale = Vec::new();

        for wt in self.list_worktrees(project_root)? {
            let Some(branch) = wt.branch.as_deref() else {
                continue;
            };
            if wt.is_bare || branch == DEFAULT_BRANCH || branch == FALLBACK_BRANCH {
                continue;
            }

            let remote_ref = format!("refs/remotes/{remote}/{branch}");
            if !self.succeeds(project_root, &["rev-parse", "--verify", &remote_ref]) {
                debug!(branch, "Branch is gone from remote");
                stale.push(wt);
            }
        }

        Ok(stale)
    }

    /// `git worktree add --relative-paths <path> <rest...>`.
    ///
    /// Gits older than 2.48 reject `--relative-paths`; those get a plain add
    /// with absolute administrative paths.
    fn add_worktree(&self, project_root: &Path, path: &str, rest: &[&str]) -> Result<()> {
        let mut args = vec!["worktree", "add", "--relative-paths", path];
        args.extend_from_slice(rest);

        match self.run(Some(project_root), &args) {
            Err(Error::ToolExecution { stderr, .. }) if stderr.contains("relative-paths") => {
                warn!("git does not support --relative-paths; worktree links will be absolute");
                args.remove(2);
                self.run(Some(project_root), &args).map(|_| ())
            }
            other => other.map(|_| ()),
        }
    }

    fn prepare_worktree_path(&self, project_root: &Path, branch: &str) -> Result<PathBuf> {
        let path = worktree_path(project_root, branch);
        // Distinct branches can flatten to the same directory (a/b, a-b)
        if path.exists() {
            return Err(Error::AlreadyExists(path));
        }
        Ok(path)
    }
}
