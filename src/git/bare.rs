//! Bare repository layout detection and project root discovery
//!
//! A project root holds `.bare/` (the object store) and a `.git` pointer
//! file. Nothing about the layout is persisted by us; it is re-derived from
//! the filesystem on every call.

use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use super::clone::write_git_pointer;
use super::{Git, BARE_DIR, DEFAULT_BRANCH, FALLBACK_BRANCH, GIT_POINTER_FILE};
use crate::error::{Error, Result};

/// Check if `dir` has the bare repo layout.
///
/// True iff `.bare` is a directory and `.git` exists and is not a directory.
/// Any stat failure counts as "not a bare layout".
pub fn is_bare_repo(dir: &Path) -> bool {
    let bare_is_dir = std::fs::metadata(dir.join(BARE_DIR))
        .map(|m| m.is_dir())
        .unwrap_or(false);
    if !bare_is_dir {
        return false;
    }

    std::fs::metadata(dir.join(GIT_POINTER_FILE))
        .map(|m| !m.is_dir())
        .unwrap_or(false)
}

/// Find the project root by walking up from `start`.
///
/// `start` is made absolute against the current directory first. Fails with
/// [`Error::NotInProject`] once the filesystem root is passed.
pub fn find_project_root(start: &Path) -> Result<PathBuf> {
    let absolute = if start.is_absolute() {
        start.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| Error::io(start, e))?
            .join(start)
    };

    let mut current = Some(absolute.as_path());
    while let Some(dir) = current {
        if is_bare_repo(dir) {
            debug!(root = %dir.display(), "Found project root");
            return Ok(dir.to_path_buf());
        }
        current = dir.parent();
    }

    Err(Error::NotInProject)
}

impl Git {
    /// Discover the default branch name for the repository at `dir`.
    ///
    /// Tries the remote's symbolic HEAD first, then `origin/main`, then
    /// `origin/master`.
    #[instrument(skip_all, fields(dir = %dir.display()))]
    pub fn default_branch(&self, dir: &Path) -> Result<String> {
        if let Ok(output) = self.run(Some(dir), &["symbolic-ref", "refs/remotes/origin/HEAD"]) {
            if let Some(name) = output.trim().rsplit('/').next().filter(|s| !s.is_empty()) {
                return Ok(name.to_string());
            }
        }

        for candidate in [DEFAULT_BRANCH, FALLBACK_BRANCH] {
            let remote_ref = format!("refs/remotes/origin/{candidate}");
            if self.succeeds(dir, &["rev-parse", "--verify", &remote_ref]) {
                return Ok(candidate.to_string());
            }
        }

        Err(Error::NotFound(format!(
            "default branch: neither {DEFAULT_BRANCH} nor {FALLBACK_BRANCH} found"
        )))
    }

    /// Clone `url` as a bare repo into `<target_dir>/.bare` and wire it up.
    ///
    /// Writes the `.git` pointer file, configures the fetch refspec so all
    /// remote branches are tracked, then fetches. `extra_args` are passed to
    /// `git clone` before the URL. `target_dir` must already exist.
    #[instrument(skip_all, fields(url = %url, target_dir = %target_dir.display()))]
    pub fn bare_clone(&self, url: &str, target_dir: &Path, extra_args: &[&str]) -> Result<()> {
        let bare_dir = target_dir.join(BARE_DIR);
        let bare_str = bare_dir.to_string_lossy().into_owned();

        let mut args = vec!["clone", "--bare", "--progress"];
        args.extend_from_slice(extra_args);
        args.push(url);
        args.push(bare_str.as_str());

        info!("Cloning bare repository");
        self.run_with_progress(Some(target_dir), &args)?;

        write_git_pointer(target_dir)?;

        self.run_long(
            Some(&bare_dir),
            &[
                "config",
                "remote.origin.fetch",
                "+refs/heads/*:refs/remotes/origin/*",
            ],
        )?;
        self.run_long(Some(target_dir), &["fetch", "origin"])?;

        Ok(())
    }
}
