//! Git command runner
//!
//! Wraps the command executor with the configured standard and long
//! timeouts so every git call shares the same failure classification.

use std::path::Path;
use std::time::Duration;
use tracing::debug;

use super::{DEFAULT_TIMEOUT, LONG_TIMEOUT};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::process;

/// Runs `git` with deadlines.
///
/// Worktree and bare-repo operations are methods on this type; see the
/// `worktree` and `bare` modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Git {
    timeout: Duration,
    long_timeout: Duration,
}

impl Default for Git {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            long_timeout: LONG_TIMEOUT,
        }
    }
}

impl Git {
    pub fn new(timeout: Duration, long_timeout: Duration) -> Self {
        Self {
            timeout,
            long_timeout,
        }
    }

    /// Build a runner from the effective `git_timeout`/`git_long_timeout`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.git_timeout_duration(), config.git_long_timeout_duration())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn long_timeout(&self) -> Duration {
        self.long_timeout
    }

    /// Run a git command with the standard timeout and return trimmed stdout.
    pub fn run(&self, dir: Option<&Path>, args: &[&str]) -> Result<String> {
        process::run_command(dir, "git", args, self.timeout)
    }

    /// Run a git command with the long (clone/fetch) timeout.
    pub fn run_long(&self, dir: Option<&Path>, args: &[&str]) -> Result<String> {
        process::run_command(dir, "git", args, self.long_timeout)
    }

    /// Run a git command with terminal-attached output and the long timeout.
    pub fn run_with_progress(&self, dir: Option<&Path>, args: &[&str]) -> Result<()> {
        process::run_with_progress(dir, "git", args, self.long_timeout)
    }

    /// Run a git command and report only whether it succeeded.
    ///
    /// Swallows both spawn failures and non-zero exits; use for existence
    /// checks like `rev-parse --verify`.
    pub fn succeeds(&self, dir: &Path, args: &[&str]) -> bool {
        match self.run(Some(dir), args) {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "git check returned false");
                false
            }
        }
    }
}

/// Check that `git` is installed and on `PATH`
pub fn check_git_available() -> Result<()> {
    which::which("git")
        .map(|_| ())
        .map_err(|_| Error::NotFound("git executable in PATH".to_string()))
}
