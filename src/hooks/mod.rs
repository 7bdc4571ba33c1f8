//! User hook execution
//!
//! Hooks are shell snippets from the `[hooks]` config table, run after
//! clone/add. They are strictly sequential and never abort the caller: each
//! failure or timeout becomes a [`HookWarning`] and the next command still
//! runs.

mod template;


pub use template::{expand_templates, shell_quote};

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::process::{self, spawn_in_new_process_group};

/// Timeout used when the configured hook timeout is zero
pub const DEFAULT_HOOK_TIMEOUT_SECS: u64 = 30;

/// Variables available to a hook run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookContext {
    /// Full path to the worktree
    pub path: PathBuf,
    /// Branch name, e.g. `feature/auth`
    pub branch: String,
    /// Project root (contains `.bare/`)
    pub project_root: PathBuf,
    pub default_branch: String,
}

impl HookContext {
    pub fn new(path: &Path, branch: &str, project_root: &Path, default_branch: &str) -> Self {
        Self {
            path: path.to_path_buf(),
            branch: branch.to_string(),
            project_root: project_root.to_path_buf(),
            default_branch: default_branch.to_string(),
        }
    }

    /// Environment variables carrying the context values, unquoted
    pub fn env_vars(&self) -> [(&'static str, String); 4] {
        [
            ("GIT_WT_PATH", self.path.to_string_lossy().into_owned()),
            ("GIT_WT_BRANCH", self.branch.clone()),
            (
                "GIT_WT_PROJECT_ROOT",
                self.project_root.to_string_lossy().into_owned(),
            ),
            ("GIT_WT_DEFAULT_BRANCH", self.default_branch.clone()),
        ]
    }
}

/// Why a hook command produced a warning
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookFailure {
    /// Non-zero exit or failure to start
    Failed(String),
    /// Killed after exceeding the timeout
    TimedOut(Duration),
}

/// A failed or timed-out hook command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookWarning {
    /// The command after template expansion
    pub command: String,
    pub failure: HookFailure,
}

impl HookWarning {
    pub fn is_timeout(&self) -> bool {
        matches!(self.failure, HookFailure::TimedOut(_))
    }
}

impl fmt::Display for HookWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.failure {
            HookFailure::Failed(reason) => write!(f, "{}: {}", self.command, reason),
            HookFailure::TimedOut(timeout) => {
                write!(f, "{}: timed out after {}s", self.command, timeout.as_secs())
            }
        }
    }
}

/// Run `commands` one after another with `timeout_secs` per command.
///
/// Returns one warning per command that failed or timed out; an empty list
/// means every command succeeded.
pub fn run_hooks(commands: &[String], ctx: &HookContext, timeout_secs: u64) -> Vec<HookWarning> {
    let timeout_secs = if timeout_secs == 0 {
        DEFAULT_HOOK_TIMEOUT_SECS
    } else {
        timeout_secs
    };
    let timeout = Duration::from_secs(timeout_secs);

    let mut warnings = Vec::new();
    for raw in commands {
        let command = expand_templates(raw, ctx);
        debug!(command = %command, "Running hook");

        if let Some(failure) = run_one(&command, ctx, timeout) {
            warn!(command = %command, ?failure, "Hook failed");
            warnings.push(HookWarning { command, failure });
        }
    }

    if !commands.is_empty() {
        info!(total = commands.len(), failed = warnings.len(), "Hooks finished");
    }
    warnings
}

fn run_one(command: &str, ctx: &HookContext, timeout: Duration) -> Option<HookFailure> {
    let mut cmd = shell_command(command);
    cmd.envs(ctx.env_vars())
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    if ctx.path.is_dir() {
        cmd.current_dir(&ctx.path);
    }

    // Own process group so a timeout also takes down anything it spawned
    let mut child = match spawn_in_new_process_group(&mut cmd) {
        Ok(child) => child,
        Err(e) => return Some(HookFailure::Failed(format!("failed to start: {e}"))),
    };

    match process::wait_with_deadline(&mut child, timeout, command) {
        Ok(Some(status)) if status.success() => None,
        Ok(Some(status)) => Some(HookFailure::Failed(status.to_string())),
        Ok(None) => Some(HookFailure::TimedOut(timeout)),
        Err(e) => Some(HookFailure::Failed(e.to_string())),
    }
}

#[cfg(unix)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(not(unix))]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}
