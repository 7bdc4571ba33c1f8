//! Error types for git-wt operations.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias using the git-wt [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the worktree model, the config resolver and the executor.
#[derive(Debug, Error)]
pub enum Error {
    /// No ancestor of the start path has the bare repo layout
    #[error("not in a git-wt project")]
    NotInProject,

    /// Name or branch-name rule violation, raised before any process is spawned
    #[error("{0}")]
    Validation(String),

    /// External tool exited non-zero
    #[error("{command}: {stderr}")]
    ToolExecution { command: String, stderr: String },

    /// External tool exceeded its deadline
    #[error("{command}: operation timed out after {}s", .timeout.as_secs())]
    ToolTimeout { command: String, timeout: Duration },

    /// Target directory or file exists where an exclusive create was required
    #[error("already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// Requested worktree, branch or ref is absent
    #[error("not found: {0}")]
    NotFound(String),

    /// Config file could not be parsed
    #[error("invalid config at {}: {source}", .path.display())]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Program could not be started at all
    #[error("failed to execute {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Filesystem error on a specific path
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON from an external tool
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for [`Error::ToolTimeout`], so callers can apply a separate retry policy
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::ToolTimeout { .. })
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
