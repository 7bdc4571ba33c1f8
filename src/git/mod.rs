//! Git operations for the bare repository + worktree layout
//!
//! This module provides:
//! - Project root discovery and bare layout detection
//! - Worktree creation/removal/listing for one-directory-per-branch work
//! - Name validation and branch-name flattening
//! - Default branch discovery and the bare clone workflow

mod bare;
mod clone;
mod runner;
mod validate;
pub mod worktree;

pub use bare::{find_project_root, is_bare_repo};
pub use clone::{create_project_dir, expand_repo_shorthand, extract_repo_name, write_git_pointer};
pub use runner::{check_git_available, Git};
pub use validate::{flatten_branch_name, validate_branch_name, validate_project_name};
pub use worktree::{parse_worktree_list, Worktree, WorktreeStatus};

use std::time::Duration;

/// Directory holding the bare object store
pub const BARE_DIR: &str = ".bare";

/// Pointer file redirecting `.git` resolution into [`BARE_DIR`]
pub const GIT_POINTER_FILE: &str = ".git";

/// Preferred default branch name
pub const DEFAULT_BRANCH: &str = "main";

/// Default branch name used when [`DEFAULT_BRANCH`] is absent
pub const FALLBACK_BRANCH: &str = "master";

/// Timeout for standard git operations
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Timeout for clone/fetch
pub const LONG_TIMEOUT: Duration = Duration::from_secs(600);
