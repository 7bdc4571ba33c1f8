//! Git worktree management for the one-directory-per-branch layout
//!
//! Each branch gets its own worktree directory directly under the project
//! root, named by flattening the branch name.
//!
//! ## Module structure
//!
//! - `operations`: create, remove, list, prune, repair, branch deletion
//! - `parser`: `git worktree list --porcelain` parsing
//! - `status`: advisory clean/modified summary

mod operations;
mod parser;
mod status;

pub use operations::worktree_path;
pub use parser::{parse_worktree_list, Worktree};
pub use status::WorktreeStatus;
