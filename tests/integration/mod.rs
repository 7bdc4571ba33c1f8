//! Integration tests for git-wt project management
//!
//! These run real `git` against throwaway repositories: an origin with a
//! couple of branches, bare-cloned into a project root.

pub mod config_layers;
pub mod helpers;
pub mod hooks_in_worktree;
pub mod project_layout;
pub mod worktree_lifecycle;
