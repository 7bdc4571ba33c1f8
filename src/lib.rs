//! git-wt: manage a bare repository and its worktrees as one project
//!
//! A project is a directory holding the bare repository in `.bare/`, a
//! `.git` pointer file, and one subdirectory per worktree:
//!
//! ```text
//! project/
//! ├── .bare/
//! ├── .git            # gitdir: ./.bare
//! ├── main/
//! └── feature-auth/   # branch feature/auth
//! ```
//!
//! ## Module structure
//!
//! - [`process`]: external commands with deadlines and process-tree cleanup
//! - [`git`]: project discovery, bare clones, worktree lifecycle and status
//! - [`config`]: layered TOML settings with per-field provenance
//! - [`hooks`]: post-clone/post-add shell hooks
//! - [`github`]: issue/PR lookups and branch-name slugs
//! - [`logging`]: tracing subscriber setup

pub mod config;
pub mod error;
pub mod git;
pub mod github;
pub mod hooks;
pub mod logging;
pub mod process;

pub use error::{Error, Result};
