//! Commented config template and branch-name template expansion

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use crate::error::{Error, Result};

const CONFIG_TEMPLATE: &str = r#"# ============================================================
# git-wt configuration
# Uncomment and modify options as needed
# ============================================================

# --- Directory Settings ---

# Where to clone repos (empty = current directory)
# Applies to: clone
# worktree_root = ""

# --- Remote Settings ---

# Git remote name for operations
# Applies to: prune, new
# default_remote = "origin"

# --- Branch Settings ---

# Base branch for new worktrees (empty = HEAD)
# Applies to: new
# default_base_branch = ""

# Branch name template for GitHub issues/PRs
# Variables: {{type}}, {{number}}, {{slug}}
# Applies to: new --issue, new --pr
# branch_template = "{{type}}-{{number}}-{{slug}}"

# --- Timeout Settings (seconds) ---

# Standard git operations (status, branch, etc.)
# git_timeout = 120

# Long git operations (clone, fetch)
# git_long_timeout = 600

# Hook execution timeout
# hook_timeout = 30

# --- Hooks ---
# Shell commands to run after operations
# Environment variables: GIT_WT_PATH, GIT_WT_BRANCH, GIT_WT_PROJECT_ROOT, GIT_WT_DEFAULT_BRANCH
# Template variables: {{.Path}}, {{.Branch}}, {{.ProjectRoot}}, {{.DefaultBranch}}

# [hooks]
# post_clone = []
# post_add = []
"#;

/// Every option, commented out, with its default and a one-line explanation
pub fn generate_template() -> &'static str {
    CONFIG_TEMPLATE
}

/// Write the template to `path`, creating parent directories.
///
/// Fails with [`Error::AlreadyExists`] rather than overwrite an existing file.
pub fn write_template(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| {
            if e.kind() == io::ErrorKind::AlreadyExists {
                Error::AlreadyExists(path.to_path_buf())
            } else {
                Error::io(path, e)
            }
        })?;

    file.write_all(CONFIG_TEMPLATE.as_bytes())
        .map_err(|e| Error::io(path, e))
}

/// Fill `{{type}}`, `{{number}}` and `{{slug}}` in a branch template.
pub fn expand_branch_template(template: &str, kind: &str, number: u64, slug: &str) -> String {
    template
        .replace("{{type}}", kind)
        .replace("{{number}}", &number.to_string())
        .replace("{{slug}}", slug)
}
