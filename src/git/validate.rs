//! Pre-flight validation of project and branch names
//!
//! These checks run before any git process is spawned. The branch rules
//! mirror git's ref-name grammar closely enough to give a clear message
//! early; git itself remains the authority.

use super::{BARE_DIR, GIT_POINTER_FILE};
use crate::error::{Error, Result};

/// Substrings git refuses in branch names
const INVALID_BRANCH_PATTERNS: &[&str] = &[
    "..", "~", "^", ":", "\\", " ", "?", "*", "[", "@{", ".lock",
];

/// Validate a project (clone target directory) name.
pub fn validate_project_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(invalid("project name cannot be empty"));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(invalid(format!(
            "project name cannot contain path separators: {name}"
        )));
    }

    if name.contains("..") {
        return Err(invalid(format!("project name cannot contain '..': {name}")));
    }

    if name == "." || name == ".." {
        return Err(invalid(format!("invalid project name: {name}")));
    }

    if name == GIT_POINTER_FILE || name == BARE_DIR {
        return Err(invalid(format!("reserved project name: {name}")));
    }

    Ok(())
}

/// Validate a git branch name.
pub fn validate_branch_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(invalid("branch name cannot be empty"));
    }

    if let Some(pattern) = INVALID_BRANCH_PATTERNS.iter().find(|p| name.contains(*p)) {
        return Err(invalid(format!(
            "branch name contains invalid pattern '{pattern}': {name}"
        )));
    }

    if name.starts_with('.') || name.ends_with('.') {
        return Err(invalid(format!(
            "branch name cannot start or end with a dot: {name}"
        )));
    }

    if name.starts_with('/') || name.ends_with('/') {
        return Err(invalid(format!(
            "branch name cannot start or end with a slash: {name}"
        )));
    }

    if name.contains("//") {
        return Err(invalid(format!(
            "branch name cannot contain consecutive slashes: {name}"
        )));
    }

    Ok(())
}

/// Convert a branch name to a directory name: `feature/auth` -> `feature-auth`.
///
/// One-directional: `a/b` and `a-b` map to the same directory.
pub fn flatten_branch_name(branch: &str) -> String {
    branch.replace('/', "-")
}

fn invalid(message: impl Into<String>) -> Error {
    Error::Validation(message.into())
}
