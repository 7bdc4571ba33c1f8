//! Project directory setup for the clone workflow

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{BARE_DIR, GIT_POINTER_FILE};
use crate::error::{Error, Result};

/// Expand `owner/repo` shorthand to a GitHub SSH URL.
///
/// Anything with a scheme, an `git@` prefix, or not exactly two non-empty
/// segments passes through unchanged.
pub fn expand_repo_shorthand(input: &str) -> String {
    if input.contains("://") || input.starts_with("git@") {
        return input.to_string();
    }

    let parts: Vec<&str> = input.split('/').collect();
    match parts.as_slice() {
        [owner, repo] if !owner.is_empty() && !repo.is_empty() => {
            let repo = repo.strip_suffix(".git").unwrap_or(repo);
            format!("git@github.com:{owner}/{repo}.git")
        }
        _ => input.to_string(),
    }
}

/// Extract the repository name (last path segment, without `.git`) from a URL.
pub fn extract_repo_name(url: &str) -> String {
    let last = url
        .trim_end_matches('/')
        .rsplit(['/', ':'])
        .next()
        .unwrap_or("");
    let name = last.strip_suffix(".git").unwrap_or(last);
    if name.is_empty() {
        "repo".to_string()
    } else {
        name.to_string()
    }
}

/// Create the project directory with an exclusive create.
///
/// The parent is created first if missing. An existing target is reported as
/// [`Error::AlreadyExists`] by the create call itself, with no separate
/// existence check beforehand.
pub fn create_project_dir(path: &Path) -> Result<PathBuf> {
    match fs::create_dir(path) {
        Ok(()) => return Ok(path.to_path_buf()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(Error::AlreadyExists(path.to_path_buf()))
        }
        Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(Error::io(path, e)),
        Err(_) => {}
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::create_dir(path).map_err(|e| {
        if e.kind() == io::ErrorKind::AlreadyExists {
            Error::AlreadyExists(path.to_path_buf())
        } else {
            Error::io(path, e)
        }
    })?;

    Ok(path.to_path_buf())
}

/// Write the `.git` pointer file redirecting into `.bare`.
pub fn write_git_pointer(project_root: &Path) -> Result<()> {
    let pointer = project_root.join(GIT_POINTER_FILE);
    fs::write(&pointer, format!("gitdir: ./{BARE_DIR}\n")).map_err(|e| Error::io(&pointer, e))
}
