//! Shared test helpers for integration tests

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

use git_wt::git::{create_project_dir, Git};

/// An origin repository and a project bare-cloned from it
pub struct TestProject {
    // Held for cleanup
    _temp: TempDir,
    pub origin: PathBuf,
    pub root: PathBuf,
    pub git: Git,
}

/// Run git in `dir`, failing the helper if git does.
pub fn git(dir: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .with_context(|| format!("failed to spawn git {}", args.join(" ")))?;

    if !output.status.success() {
        bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Create a repository with an initial commit on `main` and a `develop`
/// branch.
pub fn init_origin(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    git(dir, &["init"])?;
    git(dir, &["config", "user.email", "test@test.com"])?;
    git(dir, &["config", "user.name", "Test User"])?;

    fs::write(dir.join("README.md"), "# Test Repository\n")?;
    git(dir, &["add", "."])?;
    git(dir, &["commit", "-m", "Initial commit"])?;
    git(dir, &["branch", "-M", "main"])?;
    git(dir, &["branch", "develop"])?;
    Ok(())
}

/// Origin plus a bare-layout project at `<temp>/projects/app`.
pub fn setup_project() -> Result<TestProject> {
    let temp = TempDir::new()?;
    let origin = temp.path().join("origin");
    init_origin(&origin)?;

    let root = create_project_dir(&temp.path().join("projects").join("app"))?;
    let git = Git::default();
    let url = origin.to_string_lossy().into_owned();
    git.bare_clone(&url, &root, &[])?;

    Ok(TestProject {
        _temp: temp,
        origin,
        root,
        git,
    })
}

/// Branch names of all non-bare worktrees, in listing order.
pub fn worktree_branches(project: &TestProject) -> Result<Vec<String>> {
    Ok(project
        .git
        .list_worktrees(&project.root)?
        .into_iter()
        .filter(|wt| !wt.is_bare)
        .map(|wt| wt.branch_name().to_string())
        .collect())
}
