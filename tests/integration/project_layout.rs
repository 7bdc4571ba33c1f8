//! Bare clone layout, root discovery, default branch and stale detection

use serial_test::serial;
use std::fs;

use git_wt::git::{find_project_root, is_bare_repo, BARE_DIR, GIT_POINTER_FILE};
use git_wt::Error;

use super::helpers::{git, setup_project};

#[test]
fn test_bare_clone_layout() {
    let project = setup_project().unwrap();

    assert!(is_bare_repo(&project.root));
    assert!(project.root.join(BARE_DIR).join("HEAD").exists());
    assert_eq!(
        fs::read_to_string(project.root.join(GIT_POINTER_FILE)).unwrap(),
        "gitdir: ./.bare\n"
    );
    assert_eq!(
        git(&project.root, &["config", "remote.origin.fetch"]).unwrap(),
        "+refs/heads/*:refs/remotes/origin/*"
    );
    // Fetch ran, so remote-tracking refs exist
    git(&project.root, &["rev-parse", "--verify", "refs/remotes/origin/develop"]).unwrap();
}

#[test]
fn test_default_branch() {
    let project = setup_project().unwrap();
    assert_eq!(project.git.default_branch(&project.root).unwrap(), "main");
}

#[test]
fn test_find_project_root_from_nested_worktree() {
    let project = setup_project().unwrap();
    let path = project
        .git
        .create_worktree(&project.root, "feature/nested", None)
        .unwrap();
    let deep = path.join("src").join("module");
    fs::create_dir_all(&deep).unwrap();

    assert_eq!(find_project_root(&deep).unwrap(), project.root);
    assert_eq!(find_project_root(&project.root).unwrap(), project.root);
}

#[test]
#[serial]
fn test_find_project_root_relative_to_cwd() {
    let project = setup_project().unwrap();
    let path = project
        .git
        .create_worktree(&project.root, "feature/cwd", None)
        .unwrap();

    let original = std::env::current_dir().unwrap();
    std::env::set_current_dir(&path).unwrap();
    let found = find_project_root(std::path::Path::new("."));
    std::env::set_current_dir(original).unwrap();

    let found = found.unwrap();
    assert_eq!(
        found.canonicalize().unwrap(),
        project.root.canonicalize().unwrap()
    );
}

#[test]
fn test_find_project_root_outside_project() {
    let project = setup_project().unwrap();
    // A regular repository is not a bare layout
    assert!(matches!(
        find_project_root(&project.origin),
        Err(Error::NotInProject)
    ));
}

#[test]
fn test_stale_worktrees_after_remote_branch_deleted() {
    let project = setup_project().unwrap();
    project
        .git
        .create_worktree_from_branch(&project.root, "main")
        .unwrap();
    project
        .git
        .create_worktree_from_branch(&project.root, "develop")
        .unwrap();
    project
        .git
        .create_worktree(&project.root, "feature/local-only", None)
        .unwrap();

    let stale: Vec<String> = project
        .git
        .find_stale_worktrees(&project.root, "origin")
        .unwrap()
        .into_iter()
        .map(|wt| wt.branch_name().to_string())
        .collect();
    assert_eq!(stale, vec!["feature/local-only".to_string()]);

    git(&project.origin, &["branch", "-D", "develop"]).unwrap();
    project.git.fetch_prune(&project.root).unwrap();

    let stale: Vec<String> = project
        .git
        .find_stale_worktrees(&project.root, "origin")
        .unwrap()
        .into_iter()
        .map(|wt| wt.branch_name().to_string())
        .collect();
    assert_eq!(
        stale,
        vec!["develop".to_string(), "feature/local-only".to_string()]
    );
}
