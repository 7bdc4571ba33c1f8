//! Worktree create/list/status/remove/prune against a real bare project

use std::fs;

use git_wt::git::worktree::worktree_path;
use git_wt::git::WorktreeStatus;
use git_wt::Error;

use super::helpers::{git, setup_project, worktree_branches};

#[test]
fn test_create_worktree_from_head() {
    let project = setup_project().unwrap();

    let path = project
        .git
        .create_worktree(&project.root, "feature/auth", None)
        .unwrap();

    assert_eq!(path, project.root.join("feature-auth"));
    assert!(path.join("README.md").exists());
    assert_eq!(git(&path, &["branch", "--show-current"]).unwrap(), "feature/auth");
}

#[test]
fn test_create_worktree_with_base() {
    let project = setup_project().unwrap();
    let develop_head = git(&project.root, &["rev-parse", "develop"]).unwrap();

    let path = project
        .git
        .create_worktree(&project.root, "fix/login", Some("develop"))
        .unwrap();

    assert_eq!(git(&path, &["rev-parse", "HEAD"]).unwrap(), develop_head);
}

#[test]
fn test_create_worktree_existing_branch_name_fails() {
    let project = setup_project().unwrap();

    let err = project
        .git
        .create_worktree(&project.root, "develop", None)
        .unwrap_err();
    assert!(matches!(err, Error::ToolExecution { .. }), "{err:?}");
}

#[test]
fn test_create_worktree_directory_collision() {
    let project = setup_project().unwrap();
    project
        .git
        .create_worktree(&project.root, "a/b", None)
        .unwrap();

    let err = project
        .git
        .create_worktree(&project.root, "a-b", None)
        .unwrap_err();
    assert!(matches!(err, Error::AlreadyExists(p) if p == project.root.join("a-b")));

    // The colliding branch was never created
    assert!(git(&project.root, &["rev-parse", "--verify", "refs/heads/a-b"]).is_err());
}

#[test]
fn test_create_worktree_from_existing_branch() {
    let project = setup_project().unwrap();

    let path = project
        .git
        .create_worktree_from_branch(&project.root, "develop")
        .unwrap();

    assert_eq!(path, worktree_path(&project.root, "develop"));
    assert_eq!(git(&path, &["branch", "--show-current"]).unwrap(), "develop");
}

#[test]
fn test_create_worktree_from_missing_branch() {
    let project = setup_project().unwrap();

    let err = project
        .git
        .create_worktree_from_branch(&project.root, "nope")
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)), "{err:?}");
    assert!(!project.root.join("nope").exists());
}

#[test]
fn test_list_worktrees_order_and_names() {
    let project = setup_project().unwrap();
    project
        .git
        .create_worktree_from_branch(&project.root, "main")
        .unwrap();
    project
        .git
        .create_worktree(&project.root, "feature/deep/nested", None)
        .unwrap();

    let worktrees = project.git.list_worktrees(&project.root).unwrap();
    assert!(worktrees[0].is_bare);
    assert_eq!(worktrees[0].branch, None);

    // git keeps the bare entry first and sorts the rest by path
    assert_eq!(
        worktree_branches(&project).unwrap(),
        vec!["feature/deep/nested".to_string(), "main".to_string()]
    );
    assert_eq!(
        worktrees[1].path.file_name().unwrap(),
        "feature-deep-nested"
    );
    assert!(worktrees[1].commit.is_some());
}

#[test]
fn test_worktree_status() {
    let project = setup_project().unwrap();
    let path = project
        .git
        .create_worktree(&project.root, "feature/status", None)
        .unwrap();

    assert_eq!(project.git.worktree_status(&path), WorktreeStatus::Clean);

    fs::write(path.join("README.md"), "changed\n").unwrap();
    let status = project.git.worktree_status(&path);
    assert_eq!(status, WorktreeStatus::Modified(1));
    assert_eq!(status.to_string(), "1 modified");

    fs::write(path.join("new.txt"), "untracked\n").unwrap();
    assert_eq!(project.git.worktree_status(&path), WorktreeStatus::Modified(2));
}

#[test]
fn test_remove_dirty_worktree_requires_force() {
    let project = setup_project().unwrap();
    let path = project
        .git
        .create_worktree(&project.root, "feature/dirty", None)
        .unwrap();
    fs::write(path.join("scratch.txt"), "wip\n").unwrap();

    let err = project
        .git
        .remove_worktree(&project.root, &path, false)
        .unwrap_err();
    assert!(matches!(err, Error::ToolExecution { .. }));
    assert!(path.exists());

    project
        .git
        .remove_worktree(&project.root, &path, true)
        .unwrap();
    assert!(!path.exists());
}

#[test]
fn test_delete_branch_only_after_removal() {
    let project = setup_project().unwrap();
    let path = project
        .git
        .create_worktree(&project.root, "feature/done", None)
        .unwrap();

    // Still checked out
    assert!(project
        .git
        .delete_branch(&project.root, "feature/done")
        .is_err());

    project
        .git
        .remove_worktree(&project.root, &path, false)
        .unwrap();
    project
        .git
        .delete_branch(&project.root, "feature/done")
        .unwrap();

    assert!(git(&project.root, &["rev-parse", "--verify", "refs/heads/feature/done"]).is_err());
}

#[test]
fn test_prune_after_manual_delete() {
    let project = setup_project().unwrap();
    let path = project
        .git
        .create_worktree(&project.root, "feature/gone", None)
        .unwrap();

    fs::remove_dir_all(&path).unwrap();
    assert_eq!(worktree_branches(&project).unwrap(), vec!["feature/gone".to_string()]);

    project.git.prune_worktrees(&project.root).unwrap();
    assert!(worktree_branches(&project).unwrap().is_empty());

    // Idempotent
    project.git.prune_worktrees(&project.root).unwrap();
}

#[test]
fn test_repair_worktrees() {
    let project = setup_project().unwrap();
    project
        .git
        .create_worktree(&project.root, "feature/repair", None)
        .unwrap();

    project.git.repair_worktrees(&project.root).unwrap();
    assert_eq!(
        worktree_branches(&project).unwrap(),
        vec!["feature/repair".to_string()]
    );
}

#[test]
fn test_locate_worktree() {
    let project = setup_project().unwrap();
    let path = project
        .git
        .create_worktree(&project.root, "feature/find", None)
        .unwrap();

    assert_eq!(
        project.git.locate_worktree(&project.root, "feature/find").unwrap(),
        path
    );
    assert!(matches!(
        project.git.locate_worktree(&project.root, "feature/lost"),
        Err(Error::NotFound(_))
    ));
}
