//! Post-add hooks run inside a freshly created worktree

use std::fs;

use git_wt::hooks::{run_hooks, HookContext};

use super::helpers::setup_project;

#[test]
fn test_post_add_hooks_run_in_worktree() {
    let project = setup_project().unwrap();
    let path = project
        .git
        .create_worktree(&project.root, "feature/hooked", None)
        .unwrap();
    let default_branch = project.git.default_branch(&project.root).unwrap();
    let ctx = HookContext::new(&path, "feature/hooked", &project.root, &default_branch);

    let commands = vec![
        "git rev-parse --abbrev-ref HEAD > branch.txt".to_string(),
        "exit 3".to_string(),
        "printf '%s' {{.DefaultBranch}} > default.txt".to_string(),
    ];
    let warnings = run_hooks(&commands, &ctx, 10);

    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].command, "exit 3");
    assert_eq!(
        fs::read_to_string(path.join("branch.txt")).unwrap().trim(),
        "feature/hooked"
    );
    assert_eq!(fs::read_to_string(path.join("default.txt")).unwrap(), "main");
}
