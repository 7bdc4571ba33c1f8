//! Config resolution against a real project root

use std::fs;

use git_wt::config::{
    load_effective, load_with_repo, write_template, ConfigField, ConfigPaths, ConfigSource,
    REPO_CONFIG_FILE,
};
use git_wt::git::{find_project_root, Git};

use super::helpers::setup_project;

#[test]
fn test_repo_config_overrides_global_for_project() {
    let project = setup_project().unwrap();
    let paths = ConfigPaths::new(project.root.parent().unwrap().join("xdg").join("git-wt"));
    fs::create_dir_all(paths.dir()).unwrap();
    fs::write(paths.global_config(), "git_timeout = 180\nhook_timeout = 5\n").unwrap();
    fs::write(
        project.root.join(REPO_CONFIG_FILE),
        "default_remote = \"upstream\"\nhook_timeout = 15\n[hooks]\npost_add = [\"make\"]\n",
    )
    .unwrap();

    let path = project
        .git
        .create_worktree(&project.root, "feature/config", None)
        .unwrap();
    let root = find_project_root(&path).unwrap();

    let config = load_with_repo(&paths.global_config(), Some(&root)).unwrap();
    assert_eq!(config.git_timeout, 180);
    assert_eq!(config.default_remote, "upstream");
    assert_eq!(config.hook_timeout, 15);
    assert_eq!(config.hooks.post_add, vec!["make".to_string()]);

    let (_, sources) = load_effective(&paths.global_config(), Some(&root)).unwrap();
    assert_eq!(
        sources.get(ConfigField::GitTimeout),
        &ConfigSource::File(paths.global_config())
    );
    assert_eq!(
        sources.get(ConfigField::HookTimeout),
        &ConfigSource::File(root.join(REPO_CONFIG_FILE))
    );
    assert_eq!(sources.get(ConfigField::WorktreeRoot), &ConfigSource::Default);

    let git = Git::from_config(&config);
    assert_eq!(git.timeout().as_secs(), 180);
    assert_eq!(git.long_timeout().as_secs(), 600);
}

#[test]
fn test_written_template_resolves_to_defaults() {
    let project = setup_project().unwrap();
    let paths = ConfigPaths::new(project.root.parent().unwrap().join("fresh").join("git-wt"));

    write_template(&paths.global_config()).unwrap();
    let (config, sources) = load_effective(&paths.global_config(), Some(&project.root)).unwrap();

    assert_eq!(config, git_wt::config::Config::default());
    assert!(sources.iter().all(|(_, s)| *s == ConfigSource::Default));
}
