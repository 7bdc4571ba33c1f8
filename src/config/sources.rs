//! Provenance tracking for resolved config values

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use super::{load_raw, merge, repo_config_path, Config};
use crate::error::Result;

/// Scalar config fields whose source is tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigField {
    WorktreeRoot,
    DefaultRemote,
    DefaultBaseBranch,
    BranchTemplate,
    GitTimeout,
    GitLongTimeout,
    HookTimeout,
}

impl ConfigField {
    /// All tracked fields, in display order
    pub const ALL: [ConfigField; 7] = [
        ConfigField::WorktreeRoot,
        ConfigField::DefaultRemote,
        ConfigField::DefaultBaseBranch,
        ConfigField::BranchTemplate,
        ConfigField::GitTimeout,
        ConfigField::GitLongTimeout,
        ConfigField::HookTimeout,
    ];

    /// TOML key name
    pub fn key(&self) -> &'static str {
        match self {
            ConfigField::WorktreeRoot => "worktree_root",
            ConfigField::DefaultRemote => "default_remote",
            ConfigField::DefaultBaseBranch => "default_base_branch",
            ConfigField::BranchTemplate => "branch_template",
            ConfigField::GitTimeout => "git_timeout",
            ConfigField::GitLongTimeout => "git_long_timeout",
            ConfigField::HookTimeout => "hook_timeout",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    /// Whether `config` carries a non-empty/non-zero value for this field
    pub fn is_set_in(&self, config: &Config) -> bool {
        match self {
            ConfigField::WorktreeRoot => !config.worktree_root.is_empty(),
            ConfigField::DefaultRemote => !config.default_remote.is_empty(),
            ConfigField::DefaultBaseBranch => !config.default_base_branch.is_empty(),
            ConfigField::BranchTemplate => !config.branch_template.is_empty(),
            ConfigField::GitTimeout => config.git_timeout != 0,
            ConfigField::GitLongTimeout => config.git_long_timeout != 0,
            ConfigField::HookTimeout => config.hook_timeout != 0,
        }
    }

    /// The field's value in `config`, rendered as text
    pub fn value_in(&self, config: &Config) -> String {
        match self {
            ConfigField::WorktreeRoot => config.worktree_root.clone(),
            ConfigField::DefaultRemote => config.default_remote.clone(),
            ConfigField::DefaultBaseBranch => config.default_base_branch.clone(),
            ConfigField::BranchTemplate => config.branch_template.clone(),
            ConfigField::GitTimeout => config.git_timeout.to_string(),
            ConfigField::GitLongTimeout => config.git_long_timeout.to_string(),
            ConfigField::HookTimeout => config.hook_timeout.to_string(),
        }
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Layer that supplied a field's effective value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Default,
    File(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Source of every tracked field. Hook lists are not tracked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMap {
    sources: BTreeMap<ConfigField, ConfigSource>,
}

impl Default for SourceMap {
    fn default() -> Self {
        Self {
            sources: ConfigField::ALL
                .into_iter()
                .map(|f| (f, ConfigSource::Default))
                .collect(),
        }
    }
}

impl SourceMap {
    pub fn get(&self, field: ConfigField) -> &ConfigSource {
        // Every field is inserted at construction
        self.sources.get(&field).unwrap_or(&ConfigSource::Default)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConfigField, &ConfigSource)> {
        self.sources.iter().map(|(f, s)| (*f, s))
    }

    /// Attribute every field `layer` sets to `path`.
    fn record(&mut self, layer: &Config, path: &Path) {
        for field in ConfigField::ALL {
            if field.is_set_in(layer) {
                self.sources.insert(field, ConfigSource::File(path.to_path_buf()));
            }
        }
    }
}

/// Resolve like [`super::load_with_repo`] and report which layer set each
/// scalar field.
///
/// A malformed file aborts resolution at that layer.
pub fn load_effective(global_path: &Path, project_root: Option<&Path>) -> Result<(Config, SourceMap)> {
    let mut sources = SourceMap::default();

    let global = load_raw(global_path)?;
    sources.record(&global, global_path);
    let mut config = merge(&Config::default(), &global);

    if let Some(root) = project_root {
        let repo_path = repo_config_path(root);
        let repo = load_raw(&repo_path)?;
        sources.record(&repo, &repo_path);
        config = merge(&config, &repo);
    }

    Ok((config, sources))
}
