//! Layered configuration
//!
//! Effective settings are resolved from three layers, lowest first:
//! built-in defaults, the global file, the repository file
//! (`<project_root>/.git-wt.toml`). Runtime flag overrides are applied by the
//! caller on the resolved value.
//!
//! A layer only adds or replaces: a field left empty/zero in a file never
//! resets a lower layer's value.

mod paths;
mod sources;
mod template;


pub use paths::ConfigPaths;
pub use sources::{load_effective, ConfigField, ConfigSource, SourceMap};
pub use template::{expand_branch_template, generate_template, write_template};

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::error::{Error, Result};

/// File name of the per-repository config under the project root
pub const REPO_CONFIG_FILE: &str = ".git-wt.toml";

/// Default branch name template for issue/PR branches
pub const DEFAULT_BRANCH_TEMPLATE: &str = "{{type}}-{{number}}-{{slug}}";

/// Effective git-wt settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Where clones are created; empty means the caller's current directory
    pub worktree_root: String,
    pub default_remote: String,
    /// Base for new worktrees; empty means HEAD
    pub default_base_branch: String,
    pub branch_template: String,
    /// Seconds for standard git operations
    pub git_timeout: u64,
    /// Seconds for clone/fetch
    pub git_long_timeout: u64,
    /// Seconds per hook command
    pub hook_timeout: u64,
    pub hooks: HooksConfig,
}

/// Shell commands run after operations, in order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HooksConfig {
    pub post_clone: Vec<String>,
    pub post_add: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            worktree_root: String::new(),
            default_remote: "origin".to_string(),
            default_base_branch: String::new(),
            branch_template: DEFAULT_BRANCH_TEMPLATE.to_string(),
            git_timeout: 120,
            git_long_timeout: 600,
            hook_timeout: 30,
            hooks: HooksConfig::default(),
        }
    }
}

impl Config {
    /// A config with every field at its zero value (no defaults applied)
    pub fn empty() -> Self {
        Self {
            worktree_root: String::new(),
            default_remote: String::new(),
            default_base_branch: String::new(),
            branch_template: String::new(),
            git_timeout: 0,
            git_long_timeout: 0,
            hook_timeout: 0,
            hooks: HooksConfig::default(),
        }
    }

    pub fn git_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.git_timeout)
    }

    pub fn git_long_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.git_long_timeout)
    }

    pub fn hook_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.hook_timeout)
    }
}

/// On-disk shape: every key optional so "absent" and "zero" stay distinct
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    worktree_root: Option<String>,
    default_remote: Option<String>,
    default_base_branch: Option<String>,
    branch_template: Option<String>,
    git_timeout: Option<u64>,
    git_long_timeout: Option<u64>,
    hook_timeout: Option<u64>,
    hooks: Option<HooksFile>,
}

#[derive(Debug, Default, Deserialize)]
struct HooksFile {
    post_clone: Option<Vec<String>>,
    post_add: Option<Vec<String>>,
}

impl ConfigFile {
    /// Read and parse `path`; a missing file is an empty layer.
    fn read(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Config file not found, using empty layer");
                return Ok(Self::default());
            }
            Err(e) => return Err(Error::io(path, e)),
        };

        toml::from_str(&content).map_err(|source| Error::InvalidConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overwrite every field present in the file, including explicit zeros.
    fn apply_to(self, config: &mut Config) {
        if let Some(v) = self.worktree_root {
            config.worktree_root = v;
        }
        if let Some(v) = self.default_remote {
            config.default_remote = v;
        }
        if let Some(v) = self.default_base_branch {
            config.default_base_branch = v;
        }
        if let Some(v) = self.branch_template {
            config.branch_template = v;
        }
        if let Some(v) = self.git_timeout {
            config.git_timeout = v;
        }
        if let Some(v) = self.git_long_timeout {
            config.git_long_timeout = v;
        }
        if let Some(v) = self.hook_timeout {
            config.hook_timeout = v;
        }
        if let Some(hooks) = self.hooks {
            if let Some(v) = hooks.post_clone {
                config.hooks.post_clone = v;
            }
            if let Some(v) = hooks.post_add {
                config.hooks.post_add = v;
            }
        }
    }
}

/// Defaults overlaid with whatever `path` sets. A missing file yields the
/// defaults; a malformed one is [`Error::InvalidConfig`].
pub fn load(path: &Path) -> Result<Config> {
    let mut config = Config::default();
    ConfigFile::read(path)?.apply_to(&mut config);
    Ok(config)
}

/// Only the fields `path` sets, on top of [`Config::empty`].
pub fn load_raw(path: &Path) -> Result<Config> {
    let mut config = Config::empty();
    ConfigFile::read(path)?.apply_to(&mut config);
    Ok(config)
}

/// Field-wise merge: non-empty/non-zero `overlay` values win, empty/zero
/// values never overwrite `base`.
pub fn merge(base: &Config, overlay: &Config) -> Config {
    let mut merged = base.clone();

    if !overlay.worktree_root.is_empty() {
        merged.worktree_root = overlay.worktree_root.clone();
    }
    if !overlay.default_remote.is_empty() {
        merged.default_remote = overlay.default_remote.clone();
    }
    if !overlay.default_base_branch.is_empty() {
        merged.default_base_branch = overlay.default_base_branch.clone();
    }
    if !overlay.branch_template.is_empty() {
        merged.branch_template = overlay.branch_template.clone();
    }
    if overlay.git_timeout != 0 {
        merged.git_timeout = overlay.git_timeout;
    }
    if overlay.git_long_timeout != 0 {
        merged.git_long_timeout = overlay.git_long_timeout;
    }
    if overlay.hook_timeout != 0 {
        merged.hook_timeout = overlay.hook_timeout;
    }
    if !overlay.hooks.post_clone.is_empty() {
        merged.hooks.post_clone = overlay.hooks.post_clone.clone();
    }
    if !overlay.hooks.post_add.is_empty() {
        merged.hooks.post_add = overlay.hooks.post_add.clone();
    }

    merged
}

/// Path of the repository-level config file
pub fn repo_config_path(project_root: &Path) -> PathBuf {
    project_root.join(REPO_CONFIG_FILE)
}

/// Resolve defaults, then the global file, then the repository file.
///
/// The repository layer is skipped when `project_root` is `None`.
pub fn load_with_repo(global_path: &Path, project_root: Option<&Path>) -> Result<Config> {
    let mut config = merge(&Config::default(), &load_raw(global_path)?);

    if let Some(root) = project_root {
        config = merge(&config, &load_raw(&repo_config_path(root))?);
    }

    Ok(config)
}
