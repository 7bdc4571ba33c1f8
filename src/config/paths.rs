//! Global config directory and first-run marker
//!
//! The resolver never looks these up on its own; callers build a
//! [`ConfigPaths`] and pass the resulting file path in.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

const APP_DIR: &str = "git-wt";
const CONFIG_FILE: &str = "config.toml";
const INIT_MARKER: &str = ".initialized";

/// Locations under the git-wt config directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    dir: PathBuf,
}

impl ConfigPaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `$XDG_CONFIG_HOME/git-wt`, else `~/.config/git-wt`, else `./.git-wt`.
    pub fn from_env() -> Self {
        let xdg = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty());
        Self::resolve(xdg.map(PathBuf::from), dirs::home_dir())
    }

    fn resolve(xdg_config_home: Option<PathBuf>, home: Option<PathBuf>) -> Self {
        let dir = match (xdg_config_home, home) {
            (Some(xdg), _) => xdg.join(APP_DIR),
            (None, Some(home)) => home.join(".config").join(APP_DIR),
            (None, None) => PathBuf::from(format!(".{APP_DIR}")),
        };
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Global config file path
    pub fn global_config(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    pub fn init_marker(&self) -> PathBuf {
        self.dir.join(INIT_MARKER)
    }

    /// Whether the first-run hint has already been shown
    pub fn is_initialized(&self) -> bool {
        self.init_marker().exists()
    }

    pub fn mark_initialized(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| Error::io(&self.dir, e))?;
        let marker = self.init_marker();
        std::fs::write(&marker, b"").map_err(|e| Error::io(&marker, e))
    }
}
