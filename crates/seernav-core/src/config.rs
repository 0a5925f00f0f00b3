//! Navigator configuration
//!
//! Looked up in order:
//! 1. `<root>/.seernav.toml`
//! 2. `$SEERNAV_CONFIG_DIR/config.toml`, else `~/.config/seernav/config.toml`
//! 3. built-in defaults
//!
//! The first file found wins as a whole; files are not merged.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SeerError};

const CONFIG_DIR: &str = "seernav";
const CONFIG_FILE: &str = "config.toml";
const CONFIG_DIR_ENV_VAR: &str = "SEERNAV_CONFIG_DIR";

/// Per-root config file name
pub const LOCAL_CONFIG_FILE: &str = ".seernav.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigatorConfig {
    /// Decimal places for score cells
    #[serde(default = "default_score_precision")]
    pub score_precision: usize,

    /// Decimal places for percentages in summary panels
    #[serde(default = "default_percent_precision")]
    pub percent_precision: usize,

    /// Read `task.json` descriptors to compute weights
    #[serde(default = "default_weight_lookup")]
    pub weight_lookup: bool,

    /// View name to the column sorted once when the view opens
    #[serde(default)]
    pub default_sort: BTreeMap<String, String>,
}

fn default_score_precision() -> usize {
    2
}

fn default_percent_precision() -> usize {
    1
}

fn default_weight_lookup() -> bool {
    true
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        NavigatorConfig {
            score_precision: default_score_precision(),
            percent_precision: default_percent_precision(),
            weight_lookup: default_weight_lookup(),
            default_sort: BTreeMap::new(),
        }
    }
}

impl NavigatorConfig {
    /// Load the configuration that applies to a sessions root
    pub fn load(root: &Path) -> Result<Self> {
        Self::load_from(root, Self::global_config_path().as_deref())
    }

    fn load_from(root: &Path, global: Option<&Path>) -> Result<Self> {
        let local = root.join(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Self::from_file(&local);
        }
        match global {
            Some(path) if path.is_file() => Self::from_file(path),
            _ => {
                tracing::debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse a single config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| SeerError::io_operation("read config", path.display(), e))?;

        let config: NavigatorConfig =
            toml::from_str(&content).map_err(|e| SeerError::InvalidConfig {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    fn global_config_path() -> Option<PathBuf> {
        // Allow environment variable override for testing
        let config_dir = match std::env::var(CONFIG_DIR_ENV_VAR) {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => dirs::config_dir()?.join(CONFIG_DIR),
        };
        Some(config_dir.join(CONFIG_FILE))
    }

    /// Column to sort by when `view` opens, if configured
    pub fn default_sort_for(&self, view: &str) -> Option<&str> {
        self.default_sort.get(view).map(String::as_str)
    }
}
