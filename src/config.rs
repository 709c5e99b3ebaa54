//! Configuration file support for goimportgraph
//!
//! Reads configuration from `~/.config/goimportgraph/config.json`:
//!
//! ```json
//! {
//!   "timeout_secs": 30,
//!   "user_agent": "goimportgraph (+https://example.com/ops)",
//!   "overrides": {
//!     "go.corp.example/internal/lib": "https://git.corp.example/lib.git"
//!   }
//! }
//! ```
//!
//! Every field is optional; a missing file means defaults.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const CONFIG_FILE: &str = "config.json";

/// User-Agent sent with lookups unless configured otherwise
const DEFAULT_USER_AGENT: &str = concat!("goimportgraph/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no config directory: neither XDG_CONFIG_HOME nor HOME is set")]
    NoConfigDir,

    #[error("cannot read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Top-level configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Overall timeout per lookup in seconds (default: none)
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// User-Agent header for lookups
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Module path -> repository URL, used instead of fetching
    #[serde(default)]
    pub overrides: HashMap<String, String>,
}

impl Config {
    /// Read `config.json` from the user config directory; no file means defaults
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_dir()?.join(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no config at {}, using defaults", path.display());
                return Ok(Config::default());
            }
            Err(source) => {
                return Err(ConfigError::Unreadable {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config: Config =
            serde_json::from_str(&content).map_err(|source| ConfigError::Invalid {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(
            "loaded config from {} ({} overrides)",
            path.display(),
            config.overrides.len()
        );
        Ok(config)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    /// Look up a repository URL override for a module path (exact match)
    pub fn repo_override(&self, module_path: &str) -> Option<&str> {
        self.overrides.get(module_path).map(String::as_str)
    }
}

/// `$XDG_CONFIG_HOME/goimportgraph`, or `~/.config/goimportgraph` when unset
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join("goimportgraph"))
}
