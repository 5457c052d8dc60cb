//! Client configuration — TOML file, environment override, well-known paths.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_MARKET: &str = "NSE";
pub const API_URL_ENV: &str = "FINSCOPE_API_URL";

/// Markets offered by the form; `m` cycles through them in the TUI.
pub const MARKET_PRESETS: [&str; 4] = ["NSE", "BSE", "NYSE", "NASDAQ"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend origin; `/analyze` is appended.
    pub api_url: String,
    /// Market pre-filled in the form.
    pub default_market: String,
    /// Request timeout. `None` waits for the backend indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            default_market: DEFAULT_MARKET.to_string(),
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Load from `path`. A missing file yields defaults; a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Apply `FINSCOPE_API_URL` if set and non-empty.
    pub fn with_env_override(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api_url = url.trim().to_string();
            }
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.starts_with("http://") || self.api_url.starts_with("https://") {
            Ok(())
        } else {
            Err(ConfigError::InvalidApiUrl(self.api_url.clone()))
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn to_toml(&self) -> String {
        // A flat struct of strings and integers always serializes.
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

/// `$CONFIG_DIR/finscope`, falling back to `./.finscope`.
pub fn app_dir() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("finscope"))
        .unwrap_or_else(|| PathBuf::from(".finscope"))
}

pub fn config_path() -> PathBuf {
    app_dir().join("config.toml")
}

pub fn state_path() -> PathBuf {
    app_dir().join("state.json")
}

pub fn log_path() -> PathBuf {
    app_dir().join("finscope.log")
}
