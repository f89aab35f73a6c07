//! Configuration types and path resolution for koyomi.
//!
//! Settings live as TOML at the platform's XDG config path
//! (e.g. `~/.config/koyomi/config.toml` on Linux); daily logs default to
//! the XDG data directory (`~/.local/share/koyomi/life_logs/`).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants;

/// Root configuration, deserialized from `config.toml`.
///
/// All fields are optional so koyomi can run with only the API key set in
/// the environment.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// Backend API key. The `DEEPSEEK_API_KEY` environment variable takes
    /// precedence.
    pub api_key: Option<String>,
    /// Custom base URL for the completions endpoint (proxies, self-hosted
    /// gateways).
    pub base_url: Option<String>,
    /// Model identifier override.
    pub model: Option<String>,
    /// Directory for the daily-log hierarchy, overriding the data-dir
    /// default.
    pub log_dir: Option<PathBuf>,
    /// Set false to force the non-streaming completions path.
    pub streaming: Option<bool>,
}

impl Config {
    /// Loads config from the XDG path, or defaults when no file exists.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("Invalid TOML in {}", path.display()))
    }

    /// Returns the platform-specific configuration directory for koyomi.
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join(constants::APP_NAME);
        Ok(dir)
    }

    /// Returns the platform-specific data directory for koyomi.
    ///
    /// Holds the default log hierarchy.
    pub fn data_dir() -> Result<PathBuf> {
        let dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?
            .join(constants::APP_NAME);
        Ok(dir)
    }

    /// Returns the platform-specific cache directory for koyomi.
    ///
    /// Holds the readline history.
    pub fn cache_dir() -> Result<PathBuf> {
        let dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine cache directory"))?
            .join(constants::APP_NAME);
        Ok(dir)
    }

    /// Returns the full path to the configuration file.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(constants::CONFIG_FILENAME))
    }

    /// Resolves the backend API key: environment variable first, then the
    /// config file.
    ///
    /// # Errors
    ///
    /// Returns an error if neither source provides a key.
    pub fn resolve_api_key(&self) -> Result<String> {
        if let Ok(key) = std::env::var(constants::API_KEY_ENV) {
            if !key.is_empty() {
                return Ok(key);
            }
        }
        self.api_key.clone().context(
            "No API key found. Set DEEPSEEK_API_KEY or add api_key to config.toml",
        )
    }

    pub fn base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| constants::DEFAULT_BASE_URL.to_string())
    }

    pub fn model(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| constants::DEFAULT_MODEL.to_string())
    }

    /// The root of the log hierarchy: the configured override, or
    /// `<data dir>/life_logs`.
    pub fn log_dir(&self) -> Result<PathBuf> {
        match &self.log_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::data_dir()?.join(constants::LOG_DIR_NAME)),
        }
    }

    pub fn streaming(&self) -> bool {
        self.streaming.unwrap_or(true)
    }
}
