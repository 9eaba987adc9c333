//! Configuration management for folio.
//!
//! Configuration is loaded from multiple sources with precedence:
//! 1. Environment variables (FOLIO_*)
//! 2. Config file (FOLIO_CONFIG, or the platform config dir)
//! 3. Default values

use anyhow::{Context, Result};
use directories::ProjectDirs;
use folio_core::client::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use folio_core::nav::ASSET_MANAGEMENT_TABS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Dashboard shell settings
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the dashboard backend
    #[serde(default = "default_api_url")]
    pub url: String,

    /// Access token for the backend session
    pub access_token: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Path used by `folio tabs` when none is given
    #[serde(default = "default_path")]
    pub default_path: String,
}

// Default value functions
fn default_api_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_path() -> String {
    ASSET_MANAGEMENT_TABS
        .first()
        .map(|item| item.href.to_string())
        .unwrap_or_else(|| "/".to_string())
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            access_token: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_path: default_path(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from a file, falling back to defaults when it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Apply FOLIO_API_URL / FOLIO_ACCESS_TOKEN overrides.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("FOLIO_API_URL").filter(|v| !v.is_empty()) {
            self.api.url = url;
        }
        if let Some(token) = lookup("FOLIO_ACCESS_TOKEN").filter(|v| !v.is_empty()) {
            self.api.access_token = Some(token);
        }
    }

    /// Get the config file path.
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("FOLIO_CONFIG") {
            PathBuf::from(path)
        } else if let Some(proj_dirs) = ProjectDirs::from("dev", "folio", "folio") {
            proj_dirs.config_dir().join("config.toml")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".folio")
                .join("config.toml")
        }
    }

    /// Connection settings for the session client.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api.url.clone(),
            access_token: self.api.access_token.clone(),
            timeout_secs: self.api.timeout_secs,
        }
    }
}
