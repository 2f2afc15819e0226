//! Configuration management for rolo.
//!
//! Configuration is loaded from multiple sources with precedence:
//! 1. Environment variables (ROLO_*)
//! 2. Config file (~/.rolo/config.toml)
//! 3. Default values

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Export delivery settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Paths
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL for the backend API, including the `/api` prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Delivery mechanism for contact exports, selected once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportMode {
    /// Write the export as a named file into the download directory
    File,
    /// Copy the export text to the system clipboard
    Clipboard,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_mode")]
    pub mode: ExportMode,

    /// Target directory for file exports
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Base directory for rolo data
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Session token file, the only state surviving restarts
    #[serde(default = "default_token_file")]
    pub token_file: PathBuf,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_export_mode() -> ExportMode {
    ExportMode::File
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".rolo")
}

fn default_token_file() -> PathBuf {
    default_data_dir().join("token")
}

fn default_download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| default_data_dir().join("exports"))
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            mode: default_export_mode(),
            download_dir: default_download_dir(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            token_file: default_token_file(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            export: ExportConfig::default(),
            paths: PathsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| Error::Config(e.to_string()))?
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Path of the config file (~/.rolo/config.toml).
    pub fn config_path() -> PathBuf {
        default_data_dir().join("config.toml")
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("ROLO_API_URL") {
            self.api.base_url = url;
        }
        if let Ok(path) = std::env::var("ROLO_TOKEN_FILE") {
            self.paths.token_file = PathBuf::from(path);
        }
        if let Ok(mode) = std::env::var("ROLO_EXPORT_MODE") {
            match mode.as_str() {
                "file" => self.export.mode = ExportMode::File,
                "clipboard" => self.export.mode = ExportMode::Clipboard,
                other => tracing::warn!("ignoring unknown ROLO_EXPORT_MODE: {}", other),
            }
        }
    }
}
