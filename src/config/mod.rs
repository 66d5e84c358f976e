use crate::error::{Result, SmTagError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const API_KEY_VAR: &str = "MERAKI_DASHBOARD_API_KEY";
pub const BASE_URL_VAR: &str = "MERAKI_BASE_URL";

pub const DEFAULT_CELLULAR_TAG: &str = "Store_iPad";
pub const DEFAULT_WIFI_TAG: &str = "Curbside_iPad";
pub const DEFAULT_LOG_FILE: &str = "sm_tagger.log";

/// Optional settings file (`config.toml`)
///
/// Every key is optional; command-line flags and environment variables
/// take precedence over what is set here.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default)]
    pub log_file: Option<PathBuf>,

    #[serde(default)]
    pub cellular_tag: Option<String>,

    #[serde(default)]
    pub wifi_tag: Option<String>,
}

impl Config {
    /// API base URL: `MERAKI_BASE_URL`, then the config file, then the public dashboard
    pub fn base_url(&self, env_value: Option<String>) -> String {
        env_value
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| crate::meraki::DASHBOARD_API_BASE.to_string())
    }

    pub fn log_file(&self, cli_value: Option<PathBuf>) -> PathBuf {
        cli_value
            .or_else(|| self.log_file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
    }

    pub fn cellular_tag(&self, cli_value: Option<String>) -> String {
        cli_value
            .or_else(|| self.cellular_tag.clone())
            .unwrap_or_else(|| DEFAULT_CELLULAR_TAG.to_string())
    }

    pub fn wifi_tag(&self, cli_value: Option<String>) -> String {
        cli_value
            .or_else(|| self.wifi_tag.clone())
            .unwrap_or_else(|| DEFAULT_WIFI_TAG.to_string())
    }
}

/// Configuration manager
#[derive(Clone)]
pub struct ConfigManager {
    config_file: PathBuf,
}

impl ConfigManager {
    /// Use `config.toml` in the platform config directory
    pub fn new() -> Result<Self> {
        let project_dirs = ProjectDirs::from("com", "sm-tagger", "sm-tagger").ok_or_else(|| {
            SmTagError::ConfigError("Failed to determine config directory".into())
        })?;

        Ok(Self {
            config_file: project_dirs.config_dir().join("config.toml"),
        })
    }

    pub fn with_config_file(path: impl Into<PathBuf>) -> Self {
        Self {
            config_file: path.into(),
        }
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Load the config file; a missing file yields the defaults
    pub fn load_config(&self) -> Result<Config> {
        if !self.config_file.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(&self.config_file)?;
        toml::from_str(&contents).map_err(|e| {
            SmTagError::ConfigError(format!(
                "Invalid config file {}: {}",
                self.config_file.display(),
                e
            ))
        })
    }

    /// Load `.env` from the working directory into the process environment
    ///
    /// Variables already set in the environment are left alone.
    pub fn load_env_file() -> Result<Option<PathBuf>> {
        match dotenvy::dotenv() {
            Ok(path) => Ok(Some(path)),
            Err(e) if e.not_found() => Ok(None),
            Err(e) => Err(SmTagError::ConfigError(format!(
                "Failed to load .env file: {}",
                e
            ))),
        }
    }

    /// Read the API key from `MERAKI_DASHBOARD_API_KEY`
    pub fn api_key() -> Result<String> {
        api_key_from(std::env::var(API_KEY_VAR).ok())
    }
}

fn api_key_from(value: Option<String>) -> Result<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            SmTagError::ConfigError(format!(
                "API key missing. Set {} in a .env file or as an environment variable",
                API_KEY_VAR
            ))
        })
}
