use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    model::{DEFAULT_ICON_BASE_URL, Units},
    provider::openweather::DEFAULT_BASE_URL,
    search::SuggestionMode,
    session::FailurePolicy,
};

/// Environment variable that overrides the API key stored on disk.
pub const API_KEY_ENV: &str = "CITYWEATHER_API_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// units = "metric"
/// failure_policy = "keep-last-good"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub units: Units,
    pub api_base_url: Option<String>,
    pub icon_base_url: Option<String>,
    /// Full city dataset; the bundled sample is used when absent.
    pub dataset_path: Option<PathBuf>,
    /// Request timeout; unset leaves the HTTP client without one.
    pub timeout_secs: Option<u64>,
    pub failure_policy: FailurePolicy,
    pub suggestion_mode: SuggestionMode,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Like [`Config::load`], but an unresolvable config directory yields the
    /// defaults instead of an error. Read and parse failures still surface.
    pub fn load_or_default() -> Result<Self> {
        Self::load_resolved(Self::config_file_path())
    }

    fn load_resolved(path: Result<PathBuf>) -> Result<Self> {
        match path {
            Ok(path) => Self::load_from(&path),
            Err(err) => {
                tracing::warn!(error = %err, "no config directory, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "cityweather", "cityweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// API key from the environment if set, otherwise from the config file.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key_with_env(std::env::var(API_KEY_ENV).ok())
    }

    fn api_key_with_env(&self, env_key: Option<String>) -> Option<String> {
        env_key
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone().filter(|k| !k.trim().is_empty()))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key.trim().to_string());
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn icon_base_url(&self) -> &str {
        self.icon_base_url.as_deref().unwrap_or(DEFAULT_ICON_BASE_URL)
    }

    pub fn timeout_secs(&self) -> Option<u64> {
        self.timeout_secs
    }
}
