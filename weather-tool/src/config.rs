use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// geocoding_url = "https://geocoding-api.open-meteo.com"
/// forecast_url = "https://api.open-meteo.com"
/// timeout_secs = 60
/// diagnostics = false
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Host serving `/v1/search`.
    pub geocoding_url: String,

    /// Host serving `/v1/forecast`.
    pub forecast_url: String,

    /// Per-request timeout, applied to each outbound call separately.
    pub timeout_secs: u64,

    pub user_agent: String,

    /// Log DNS and resolver details before each lookup.
    pub diagnostics: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: default_user_agent(),
            diagnostics: false,
        }
    }
}

fn default_user_agent() -> String {
    format!("weather-tool/{}", env!("CARGO_PKG_VERSION"))
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Geocoding endpoint with any trailing slash on the host removed.
    pub fn search_endpoint(&self) -> String {
        format!("{}/v1/search", self.geocoding_url.trim_end_matches('/'))
    }

    pub fn forecast_endpoint(&self) -> String {
        format!("{}/v1/forecast", self.forecast_url.trim_end_matches('/'))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse configuration TOML")
    }

    /// Load config from the platform config directory, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save config to the platform config directory.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to `path`, creating parent directories as needed.
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
        let dirs = ProjectDirs::from("dev", "weather-tool", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
