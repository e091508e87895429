//! Bot configuration, read from an optional `astrostats.toml`

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::apis;

/// Default location of the config file, relative to the working directory
const DEFAULT_CONFIG_PATH: &str = "astrostats.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub horoscope: HoroscopeConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HoroscopeConfig {
    /// Scheme and host of the horoscope site, without a trailing slash
    pub base_url: String,
    /// Upper bound on a single page fetch
    pub timeout_secs: u64,
}

impl Default for HoroscopeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.horoscope.com".to_string(),
            timeout_secs: 10,
        }
    }
}

impl HoroscopeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load the config from `ASTROSTATS_CONFIG` or the default path, falling back to defaults if the file is absent
    pub fn load() -> anyhow::Result<Self> {
        let path = apis::get_env_variable("ASTROSTATS_CONFIG")
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::from_path(Path::new(&path))
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file found, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        let mut config: Self = toml::from_str(contents).context("Failed to parse TOML config")?;
        config.horoscope.base_url = config.horoscope.base_url.trim_end_matches('/').to_string();
        Ok(config)
    }
}
