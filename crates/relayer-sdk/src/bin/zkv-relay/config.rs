//! Configuration handling for the zkv-relay CLI
//!
//! Priority: CLI flags > environment variables > config file > defaults

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::PathBuf};
use zkverify_relayer_sdk::{RelayerClient, RelayerConfig, DEFAULT_API_URL};

/// Resolved configuration for CLI commands
pub struct Config {
    pub base_url: String,
    pub api_key: Option<String>,
    pub quiet: bool,
    pub json_output: bool,
}

impl Config {
    /// Load configuration from file, environment, and CLI args
    pub fn load(common: &super::CommonArgs) -> Result<Self> {
        // Try to load config file
        let file_config = ConfigFile::load().ok();

        let base_url = common
            .base_url
            .clone()
            .or_else(|| file_config.as_ref().and_then(|c| c.base_url.clone()))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let api_key = common
            .api_key
            .clone()
            .or_else(|| file_config.as_ref().and_then(|c| c.api_key.clone()));

        Ok(Self {
            base_url,
            api_key,
            quiet: common.quiet,
            json_output: common.output == super::OutputFormat::Json,
        })
    }

    /// Build a relayer client; requires an API key.
    pub fn relayer_client(&self) -> Result<RelayerClient> {
        let api_key = self.api_key.as_ref().context(
            "No API key configured. Use --api-key, set RELAYER_API_KEY, or configure in ~/.config/zkv-relay/config.toml",
        )?;
        let config =
            RelayerConfig::new(api_key.clone()).with_base_url(self.base_url.clone());
        RelayerClient::new(config).context("Failed to build HTTP client")
    }

    /// Directory holding cached VK registrations.
    pub fn vk_cache_dir(&self) -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("zkv-relay")
            .join("vk-cache")
    }
}

/// Configuration file structure
#[derive(Debug, Deserialize)]
struct ConfigFile {
    base_url: Option<String>,
    api_key: Option<String>,
}

impl ConfigFile {
    fn load() -> Result<Self> {
        let path = config_file_path()?;
        if !path.exists() {
            anyhow::bail!("Config file not found");
        }
        let content = fs::read_to_string(&path)?;
        let config: ConfigFile = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Get config file path
fn config_file_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Could not find config directory")?;
    Ok(config_dir.join("zkv-relay").join("config.toml"))
}
