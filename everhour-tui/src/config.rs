use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EverhourConfig {
    /// Base URL of the Everhour API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Cadence for reconciling local timer state with the server, in seconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    /// How many recent time entries feed the empty-query task list.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: u32,
    /// Result cap for live task search.
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,
}

fn default_api_url() -> String {
    everhour::DEFAULT_BASE_URL.to_string()
}

fn default_poll_interval() -> u64 {
    60
}

fn default_recent_limit() -> u32 {
    20
}

fn default_search_limit() -> u32 {
    30
}

impl Default for EverhourConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            poll_interval_secs: default_poll_interval(),
            recent_limit: default_recent_limit(),
            search_limit: default_search_limit(),
        }
    }
}

impl EverhourConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("everhour-tui")
            .join("config.toml"))
    }

    /// Load config from disk. Returns default config if the file doesn't
    /// exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(&path, raw)?;
        Ok(())
    }
}
