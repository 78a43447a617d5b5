//! On-disk stores next to the config file: the API token (0o600 on unix) and
//! the domain cache that makes the UI responsive before the first fetch.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
#[cfg(unix)]
use std::{io::Write, os::unix::fs::OpenOptionsExt};

use everhour::domain::{Project, Task, User};

/// Cached domain lists, invalidated only by `logout` or a fresh fetch.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DomainCache {
    pub user: Option<User>,
    #[serde(default)]
    pub recent_tasks: Vec<Task>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

fn root_path() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Cannot determine config directory")?
        .join("everhour-tui"))
}

fn secure_write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    #[cfg(unix)]
    {
        std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?
            .write_all(content.as_bytes())?;
    }

    #[cfg(not(unix))]
    {
        std::fs::write(path, content)?;
    }

    Ok(())
}

pub fn token_path() -> Result<PathBuf> {
    Ok(root_path()?.join("token"))
}

pub fn cache_path() -> Result<PathBuf> {
    Ok(root_path()?.join("cache.json"))
}

pub fn load_token() -> Result<Option<String>> {
    let path = token_path()?;
    if !path.exists() {
        return Ok(None);
    }

    let token = std::fs::read_to_string(&path).context("Failed to read token file")?;
    let token = token.trim().to_string();
    if token.is_empty() {
        return Ok(None);
    }
    Ok(Some(token))
}

pub fn save_token(token: &str) -> Result<()> {
    let path = token_path()?;
    secure_write(path.as_path(), token)
}

pub fn clear_token() -> Result<()> {
    let path = token_path()?;
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}

/// Load the domain cache. Returns an empty cache when missing or unreadable;
/// the cache only exists for startup responsiveness.
pub fn load_cache() -> DomainCache {
    let Ok(path) = cache_path() else {
        return DomainCache::default();
    };
    let Ok(raw) = std::fs::read_to_string(path) else {
        return DomainCache::default();
    };
    serde_json::from_str(&raw).unwrap_or_default()
}

pub fn save_cache(cache: &DomainCache) -> Result<()> {
    let path = cache_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let raw = serde_json::to_string_pretty(cache)?;
    std::fs::write(&path, raw)?;
    Ok(())
}

pub fn clear_cache() -> Result<()> {
    let path = cache_path()?;
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}
