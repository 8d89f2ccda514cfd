//! Application configuration management.
//!
//! This module handles loading and saving the client configuration:
//! the storefront API base URL and an optional shop identifier used to
//! keep per-shop cache directories apart.
//!
//! Configuration is stored at `~/.config/shopcache/config.json`.
//! `SHOPCACHE_API_URL` and `SHOPCACHE_SHOP_ID` override the stored
//! values at load time.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "shopcache";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// API base used when nothing is configured.
const DEFAULT_API_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_base_url: String,
    pub shop_id: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            shop_id: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;

        if let Ok(url) = std::env::var("SHOPCACHE_API_URL") {
            if !url.is_empty() {
                config.api_base_url = url;
            }
        }
        if let Ok(shop) = std::env::var("SHOPCACHE_SHOP_ID") {
            if !shop.is_empty() {
                config.shop_id = Some(shop);
            }
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Snapshot directory for this configuration. Shops keep separate
    /// subdirectories so switching `shop_id` never mixes catalogs.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;

        let mut path = cache_dir.join(APP_NAME);
        if let Some(ref shop) = self.shop_id {
            path = path.join(shop);
        }
        Ok(path)
    }
}
