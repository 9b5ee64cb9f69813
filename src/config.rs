//! Application configuration management.
//!
//! The only configurable value is the API origin the backend listens on.
//! Resolution order: `MAILBRIEF_API_ORIGIN` environment variable (a `.env`
//! file is honored), then `~/.config/mailbrief/config.json`, then the
//! compiled default.

use std::path::PathBuf;

use anyhow::Result;
use serde::Deserialize;

/// Application name used for config/data directory paths
const APP_NAME: &str = "mailbrief";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default backend origin for local development
const DEFAULT_API_ORIGIN: &str = "http://localhost:8000";

/// Environment variable overriding the API origin
const API_ORIGIN_ENV: &str = "MAILBRIEF_API_ORIGIN";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    pub api_origin: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve the backend origin, trailing slash stripped.
    pub fn api_origin(&self) -> String {
        std::env::var(API_ORIGIN_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| self.api_origin.clone())
            .unwrap_or_else(|| DEFAULT_API_ORIGIN.to_string())
            .trim_end_matches('/')
            .to_string()
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory holding the persisted credential.
    pub fn data_dir(&self) -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }
}
