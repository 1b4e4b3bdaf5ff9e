//! Shell configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CoreError;
use crate::Result;

/// Entry page served by the chat server, as seen from the Android emulator
pub const DEFAULT_ENTRY_URL: &str = "http://10.0.2.2:3000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Page loaded into the content view at startup
    pub entry_url: String,
    /// Path to the database file
    pub database_path: PathBuf,
    /// Log filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            entry_url: DEFAULT_ENTRY_URL.to_string(),
            database_path: data_dir.join("hybridchat.db"),
            log_filter: "info".to_string(),
        }
    }

    /// Load configuration from a JSON file.
    ///
    /// Fields the file leaves out default relative to `data_dir`. A missing
    /// file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P, data_dir: &Path) -> Result<Self> {
        let path = path.as_ref();
        let defaults = Self::new(data_dir.to_path_buf());
        if !path.exists() {
            return Ok(defaults);
        }

        let raw = std::fs::read_to_string(path)?;
        let overrides: serde_json::Value = serde_json::from_str(&raw)?;
        let overrides = overrides
            .as_object()
            .ok_or_else(|| CoreError::Config(format!("{} is not a JSON object", path.display())))?;

        let mut merged = serde_json::to_value(defaults)?;
        if let Some(fields) = merged.as_object_mut() {
            for (key, value) in overrides {
                fields.insert(key.clone(), value.clone());
            }
        }

        let config: Config = serde_json::from_value(merged)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.entry_url)
            .map_err(|e| CoreError::Config(format!("entry_url {:?}: {}", self.entry_url, e)))?;

        if self.database_path.as_os_str().is_empty() {
            return Err(CoreError::Config("database_path is empty".to_string()));
        }

        Ok(())
    }
}
