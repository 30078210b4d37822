//! Application configuration.
//!
//! Settings come from an optional RON file; the Supabase URL and anon key
//! can be overridden from the environment (a `.env` file is loaded first).

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use carikerja_core::{SyncSettings, DEFAULT_MIN_LOADING_WINDOW, DEFAULT_TRANSITION_WINDOW};
use carikerja_engine::StoreSettings;
use serde::{Deserialize, Serialize};

pub const ENV_BASE_URL: &str = "CARIKERJA_SUPABASE_URL";
pub const ENV_ANON_KEY: &str = "CARIKERJA_SUPABASE_ANON_KEY";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("{0} is not set (config file `store` section or environment)")]
    Missing(&'static str),
    #[error("store.{0} must be greater than zero")]
    Zero(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub base_url: String,
    pub anon_key: String,
    pub connect_timeout_ms: u64,
    /// Unset means requests may hang indefinitely.
    pub request_timeout_ms: Option<u64>,
    pub max_response_bytes: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let defaults = StoreSettings::new("", "");
        Self {
            base_url: String::new(),
            anon_key: String::new(),
            connect_timeout_ms: defaults.connect_timeout.as_millis() as u64,
            request_timeout_ms: defaults.request_timeout.map(|t| t.as_millis() as u64),
            max_response_bytes: defaults.max_bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub min_loading_ms: u64,
    pub transition_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            min_loading_ms: DEFAULT_MIN_LOADING_WINDOW.as_millis() as u64,
            transition_ms: DEFAULT_TRANSITION_WINDOW.as_millis() as u64,
        }
    }
}

impl AppConfig {
    /// Reads `path` (if given), applies environment overrides and validates.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Non-empty values returned by `lookup` replace the file settings.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(url) = non_empty(ENV_BASE_URL) {
            self.store.base_url = url;
        }
        if let Some(key) = non_empty(ENV_ANON_KEY) {
            self.store.anon_key = key;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.base_url.trim().is_empty() {
            return Err(ConfigError::Missing(ENV_BASE_URL));
        }
        if self.store.anon_key.trim().is_empty() {
            return Err(ConfigError::Missing(ENV_ANON_KEY));
        }
        if self.store.connect_timeout_ms == 0 {
            return Err(ConfigError::Zero("connect_timeout_ms"));
        }
        if self.store.request_timeout_ms == Some(0) {
            return Err(ConfigError::Zero("request_timeout_ms"));
        }
        if self.store.max_response_bytes == 0 {
            return Err(ConfigError::Zero("max_response_bytes"));
        }
        Ok(())
    }

    pub fn store_settings(&self) -> StoreSettings {
        let mut settings = StoreSettings::new(self.store.base_url.trim(), self.store.anon_key.trim());
        settings.connect_timeout = Duration::from_millis(self.store.connect_timeout_ms);
        settings.request_timeout = self.store.request_timeout_ms.map(Duration::from_millis);
        settings.max_bytes = self.store.max_response_bytes;
        settings
    }

    pub fn sync_settings(&self) -> SyncSettings {
        SyncSettings {
            min_loading_window: Duration::from_millis(self.sync.min_loading_ms),
            transition_window: Duration::from_millis(self.sync.transition_ms),
        }
    }
}
