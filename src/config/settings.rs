//! Application Settings
//!
//! Environment overrides (`SNIPPY_*`) layered over built-in defaults.

use std::path::PathBuf;

use ::config::{Config, Environment};
use serde::Deserialize;

use crate::errors::{ConfigError, Result};

/// Default freshness window of the version caches: 6 hours.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 6 * 60 * 60;

/// Name of the folder holding every file Snippy writes.
pub const DATA_FOLDER_NAME: &str = ".snippy";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Replaces the user's home directory as the root of [`DATA_FOLDER_NAME`].
    #[serde(default)]
    pub home: Option<PathBuf>,

    /// Seconds after which a cached version is considered stale.
    pub cache_ttl_secs: u64,
}

impl Settings {
    /// Builds the settings from the process environment.
    ///
    /// # Errors
    /// * If a `SNIPPY_*` variable cannot be parsed
    pub fn from_env() -> Result<Self> {
        Self::from_source(Environment::with_prefix("SNIPPY").try_parsing(true))
    }

    fn from_source(environment: Environment) -> Result<Self> {
        let settings = Config::builder()
            .set_default("cache_ttl_secs", DEFAULT_CACHE_TTL_SECS)
            .map_err(ConfigError::from)?
            .add_source(environment)
            .build()
            .map_err(ConfigError::from)?;

        settings
            .try_deserialize()
            .map_err(|e| ConfigError::from(e).into())
    }

    /// Directory holding the config file and the version caches.
    ///
    /// # Errors
    /// * If no home directory can be determined
    pub fn data_dir(&self) -> Result<PathBuf> {
        let root = match &self.home {
            Some(home) => home.clone(),
            None => dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?,
        };

        Ok(root.join(DATA_FOLDER_NAME))
    }
}
