//! Configuration Store
//!
//! Reads and writes the [`ConfigDocument`] at `~/.snippy/config.json`.
//!
//! A missing file is not an error: the default document is written and
//! returned. A file that exists but cannot be read or parsed is reported and
//! left untouched so the user can recover it.

use std::{fs, io, path::PathBuf};

use crate::errors::{ConfigError, Result};

use super::{document::ConfigDocument, settings::Settings};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Persistence of the configuration document.
#[cfg_attr(test, mockall::automock)]
pub trait DocumentStore {
    /// Loads the document, writing the defaults on first run.
    ///
    /// # Errors
    /// * If the file exists but cannot be read or parsed
    /// * If the defaults cannot be written
    fn load(&self) -> Result<ConfigDocument>;

    /// Overwrites the stored document.
    ///
    /// # Errors
    /// * If the document cannot be serialized or written
    fn save(&self, doc: &ConfigDocument) -> Result<()>;

    /// Overwrites the stored document with the defaults and returns them.
    ///
    /// # Errors
    /// * If the defaults cannot be written
    fn reset(&self) -> Result<ConfigDocument> {
        let doc = ConfigDocument::default();
        self.save(&doc)?;
        Ok(doc)
    }
}

/// JSON file backed [`DocumentStore`].
#[derive(Debug, Clone)]
pub struct ConfigStore {
    root: PathBuf,
}

impl ConfigStore {
    /// Creates a store rooted at the data directory from `settings`.
    ///
    /// # Errors
    /// * If no home directory can be determined
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            root: settings.data_dir()?,
        })
    }

    /// Creates a store whose files live directly under `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the path to the configuration file
    #[must_use]
    pub fn config_file_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE_NAME)
    }
}

impl DocumentStore for ConfigStore {
    fn load(&self) -> Result<ConfigDocument> {
        let path = self.config_file_path();

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("No configuration at {}, writing defaults", path.display());

                let doc = ConfigDocument::default();
                self.save(&doc)?;
                return Ok(doc);
            }
            Err(e) => return Err(ConfigError::IoError(e).into()),
        };

        serde_json::from_str(&content).map_err(|source| ConfigError::Corrupt { path, source }.into())
    }

    fn save(&self, doc: &ConfigDocument) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(ConfigError::IoError)?;
        }

        let path = self.config_file_path();
        let content = to_pretty_json(doc)?;

        fs::write(&path, content).map_err(ConfigError::IoError)?;
        log::debug!("Configuration saved to {}", path.display());

        Ok(())
    }
}

/// Serializes with a 4-space indent.
fn to_pretty_json(doc: &ConfigDocument) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);

    serde::Serialize::serialize(doc, &mut serializer).map_err(ConfigError::Serialize)?;

    String::from_utf8(buffer).map_err(|e| ConfigError::IoError(io::Error::other(e)).into())
}
