//! Configuration management
//!
//! This module handles loading and validating the backup configuration file.
//! The configuration file is stored in TOML format at
//! ~/.config/gcs-backup/config.toml.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default store endpoint (GCS interoperability API)
const DEFAULT_ENDPOINT: &str = "https://storage.googleapis.com";

/// Default signing region
const DEFAULT_REGION: &str = "auto";

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Destination bucket name
    #[serde(default)]
    pub bucket: String,

    /// Remote namespace prefix for this machine's files
    #[serde(default)]
    pub machine_alias: String,

    /// Path specs to back up, relative to the home directory
    #[serde(default)]
    pub paths: Vec<String>,

    /// JSON file holding the HMAC interoperability key
    ///
    /// When unset, the SDK's default credential chain applies.
    #[serde(default)]
    pub credentials_file: Option<PathBuf>,

    /// Store endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Signing region
    #[serde(default = "default_region")]
    pub region: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

impl Config {
    /// Validate a loaded configuration
    ///
    /// Missing keys deserialize to empty values, so required fields are
    /// enforced here rather than by serde.
    pub fn validate(&self) -> Result<()> {
        if self.bucket.is_empty() {
            return Err(Error::Config("bucket name has not been configured".into()));
        }
        if self.machine_alias.is_empty() {
            return Err(Error::Config("machine alias has not been configured".into()));
        }
        if let Some(path) = &self.credentials_file {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "credentials file [{}] does not exist",
                    path.display()
                )));
            }
        }
        url::Url::parse(&self.endpoint).map_err(|e| {
            Error::Config(format!("invalid endpoint [{}]: {e}", self.endpoint))
        })?;
        Ok(())
    }
}

/// Configuration manager handles locating and loading config
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the default config path
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".into()))?;
        let config_path = config_dir.join("gcs-backup").join("config.toml");
        Ok(Self { config_path })
    }

    /// Create a ConfigManager with a custom path (useful for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load and validate configuration from disk
    ///
    /// A missing configuration file is an error: the tool has no sensible
    /// defaults for the bucket or machine alias.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            return Err(Error::Config(format!(
                "configuration file [{}] does not exist",
                self.config_path.display()
            )));
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }
}
