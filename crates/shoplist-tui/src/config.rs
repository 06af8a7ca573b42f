//! Configuration file handling.
//!
//! Reads from `~/.config/shoplist/shoplist.toml`

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shoplist_core::store::DEFAULT_KEY;
use shoplist_core::Filter;
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the persisted list and the log file.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Page that share links point at.
    #[serde(default = "default_share_base_url")]
    pub share_base_url: String,
    /// Name of the storage slot for the list.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Filter selected on startup.
    #[serde(default)]
    pub default_filter: Filter,
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("shoplist"))
        .unwrap_or_else(|| PathBuf::from(".shoplist"))
}

fn default_share_base_url() -> String {
    "https://shoplist.local/".to_string()
}

fn default_storage_key() -> String {
    DEFAULT_KEY.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            share_base_url: default_share_base_url(),
            storage_key: default_storage_key(),
            default_filter: Filter::default(),
        }
    }
}

/// Where a loaded configuration came from.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// A default file was written at this path.
    Created(PathBuf),
    /// An existing file was read from this path.
    Loaded(PathBuf),
}

impl Config {
    /// Load configuration from the config file.
    ///
    /// If `custom_path` is provided, load from that path.
    /// Otherwise, load from the default XDG config location.
    /// Creates a default config file if it doesn't exist (only for default path).
    ///
    /// Runs before logging is set up, so the outcome is returned for the
    /// caller to log.
    pub fn load(custom_path: Option<PathBuf>) -> Result<(Self, ConfigSource)> {
        let is_custom = custom_path.is_some();
        let config_path = match custom_path {
            Some(path) => path,
            None => Self::config_path()?,
        };

        if !config_path.exists() {
            if !is_custom {
                let config = Config::default();
                config.save_to(&config_path)?;
                return Ok((config, ConfigSource::Created(config_path)));
            } else {
                anyhow::bail!("Config file not found: {}", config_path.display());
            }
        }

        let config = Self::read_from(&config_path)?;
        Ok((config, ConfigSource::Loaded(config_path)))
    }

    /// Parse the config file at `path`.
    pub fn read_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Write the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Get the path to the config file.
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;

        Ok(config_dir.join("shoplist").join("shoplist.toml"))
    }
}
