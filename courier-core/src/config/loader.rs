//! Configuration loader
//!
//! Converter settings are plain serde structs, so the same file may be
//! written as JSON or TOML. The extension decides which.

use crate::config::CourierConfig;
use crate::error::{Error, Result};
use std::path::Path;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from a file extension, ignoring case
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "json" => Ok(ConfigFormat::Json),
            "toml" => Ok(ConfigFormat::Toml),
            _ => Err(Error::Config(format!(
                "Unknown config format for {}: expected .json or .toml",
                path.display()
            ))),
        }
    }
}

/// Loads [`CourierConfig`] from disk
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a file.
    ///
    /// The format is checked before the file is read; read failures surface
    /// as [`Error::Io`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<CourierConfig> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        tracing::debug!("Loading {:?} configuration from {}", format, path.display());
        Self::parse(&content, format)
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<CourierConfig> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(CourierConfig::default()),
        }
    }

    /// Parse configuration text in the given format
    pub fn parse(content: &str, format: ConfigFormat) -> Result<CourierConfig> {
        match format {
            ConfigFormat::Json => serde_json::from_str(content)
                .map_err(|e| Error::Config(format!("Invalid JSON: {}", e))),
            ConfigFormat::Toml => toml::from_str(content)
                .map_err(|e| Error::Config(format!("Invalid TOML: {}", e))),
        }
    }
}
