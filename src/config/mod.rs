//! Settings file for gh-bootstrap.
//!
//! Settings are optional. A missing file means defaults; a present file
//! may set any subset of keys.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory under the user config dir that holds our settings.
pub const APP_DIR: &str = "gh-bootstrap";
/// Settings file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Programs used for the two external collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// git program name or path.
    pub git: String,
    /// gh program name or path.
    pub gh: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            git: "git".to_string(),
            gh: "gh".to_string(),
        }
    }
}

/// Browser behaviour after the repository is published.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Whether to open the repository page at all.
    pub open: bool,
    /// Opener program; the platform default when unset.
    pub command: Option<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            open: true,
            command: None,
        }
    }
}

/// Root settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// External programs.
    pub tools: ToolsConfig,
    /// Browser settings.
    pub browser: BrowserConfig,
}

/// Error type for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error reading the settings file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Error parsing the settings TOML.
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

impl Settings {
    /// Default settings path, e.g. `~/.config/gh-bootstrap/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE_NAME))
    }

    /// Load settings from `path`, or the default path when `None`.
    ///
    /// A file that does not exist yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path.map(PathBuf::from).or_else(Self::default_path) {
            Some(p) => p,
            None => return Ok(Self::default()),
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)?;
        Self::parse(&contents)
    }

    /// Parse settings from TOML text.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }
}
