//! # Click-to-copy settings
//!
//! The process-wide configuration record read once per render session. Every
//! field has a default so a partial (or absent) TOML file still yields a usable
//! [`Settings`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_START_TOKEN: &str = "[[";
pub const DEFAULT_END_TOKEN: &str = "]]";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Host settings for click-to-copy rendering.
///
/// Keys serialize in camelCase, matching the message payload returned for
/// `getSettings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Decorate spans in the live editor at all.
    pub show_in_editor: bool,
    /// Remove delimiter text from the rendered output instead of styling it.
    pub hide_markdown: bool,
    pub start_token: String,
    pub end_token: String,
    /// Make generic inline code click-to-copy in the editor.
    pub inline_code_editor: bool,
    /// Make generic inline code click-to-copy in rendered markdown.
    pub inline_code_webview: bool,
    /// Hide the backticks around generic inline code in the editor.
    pub hide_code_delimiters: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_in_editor: true,
            hide_markdown: true,
            start_token: DEFAULT_START_TOKEN.to_string(),
            end_token: DEFAULT_END_TOKEN.to_string(),
            inline_code_editor: false,
            inline_code_webview: false,
            hide_code_delimiters: false,
        }
    }
}

impl Settings {
    /// The token pair scanning should use.
    ///
    /// An empty token means the host has not delivered its value yet; the
    /// default pair is used instead of disabling recognition.
    pub fn effective_tokens(&self) -> (&str, &str) {
        if self.start_token.is_empty() || self.end_token.is_empty() {
            (DEFAULT_START_TOKEN, DEFAULT_END_TOKEN)
        } else {
            (self.start_token.as_str(), self.end_token.as_str())
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let settings: Settings =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(settings))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Loads from `config_path`, or the default location, falling back to
    /// defaults when no file exists.
    pub fn load_or_default(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let loaded = match config_path {
            Some(path) => Self::load_from_path(Self::resolve_path(path))?,
            None => Self::load()?,
        };
        Ok(loaded.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(config_path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/click-to-copy");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Where a user-supplied config path points: `~` and environment
    /// variables expanded, or the path as given when expansion fails.
    pub fn resolve_path(path: &Path) -> PathBuf {
        Self::expand_path(path).unwrap_or_else(|| path.to_path_buf())
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
