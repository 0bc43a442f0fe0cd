//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/orgtree/orgtree.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `ORGTREE_*` prefix

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::render::OutputFormat;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("environment override: {0}")]
    Env(String),
}

impl From<config::ConfigError> for SettingsError {
    fn from(e: config::ConfigError) -> Self {
        SettingsError::Env(e.to_string())
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified, inherit").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub format: Option<OutputFormat>,
    pub indent: Option<String>,
    pub color: Option<bool>,
}

/// Unified configuration for orgtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Output format for describe results
    pub format: OutputFormat,
    /// Indentation unit per depth level in text output
    pub indent: String,
    /// Colored headings and errors
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            indent: "\t".into(),
            color: true,
        }
    }
}

/// Get the XDG config directory for orgtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "orgtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("orgtree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|e| SettingsError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            format: overlay.format.unwrap_or(self.format),
            indent: overlay
                .indent
                .clone()
                .unwrap_or_else(|| self.indent.clone()),
            color: overlay.color.unwrap_or(self.color),
        }
    }

    /// Load settings with layered precedence, using the XDG global config.
    ///
    /// `explicit` must exist when given; the global file is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        Self::load_from(global_config_path().as_deref(), explicit)
    }

    /// Same as [`Settings::load`] with the global config location spelled out.
    pub fn load_from(global: Option<&Path>, explicit: Option<&Path>) -> Result<Self, SettingsError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config, if present
        if let Some(global_path) = global {
            if global_path.exists() {
                debug!("loading global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        // 3. Explicit config file
        if let Some(path) = explicit {
            debug!("loading config {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables
        Self::apply_env_overrides(current)
    }

    /// Apply ORGTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, SettingsError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("ORGTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        if let Ok(val) = config.get_string("format") {
            settings.format = OutputFormat::from_str(&val, true)
                .map_err(|_| SettingsError::Env(format!("unknown format '{}'", val)))?;
        }
        if let Ok(val) = config.get_string("indent") {
            settings.indent = val;
        }
        if let Ok(raw) = config.get_string("color") {
            settings.color = config
                .get_bool("color")
                .map_err(|_| SettingsError::Env(format!("invalid color '{}'", raw)))?;
        }

        Ok(settings)
    }

    /// Serialize the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
