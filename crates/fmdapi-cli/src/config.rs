//! Configuration management for the CLI
//!
//! This module handles loading and merging configuration from:
//! - Default values
//! - Configuration files (YAML/JSON)
//! - Environment variables
//! - Command-line arguments

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use clap::ValueEnum;
use fmdapi_core::Operation;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Parameter shaping defaults
    pub shaping: ShapingConfig,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format (human, json, json-pretty, yaml)
    pub format: String,

    /// Use colored output by default
    pub color: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: Option<String>,

    /// Log format (compact, json)
    pub format: String,
}

/// Defaults applied by `prepare` and `decode`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapingConfig {
    /// Operation whose preset allow-list `prepare` uses when none is given
    pub operation: Option<Operation>,

    /// Keys or wildcard sentinels always added to the allow-list
    pub allow: Vec<String>,

    /// Force control key namespacing on or off
    pub namespace: Option<bool>,

    /// Fail `decode` when the envelope reports a non-zero message code
    pub check_messages: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
            color: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: None,
            format: "compact".to_string(),
        }
    }
}

impl Default for ShapingConfig {
    fn default() -> Self {
        Self {
            operation: None,
            allow: Vec::new(),
            namespace: None,
            check_messages: true,
        }
    }
}

impl OutputConfig {
    /// Resolve the configured output format
    pub fn output_format(&self) -> Result<OutputFormat> {
        OutputFormat::from_str(&self.format, true)
            .map_err(|_| Error::config(format!("unknown output format '{}'", self.format)))
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let config = if is_yaml(path) {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };

        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => {
                        tracing::debug!(path = %path.display(), "Loaded configuration");
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                    }
                }
            }
        }

        // Return default config if no config file found
        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        match file {
            Some(path) if !path.exists() => Err(Error::FileNotFound {
                path: path.to_path_buf(),
            }),
            Some(path) => Self::from_file(path),
            None => Self::load(),
        }
    }

    /// Get default configuration file paths to check
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".fmdapi.yaml"),
            PathBuf::from(".fmdapi.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let fmdapi_dir = config_dir.join("fmdapi");
            paths.push(fmdapi_dir.join("config.yaml"));
            paths.push(fmdapi_dir.join("config.json"));
        }

        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".fmdapi.yaml"));
            paths.push(home_dir.join(".fmdapi.json"));
        }

        paths
    }

    /// The user-level config file written by `config init`
    pub fn user_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("fmdapi").join("config.yaml"))
            .ok_or_else(|| Error::config("could not determine the user config directory"))
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_yaml(path) {
            serde_yaml::to_string(self)?
        } else {
            serde_json::to_string_pretty(self)?
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false)
}
