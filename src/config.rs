use crate::{CallMapError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".callmap.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunConfig {
    /// Keep unmapped calls away from original implementations
    #[serde(default)]
    pub prevent_parent_calls: Option<bool>,
    /// Default verbosity level (0-3)
    #[serde(default)]
    pub verbosity: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Default output format ("text" or "json")
    #[serde(default)]
    pub format: Option<String>,
    /// Print the invocation ledger after a run
    #[serde(default)]
    pub show_ledger: Option<bool>,
}

impl Config {
    /// Load configuration from a file in the working directory
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            CallMapError::FileError(format!(
                "Failed to read config file {:?}: {}",
                config_path, e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            CallMapError::FileError(format!(
                "Failed to parse TOML config from {:?}: {}",
                config_path, e
            ))
        })?;

        Ok(config)
    }
}
