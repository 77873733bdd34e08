//! Configuration management.

use crate::output::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Discovery patterns; replaces the built-in defaults when present
    #[serde(default = "default_patterns")]
    pub patterns: Vec<String>,

    /// Skip devices whose root cannot be walked instead of failing
    #[serde(default)]
    pub skip_inaccessible: bool,

    /// Default output format for `hwsense scan`
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_patterns() -> Vec<String> {
    hwsense::DEFAULT_PATTERNS
        .iter()
        .map(|p| p.to_string())
        .collect()
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read configuration file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse configuration")?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            patterns: default_patterns(),
            skip_inaccessible: false,
            format: OutputFormat::default(),
        }
    }
}
