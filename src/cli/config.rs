//! TOML configuration file support.
//!
//! Instead of passing flags on every run, settings can live in a config file:
//!
//! ```toml
//! # ecucsv.toml
//! [conversion]
//! profile = "max-compression"
//! compression_level = 7
//! buffer_size = 262144
//! parallel = true
//! ```
//!
//! Command-line flags override the file, the file overrides the profile.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Root configuration structure for ecucsv.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Conversion-specific settings.
    #[serde(default)]
    pub conversion: ConversionConfig,
}

/// Configuration for the csv, compress and decompress commands.
#[derive(Debug, Default, Deserialize)]
pub struct ConversionConfig {
    /// Named profile supplying the defaults (fast, balanced, max-compression).
    pub profile: Option<String>,

    /// DEFLATE compression level (0-9).
    pub compression_level: Option<u32>,

    /// Read buffer size for ECU documents, in bytes.
    pub buffer_size: Option<usize>,

    /// Convert files of a batch in parallel (requires the parallel feature).
    pub parallel: Option<bool>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}
