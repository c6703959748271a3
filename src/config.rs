//! Configuration module.
//!
//! Handles loading and validating `config.toml`. Every key is optional; a
//! user `config.toml` overrides just the keys it names.
//! Command-line flags for the two directories are applied on top by the
//! binary.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [paths]
//! upload_dir = "uploads"    # Where source images are read from
//! output_dir = "static"     # Where results are written
//!
//! [encoding]
//! jpeg_quality = 95         # JPEG quality (1-100)
//!
//! [duotone]
//! color_a = [255, 0, 0]     # Color for bright pixels
//! color_b = [0, 255, 255]   # Color for black pixels
//!
//! [monochrome]
//! hue = 128                 # Constant written to the first channel
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{DuotoneParams, MonochromeParams, Quality, Rgb8, TransformParams};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Input and output directories.
    pub paths: PathsConfig,
    /// Encoder settings.
    pub encoding: EncodingConfig,
    /// Duotone blend colors.
    pub duotone: DuotoneConfig,
    /// Monochrome tint settings.
    pub monochrome: MonochromeConfig,
}

impl Config {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.encoding.jpeg_quality) {
            return Err(ConfigError::Validation(
                "encoding.jpeg_quality must be 1-100".into(),
            ));
        }
        if self.paths.upload_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "paths.upload_dir must not be empty".into(),
            ));
        }
        if self.paths.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "paths.output_dir must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Transform parameters described by this config.
    pub fn transform_params(&self) -> TransformParams {
        TransformParams {
            duotone: DuotoneParams {
                color_a: self.duotone.color_a,
                color_b: self.duotone.color_b,
            },
            monochrome: MonochromeParams {
                hue: self.monochrome.hue,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Directory holding uploaded source images.
    pub upload_dir: PathBuf,
    /// Publicly served directory results are written to.
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            output_dir: PathBuf::from("static"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodingConfig {
    /// JPEG encoding quality (1 = worst, 100 = best).
    pub jpeg_quality: u32,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: u32::from(Quality::default().value()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DuotoneConfig {
    pub color_a: Rgb8,
    pub color_b: Rgb8,
}

impl Default for DuotoneConfig {
    fn default() -> Self {
        let stock = DuotoneParams::default();
        Self {
            color_a: stock.color_a,
            color_b: stock.color_b,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MonochromeConfig {
    pub hue: u8,
}

impl Default for MonochromeConfig {
    fn default() -> Self {
        Self {
            hue: MonochromeParams::default().hue,
        }
    }
}

// =============================================================================
// Config loading
// =============================================================================

/// Load config from `config.toml` in the given directory.
///
/// A missing file yields the stock defaults. Keys the file leaves out keep
/// their defaults through `#[serde(default)]`.
pub fn load_config(dir: &Path) -> Result<Config, ConfigError> {
    let config_path = dir.join("config.toml");
    let config: Config = if config_path.exists() {
        let content = fs::read_to_string(&config_path)?;
        toml::from_str(&content)?
    } else {
        Config::default()
    };
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Pixelcraft Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Directories
# ---------------------------------------------------------------------------
[paths]
# Uploaded source images are read from here.
upload_dir = "uploads"

# Results are written here. Existing files with the same name are replaced.
output_dir = "static"

# ---------------------------------------------------------------------------
# Encoding
# ---------------------------------------------------------------------------
[encoding]
# JPEG quality (1 = worst, 100 = best). PNG and WebP output is lossless.
jpeg_quality = 95

# ---------------------------------------------------------------------------
# Duotone
# ---------------------------------------------------------------------------
[duotone]
# Each output channel is gray * color_a + (1 - gray) * color_b, with gray
# in 0-255. Black becomes color_b; anything brighter is pushed to color_a.
color_a = [255, 0, 0]
color_b = [0, 255, 255]

# ---------------------------------------------------------------------------
# Monochrome
# ---------------------------------------------------------------------------
[monochrome]
# Value written to the first channel; the other two carry the gray level.
hue = 128
"##
}
