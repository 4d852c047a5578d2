//! Run configuration.
//!
//! Settings are layered: stock defaults, then an optional `config.toml`
//! passed with `--config`, then command-line flags. The result is a
//! [`ResizeConfig`] that stays fixed for the whole batch run.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! width = 500            # Max cover width in pixels
//! height = 500           # Max cover height in pixels
//! quality = 90           # Encoding quality (0-100, clamped)
//! recursive = false      # Descend into subdirectories
//! filter = "*.mp3"       # Glob matched against file names
//!
//! [cover]
//! override_from_file = false   # Replace embedded covers with a file on disk
//! file_name = "cover.jpg"      # Looked up next to each audio file
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::Quality;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
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

/// Settings for one batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeConfig {
    /// Bounding box width in pixels.
    pub width: u32,
    /// Bounding box height in pixels.
    pub height: u32,
    pub quality: Quality,
    /// Also process files in subdirectories.
    pub recursive: bool,
    /// Shell-style glob matched against file names.
    pub filter: String,
    pub cover: CoverConfig,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            quality: Quality::default(),
            recursive: false,
            filter: "*.mp3".to_string(),
            cover: CoverConfig::default(),
        }
    }
}

impl ResizeConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Validation(
                "width and height must be greater than 0".into(),
            ));
        }
        if let Err(e) = glob::Pattern::new(&self.filter) {
            return Err(ConfigError::Validation(format!(
                "filter '{}' is not a valid glob: {e}",
                self.filter
            )));
        }
        let name = self.cover.file_name.as_str();
        if name.is_empty() || name.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "cover.file_name must be a plain file name".into(),
            ));
        }
        Ok(())
    }
}

/// Cover override settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoverConfig {
    /// Replace the embedded pictures with an image file found next to the audio file.
    pub override_from_file: bool,
    /// Name of that image file.
    pub file_name: String,
}

impl Default for CoverConfig {
    fn default() -> Self {
        Self {
            override_from_file: false,
            file_name: "cover.jpg".to_string(),
        }
    }
}

/// Load config from a TOML file, or stock defaults when no path is given.
///
/// A path that is given but missing is an error: the user asked for it.
pub fn load_config(path: Option<&Path>) -> Result<ResizeConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => ResizeConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

/// A documented config file with every option at its default.
pub fn stock_config_toml() -> &'static str {
    r#"# mp3-cover-resizer configuration
# All options are optional. Command-line flags override these values.

# Bounding box for resized covers, in pixels. Covers are scaled to fit
# inside it with their aspect ratio preserved.
width = 500
height = 500

# Encoding quality, 0-100. Values outside the range are clamped.
# JPEG uses it directly; PNG maps it to a compression effort tier.
quality = 90

# Also process files in subdirectories.
recursive = false

# Glob matched (case-insensitively) against file names.
filter = "*.mp3"

[cover]
# Replace all embedded pictures with an image file that sits next to
# the audio file, then resize it like any other cover.
override_from_file = false
file_name = "cover.jpg"
"#
}
