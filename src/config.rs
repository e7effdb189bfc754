//! Configuration for the canvas geometry core
//!
//! Defaults describe a US-letter page at 96 units per inch. A TOML file can
//! override any subset of the values:
//!
//! ```toml
//! [canvas]
//! min_block_size = 24.0
//! anchor_tolerance = 0.25
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Width of the US-letter page canvas (8.5in at 96 units per inch)
pub const LETTER_WIDTH: f64 = 816.0;
/// Height of the US-letter page canvas (11in at 96 units per inch)
pub const LETTER_HEIGHT: f64 = 1056.0;

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid config value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Configuration options for layout synthesis, resizing and drift checks
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Page canvas width in layout units
    pub page_width: f64,

    /// Page canvas height in layout units
    pub page_height: f64,

    /// Smallest width or height a resize may produce
    pub min_block_size: f64,

    /// Largest screen-space anchor movement accepted as "not moved"
    pub anchor_tolerance: f64,

    /// Largest rendered bounding-rect movement accepted as "not moved"
    pub rendered_tolerance: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            page_width: LETTER_WIDTH,
            page_height: LETTER_HEIGHT,
            min_block_size: 20.0,
            anchor_tolerance: 0.5,
            rendered_tolerance: 1.0,
        }
    }
}

#[derive(Deserialize)]
struct TomlConfig {
    #[serde(default)]
    canvas: CanvasConfig,
}

impl CanvasConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML string; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        parsed.canvas.validate()?;
        Ok(parsed.canvas)
    }

    /// Set the page canvas size
    pub fn with_page_size(mut self, width: f64, height: f64) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    /// Set the minimum block size
    pub fn with_min_block_size(mut self, size: f64) -> Self {
        self.min_block_size = size;
        self
    }

    /// Set the screen-space anchor tolerance
    pub fn with_anchor_tolerance(mut self, tolerance: f64) -> Self {
        self.anchor_tolerance = tolerance;
        self
    }

    /// Set the rendered bounding-rect tolerance
    pub fn with_rendered_tolerance(mut self, tolerance: f64) -> Self {
        self.rendered_tolerance = tolerance;
        self
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("expected a positive number, got {}", value),
                })
            }
        }

        positive("page_width", self.page_width)?;
        positive("page_height", self.page_height)?;
        positive("min_block_size", self.min_block_size)?;
        positive("anchor_tolerance", self.anchor_tolerance)?;
        positive("rendered_tolerance", self.rendered_tolerance)?;
        Ok(())
    }
}
