//! Render configuration
//!
//! Stored as RON so it can be edited by hand, e.g.
//!
//! ```ron
//! (width: 64, height: 64, background: (r: 0.0, g: 0.0, b: 0.0), scale: 8, output: "out.png")
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::rasterizer::{Color, HEIGHT, WIDTH};

/// Error type for config loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
    ZeroSize,
    TooLarge { width: usize, height: usize },
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl From<ron::Error> for ConfigError {
    fn from(e: ron::Error) -> Self {
        ConfigError::SerializeError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            ConfigError::ZeroSize => write!(f, "Canvas width and height must be non-zero"),
            ConfigError::TooLarge { width, height } => write!(
                f,
                "Canvas {}x{} exceeds the {}x{} limit",
                width, height, MAX_DIMENSION, MAX_DIMENSION
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Largest canvas side; the preview texture stores dimensions as u16
pub const MAX_DIMENSION: usize = u16::MAX as usize;

/// Canvas and output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    /// Color the canvas is cleared to before drawing
    pub background: Color,
    /// Integer zoom for the preview window
    pub scale: u32,
    /// PNG written after rendering
    pub output: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            background: Color::BLACK,
            scale: 8,
            output: PathBuf::from("out.png"),
        }
    }
}

impl RenderConfig {
    /// Load from a RON file; missing fields take their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        let config: RenderConfig = ron::from_str(s)?;
        if config.width == 0 || config.height == 0 {
            return Err(ConfigError::ZeroSize);
        }
        if config.width > MAX_DIMENSION || config.height > MAX_DIMENSION {
            return Err(ConfigError::TooLarge {
                width: config.width,
                height: config.height,
            });
        }
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::new())?;
        fs::write(path, contents)?;
        Ok(())
    }
}
