//! Settings file handling.
//!
//! Optional JSON file; any missing field falls back to its default.

use crate::{GlyphtoneError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Font file glyphs are rasterized from
    pub font_path: PathBuf,
    /// CSS font family of the HTML output
    pub font_family: String,
    pub bitmap_size: usize,
    /// Initial characters per row, clamped to the image's bounds
    pub chars_per_row: u32,
    /// Initial character set
    pub charset: String,
    pub html_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font_path: PathBuf::from("assets/DejaVuSansMono.ttf"),
            font_family: "Courier New".to_string(),
            bitmap_size: crate::cache::BITMAP_SIZE,
            chars_per_row: 64,
            charset: ('0'..='9').collect(),
            html_file: PathBuf::from("out.html"),
        }
    }
}

impl Config {
    /// Defaults when `path` is `None`, otherwise the parsed file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                let config = Self::from_json(&content)?;
                log::debug!("loaded config from {}", path.display());
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.bitmap_size == 0 {
            return Err(GlyphtoneError::InvalidConfig(
                "bitmap_size must be positive, got 0".to_string(),
            ));
        }
        if self.chars_per_row == 0 {
            return Err(GlyphtoneError::InvalidConfig(
                "chars_per_row must be positive, got 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn charset_chars(&self) -> Vec<char> {
        self.charset.chars().collect()
    }
}
