//! Glyph rasterization into square ink bitmaps.

use crate::{GlyphtoneError, Result};
use fontdue::{Font, FontSettings};
use std::path::Path;

// Coverage at or above this counts as ink
const INK_THRESHOLD: u8 = 128;

/// Square boolean bitmap, `true` marks an ink pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBitmap {
    size: usize,
    ink: Vec<bool>,
}

impl GlyphBitmap {
    pub fn blank(size: usize) -> Self {
        Self { size, ink: vec![false; size * size] }
    }

    /// Build from row-major ink values; `ink.len()` must be `size * size`.
    pub fn from_ink(size: usize, ink: Vec<bool>) -> Option<Self> {
        (ink.len() == size * size).then_some(Self { size, ink })
    }

    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        self.ink[y * self.size + x] = value;
    }

    pub fn ink_count(&self) -> usize {
        self.ink.iter().filter(|&&on| on).count()
    }

    /// Fraction of ink pixels, in [0, 1].
    pub fn coverage(&self) -> f64 {
        if self.ink.is_empty() {
            return 0.0;
        }
        self.ink_count() as f64 / self.ink.len() as f64
    }
}

/// Renders a character into a `size × size` ink bitmap.
pub trait GlyphRasterizer {
    fn rasterize(&self, ch: char, size: usize) -> GlyphBitmap;
}

/// Rasterizer backed by a TrueType/OpenType font.
pub struct FontRasterizer {
    font: Font,
}

impl FontRasterizer {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(data)
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| GlyphtoneError::Font(e.to_string()))?;
        Ok(Self { font })
    }
}

impl GlyphRasterizer for FontRasterizer {
    fn rasterize(&self, ch: char, size: usize) -> GlyphBitmap {
        let mut bitmap = GlyphBitmap::blank(size);
        let font_size = size as f32 * 0.875; // ~87.5% to fit with baseline

        let (metrics, coverage) = self.font.rasterize(ch, font_size);
        if metrics.width == 0 || metrics.height == 0 {
            return bitmap;
        }

        // Baseline at ~75% down
        let side = size as i32;
        let baseline_y = (size as f32 * 0.75) as i32;
        let y_offset = baseline_y - metrics.height as i32 - metrics.ymin;

        // Center horizontally
        let x_offset = (side - metrics.width as i32) / 2;

        for sy in 0..metrics.height {
            for sx in 0..metrics.width {
                let tx = x_offset + sx as i32;
                let ty = y_offset + sy as i32;
                if tx >= 0 && tx < side && ty >= 0 && ty < side {
                    let ink = coverage[sy * metrics.width + sx] >= INK_THRESHOLD;
                    bitmap.set(tx as usize, ty as usize, ink);
                }
            }
        }

        bitmap
    }
}
