//! Per-character glyph coverage, computed once and kept for the life of the cache.

use crate::glyph::GlyphRasterizer;
use std::collections::HashMap;

/// Side of the square bitmap glyphs are rendered into.
pub const BITMAP_SIZE: usize = 16;

/// Raw brightness of every character ever requested, for one rasterizer
/// (font) and bitmap size. Entries are never evicted or overwritten.
pub struct GlyphBrightnessCache<R> {
    rasterizer: R,
    bitmap_size: usize,
    brightness: HashMap<char, f64>,
}

impl<R: GlyphRasterizer> GlyphBrightnessCache<R> {
    pub fn new(rasterizer: R) -> Self {
        Self { rasterizer, bitmap_size: BITMAP_SIZE, brightness: HashMap::new() }
    }

    /// Change the bitmap size; entries measured at the old size are dropped.
    pub fn with_bitmap_size(mut self, bitmap_size: usize) -> Self {
        self.bitmap_size = bitmap_size;
        self.brightness.clear();
        self
    }

    pub fn bitmap_size(&self) -> usize {
        self.bitmap_size
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    /// Characters of `chars` with no cached brightness, first occurrence order.
    pub fn missing(&self, chars: &[char]) -> Vec<char> {
        let mut missing: Vec<char> = Vec::new();
        for &ch in chars {
            if !self.brightness.contains_key(&ch) && !missing.contains(&ch) {
                missing.push(ch);
            }
        }
        missing
    }

    /// Rasterize and store every character not yet cached.
    pub fn ensure_known(&mut self, chars: &[char]) {
        for ch in self.missing(chars) {
            let bitmap = self.rasterizer.rasterize(ch, self.bitmap_size);
            let value = bitmap.coverage();
            log::debug!(
                "cached glyph {:?}: {} ink pixels, brightness {:.4}",
                ch,
                bitmap.ink_count(),
                value
            );
            self.brightness.insert(ch, value);
        }
    }

    pub fn brightness_of(&self, ch: char) -> Option<f64> {
        self.brightness.get(&ch).copied()
    }

    pub fn contains(&self, ch: char) -> bool {
        self.brightness.contains_key(&ch)
    }

    pub fn len(&self) -> usize {
        self.brightness.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brightness.is_empty()
    }
}
