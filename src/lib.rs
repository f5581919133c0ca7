//! Image to ASCII art converter matching glyph ink density to region brightness.

pub mod brightness;
pub mod cache;
pub mod chunk;
pub mod config;
pub mod glyph;
pub mod grid;
pub mod image_store;
pub mod matcher;
pub mod normalize;
pub mod output;
pub mod shell;

pub use cache::GlyphBrightnessCache;
pub use chunk::ImageChunker;
pub use glyph::{FontRasterizer, GlyphRasterizer};
pub use grid::AsciiGrid;
pub use image_store::PaddedImage;
pub use normalize::BrightnessScale;

use rayon::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GlyphtoneError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Font error: {0}")]
    Font(String),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("No characters available")]
    EmptyCharset,
    #[error("No brightness known for character {0:?}")]
    UnknownCharacter(char),
    #[error("Image dimension {0} is too large to pad to a power of two")]
    DimensionTooLarge(u32),
    #[error("{chars_per_row} characters per row does not tile a {width}x{height} image")]
    Resolution { chars_per_row: u32, width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, GlyphtoneError>;

/// Side of the square cell each output character covers.
///
/// Fails unless `chars_per_row` divides the width and the resulting cell
/// size divides the height.
pub fn validate_resolution(width: u32, height: u32, chars_per_row: u32) -> Result<u32> {
    let invalid = GlyphtoneError::Resolution { chars_per_row, width, height };
    if chars_per_row == 0 || chars_per_row > width || width % chars_per_row != 0 {
        return Err(invalid);
    }
    let size = width / chars_per_row;
    if height % size != 0 {
        return Err(invalid);
    }
    Ok(size)
}

/// Main converter; owns the glyph brightness cache for one font.
pub struct Converter<R> {
    cache: GlyphBrightnessCache<R>,
}

impl<R: GlyphRasterizer> Converter<R> {
    pub fn new(rasterizer: R) -> Self {
        Self { cache: GlyphBrightnessCache::new(rasterizer) }
    }

    pub fn with_bitmap_size(mut self, bitmap_size: usize) -> Self {
        self.cache = self.cache.with_bitmap_size(bitmap_size);
        self
    }

    pub fn cache(&self) -> &GlyphBrightnessCache<R> {
        &self.cache
    }

    /// Build a `rows × chars_per_row` grid for `image` using `charset`.
    pub fn convert(
        &mut self,
        image: &PaddedImage,
        chars_per_row: u32,
        charset: &[char],
    ) -> Result<AsciiGrid> {
        if charset.is_empty() {
            return Err(GlyphtoneError::EmptyCharset);
        }
        if self.cache.bitmap_size() == 0 {
            return Err(GlyphtoneError::InvalidConfig(
                "bitmap_size must be positive".to_string(),
            ));
        }
        let size = validate_resolution(image.width(), image.height(), chars_per_row)?;

        let missing = self.cache.missing(charset);
        if !missing.is_empty() {
            log::debug!("rasterizing {} new glyphs", missing.len());
            self.cache.ensure_known(&missing);
        }
        let scale = BrightnessScale::build(&self.cache, charset)?;

        let chunker = ImageChunker::new(image, size)?;
        log::info!(
            "rendering {}x{} image as {}x{} characters ({} px cells, {} distinct levels)",
            image.width(),
            image.height(),
            chunker.cols(),
            chunker.rows(),
            size,
            scale.len()
        );

        let cells = chunker
            .chunks()
            .par_iter()
            .map(|region| scale.nearest(brightness::region_brightness(region)))
            .collect::<Option<Vec<char>>>()
            .ok_or(GlyphtoneError::EmptyCharset)?;

        AsciiGrid::from_cells(chars_per_row as usize, cells).ok_or(GlyphtoneError::Resolution {
            chars_per_row,
            width: image.width(),
            height: image.height(),
        })
    }
}
