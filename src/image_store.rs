//! Power-of-two image store - pads a decoded image so both sides are powers of two.

use crate::{GlyphtoneError, Result};
use image::{DynamicImage, Rgb, RgbImage};
use std::path::Path;

/// Color of every padding pixel.
pub const FILL_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// Padded size for one original dimension.
///
/// A dimension that is already a power of two moves up to the next one, so
/// `1 -> 2`, `64 -> 128`, while `100 -> 128`.
pub fn padded_dimension(d: u32) -> Result<u32> {
    let padded = if d.is_power_of_two() {
        d.checked_mul(2)
    } else {
        d.checked_next_power_of_two()
    };
    padded.ok_or(GlyphtoneError::DimensionTooLarge(d))
}

/// Immutable image whose width and height are powers of two, with the
/// original content centered on a white border.
#[derive(Debug, Clone)]
pub struct PaddedImage {
    pixels: RgbImage,
}

impl PaddedImage {
    /// Decode an image file and pad it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let image = image::open(path.as_ref())?;
        Self::from_dynamic(&image)
    }

    pub fn from_dynamic(image: &DynamicImage) -> Result<Self> {
        Self::from_rgb(&image.to_rgb8())
    }

    pub fn from_rgb(original: &RgbImage) -> Result<Self> {
        let (orig_w, orig_h) = original.dimensions();
        let width = padded_dimension(orig_w)?;
        let height = padded_dimension(orig_h)?;

        // Odd differences leave the extra pixel on the right / bottom
        let pad_x = (width - orig_w) / 2;
        let pad_y = (height - orig_h) / 2;

        let pixels = RgbImage::from_fn(width, height, |x, y| {
            let inside = x >= pad_x && x < pad_x + orig_w && y >= pad_y && y < pad_y + orig_h;
            if inside {
                *original.get_pixel(x - pad_x, y - pad_y)
            } else {
                FILL_COLOR
            }
        });

        log::debug!("padded {}x{} image to {}x{}", orig_w, orig_h, width, height);
        Ok(Self { pixels })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Pixel at column `x`, row `y`.
    pub fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        *self.pixels.get_pixel(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_dimension_exact_power_moves_up() {
        assert_eq!(padded_dimension(1).unwrap(), 2);
        assert_eq!(padded_dimension(2).unwrap(), 4);
        assert_eq!(padded_dimension(64).unwrap(), 128);
    }

    #[test]
    fn test_padded_dimension_rounds_up() {
        assert_eq!(padded_dimension(3).unwrap(), 4);
        assert_eq!(padded_dimension(100).unwrap(), 128);
        assert_eq!(padded_dimension(129).unwrap(), 256);
    }

    #[test]
    fn test_padded_dimension_properties() {
        for d in 1..=5000u32 {
            let p = padded_dimension(d).unwrap();
            assert!(p.is_power_of_two());
            if d.is_power_of_two() {
                assert!(p > d);
            } else {
                assert!(p >= d);
                assert!(p / 2 < d);
            }
        }
    }

    #[test]
    fn test_padded_dimension_overflow() {
        assert!(matches!(
            padded_dimension(1 << 31),
            Err(GlyphtoneError::DimensionTooLarge(_))
        ));
        assert!(padded_dimension(u32::MAX).is_err());
    }

    #[test]
    fn test_padding_centers_original() {
        let original = RgbImage::from_fn(5, 3, |x, y| Rgb([x as u8 * 10, y as u8 * 10, 7]));
        let padded = PaddedImage::from_rgb(&original).unwrap();
        assert_eq!((padded.width(), padded.height()), (8, 4));

        let (pad_x, pad_y) = ((8 - 5) / 2, (4 - 3) / 2);
        for y in 0..padded.height() {
            for x in 0..padded.width() {
                let inside = x >= pad_x && x < pad_x + 5 && y >= pad_y && y < pad_y + 3;
                let expected = if inside {
                    *original.get_pixel(x - pad_x, y - pad_y)
                } else {
                    FILL_COLOR
                };
                assert_eq!(padded.pixel(x, y), expected, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_single_pixel_image() {
        let original = RgbImage::from_pixel(1, 1, Rgb([0, 0, 0]));
        let padded = PaddedImage::from_rgb(&original).unwrap();
        assert_eq!((padded.width(), padded.height()), (2, 2));
        // (2 - 1) / 2 == 0, so the original lands top-left
        assert_eq!(padded.pixel(0, 0), Rgb([0, 0, 0]));
        assert_eq!(padded.pixel(1, 1), FILL_COLOR);
    }
}
