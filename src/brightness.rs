//! Region brightness from perceptual luma.

use image::Rgb;

const RED_WEIGHT: f64 = 0.2126;
const GREEN_WEIGHT: f64 = 0.7152;
const BLUE_WEIGHT: f64 = 0.0722;
const MAX_CHANNEL: f64 = 255.0;

/// Luma of one pixel, in [0, 255].
#[inline]
pub fn luminance(pixel: Rgb<u8>) -> f64 {
    let [r, g, b] = pixel.0;
    RED_WEIGHT * r as f64 + GREEN_WEIGHT * g as f64 + BLUE_WEIGHT * b as f64
}

/// Mean luma of a region scaled to [0, 1]. An empty region scores 0.
pub fn region_brightness(pixels: &[Rgb<u8>]) -> f64 {
    if pixels.is_empty() {
        return 0.0;
    }
    let total: f64 = pixels.iter().map(|&p| luminance(p)).sum();
    total / (pixels.len() as f64 * MAX_CHANNEL)
}
