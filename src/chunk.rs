//! Image chunking - splits a padded image into square sub-regions, one per output character.

use crate::image_store::PaddedImage;
use crate::{GlyphtoneError, Result};
use image::Rgb;

/// Pixels of one square cell, row-major.
pub type SubRegion = Vec<Rgb<u8>>;

pub struct ImageChunker<'a> {
    image: &'a PaddedImage,
    size: u32,
}

impl<'a> ImageChunker<'a> {
    /// `size` must divide both image dimensions.
    pub fn new(image: &'a PaddedImage, size: u32) -> Result<Self> {
        let (width, height) = (image.width(), image.height());
        if size == 0 || width % size != 0 || height % size != 0 {
            return Err(GlyphtoneError::Resolution {
                chars_per_row: if size == 0 { 0 } else { width / size },
                width,
                height,
            });
        }
        Ok(Self { image, size })
    }

    pub fn cols(&self) -> u32 {
        self.image.width() / self.size
    }

    pub fn rows(&self) -> u32 {
        self.image.height() / self.size
    }

    /// Extract chunk at (col, row)
    pub fn get_chunk(&self, col: u32, row: u32) -> SubRegion {
        let (x0, y0) = (col * self.size, row * self.size);
        let mut region = Vec::with_capacity((self.size * self.size) as usize);
        for y in y0..y0 + self.size {
            for x in x0..x0 + self.size {
                region.push(self.image.pixel(x, y));
            }
        }
        region
    }

    /// Every chunk, row-major over the grid.
    pub fn chunks(&self) -> Vec<SubRegion> {
        let mut regions = Vec::with_capacity((self.cols() * self.rows()) as usize);
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                regions.push(self.get_chunk(col, row));
            }
        }
        regions
    }
}

pub fn partition(image: &PaddedImage, size: u32) -> Result<Vec<SubRegion>> {
    Ok(ImageChunker::new(image, size)?.chunks())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    /// 7x3 original pads to 8x4; every pixel encodes its own coordinates.
    fn coordinate_image() -> PaddedImage {
        let original = RgbImage::from_fn(7, 3, |x, y| Rgb([x as u8, y as u8, 1]));
        PaddedImage::from_rgb(&original).unwrap()
    }

    #[test]
    fn test_partition_counts() {
        let image = coordinate_image();
        let chunker = ImageChunker::new(&image, 2).unwrap();
        assert_eq!((chunker.cols(), chunker.rows()), (4, 2));
        let regions = chunker.chunks();
        assert_eq!(regions.len(), 8);
        assert!(regions.iter().all(|r| r.len() == 4));
    }

    #[test]
    fn test_partition_order_is_row_major() {
        let image = coordinate_image();
        let regions = partition(&image, 2).unwrap();

        let mut flattened = Vec::new();
        for row in 0..2 {
            for col in 0..4 {
                for y in row * 2..row * 2 + 2 {
                    for x in col * 2..col * 2 + 2 {
                        flattened.push(image.pixel(x, y));
                    }
                }
            }
        }
        assert_eq!(regions.concat(), flattened);
    }

    #[test]
    fn test_partition_covers_image_once() {
        let image = coordinate_image();
        let regions = partition(&image, 4).unwrap();
        let total: usize = regions.iter().map(Vec::len).sum();
        assert_eq!(total, (image.width() * image.height()) as usize);
    }

    #[test]
    fn test_non_dividing_size_rejected() {
        let image = coordinate_image();
        assert!(ImageChunker::new(&image, 3).is_err());
        assert!(ImageChunker::new(&image, 0).is_err());
        // divides width 8 but not height 4
        assert!(ImageChunker::new(&image, 8).is_err());
    }
}
