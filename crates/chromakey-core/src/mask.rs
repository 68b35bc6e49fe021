//! Mask - Batched single-channel coverage raster
//!
//! A mask holds one `f32` per pixel in `[0, 1]`, laid out batch × height
//! × width. A single-frame mask broadcasts across every frame of a larger
//! image batch.

use crate::error::{Error, Result};
use crate::image::Image;

/// Batched single-channel raster
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    batch: u32,
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl Mask {
    /// Create a mask with every sample set to `value`
    ///
    /// # Errors
    ///
    /// Returns an error if any dimension is 0.
    pub fn new_with_value(batch: u32, width: u32, height: u32, value: f32) -> Result<Self> {
        let len = Self::checked_len(batch, width, height)?;
        Ok(Mask {
            batch,
            width,
            height,
            data: vec![value; len],
        })
    }

    /// Create a mask from raw samples
    ///
    /// # Errors
    ///
    /// Returns an error if the shape is degenerate or the data length does
    /// not match it.
    pub fn from_data(batch: u32, width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        let expected = Self::checked_len(batch, width, height)?;
        if data.len() != expected {
            return Err(Error::DataLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Mask {
            batch,
            width,
            height,
            data,
        })
    }

    fn checked_len(batch: u32, width: u32, height: u32) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        if batch == 0 {
            return Err(Error::InvalidBatch(batch));
        }
        (batch as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(width as usize))
            .ok_or(Error::InvalidDimension { width, height })
    }

    #[inline]
    pub fn batch(&self) -> u32 {
        self.batch
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether this mask can be applied to `image`: same size, and a
    /// batch of either 1 or the image's batch.
    pub fn broadcasts_to(&self, image: &Image) -> bool {
        self.width == image.width()
            && self.height == image.height()
            && (self.batch == 1 || self.batch == image.batch())
    }

    /// Sample covering pixel `pixel` of a broadcast-compatible image,
    /// where `pixel` counts across the whole image batch and
    /// `frame_pixels` is the image's width times height.
    ///
    /// A single-frame mask repeats for every image frame.
    pub fn sample_for_pixel(&self, pixel: usize, frame_pixels: usize) -> Option<f32> {
        let idx = if self.batch == 1 && frame_pixels > 0 {
            pixel % frame_pixels
        } else {
            pixel
        };
        self.data.get(idx).copied()
    }

    /// True when every sample is exactly zero.
    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|&v| v == 0.0)
    }
}

/// Emptiness check for an optional mask; a missing mask counts as empty.
pub fn is_mask_empty(mask: Option<&Mask>) -> bool {
    mask.is_none_or(Mask::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_empty() {
        let mut m = Mask::new_with_value(2, 3, 3, 0.0).unwrap();
        assert!(m.is_empty());
        m.data[10] = 0.001;
        assert!(!m.is_empty());
        assert!(is_mask_empty(None));
        assert!(!is_mask_empty(Some(&m)));
    }

    #[test]
    fn test_broadcasting() {
        let img = Image::new(3, 4, 2, 3).unwrap();
        let single = Mask::new_with_value(1, 4, 2, 1.0).unwrap();
        let full = Mask::new_with_value(3, 4, 2, 1.0).unwrap();
        let wrong_batch = Mask::new_with_value(2, 4, 2, 1.0).unwrap();
        let wrong_size = Mask::new_with_value(1, 2, 4, 1.0).unwrap();

        assert!(single.broadcasts_to(&img));
        assert!(full.broadcasts_to(&img));
        assert!(!wrong_batch.broadcasts_to(&img));
        assert!(!wrong_size.broadcasts_to(&img));

        // pixel 17 is (1, 0) of frame 2
        assert_eq!(single.sample_for_pixel(17, 8), Some(1.0));
        assert_eq!(full.sample_for_pixel(17, 8), Some(1.0));
        assert_eq!(full.sample_for_pixel(24, 8), None);
    }

    #[test]
    fn test_sample_row_order() {
        let m = Mask::from_data(1, 2, 2, vec![0.0, 0.25, 0.5, 1.0]).unwrap();
        // (1, 0) then (0, 1), repeated for the next frame
        assert_eq!(m.sample_for_pixel(1, 4), Some(0.25));
        assert_eq!(m.sample_for_pixel(2, 4), Some(0.5));
        assert_eq!(m.sample_for_pixel(6, 4), Some(0.5));
    }
}
