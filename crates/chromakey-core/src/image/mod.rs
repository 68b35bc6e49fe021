//! Image - Batched floating-point raster
//!
//! `Image` is an ordered batch of equally sized rasters with interleaved
//! `f32` channels, normalized to `[0, 1]`. It mirrors the tensor layout
//! the host hands over: batch × height × width × channels, row-major.
//!
//! See [`border`] for crop and pad geometry.
//!
//! # Examples
//!
//! ```
//! use chromakey_core::Image;
//!
//! // Two 4x3 RGBA frames
//! let mut img = Image::new(2, 4, 3, 4).unwrap();
//! img.set_pixel(1, 3, 2, &[1.0, 0.5, 0.0, 1.0]).unwrap();
//! assert_eq!(img.pixel(1, 3, 2).unwrap(), &[1.0, 0.5, 0.0, 1.0]);
//! assert!(img.has_alpha());
//! ```

pub mod border;

use std::slice::ChunksExact;

use crate::error::{Error, Result};

/// Batched floating-point raster
///
/// # Memory Layout
///
/// The sample for channel `c` of pixel (x, y) in frame `b` lives at
/// `((b * height + y) * width + x) * channels + c`.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    /// Number of frames
    batch: u32,
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Samples per pixel
    channels: u32,
    /// Sample data
    data: Vec<f32>,
}

impl Image {
    /// Create a new image with all samples set to zero
    ///
    /// # Errors
    ///
    /// Returns an error if any of `batch`, `width`, `height` or `channels`
    /// is 0.
    pub fn new(batch: u32, width: u32, height: u32, channels: u32) -> Result<Self> {
        let len = Self::checked_len(batch, width, height, channels)?;
        Ok(Image {
            batch,
            width,
            height,
            channels,
            data: vec![0.0; len],
        })
    }

    /// Create a new image with every pixel set to `value`
    ///
    /// The channel count is `value.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chromakey_core::Image;
    ///
    /// let img = Image::new_with_value(1, 8, 8, &[0.0, 1.0, 0.0]).unwrap();
    /// assert_eq!(img.channels(), 3);
    /// assert_eq!(img.pixel(0, 7, 7).unwrap(), &[0.0, 1.0, 0.0]);
    /// ```
    pub fn new_with_value(batch: u32, width: u32, height: u32, value: &[f32]) -> Result<Self> {
        let channels = value.len() as u32;
        let len = Self::checked_len(batch, width, height, channels)?;
        let mut data = Vec::with_capacity(len);
        for _ in 0..len / value.len() {
            data.extend_from_slice(value);
        }
        Ok(Image {
            batch,
            width,
            height,
            channels,
            data,
        })
    }

    /// Create an image from raw interleaved samples
    ///
    /// # Errors
    ///
    /// Returns an error if the shape is degenerate or `data.len()` does
    /// not equal `batch * height * width * channels`.
    pub fn from_data(
        batch: u32,
        width: u32,
        height: u32,
        channels: u32,
        data: Vec<f32>,
    ) -> Result<Self> {
        let expected = Self::checked_len(batch, width, height, channels)?;
        if data.len() != expected {
            return Err(Error::DataLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Image {
            batch,
            width,
            height,
            channels,
            data,
        })
    }

    fn checked_len(batch: u32, width: u32, height: u32, channels: u32) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        if batch == 0 {
            return Err(Error::InvalidBatch(batch));
        }
        if channels == 0 {
            return Err(Error::InvalidChannels(channels));
        }
        (batch as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(width as usize))
            .and_then(|n| n.checked_mul(channels as usize))
            .ok_or(Error::InvalidDimension { width, height })
    }

    /// Number of frames in the batch
    #[inline]
    pub fn batch(&self) -> u32 {
        self.batch
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Samples per pixel
    #[inline]
    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// True when the image carries at least RGB
    #[inline]
    pub fn has_rgb(&self) -> bool {
        self.channels >= 3
    }

    /// True when a fourth (alpha) channel is present
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.channels >= 4
    }

    /// Number of pixels in one frame
    #[inline]
    pub fn frame_pixels(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Number of pixels across the whole batch
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.batch as usize * self.frame_pixels()
    }

    /// Raw sample data
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Iterate over pixels of the whole batch, frame by frame in row order
    pub fn pixels(&self) -> ChunksExact<'_, f32> {
        self.data.chunks_exact(self.channels as usize)
    }

    /// Samples of frame `b`
    pub fn frame(&self, b: u32) -> Option<&[f32]> {
        if b >= self.batch {
            return None;
        }
        let len = self.frame_pixels() * self.channels as usize;
        let start = b as usize * len;
        Some(&self.data[start..start + len])
    }

    #[inline]
    fn offset(&self, b: u32, x: u32, y: u32) -> usize {
        ((b as usize * self.height as usize + y as usize) * self.width as usize + x as usize)
            * self.channels as usize
    }

    /// Samples of pixel (x, y) in frame `b`
    ///
    /// Returns `None` if the coordinates are out of range.
    pub fn pixel(&self, b: u32, x: u32, y: u32) -> Option<&[f32]> {
        if b >= self.batch || x >= self.width || y >= self.height {
            return None;
        }
        let start = self.offset(b, x, y);
        Some(&self.data[start..start + self.channels as usize])
    }

    /// Overwrite pixel (x, y) in frame `b`
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if the coordinates are out of
    /// range and `Error::InvalidParameter` if `value` does not hold one
    /// sample per channel.
    pub fn set_pixel(&mut self, b: u32, x: u32, y: u32, value: &[f32]) -> Result<()> {
        if b >= self.batch || x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: self.offset(b, x, y) / self.channels as usize,
                len: self.pixel_count(),
            });
        }
        if value.len() != self.channels as usize {
            return Err(Error::InvalidParameter(format!(
                "pixel has {} channels, got {} values",
                self.channels,
                value.len()
            )));
        }
        let start = self.offset(b, x, y);
        self.data[start..start + value.len()].copy_from_slice(value);
        Ok(())
    }

    /// Copy out the first `channels` channels of every pixel
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidChannels` if `channels` is 0 or exceeds the
    /// image's channel count.
    pub fn take_channels(&self, channels: u32) -> Result<Image> {
        if channels == 0 || channels > self.channels {
            return Err(Error::InvalidChannels(channels));
        }
        let n = channels as usize;
        let mut data = Vec::with_capacity(self.pixel_count() * n);
        for px in self.pixels() {
            data.extend_from_slice(&px[..n]);
        }
        Ok(Image {
            batch: self.batch,
            width: self.width,
            height: self.height,
            channels,
            data,
        })
    }

    /// Build an image of the same batch and size from per-pixel values
    ///
    /// `f` receives each source pixel and writes `channels` samples into
    /// the output slice.
    pub fn map_pixels<F>(&self, channels: u32, mut f: F) -> Result<Image>
    where
        F: FnMut(&[f32], &mut [f32]),
    {
        let len = Self::checked_len(self.batch, self.width, self.height, channels)?;
        let mut data = vec![0.0f32; len];
        for (src, dst) in self
            .pixels()
            .zip(data.chunks_exact_mut(channels as usize))
        {
            f(src, dst);
        }
        Ok(Image {
            batch: self.batch,
            width: self.width,
            height: self.height,
            channels,
            data,
        })
    }
}
