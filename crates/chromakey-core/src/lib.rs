//! Chromakey Core - Basic data structures for color keying
//!
//! This crate provides the fundamental data structures used throughout
//! the chromakey engine:
//!
//! - [`Image`] - Batched `f32` raster with interleaved channels
//! - [`Mask`] - Batched single-channel coverage raster
//! - [`Rgb`] - 8-bit color with the lenient literal parser
//! - [`BorderSpec`] - Aspect-preserving crop / pad deltas

pub mod color;
pub mod error;
pub mod image;
pub mod mask;

pub use color::{DEFAULT_KEY_COLOR, ParseRgbError, Rgb};
pub use error::{Error, Result};
pub use image::Image;
pub use image::border::BorderSpec;
pub use mask::{Mask, is_mask_empty};

/// Channel indices for interleaved pixels.
pub mod channel {
    /// Red channel
    pub const RED: usize = 0;
    /// Green channel
    pub const GREEN: usize = 1;
    /// Blue channel
    pub const BLUE: usize = 2;
    /// Alpha channel
    pub const ALPHA: usize = 3;

    /// Clamped RGB of a pixel with at least three channels.
    ///
    /// # Panics
    ///
    /// Panics if `px` has fewer than three samples.
    #[inline]
    pub fn rgb(px: &[f32]) -> [f32; 3] {
        [
            px[RED].clamp(0.0, 1.0),
            px[GREEN].clamp(0.0, 1.0),
            px[BLUE].clamp(0.0, 1.0),
        ]
    }

    /// Clamped alpha of a pixel, or 1.0 when it has no alpha channel.
    #[inline]
    pub fn alpha(px: &[f32]) -> f32 {
        px.get(ALPHA).map_or(1.0, |a| a.clamp(0.0, 1.0))
    }

}
