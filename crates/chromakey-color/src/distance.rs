//! Color distance and the threshold / softness alpha ramp
//!
//! Distances are measured in normalized RGB space: both the pixel and
//! the target live in `[0, 1]^3`, and thresholds given on the 8-bit
//! scale are divided by 255 before use.
//!
//! The ramp maps a squared distance to an opacity multiplier:
//!
//! ```text
//!  factor
//!   1 |            ________
//!     |           /
//!     |          /
//!   0 |_________/
//!     +---------+--+------- d
//!              t0  t1 = t0 + softness
//! ```
//!
//! With zero softness the ramp degenerates into a hard cutoff at `t0`.

use crate::{ColorError, ColorResult};
use chromakey_core::{Image, channel};

/// Tolerance for squared-distance comparisons and the sqrt guard
pub const SQUARED_DISTANCE_EPSILON: f32 = 1e-12;

/// Smallest ramp width used as a denominator
pub const RAMP_DENOMINATOR_FLOOR: f32 = 1e-8;

/// Squared Euclidean distance between two unit-range RGB triples.
#[inline]
pub fn distance_sq(rgb: [f32; 3], target: [f32; 3]) -> f32 {
    let dr = rgb[0] - target[0];
    let dg = rgb[1] - target[1];
    let db = rgb[2] - target[2];
    dr * dr + dg * dg + db * db
}

/// Per-pixel squared distance to `target`, as a single-channel image.
///
/// Pixel RGB is clamped to `[0, 1]` first.
///
/// # Errors
///
/// Returns [`ColorError::UnsupportedChannels`] if the image has fewer than
/// three channels.
pub fn distance_map(image: &Image, target: [f32; 3]) -> ColorResult<Image> {
    if !image.has_rgb() {
        return Err(ColorError::UnsupportedChannels {
            expected: "at least 3",
            actual: image.channels(),
        });
    }
    let map = image.map_pixels(1, |px, out| {
        out[0] = distance_sq(channel::rgb(px), target);
    })?;
    Ok(map)
}

/// Threshold / softness ramp in normalized distance units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaRamp {
    /// Distance at or below which a pixel is fully keyed
    t0: f32,
    /// Distance at or above which a pixel keeps its alpha
    t1: f32,
    /// Zero softness: hard cutoff on the squared distance
    hard: bool,
}

impl AlphaRamp {
    /// Build a ramp from 8-bit threshold and softness.
    ///
    /// The upper end saturates at 255.
    pub fn new(threshold: u8, softness: u8) -> Self {
        let t0 = threshold as f32 / 255.0;
        let t1 = (threshold as u32 + softness as u32).min(255) as f32 / 255.0;
        Self {
            t0,
            t1,
            hard: softness == 0,
        }
    }

    /// Lower end of the ramp
    pub fn start(&self) -> f32 {
        self.t0
    }

    /// Upper end of the ramp
    pub fn end(&self) -> f32 {
        self.t1
    }

    /// Opacity multiplier in `[0, 1]` for a squared distance.
    pub fn factor(&self, d2: f32) -> f32 {
        if self.hard {
            return if d2 <= self.t0 * self.t0 + SQUARED_DISTANCE_EPSILON {
                0.0
            } else {
                1.0
            };
        }

        let d = (d2 + SQUARED_DISTANCE_EPSILON).sqrt();
        let denom = (self.t1 - self.t0).max(RAMP_DENOMINATOR_FLOOR);
        ((d - self.t0) / denom).clamp(0.0, 1.0)
    }

    /// New alpha for a pixel with squared distance `d2` and alpha
    /// `source_alpha`.
    pub fn apply(&self, d2: f32, source_alpha: f32) -> f32 {
        if self.hard {
            // Unkeyed pixels keep their alpha untouched
            return if self.factor(d2) == 0.0 {
                0.0
            } else {
                source_alpha
            };
        }
        (source_alpha * self.factor(d2)).clamp(0.0, 1.0)
    }
}
