//! Chromakey Color - Keying, flattening and tone adjustment
//!
//! This crate provides the color operations of the engine:
//!
//! - **Color distance** ([`distance`]): squared RGB distance and the threshold / softness ramp
//! - **Corner picking** ([`pick`]): reference color from a corner of the first frame
//! - **Farthest color search** ([`search`]): background color unlike any pixel
//! - **Color to alpha** ([`key`]): key a color out into transparency
//! - **Alpha to color** ([`flatten`]): composite transparency onto a solid color
//! - **Tone adjustment** ([`adjust`]): brightness, contrast and per-hue saturation

pub mod adjust;
pub mod distance;
pub mod error;
pub mod flatten;
pub mod key;
pub mod pick;
pub mod search;

// Re-export core types
pub use chromakey_core;

// Re-export error types
pub use error::{ColorError, ColorResult};

pub use distance::{AlphaRamp, distance_map, distance_sq};

pub use pick::{Corner, corner_color, corner_pixel};

pub use search::{
    FarthestCandidate, farthest_candidate, farthest_color, farthest_color_with_rng,
    sample_pixels,
};

pub use key::{ColorToAlphaOptions, KeyColorSource, color_to_alpha};

pub use flatten::{
    AlphaToColorOptions, FillColorSource, alpha_to_color, alpha_to_color_with_rng,
    resolve_fill_color,
};

pub use adjust::{HueBand, ToneAdjustOptions, contrast_and_saturate};

/// Clamp a host integer into `0..=255`.
pub(crate) fn clamp_to_u8(value: i64) -> u8 {
    value.clamp(0, u8::MAX as i64) as u8
}

/// Clamp a host integer into a non-negative pixel amount.
pub(crate) fn clamp_amount(value: i64) -> u32 {
    value.clamp(0, u32::MAX as i64) as u32
}
