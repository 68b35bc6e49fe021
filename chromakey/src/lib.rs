//! Chromakey - Paired color-keying engine
//!
//! Turns a solid background color into transparency, and flattens
//! transparency back onto a solid color.
//!
//! # Overview
//!
//! - [`color_to_alpha`]: key out a user color or a corner pixel, with a
//!   threshold / softness ramp and an optional aspect-preserving crop
//! - [`alpha_to_color`]: composite alpha (or an external mask) onto a user
//!   color or an automatically chosen one, with optional padding
//! - [`farthest_color`]: the grid color farthest from every pixel
//! - [`corner_color`]: color of a corner pixel
//! - [`contrast_and_saturate`]: brightness, contrast and per-hue saturation
//!
//! # Example
//!
//! ```
//! use chromakey::{AlphaToColorOptions, ColorToAlphaOptions, Image};
//!
//! // Fully transparent blue flattened onto the default key color, then keyed back
//! let img = Image::new_with_value(1, 8, 8, &[0.0, 0.0, 1.0, 0.0]).unwrap();
//! let flat = chromakey::alpha_to_color(&img, &AlphaToColorOptions::default(), None).unwrap();
//! assert_eq!(flat.channels(), 3);
//!
//! let keyed = chromakey::color_to_alpha(&flat, &ColorToAlphaOptions::default()).unwrap();
//! assert!(keyed.pixels().all(|p| p[3] == 0.0));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use chromakey_core::*;

// Re-export the color crate as a module
pub use chromakey_color as color;

pub use chromakey_color::{
    AlphaToColorOptions, ColorError, ColorResult, ColorToAlphaOptions, Corner, FillColorSource,
    KeyColorSource, ToneAdjustOptions, alpha_to_color, alpha_to_color_with_rng, color_to_alpha,
    contrast_and_saturate, corner_color, farthest_color, farthest_color_with_rng,
};
