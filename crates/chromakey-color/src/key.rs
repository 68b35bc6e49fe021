//! Color to alpha keying
//!
//! Turns pixels close to a key color transparent. The key color is either
//! a user literal or a corner pixel of the (optionally cropped) first
//! frame; the new alpha follows the [`AlphaRamp`] of the pixel's distance
//! to it, multiplied into any alpha the image already has.
//!
//! # Example
//!
//! ```
//! use chromakey_color::key::{ColorToAlphaOptions, KeyColorSource, color_to_alpha};
//! use chromakey_core::{Image, Rgb};
//!
//! let green = Image::new_with_value(1, 4, 4, &Rgb::new(0, 255, 0).to_unit()).unwrap();
//! let options = ColorToAlphaOptions {
//!     user_color: Rgb::new(0, 255, 0),
//!     ..Default::default()
//! };
//! let keyed = color_to_alpha(&green, &options).unwrap();
//! assert_eq!(keyed.channels(), 4);
//! assert!(keyed.pixels().all(|p| p[3] == 0.0));
//! ```

use std::str::FromStr;

use crate::distance::{AlphaRamp, distance_sq};
use crate::pick::{Corner, corner_pixel};
use crate::{ColorError, ColorResult, clamp_amount, clamp_to_u8};
use chromakey_core::{BorderSpec, Image, Rgb, channel};

/// Where the key color comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum KeyColorSource {
    /// The user literal
    #[default]
    User,
    /// A corner pixel of the first frame
    Corner(Corner),
}

impl KeyColorSource {
    /// Lenient host parsing: an empty mode means `user_color`, unknown
    /// modes pick the top-left pixel.
    pub fn from_host(mode: &str) -> Self {
        if mode.trim().is_empty() {
            return KeyColorSource::User;
        }
        mode.parse().unwrap_or_else(|err: ColorError| {
            tracing::debug!(%err, "falling back to the top-left pixel");
            KeyColorSource::Corner(Corner::TopLeft)
        })
    }
}

impl FromStr for KeyColorSource {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "user_color" | "user" => Ok(KeyColorSource::User),
            other => other.parse().map(KeyColorSource::Corner),
        }
    }
}

/// Options for [`color_to_alpha`]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ColorToAlphaOptions {
    /// Pixels to crop along the longer side before keying (0 = no crop)
    pub crop_amount: u32,
    /// Key color source
    pub source: KeyColorSource,
    /// Key color used by [`KeyColorSource::User`]
    pub user_color: Rgb,
    /// Distance (8-bit units) at or below which pixels become transparent
    pub threshold: u8,
    /// Width (8-bit units) of the linear ramp above `threshold`
    pub softness: u8,
}

impl Default for ColorToAlphaOptions {
    fn default() -> Self {
        Self {
            crop_amount: 0,
            source: KeyColorSource::User,
            user_color: Rgb::default(),
            threshold: 0,
            softness: 0,
        }
    }
}

impl ColorToAlphaOptions {
    /// Build options from raw host values, clamping numbers and parsing
    /// strings leniently.
    pub fn from_params(
        crop_amount: i64,
        pick_mode: &str,
        color_rgb: &str,
        threshold: i64,
        softness: i64,
    ) -> Self {
        Self {
            crop_amount: clamp_amount(crop_amount),
            source: KeyColorSource::from_host(pick_mode),
            user_color: Rgb::parse_or_default(color_rgb),
            threshold: clamp_to_u8(threshold),
            softness: clamp_to_u8(softness),
        }
    }
}

/// Center-crop every frame by an aspect-preserving amount.
///
/// Returns the image unchanged when the crop would leave no pixels.
fn center_crop(image: &Image, amount: u32) -> ColorResult<Image> {
    let spec = BorderSpec::from_amount(image.width(), image.height(), amount);
    match image.crop(&spec) {
        Ok(cropped) => Ok(cropped),
        Err(chromakey_core::Error::BorderTooLarge { .. }) => {
            tracing::debug!(
                amount,
                width = image.width(),
                height = image.height(),
                "crop would collapse the image, skipping"
            );
            Ok(image.clone())
        }
        Err(err) => Err(err.into()),
    }
}

/// Replace pixels near the key color with transparency.
///
/// Output always has four channels: the clamped source RGB and the new
/// alpha. Images with fewer than three channels are returned unchanged.
///
/// # Errors
///
/// Only fails on internal size overflow; malformed options never error.
pub fn color_to_alpha(image: &Image, options: &ColorToAlphaOptions) -> ColorResult<Image> {
    if !image.has_rgb() {
        tracing::debug!(channels = image.channels(), "not an RGB image, passing through");
        return Ok(image.clone());
    }

    let src = if options.crop_amount > 0 {
        center_crop(image, options.crop_amount)?
    } else {
        image.clone()
    };

    let target = match options.source {
        KeyColorSource::User => options.user_color.to_unit(),
        KeyColorSource::Corner(corner) => {
            corner_pixel(&src, corner).unwrap_or_else(|| options.user_color.to_unit())
        }
    };

    let ramp = AlphaRamp::new(options.threshold, options.softness);
    let out = src.map_pixels(4, |px, out| {
        let rgb = channel::rgb(px);
        out[..3].copy_from_slice(&rgb);
        out[3] = ramp.apply(distance_sq(rgb, target), channel::alpha(px));
    })?;
    Ok(out)
}
