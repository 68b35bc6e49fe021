//! Alpha to color flattening
//!
//! Composites an image onto a solid background color, consuming its
//! transparency. The coverage comes from an external mask when one is
//! supplied, otherwise from the image's own alpha channel. The background
//! is either a user literal or, in auto mode, the grid color farthest
//! from every pixel (see [`crate::search`]).
//!
//! Output is always three-channel RGB, optionally padded with the
//! background color.

use std::str::FromStr;

use rand::Rng;

use crate::search::farthest_color_with_rng;
use crate::{ColorError, ColorResult, clamp_amount, clamp_to_u8};
use chromakey_core::{BorderSpec, Image, Mask, Rgb, channel};

/// Where the background color comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FillColorSource {
    /// The user literal
    #[default]
    User,
    /// Farthest grid color from the image, falling back to the user literal
    Auto,
}

impl FillColorSource {
    /// Lenient host parsing: anything but `auto_color` means the user color.
    pub fn from_host(mode: &str) -> Self {
        match mode.trim() {
            "auto_color" => FillColorSource::Auto,
            _ => FillColorSource::User,
        }
    }
}

impl FromStr for FillColorSource {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "user_color" | "user" => Ok(FillColorSource::User),
            "auto_color" | "auto" => Ok(FillColorSource::Auto),
            other => Err(ColorError::UnknownMode(other.to_string())),
        }
    }
}

/// Options for [`alpha_to_color`]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AlphaToColorOptions {
    /// Background color source
    pub source: FillColorSource,
    /// Minimum distance (8-bit units) an auto color must keep from every pixel
    pub threshold: u8,
    /// Background for [`FillColorSource::User`] and the auto fallback
    pub user_color: Rgb,
    /// Pixels to pad along the longer side after compositing (0 = no pad)
    pub pad_amount: u32,
}

impl Default for AlphaToColorOptions {
    fn default() -> Self {
        Self {
            source: FillColorSource::User,
            threshold: 0,
            user_color: Rgb::default(),
            pad_amount: 0,
        }
    }
}

impl AlphaToColorOptions {
    /// Build options from raw host values.
    pub fn from_params(pick_mode: &str, threshold: i64, color_rgb: &str, pad_amount: i64) -> Self {
        Self {
            source: FillColorSource::from_host(pick_mode),
            threshold: clamp_to_u8(threshold),
            user_color: Rgb::parse_or_default(color_rgb),
            pad_amount: clamp_amount(pad_amount),
        }
    }
}

/// Resolve the background color for `image`.
pub fn resolve_fill_color<R: Rng + ?Sized>(
    image: &Image,
    options: &AlphaToColorOptions,
    rng: &mut R,
) -> Rgb {
    match options.source {
        FillColorSource::User => options.user_color,
        FillColorSource::Auto => farthest_color_with_rng(image, options.threshold, rng)
            .unwrap_or_else(|| {
                tracing::debug!(
                    fallback = %options.user_color,
                    "no auto color found, using the user color"
                );
                options.user_color
            }),
    }
}

#[inline]
fn blend(fg: [f32; 3], bg: [f32; 3], coverage: f32, out: &mut [f32]) {
    for i in 0..3 {
        out[i] = fg[i] * coverage + bg[i] * (1.0 - coverage);
    }
}

/// Flatten transparency onto a solid color, sampling with the thread RNG.
///
/// See [`alpha_to_color_with_rng`].
pub fn alpha_to_color(
    image: &Image,
    options: &AlphaToColorOptions,
    mask: Option<&Mask>,
) -> ColorResult<Image> {
    alpha_to_color_with_rng(image, options, mask, &mut rand::rng())
}

/// Flatten transparency onto a solid color.
///
/// With a mask, white mask pixels are fully replaced by the color and
/// the image's own alpha is ignored. Without one, the alpha channel is
/// composited over the color; images with no alpha keep their RGB.
///
/// Images with fewer than three channels, and masks whose shape does not
/// match the image, leave the input unchanged.
///
/// # Errors
///
/// Only fails on internal size overflow.
pub fn alpha_to_color_with_rng<R: Rng + ?Sized>(
    image: &Image,
    options: &AlphaToColorOptions,
    mask: Option<&Mask>,
    rng: &mut R,
) -> ColorResult<Image> {
    if !image.has_rgb() {
        tracing::debug!(channels = image.channels(), "not an RGB image, passing through");
        return Ok(image.clone());
    }

    let color = resolve_fill_color(image, options, rng);
    let bg = color.to_unit();

    let flat = match mask {
        Some(m) if !m.broadcasts_to(image) => {
            tracing::debug!(
                mask = ?(m.batch(), m.width(), m.height()),
                image = ?(image.batch(), image.width(), image.height()),
                "mask does not match the image, passing through"
            );
            return Ok(image.clone());
        }
        Some(m) => {
            let frame_pixels = image.frame_pixels();
            let mut index = 0usize;
            image.map_pixels(3, |px, out| {
                let weight = m
                    .sample_for_pixel(index, frame_pixels)
                    .unwrap_or(0.0)
                    .clamp(0.0, 1.0);
                index += 1;
                blend(channel::rgb(px), bg, 1.0 - weight, out);
            })?
        }
        None if image.has_alpha() => image.map_pixels(3, |px, out| {
            blend(channel::rgb(px), bg, channel::alpha(px), out);
        })?,
        None => image.map_pixels(3, |px, out| {
            out.copy_from_slice(&channel::rgb(px));
        })?,
    };

    if options.pad_amount == 0 {
        return Ok(flat);
    }
    let spec = BorderSpec::from_amount(flat.width(), flat.height(), options.pad_amount);
    Ok(flat.pad(&spec, &bg)?)
}
