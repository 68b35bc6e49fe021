//! Corner color picking
//!
//! Reads the reference color from one corner of the first frame in a
//! batch. Host mode strings use the `*_pixel` names.

use std::str::FromStr;

use crate::ColorError;
use chromakey_core::{Image, Rgb, channel};

/// Image corner used as the key color source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Corner {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// All corners in host menu order
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Host mode string for this corner
    pub fn mode_name(self) -> &'static str {
        match self {
            Corner::TopLeft => "left_top_pixel",
            Corner::TopRight => "right_top_pixel",
            Corner::BottomLeft => "left_bottom_pixel",
            Corner::BottomRight => "right_bottom_pixel",
        }
    }

    /// (x, y) of this corner in a `width` x `height` frame
    pub fn position(self, width: u32, height: u32) -> (u32, u32) {
        let right = width.saturating_sub(1);
        let bottom = height.saturating_sub(1);
        match self {
            Corner::TopLeft => (0, 0),
            Corner::TopRight => (right, 0),
            Corner::BottomLeft => (0, bottom),
            Corner::BottomRight => (right, bottom),
        }
    }
}

impl FromStr for Corner {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Corner::ALL
            .into_iter()
            .find(|c| c.mode_name() == s.trim())
            .ok_or_else(|| ColorError::UnknownMode(s.to_string()))
    }
}

/// Clamped unit-range RGB of a corner pixel of the first frame.
///
/// Returns `None` if the image has fewer than three channels.
pub fn corner_pixel(image: &Image, corner: Corner) -> Option<[f32; 3]> {
    if !image.has_rgb() {
        return None;
    }
    let (x, y) = corner.position(image.width(), image.height());
    image.pixel(0, x, y).map(channel::rgb)
}

/// 8-bit color of a corner pixel of the first frame.
///
/// Returns `None` if the image has fewer than three channels.
pub fn corner_color(image: &Image, corner: Corner) -> Option<Rgb> {
    corner_pixel(image, corner).map(Rgb::from_unit)
}
