//! Border operations for images
//!
//! Adding and removing borders around every frame of an [`Image`], plus
//! [`BorderSpec`], which turns a single pixel amount into per-side
//! deltas that preserve the aspect ratio:
//!
//! - the longer side changes by exactly `amount`
//! - the shorter side changes by `round(amount * short / long)`
//! - each total is split across opposite edges, with the odd pixel on
//!   the trailing (right / bottom) edge
//!
//! ```
//! use chromakey_core::BorderSpec;
//!
//! let spec = BorderSpec::from_amount(200, 100, 20);
//! assert_eq!(spec, BorderSpec { left: 10, right: 10, top: 5, bottom: 5 });
//! ```

use super::Image;
use crate::error::{Error, Result};

/// Per-side border sizes in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BorderSpec {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl BorderSpec {
    /// Aspect-preserving border for a `width` x `height` image.
    ///
    /// The same deltas serve both cropping and padding.
    ///
    /// # Examples
    ///
    /// ```
    /// use chromakey_core::BorderSpec;
    ///
    /// // Portrait: height is the long side
    /// let spec = BorderSpec::from_amount(30, 60, 7);
    /// assert_eq!((spec.top, spec.bottom), (3, 4));
    /// assert_eq!((spec.left, spec.right), (2, 2));
    /// ```
    pub fn from_amount(width: u32, height: u32, amount: u32) -> Self {
        if amount == 0 || width == 0 || height == 0 {
            return Self::default();
        }

        let (long, short) = if width >= height {
            (width, height)
        } else {
            (height, width)
        };
        let scaled = (amount as f64 * short as f64 / long as f64).round_ties_even() as u32;
        let (add_w, add_h) = if width >= height {
            (amount, scaled)
        } else {
            (scaled, amount)
        };

        Self {
            left: add_w / 2,
            right: add_w - add_w / 2,
            top: add_h / 2,
            bottom: add_h - add_h / 2,
        }
    }

    /// True when no side changes
    pub fn is_zero(&self) -> bool {
        self.left == 0 && self.right == 0 && self.top == 0 && self.bottom == 0
    }

    /// Total change along the x axis
    pub fn horizontal(&self) -> u64 {
        self.left as u64 + self.right as u64
    }

    /// Total change along the y axis
    pub fn vertical(&self) -> u64 {
        self.top as u64 + self.bottom as u64
    }

    /// Whether removing this border from a `width` x `height` image leaves
    /// at least one pixel on each axis.
    pub fn fits_inside(&self, width: u32, height: u32) -> bool {
        self.horizontal() < width as u64 && self.vertical() < height as u64
    }
}

impl Image {
    /// Add a border with different sizes per side.
    ///
    /// New pixels take `fill`, one value per channel.
    ///
    /// # Returns
    ///
    /// New image with dimensions `(width + left + right, height + top + bot)`.
    ///
    /// # Errors
    ///
    /// Returns error if `fill` does not match the channel count or the
    /// dimensions would overflow.
    pub fn add_border_general(
        &self,
        left: u32,
        right: u32,
        top: u32,
        bot: u32,
        fill: &[f32],
    ) -> Result<Image> {
        if fill.len() != self.channels as usize {
            return Err(Error::InvalidParameter(format!(
                "border fill has {} values for {} channels",
                fill.len(),
                self.channels
            )));
        }

        let overflow = || Error::InvalidDimension {
            width: self.width,
            height: self.height,
        };
        let wd = self
            .width
            .checked_add(left)
            .and_then(|w| w.checked_add(right))
            .ok_or_else(overflow)?;
        let hd = self
            .height
            .checked_add(top)
            .and_then(|h| h.checked_add(bot))
            .ok_or_else(overflow)?;

        let mut out = Image::new_with_value(self.batch, wd, hd, fill)?;

        let nc = self.channels as usize;
        let src_row = self.width as usize * nc;
        let dst_row = wd as usize * nc;
        for b in 0..self.batch {
            let src = self.frame(b).ok_or_else(overflow)?;
            let dst_frame = b as usize * hd as usize * dst_row;
            for (y, row) in src.chunks_exact(src_row).enumerate() {
                let start = dst_frame + (y + top as usize) * dst_row + left as usize * nc;
                out.data[start..start + src_row].copy_from_slice(row);
            }
        }

        Ok(out)
    }

    /// Remove a border with different sizes per side.
    ///
    /// # Returns
    ///
    /// New image with dimensions `(width - left - right, height - top - bot)`.
    ///
    /// # Errors
    ///
    /// Returns `Error::BorderTooLarge` if the border would leave no pixels
    /// along either axis.
    pub fn remove_border_general(&self, left: u32, right: u32, top: u32, bot: u32) -> Result<Image> {
        let spec = BorderSpec {
            left,
            right,
            top,
            bottom: bot,
        };
        if !spec.fits_inside(self.width, self.height) {
            return Err(Error::BorderTooLarge {
                width: self.width,
                height: self.height,
                horizontal: spec.horizontal(),
                vertical: spec.vertical(),
            });
        }

        let wd = self.width - left - right;
        let hd = self.height - top - bot;
        let nc = self.channels as usize;
        let src_row = self.width as usize * nc;
        let keep = wd as usize * nc;

        let mut data = Vec::with_capacity(self.batch as usize * hd as usize * keep);
        for frame in self.data.chunks_exact(self.height as usize * src_row) {
            for row in frame
                .chunks_exact(src_row)
                .skip(top as usize)
                .take(hd as usize)
            {
                let start = left as usize * nc;
                data.extend_from_slice(&row[start..start + keep]);
            }
        }

        Image::from_data(self.batch, wd, hd, self.channels, data)
    }

    /// Pad every frame by `spec`, filling with `fill`.
    pub fn pad(&self, spec: &BorderSpec, fill: &[f32]) -> Result<Image> {
        self.add_border_general(spec.left, spec.right, spec.top, spec.bottom, fill)
    }

    /// Crop `spec` off every frame.
    pub fn crop(&self, spec: &BorderSpec) -> Result<Image> {
        self.remove_border_general(spec.left, spec.right, spec.top, spec.bottom)
    }
}
