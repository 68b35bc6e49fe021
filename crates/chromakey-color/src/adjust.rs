//! Brightness, contrast and per-hue saturation
//!
//! Brightness and contrast work on unit-range RGB. Saturation is then
//! scaled in 8-bit HSV: first globally by the master slider, then by six
//! feathered hue bands (reds, yellows, greens, cyans, blues, magentas)
//! applied one after the other.
//!
//! The 8-bit HSV conversion follows the PIL conventions, so results match
//! images round-tripped through `Image.convert("HSV")`: hue is stored on
//! a 0..=255 scale and both conversions truncate.

use crate::ColorResult;
use chromakey_core::Image;

/// Slider range for every [`ToneAdjustOptions`] field
pub const SLIDER_MIN: i32 = -100;
/// Slider range for every [`ToneAdjustOptions`] field
pub const SLIDER_MAX: i32 = 100;

/// Width in degrees of the soft edge of each hue band
pub const FEATHER_DEG: f32 = 15.0;

/// Hue band with soft ranges in degrees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HueBand {
    Reds,
    Yellows,
    Greens,
    Cyans,
    Blues,
    Magentas,
}

impl HueBand {
    /// Bands in the order they are applied
    pub const ALL: [HueBand; 6] = [
        HueBand::Reds,
        HueBand::Yellows,
        HueBand::Greens,
        HueBand::Cyans,
        HueBand::Blues,
        HueBand::Magentas,
    ];

    /// Soft `(start, end)` ranges in degrees
    pub fn soft_ranges(self) -> [(f32, f32); 2] {
        match self {
            HueBand::Reds => [(315.0, 345.0), (15.0, 45.0)],
            HueBand::Yellows => [(15.0, 45.0), (75.0, 105.0)],
            HueBand::Greens => [(75.0, 105.0), (135.0, 165.0)],
            HueBand::Cyans => [(135.0, 165.0), (195.0, 225.0)],
            HueBand::Blues => [(195.0, 225.0), (225.0, 285.0)],
            HueBand::Magentas => [(255.0, 285.0), (315.0, 345.0)],
        }
    }

    /// Membership of `hue_deg` in this band, in `[0, 1]`.
    ///
    /// Each soft range ramps up over its first [`FEATHER_DEG`] degrees
    /// (or half its width, if narrower) and down over its last; the band
    /// weight is the maximum over its ranges.
    pub fn weight(self, hue_deg: f32) -> f32 {
        self.soft_ranges()
            .into_iter()
            .map(|range| range_weight(hue_deg, range))
            .fold(0.0, f32::max)
    }
}

fn range_weight(h: f32, (start_soft, end_soft): (f32, f32)) -> f32 {
    let width = end_soft - start_soft;
    if width <= 0.0 {
        return 0.0;
    }
    let feather = FEATHER_DEG.min(width * 0.5);
    let start_hard = start_soft + feather;
    let end_hard = end_soft - feather;

    if h >= start_hard && h <= end_hard {
        1.0
    } else if feather > 0.0 && h >= start_soft && h < start_hard {
        (h - start_soft) / feather
    } else if feather > 0.0 && h > end_hard && h <= end_soft {
        (end_soft - h) / feather
    } else {
        0.0
    }
}

/// Saturation multiplier for a slider value.
#[inline]
pub fn slider_factor(value: i32) -> f32 {
    (1.0 + value as f32 / 100.0).max(0.0)
}

/// Options for [`contrast_and_saturate`]
///
/// Every field is a slider in `-100..=100`; out-of-range values are
/// clamped when applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ToneAdjustOptions {
    pub brightness: i32,
    pub contrast: i32,
    /// Global saturation
    pub master: i32,
    pub reds: i32,
    pub yellows: i32,
    pub greens: i32,
    pub cyans: i32,
    pub blues: i32,
    pub magentas: i32,
}

impl ToneAdjustOptions {
    /// Copy with every slider clamped to its range.
    pub fn clamped(&self) -> Self {
        let c = |v: i32| v.clamp(SLIDER_MIN, SLIDER_MAX);
        Self {
            brightness: c(self.brightness),
            contrast: c(self.contrast),
            master: c(self.master),
            reds: c(self.reds),
            yellows: c(self.yellows),
            greens: c(self.greens),
            cyans: c(self.cyans),
            blues: c(self.blues),
            magentas: c(self.magentas),
        }
    }

    /// True when every slider is zero.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Slider value of a hue band
    pub fn band(&self, band: HueBand) -> i32 {
        match band {
            HueBand::Reds => self.reds,
            HueBand::Yellows => self.yellows,
            HueBand::Greens => self.greens,
            HueBand::Cyans => self.cyans,
            HueBand::Blues => self.blues,
            HueBand::Magentas => self.magentas,
        }
    }
}

/// 8-bit RGB to 8-bit HSV, hue on a 0..=255 scale.
pub fn rgb_to_hsv(rgb: [u8; 3]) -> [u8; 3] {
    let [r, g, b] = rgb.map(i32::from);
    let maxc = r.max(g).max(b);
    let minc = r.min(g).min(b);
    if maxc == minc {
        return [0, 0, maxc as u8];
    }

    let cr = (maxc - minc) as f32;
    let s = cr / maxc as f32;
    let rc = (maxc - r) as f32 / cr;
    let gc = (maxc - g) as f32 / cr;
    let bc = (maxc - b) as f32 / cr;
    // h is stored as f32, but the offsets and the final scaling run in f64
    let h = if r == maxc {
        bc - gc
    } else if g == maxc {
        (2.0 + rc as f64 - bc as f64) as f32
    } else {
        (4.0 + gc as f64 - rc as f64) as f32
    };
    let h = ((h as f64 / 6.0 + 1.0) % 1.0) as f32;

    [
        ((h as f64 * 255.0) as i32).clamp(0, 255) as u8,
        ((s as f64 * 255.0) as i32).clamp(0, 255) as u8,
        maxc as u8,
    ]
}

/// 8-bit HSV (hue on a 0..=255 scale) back to 8-bit RGB.
pub fn hsv_to_rgb(hsv: [u8; 3]) -> [u8; 3] {
    let [h, s, v] = hsv;
    if s == 0 {
        return [v, v, v];
    }

    let h6 = h as f64 * 6.0 / 255.0;
    let i = h6.floor() as i32;
    let f = h6 - i as f64;
    let fs = s as f64 / 255.0;
    let v_f = v as f64;
    let to_u8 = |x: f64| (x.round() as i32).clamp(0, 255) as u8;
    let p = to_u8(v_f * (1.0 - fs));
    let q = to_u8(v_f * (1.0 - fs * f));
    let t = to_u8(v_f * (1.0 - fs * (1.0 - f)));

    match i % 6 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

/// Unit-range RGB after brightness and contrast, clamped.
fn brightness_contrast(rgb: [f32; 3], brightness: i32, contrast: i32) -> [f32; 3] {
    let mut out = rgb;
    if brightness != 0 {
        let offset = brightness as f32 / 100.0;
        out = out.map(|v| v + offset);
    }
    if contrast != 0 {
        let factor = 1.0 + contrast as f32 / 100.0;
        out = out.map(|v| (v - 0.5) * factor + 0.5);
    }
    out.map(|v| v.clamp(0.0, 1.0))
}

/// Adjusted 8-bit saturation for a pixel with hue `h` and saturation `s`.
fn adjust_saturation(h: u8, s: u8, master: f32, bands: &[(HueBand, f32)]) -> u8 {
    let hue_deg = h as f32 * (360.0 / 255.0);
    let mut sat = s as f32 * master;
    for &(band, factor) in bands {
        sat *= 1.0 + band.weight(hue_deg) * (factor - 1.0);
    }
    sat.clamp(0.0, 255.0) as u8
}

/// Apply brightness, contrast and saturation sliders to every frame.
///
/// Images with fewer than three channels, or all-zero sliders, are
/// returned unchanged. An alpha channel is carried through untouched.
///
/// # Errors
///
/// Only fails on internal size overflow.
pub fn contrast_and_saturate(image: &Image, options: &ToneAdjustOptions) -> ColorResult<Image> {
    let options = options.clamped();
    if options.is_identity() {
        return Ok(image.clone());
    }
    if !image.has_rgb() {
        tracing::debug!(channels = image.channels(), "not an RGB image, passing through");
        return Ok(image.clone());
    }

    let master = slider_factor(options.master);
    // Bands with a neutral factor are skipped
    let bands: Vec<(HueBand, f32)> = HueBand::ALL
        .into_iter()
        .map(|band| (band, slider_factor(options.band(band))))
        .filter(|&(_, factor)| factor != 1.0)
        .collect();

    let out = image.map_pixels(image.channels(), |px, out| {
        let rgb = brightness_contrast(
            [px[0], px[1], px[2]],
            options.brightness,
            options.contrast,
        );
        let rgb8 = rgb.map(|v| (v * 255.0).clamp(0.0, 255.0) as u8);
        let [h, s, v] = rgb_to_hsv(rgb8);
        let s = adjust_saturation(h, s, master, &bands);
        let adjusted = hsv_to_rgb([h, s, v]);

        for (o, c) in out.iter_mut().zip(adjusted) {
            *o = c as f32 / 255.0;
        }
        out[3..].copy_from_slice(&px[3..]);
    })?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(rgb_to_hsv([255, 0, 0]), [0, 255, 255]);
        assert_eq!(rgb_to_hsv([0, 255, 0]), [85, 255, 255]);
        assert_eq!(rgb_to_hsv([0, 0, 255]), [170, 255, 255]);
        assert_eq!(rgb_to_hsv([40, 40, 40]), [0, 0, 40]);
        assert_eq!(hsv_to_rgb([0, 255, 255]), [255, 0, 0]);
        assert_eq!(hsv_to_rgb([85, 255, 255]), [0, 255, 0]);
        assert_eq!(hsv_to_rgb([170, 255, 255]), [0, 0, 255]);
        assert_eq!(hsv_to_rgb([12, 0, 99]), [99, 99, 99]);
    }

    #[test]
    fn test_hsv_hue_offsets_in_double() {
        // f32 offsets land one hue level low on these
        assert_eq!(rgb_to_hsv([0, 12, 255]), [168, 255, 255]);
        assert_eq!(rgb_to_hsv([0, 4, 5]), [136, 255, 5]);
        assert_eq!(hsv_to_rgb([168, 255, 255]), [0, 12, 255]);
    }

    #[test]
    fn test_band_weights() {
        assert_eq!(HueBand::Reds.weight(0.0), 0.0);
        assert_eq!(HueBand::Reds.weight(30.0), 1.0);
        assert_eq!(HueBand::Reds.weight(330.0), 1.0);
        assert_eq!(HueBand::Reds.weight(22.5), 0.5);
        assert_eq!(HueBand::Greens.weight(120.0), 0.0);
        assert_eq!(HueBand::Greens.weight(90.0), 1.0);
        assert_eq!(HueBand::Blues.weight(255.0), 1.0);
        assert_eq!(HueBand::Yellows.weight(200.0), 0.0);
    }

    #[test]
    fn test_slider_factor() {
        assert_eq!(slider_factor(0), 1.0);
        assert_eq!(slider_factor(-100), 0.0);
        assert_eq!(slider_factor(100), 2.0);
    }

    #[test]
    fn test_options_clamp() {
        let o = ToneAdjustOptions {
            brightness: 500,
            magentas: -1000,
            ..Default::default()
        }
        .clamped();
        assert_eq!(o.brightness, 100);
        assert_eq!(o.magentas, -100);
        assert!(!o.is_identity());
        assert!(ToneAdjustOptions::default().is_identity());
    }

    #[test]
    fn test_identity_is_exact_copy() {
        let img = Image::new_with_value(1, 2, 2, &[0.123, 0.456, 0.789]).unwrap();
        let out = contrast_and_saturate(&img, &ToneAdjustOptions::default()).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_full_desaturation() {
        let img = Image::new_with_value(1, 2, 2, &[1.0, 0.0, 0.0, 0.3]).unwrap();
        let options = ToneAdjustOptions {
            master: -100,
            ..Default::default()
        };
        let out = contrast_and_saturate(&img, &options).unwrap();
        assert_eq!(out.channels(), 4);
        assert!(out.pixels().all(|p| p == [1.0, 1.0, 1.0, 0.3]));
    }

    #[test]
    fn test_full_brightness_is_white() {
        let img = Image::new_with_value(1, 1, 1, &[0.2, 0.5, 0.9]).unwrap();
        let options = ToneAdjustOptions {
            brightness: 100,
            ..Default::default()
        };
        let out = contrast_and_saturate(&img, &options).unwrap();
        assert_eq!(out.pixel(0, 0, 0).unwrap(), &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_band_leaves_other_hues() {
        // pure blue is outside the reds band
        let img = Image::new_with_value(1, 1, 1, &[0.0, 0.0, 1.0]).unwrap();
        let options = ToneAdjustOptions {
            reds: -100,
            ..Default::default()
        };
        let out = contrast_and_saturate(&img, &options).unwrap();
        assert_eq!(out.pixel(0, 0, 0).unwrap(), &[0.0, 0.0, 1.0]);
    }
}
