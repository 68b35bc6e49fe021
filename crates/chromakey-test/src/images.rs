//! Synthetic test images
//!
//! The engine has no codec, so regression tests build their inputs
//! procedurally.

use crate::error::{TestError, TestResult};
use chromakey_core::{Image, Rgb};

fn build(name: &'static str, r: chromakey_core::Result<Image>) -> TestResult<Image> {
    r.map_err(|source| TestError::ImageBuild { name, source })
}

/// Opaque RGB image filled with one 8-bit color
pub fn solid_rgb(batch: u32, width: u32, height: u32, color: Rgb) -> TestResult<Image> {
    build(
        "solid_rgb",
        Image::new_with_value(batch, width, height, &color.to_unit()),
    )
}

/// RGBA image filled with one 8-bit color and a constant alpha
pub fn solid_rgba(batch: u32, width: u32, height: u32, color: Rgb, alpha: f32) -> TestResult<Image> {
    let [r, g, b] = color.to_unit();
    build(
        "solid_rgba",
        Image::new_with_value(batch, width, height, &[r, g, b, alpha]),
    )
}

/// RGB gradient: red grows left to right, green top to bottom, blue is
/// fixed at `blue`.
pub fn gradient_rgb(width: u32, height: u32, blue: u8) -> TestResult<Image> {
    let x_max = width.saturating_sub(1).max(1);
    let y_max = height.saturating_sub(1).max(1);
    let mut data = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / x_max) as u8;
            let g = (y * 255 / y_max) as u8;
            data.extend_from_slice(&Rgb::new(r, g, blue).to_unit());
        }
    }
    build("gradient_rgb", Image::from_data(1, width, height, 3, data))
}

/// Image split into vertical bands of the given colors, equal widths
/// (the last band absorbs the remainder).
pub fn vertical_bands(width: u32, height: u32, colors: &[Rgb]) -> TestResult<Image> {
    if colors.is_empty() {
        return build(
            "vertical_bands",
            Err(chromakey_core::Error::InvalidParameter(
                "at least one band color required".into(),
            )),
        );
    }
    let band = (width / colors.len() as u32).max(1);
    let mut data = Vec::with_capacity(width as usize * height as usize * 3);
    for _ in 0..height {
        for x in 0..width {
            let idx = ((x / band) as usize).min(colors.len() - 1);
            data.extend_from_slice(&colors[idx].to_unit());
        }
    }
    build("vertical_bands", Image::from_data(1, width, height, 3, data))
}

/// Attach a per-pixel alpha channel to an RGB image.
///
/// `alpha` holds one value per pixel of the whole batch.
pub fn with_alpha(rgb: &Image, alpha: &[f32]) -> TestResult<Image> {
    if alpha.len() != rgb.pixel_count() {
        return build(
            "with_alpha",
            Err(chromakey_core::Error::DataLength {
                expected: rgb.pixel_count(),
                actual: alpha.len(),
            }),
        );
    }
    let mut data = Vec::with_capacity(rgb.pixel_count() * 4);
    for (px, &a) in rgb.pixels().zip(alpha) {
        data.extend_from_slice(&px[..3]);
        data.push(a);
    }
    build(
        "with_alpha",
        Image::from_data(rgb.batch(), rgb.width(), rgb.height(), 4, data),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_corners() {
        let img = gradient_rgb(16, 8, 40).unwrap();
        assert_eq!(img.pixel(0, 0, 0).unwrap(), &Rgb::new(0, 0, 40).to_unit());
        assert_eq!(
            img.pixel(0, 15, 7).unwrap(),
            &Rgb::new(255, 255, 40).to_unit()
        );
    }

    #[test]
    fn test_vertical_bands() {
        let colors = [Rgb::new(255, 0, 0), Rgb::new(0, 0, 255)];
        let img = vertical_bands(5, 2, &colors).unwrap();
        assert_eq!(img.pixel(0, 1, 1).unwrap(), &colors[0].to_unit());
        assert_eq!(img.pixel(0, 4, 0).unwrap(), &colors[1].to_unit());
        assert!(vertical_bands(5, 2, &[]).is_err());
    }

    #[test]
    fn test_with_alpha() {
        let rgb = solid_rgb(1, 2, 1, Rgb::new(0, 0, 0)).unwrap();
        let rgba = with_alpha(&rgb, &[1.0, 0.0]).unwrap();
        assert_eq!(rgba.channels(), 4);
        assert_eq!(rgba.pixel(0, 1, 0).unwrap()[3], 0.0);
        assert!(with_alpha(&rgb, &[1.0]).is_err());
    }
}
