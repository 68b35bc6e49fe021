//! Alpha to color regression test
//!
//! Tests alpha_to_color compositing from alpha and masks, automatic
//! color selection, padding and the pass-through cases.

use chromakey_color::flatten::{
    AlphaToColorOptions, FillColorSource, alpha_to_color, alpha_to_color_with_rng,
};
use chromakey_core::{Image, Mask, Rgb};
use chromakey_test::{RegParams, images};
use rand::SeedableRng;
use rand::rngs::StdRng;

const RED: Rgb = Rgb::new(255, 0, 0);

#[test]
fn flatten_reg() {
    let mut rp = RegParams::new("flatten");
    let user_red = AlphaToColorOptions::from_params("user_color", 0, "255, 0, 0", 0);

    // Test 1: alpha [1, 1, 0, 0] over red keeps opaque pixels and
    // replaces transparent ones exactly
    let rgb = images::gradient_rgb(2, 2, 200).unwrap();
    let rgba = images::with_alpha(&rgb, &[1.0, 1.0, 0.0, 0.0]).unwrap();
    let flat = alpha_to_color(&rgba, &user_red, None).unwrap();
    rp.compare_values(3.0, flat.channels() as f64, 0.0);
    for x in 0..2 {
        let src = rgb.pixel(0, x, 0).unwrap();
        let out = flat.pixel(0, x, 0).unwrap();
        for c in 0..3 {
            rp.compare_values(src[c] as f64, out[c] as f64, 0.0);
        }
        let out = flat.pixel(0, x, 1).unwrap();
        rp.compare_values(1.0, out[0] as f64, 0.0);
        rp.compare_values(0.0, out[1] as f64, 0.0);
        rp.compare_values(0.0, out[2] as f64, 0.0);
    }

    // Test 2: partial alpha is an "over" composite
    let half = images::solid_rgba(1, 3, 3, Rgb::new(0, 0, 255), 0.5).unwrap();
    let flat = alpha_to_color(&half, &user_red, None).unwrap();
    for px in flat.pixels() {
        rp.compare_values(0.5, px[0] as f64, 1e-6);
        rp.compare_values(0.0, px[1] as f64, 1e-6);
        rp.compare_values(0.5, px[2] as f64, 1e-6);
    }

    // Test 3: a mask replaces white areas regardless of alpha
    let opaque = images::solid_rgba(2, 2, 1, Rgb::new(0, 0, 255), 1.0).unwrap();
    let mask = Mask::from_data(1, 2, 1, vec![1.0, 0.25]).unwrap();
    let flat = alpha_to_color(&opaque, &user_red, Some(&mask)).unwrap();
    for b in 0..2 {
        let full = flat.pixel(b, 0, 0).unwrap();
        rp.compare_values(1.0, full[0] as f64, 0.0);
        rp.compare_values(0.0, full[2] as f64, 0.0);
        let part = flat.pixel(b, 1, 0).unwrap();
        rp.compare_values(0.25, part[0] as f64, 1e-6);
        rp.compare_values(0.75, part[2] as f64, 1e-6);
    }

    // Test 4: per-frame masks apply frame by frame
    let mask = Mask::from_data(2, 2, 1, vec![0.0, 0.0, 1.0, 1.0]).unwrap();
    let flat = alpha_to_color(&opaque, &user_red, Some(&mask)).unwrap();
    rp.compare_values(1.0, flat.pixel(0, 0, 0).unwrap()[2] as f64, 0.0);
    rp.compare_values(0.0, flat.pixel(1, 0, 0).unwrap()[2] as f64, 0.0);

    // Test 5: a mask of the wrong size leaves the input alone
    let mask = Mask::new_with_value(3, 2, 1, 1.0).unwrap();
    let flat = alpha_to_color(&opaque, &user_red, Some(&mask)).unwrap();
    rp.compare_images(&opaque, &flat, 0.0);

    // Test 6: RGB without a mask is unchanged; gray passes through
    let plain = images::gradient_rgb(5, 4, 10).unwrap();
    let flat = alpha_to_color(&plain, &user_red, None).unwrap();
    rp.compare_images(&plain, &flat, 0.0);
    let gray = Image::new_with_value(1, 2, 2, &[0.3]).unwrap();
    let flat = alpha_to_color(&gray, &user_red, None).unwrap();
    rp.compare_images(&gray, &flat, 0.0);

    // Test 7: padding fills with the resolved color
    let options = AlphaToColorOptions {
        pad_amount: 20,
        ..user_red.clone()
    };
    let clear = images::solid_rgba(1, 200, 100, Rgb::new(0, 0, 0), 1.0).unwrap();
    let flat = alpha_to_color(&clear, &options, None).unwrap();
    rp.compare_values(220.0, flat.width() as f64, 0.0);
    rp.compare_values(110.0, flat.height() as f64, 0.0);
    let border = flat.pixel(0, 9, 50).unwrap();
    rp.compare_values(1.0, border[0] as f64, 0.0);
    let inside = flat.pixel(0, 10, 5).unwrap();
    rp.compare_values(0.0, inside[0] as f64, 0.0);

    // Test 8: auto color avoids the image content
    let black = images::solid_rgba(1, 6, 6, Rgb::new(0, 0, 0), 0.0).unwrap();
    let options = AlphaToColorOptions {
        source: FillColorSource::Auto,
        threshold: 50,
        ..user_red.clone()
    };
    let mut rng = StdRng::seed_from_u64(42);
    let flat = alpha_to_color_with_rng(&black, &options, None, &mut rng).unwrap();
    let expected = Rgb::new(240, 240, 240).to_unit();
    for px in flat.pixels() {
        for c in 0..3 {
            rp.compare_values(expected[c] as f64, px[c] as f64, 0.0);
        }
    }

    // Test 9: an infeasible auto search falls back to the user color
    let options = AlphaToColorOptions {
        threshold: 255,
        ..options
    };
    let wide = images::vertical_bands(
        9,
        1,
        &[
            Rgb::new(0, 0, 0),
            Rgb::new(0, 0, 255),
            Rgb::new(0, 255, 0),
            Rgb::new(0, 255, 255),
            Rgb::new(255, 0, 0),
            Rgb::new(255, 0, 255),
            Rgb::new(255, 255, 0),
            Rgb::new(255, 255, 255),
            Rgb::new(128, 128, 128),
        ],
    )
    .unwrap();
    let wide = images::with_alpha(&wide, &[0.0; 9]).unwrap();
    let flat = alpha_to_color_with_rng(&wide, &options, None, &mut rng).unwrap();
    for px in flat.pixels() {
        rp.compare_values(1.0, px[0] as f64, 0.0);
        rp.compare_values(0.0, px[1] as f64, 0.0);
    }

    assert!(rp.cleanup(), "flatten regression test failed");
}
