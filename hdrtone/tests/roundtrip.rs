//! Format-adapter round trips through in-memory encode/decode.

mod common;

use common::{create_constant, create_gradient};
use hdrtone::{decode_bytes, encode_png, encode_ppm, tonemap, to_rgb8, ToneMapParams};
use image::ImageFormat;

/// 8-bit quantization tolerance plus a little float slack.
const QUANT_TOLERANCE: f32 = 1.0 / 255.0 + 1e-4;

#[test]
fn ppm_round_trip_preserves_quantized_samples() {
    let image = create_gradient(17, 9, 1.0);

    let bytes = encode_ppm(&image).unwrap();
    let decoded = decode_bytes(&bytes, ImageFormat::Pnm).unwrap();

    assert_eq!(decoded.width, 17);
    assert_eq!(decoded.height, 9);
    assert_eq!(decoded.channels, 3);
    for (i, (a, b)) in image.data.iter().zip(decoded.data.iter()).enumerate() {
        assert!(
            (a - b).abs() <= QUANT_TOLERANCE,
            "sample {i}: {a} vs {b}"
        );
    }
}

#[test]
fn png_round_trip_preserves_quantized_samples() {
    let image = create_gradient(8, 8, 1.0);

    let bytes = encode_png(&image).unwrap();
    let decoded = decode_bytes(&bytes, ImageFormat::Png).unwrap();

    for (a, b) in image.data.iter().zip(decoded.data.iter()) {
        assert!((a - b).abs() <= QUANT_TOLERANCE);
    }
}

#[test]
fn out_of_range_samples_clamp_on_encode() {
    // Radiance above 1.0 (or below 0) must quantize to the range ends, not
    // wrap or panic.
    let mut image = create_constant(2, 1, 0.5);
    image.set(0, 0, 0, 3.5);
    image.set(1, 0, 1, -0.25);

    let rgb = to_rgb8(&image);
    assert_eq!(rgb.get_pixel(0, 0).0[0], 255);
    assert_eq!(rgb.get_pixel(1, 0).0[1], 0);
}

#[test]
fn tonemapped_hdr_survives_ppm_encoding() {
    // Full path: HDR radiance -> tone map -> PPM bytes -> decode -> all
    // samples displayable.
    let radiance = create_gradient(16, 16, 6.0);
    let params = ToneMapParams {
        gamma: 0.4,
        ..ToneMapParams::default()
    };
    let ldr = tonemap(&radiance, &params).unwrap();

    let bytes = encode_ppm(&ldr).unwrap();
    let decoded = decode_bytes(&bytes, ImageFormat::Pnm).unwrap();

    assert_eq!(decoded.pixel_count(), 256);
    assert!(decoded.data.iter().all(|&v| (0.0..=1.0).contains(&v)));
}

#[test]
fn radiance_hdr_decodes_to_linear_float() {
    // Encode a small Radiance RGBE file by hand (flat format, no RLE):
    // header + one pixel per 4 bytes (mantissa r/g/b + shared exponent).
    let mut hdr = Vec::new();
    hdr.extend_from_slice(b"#?RADIANCE\n");
    hdr.extend_from_slice(b"FORMAT=32-bit_rle_rgbe\n\n");
    hdr.extend_from_slice(b"-Y 1 +X 2\n");
    // (1.0, 1.0, 1.0) -> mantissa 128 with exponent 129 (2^1 * 128/256)
    hdr.extend_from_slice(&[128, 128, 128, 129]);
    // (2.0, 2.0, 2.0) -> exponent one higher
    hdr.extend_from_slice(&[128, 128, 128, 130]);

    let decoded = decode_bytes(&hdr, ImageFormat::Hdr).unwrap();
    assert_eq!(decoded.width, 2);
    assert_eq!(decoded.height, 1);
    assert!((decoded.data[0] - 1.0).abs() < 1e-3);
    assert!((decoded.data[3] - 2.0).abs() < 1e-3, "got {}", decoded.data[3]);

    // And the pipeline accepts it directly.
    let out = tonemap(&decoded, &ToneMapParams::default()).unwrap();
    assert!((out.data[0] - 1.0).abs() < 1e-3);
}
