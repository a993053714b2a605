//! Encoding tone-mapped buffers back to displayable files.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};

use crate::{ImageBuffer, Result};

/// Quantize a `[0, 1]` float buffer to an 8-bit RGB image.
///
/// Samples are clamped to `[0, 1]` and rounded; channels beyond RGB are
/// dropped.
pub fn to_rgb8(image: &ImageBuffer) -> RgbImage {
    let channels = image.channels as usize;
    let mut out = RgbImage::new(image.width, image.height);

    for (i, pixel) in out.pixels_mut().enumerate() {
        let base = i * channels;
        let mut quantized = [0u8; 3];
        for (c, q) in quantized.iter_mut().enumerate() {
            *q = (image.data[base + c].clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
        }
        *pixel = Rgb(quantized);
    }

    out
}

/// Encode a buffer as binary PPM bytes.
pub fn encode_ppm(image: &ImageBuffer) -> Result<Vec<u8>> {
    encode(image, ImageFormat::Pnm)
}

/// Encode a buffer as PNG bytes.
pub fn encode_png(image: &ImageBuffer) -> Result<Vec<u8>> {
    encode(image, ImageFormat::Png)
}

fn encode(image: &ImageBuffer, format: ImageFormat) -> Result<Vec<u8>> {
    let rgb = to_rgb8(image);
    let mut bytes = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut bytes), format)?;
    Ok(bytes)
}

/// Write a buffer to a PPM file.
pub fn write_ppm<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> Result<()> {
    to_rgb8(image).save_with_format(path, ImageFormat::Pnm)?;
    Ok(())
}

/// Write a buffer to a PNG file.
pub fn write_png<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> Result<()> {
    to_rgb8(image).save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
