//! Decoding images into the core's canonical buffer representation.
//!
//! Everything is normalized here, at the adapter boundary: 8-bit formats
//! (PPM, PNG) are scaled to `[0, 1]`, Radiance RGBE decodes to linear float
//! radiance (which may exceed 1.0 for HDR content). The core never sees a
//! `[0, 255]`-scaled buffer unless a caller explicitly constructs one.

use std::path::Path;

use image::DynamicImage;

use crate::{ImageBuffer, Result};

/// Decode an image file into an [`ImageBuffer`].
///
/// The format is detected from the file contents/extension; Radiance `.hdr`
/// (RGBE), PPM, and PNG are the supported inputs.
pub fn decode_path<P: AsRef<Path>>(path: P) -> Result<ImageBuffer> {
    let img = image::ImageReader::open(path)?
        .with_guessed_format()?
        .decode()?;
    from_dynamic(img)
}

/// Decode an in-memory encoded image of a known format.
pub fn decode_bytes(bytes: &[u8], format: image::ImageFormat) -> Result<ImageBuffer> {
    let img = image::load_from_memory_with_format(bytes, format)?;
    from_dynamic(img)
}

/// Convert a decoded image into the canonical float buffer.
fn from_dynamic(img: DynamicImage) -> Result<ImageBuffer> {
    // to_rgb32f maps 8-bit samples to [0, 1] and keeps float formats
    // (Radiance RGBE) as-is.
    let rgb = img.to_rgb32f();
    let (width, height) = rgb.dimensions();
    Ok(ImageBuffer::from_data(width, height, 3, rgb.into_raw())?)
}
