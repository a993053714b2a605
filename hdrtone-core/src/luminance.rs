//! Luminance extraction and per-channel rescale.
//!
//! Luminance is a fixed weighted sum of the RGB channels,
//! `L = (20·R + 40·G + B) / 61`, and color is preserved through tone mapping
//! by scaling each channel with the ratio of mapped to original luminance.

use rayon::prelude::*;

use crate::types::{Error, ImageBuffer, Result, SampleRange};
use crate::PARALLEL_THRESHOLD;

/// Floor added wherever a logarithm or a division touches luminance.
///
/// This is the single degenerate-luminance policy of the pipeline: zero
/// luminance never reaches `ln(0)` or a division by zero, and maps to
/// (near-)black output rather than an error.
pub const LUMA_EPSILON: f32 = 1e-6;

/// Luminance weights for R, G, B. They sum to 1.
pub const LUMA_WEIGHTS: [f32; 3] = [20.0 / 61.0, 40.0 / 61.0, 1.0 / 61.0];

/// Weighted luminance of a single RGB triple.
#[inline]
pub fn luminance_of(rgb: [f32; 3]) -> f32 {
    LUMA_WEIGHTS[0] * rgb[0] + LUMA_WEIGHTS[1] * rgb[1] + LUMA_WEIGHTS[2] * rgb[2]
}

/// Extract the per-pixel luminance plane of an image.
///
/// Requires at least 3 channels. This is the pipeline's single validation
/// point for degenerate input: a non-finite or negative luminance (only
/// possible from invalid input samples) fails with
/// [`Error::DegenerateLuminance`], so every downstream stage can assume a
/// finite, non-negative plane.
pub fn extract(image: &ImageBuffer) -> Result<Vec<f32>> {
    if image.channels < 3 {
        return Err(Error::InvalidParameter(
            "luminance extraction requires at least 3 channels",
        ));
    }

    let width = image.width as usize;
    let pixel = |i: usize| -> Result<f32> {
        let l = luminance_of(image.rgb_at(i));
        if !l.is_finite() || l < 0.0 {
            return Err(Error::DegenerateLuminance {
                x: (i % width) as u32,
                y: (i / width) as u32,
                value: l,
            });
        }
        Ok(l)
    };

    let pixels = image.pixel_count();
    if pixels >= PARALLEL_THRESHOLD {
        (0..pixels).into_par_iter().map(pixel).collect()
    } else {
        (0..pixels).map(pixel).collect()
    }
}

/// Rescale an RGB triple from its source luminance to a target luminance,
/// clamping each channel to `range`.
///
/// `scale = target / max(source, ε)`; a zero source therefore produces black
/// rather than a division by zero. Inputs are assumed finite and non-negative
/// (see [`extract`]).
#[inline]
pub fn rescale(rgb: [f32; 3], target: f32, source: f32, range: SampleRange) -> [f32; 3] {
    let scale = target / source.max(LUMA_EPSILON);
    [
        range.clamp(rgb[0] * scale),
        range.clamp(rgb[1] * scale),
        range.clamp(rgb[2] * scale),
    ]
}
