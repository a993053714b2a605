//! Tone mapping: global gamma/gain/bias correction and the detail-preserving
//! base/detail mode.
//!
//! Both modes work on the luminance plane and reconstruct color by rescaling
//! the original RGB with the ratio of mapped to original luminance. The
//! filtered mode splits the log-domain luminance into a low-frequency base
//! (the spatial filter's output) and a high-frequency detail residual, then
//! gamma-compresses only the base:
//!
//! ```text
//! l  = ln(L + ε)
//! B  = filter(l)          base
//! S  = l - B              detail
//! L' = exp(γ·B + S) - ε
//! ```
//!
//! Compressing the base while letting detail pass through unattenuated is
//! what preserves local contrast and avoids the flattening of naive global
//! tone mapping.

use rayon::prelude::*;

use crate::filter::{convolve, Kernel, KernelType};
use crate::luminance::{extract, rescale, LUMA_EPSILON};
use crate::types::{Error, ImageBuffer, Result, SampleRange};
use crate::PARALLEL_THRESHOLD;

// ============================================================================
// Parameters
// ============================================================================

/// Spatial-filter configuration for the detail-preserving mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterParams {
    /// Kernel radius; the kernel spans `(2r+1) x (2r+1)` pixels.
    pub radius: i32,
    /// Kernel weighting function.
    pub kernel: KernelType,
    /// Add bilateral-like edge-aware weighting on top of the kernel.
    pub edge_aware: bool,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            radius: 2,
            kernel: KernelType::Gaussian,
            edge_aware: false,
        }
    }
}

/// Tone-mapping parameters for one pipeline invocation.
///
/// This struct is immutable from the pipeline's point of view: interactive
/// callers own one, mutate it between calls, and pass it by reference into
/// every [`tonemap`] invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneMapParams {
    /// Luminance exponent. Values below 1 compress dynamic range, values
    /// above 1 expand it; the exponent is caller-controlled and unrestricted.
    pub gamma: f32,
    /// Multiplicative pre-scale applied to luminance in global mode.
    pub gain: f32,
    /// Additive pre-offset applied to luminance in global mode.
    pub bias: f32,
    /// `Some` selects the detail-preserving filtered mode; `None` the global
    /// mode. The mode is selected per call, never persisted.
    pub filter: Option<FilterParams>,
    /// Output clamp bounds.
    pub range: SampleRange,
}

impl Default for ToneMapParams {
    fn default() -> Self {
        Self {
            gamma: 1.0,
            gain: 1.0,
            bias: 0.0,
            filter: None,
            range: SampleRange::NORMALIZED,
        }
    }
}

impl ToneMapParams {
    /// Validate parameter domains before any pixel work.
    pub fn validate(&self) -> Result<()> {
        if !self.gamma.is_finite() {
            return Err(Error::InvalidParameter("gamma must be finite"));
        }
        if !self.gain.is_finite() {
            return Err(Error::InvalidParameter("gain must be finite"));
        }
        if !self.bias.is_finite() {
            return Err(Error::InvalidParameter("bias must be finite"));
        }
        if !self.range.min.is_finite() || !self.range.max.is_finite() {
            return Err(Error::InvalidParameter("clamp range must be finite"));
        }
        if self.range.min >= self.range.max {
            return Err(Error::InvalidParameter("clamp range must be non-empty"));
        }
        if let Some(filter) = &self.filter {
            if filter.radius < 0 {
                return Err(Error::InvalidRadius(filter.radius));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Tone map an image, producing a new buffer of identical shape.
///
/// Orchestrates luminance extraction, the per-mode luminance correction, the
/// per-channel rescale, and the final clamp. The input buffer is never
/// mutated; callers adjusting parameters interactively keep the previous
/// frame. Channels beyond RGB (e.g. alpha) are copied through unchanged.
pub fn tonemap(image: &ImageBuffer, params: &ToneMapParams) -> Result<ImageBuffer> {
    params.validate()?;

    let source = extract(image)?;
    let target = match &params.filter {
        None => global_luminance(&source, params),
        Some(filter) => filtered_luminance(&source, image.width, image.height, params, filter)?,
    };

    reconstruct(image, &source, &target, params.range)
}

/// Global mode: `L' = exp(γ · ln(max(gain·L + bias, 0) + ε)) - ε` per pixel.
///
/// Equal to `(gain·L + bias)^γ` up to the epsilon floor, and exactly the
/// identity at `γ = 1, gain = 1, bias = 0`. On a constant image this
/// coincides with the filtered mode, whose base is the whole-image value.
fn global_luminance(source: &[f32], params: &ToneMapParams) -> Vec<f32> {
    let gamma = params.gamma;
    let gain = params.gain;
    let bias = params.bias;

    let map = |l: &f32| -> f32 {
        let pre = (gain * l + bias).max(0.0);
        (((pre + LUMA_EPSILON).ln() * gamma).exp() - LUMA_EPSILON).max(0.0)
    };

    if source.len() >= PARALLEL_THRESHOLD {
        source.par_iter().map(map).collect()
    } else {
        source.iter().map(map).collect()
    }
}

/// Filtered mode: gamma-compress the filtered log-luminance base, pass the
/// detail residual through, and return to linear luminance.
fn filtered_luminance(
    source: &[f32],
    width: u32,
    height: u32,
    params: &ToneMapParams,
    filter: &FilterParams,
) -> Result<Vec<f32>> {
    let kernel = Kernel::build(filter.radius, filter.kernel)?;

    let log_plane: Vec<f32> = source.iter().map(|l| (l + LUMA_EPSILON).ln()).collect();
    let base = convolve(&log_plane, width, height, &kernel, filter.edge_aware)?;

    let gamma = params.gamma;
    let map = |(l, b): (&f32, &f32)| -> f32 {
        let detail = l - b;
        ((gamma * b + detail).exp() - LUMA_EPSILON).max(0.0)
    };

    let target = if source.len() >= PARALLEL_THRESHOLD {
        log_plane.par_iter().zip(base.par_iter()).map(map).collect()
    } else {
        log_plane.iter().zip(base.iter()).map(map).collect()
    };

    Ok(target)
}

/// Rescale every pixel from its source to its target luminance and clamp.
fn reconstruct(
    image: &ImageBuffer,
    source: &[f32],
    target: &[f32],
    range: SampleRange,
) -> Result<ImageBuffer> {
    let channels = image.channels as usize;
    let mut output = ImageBuffer::new(image.width, image.height, image.channels)?;

    let map_pixel = |(i, pixel): (usize, &mut [f32])| {
        let rgb = rescale(image.rgb_at(i), target[i], source[i], range);
        pixel[..3].copy_from_slice(&rgb);
        // Extra channels (alpha) pass through untouched.
        let base = i * channels;
        pixel[3..].copy_from_slice(&image.data[base + 3..base + channels]);
    };

    if image.data.len() >= PARALLEL_THRESHOLD {
        output
            .data
            .par_chunks_mut(channels)
            .enumerate()
            .for_each(map_pixel);
    } else {
        output
            .data
            .chunks_mut(channels)
            .enumerate()
            .for_each(map_pixel);
    }

    Ok(output)
}

// ============================================================================
// Tests
// ============================================================================
