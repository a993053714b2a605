//! Spatial filtering: kernel construction and true-2D convolution.
//!
//! The tone mapper runs this filter over the log-domain luminance plane to
//! estimate the low-frequency "base" layer. Kernels are square,
//! `(2r+1) x (2r+1)`, with non-negative weights normalized to sum 1; the
//! radius-0 kernel is the identity for every kernel type.
//!
//! Out-of-range neighbor indices are mirror-reflected back into the image
//! (never wrapped, never zero-padded), so a uniform plane stays uniform for
//! any kernel and radius.

use std::str::FromStr;

use rayon::prelude::*;

use crate::types::{Error, Result};
use crate::PARALLEL_THRESHOLD;

/// Kernel weighting function.
///
/// Edge-aware (bilateral-like) weighting is a configuration on top of the
/// kernel (see [`convolve`]), not a kernel type of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KernelType {
    /// Uniform weights, `1 / (2r+1)^2` each.
    Box,
    /// `w ∝ exp(-(i² + j²) / 2σ²)` with `σ = radius / 3`, normalized.
    #[default]
    Gaussian,
}

impl FromStr for KernelType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "box" => Ok(Self::Box),
            "gaussian" => Ok(Self::Gaussian),
            _ => Err(Error::InvalidKernelType(s.to_string())),
        }
    }
}

/// A normalized square convolution kernel.
#[derive(Debug, Clone)]
pub struct Kernel {
    radius: usize,
    /// `(2r+1)^2` weights, row-major, summing to 1.
    weights: Vec<f32>,
}

impl Kernel {
    /// Build a kernel of the given radius and type.
    ///
    /// Fails with [`Error::InvalidRadius`] if `radius < 0`. Radius 0 is the
    /// identity kernel for both types (the Gaussian σ degenerates there).
    pub fn build(radius: i32, kind: KernelType) -> Result<Self> {
        if radius < 0 {
            return Err(Error::InvalidRadius(radius));
        }

        let r = radius as usize;
        let side = 2 * r + 1;
        let mut weights = vec![0.0f32; side * side];

        match kind {
            KernelType::Box => {
                let w = 1.0 / (side * side) as f32;
                weights.fill(w);
            }
            KernelType::Gaussian if r == 0 => {
                weights[0] = 1.0;
            }
            KernelType::Gaussian => {
                let sigma = radius as f32 / 3.0;
                let denom = 2.0 * sigma * sigma;
                let mut sum = 0.0f32;
                for i in -(r as i64)..=(r as i64) {
                    for j in -(r as i64)..=(r as i64) {
                        let w = (-((i * i + j * j) as f32) / denom).exp();
                        weights[((i + r as i64) * side as i64 + (j + r as i64)) as usize] = w;
                        sum += w;
                    }
                }
                for w in &mut weights {
                    *w /= sum;
                }
            }
        }

        Ok(Self { radius: r, weights })
    }

    /// Kernel radius.
    #[inline]
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Weight at offset `(di, dj)` from the kernel center, `di, dj ∈ [-r, r]`.
    #[inline]
    pub fn weight(&self, di: i64, dj: i64) -> f32 {
        let r = self.radius as i64;
        debug_assert!(di.abs() <= r && dj.abs() <= r);
        self.weights[((di + r) * (2 * r + 1) + (dj + r)) as usize]
    }

    /// All weights, row-major.
    #[inline]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }
}

/// Mirror-reflect an index back into `[0, bound)`.
///
/// `-1` maps to `0`, `bound` maps to `bound - 1` (reflection without
/// repeating the edge sample), iterated until in range so any offset is safe
/// on any dimension.
#[inline]
pub fn reflect(mut index: i64, bound: u32) -> u32 {
    debug_assert!(bound > 0);
    let bound = bound as i64;
    loop {
        if index < 0 {
            index = -index - 1;
        } else if index >= bound {
            index = 2 * bound - index - 1;
        } else {
            return index as u32;
        }
    }
}

/// Convolve a single-channel plane with a kernel.
///
/// For every pixel the result is `Σ w(i,j) · plane[y+i][x+j]` over the kernel
/// support, with mirror reflection at the boundaries. With `edge_aware` set,
/// each tap is additionally weighted by `exp(-Δ²)` where `Δ` is the
/// center-to-neighbor difference with `|Δ|` clamped to `[0, 1]`; taps are
/// renormalized by the total effective weight, which is what keeps strong
/// edges from bleeding into the base layer.
///
/// Complexity is `O(width · height · (2r+1)²)`; the kernel is applied as a
/// true 2D window, not as two 1D passes. Rows are processed in parallel for
/// large planes.
pub fn convolve(
    plane: &[f32],
    width: u32,
    height: u32,
    kernel: &Kernel,
    edge_aware: bool,
) -> Result<Vec<f32>> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions(width, height));
    }
    let expected = width as usize * height as usize;
    if plane.len() != expected {
        return Err(Error::ShapeMismatch {
            width,
            height,
            channels: 1,
            expected,
            actual: plane.len(),
        });
    }

    let w = width as usize;
    let r = kernel.radius() as i64;

    let filter_row = |y: usize, row: &mut [f32]| {
        for (x, out) in row.iter_mut().enumerate() {
            let center = plane[y * w + x];
            let mut acc = 0.0f32;
            let mut weight_sum = 0.0f32;

            for di in -r..=r {
                let sy = reflect(y as i64 + di, height) as usize;
                for dj in -r..=r {
                    let sx = reflect(x as i64 + dj, width) as usize;
                    let sample = plane[sy * w + sx];

                    let mut tap = kernel.weight(di, dj);
                    if edge_aware {
                        let delta = (center - sample).abs().min(1.0);
                        tap *= (-delta * delta).exp();
                    }

                    acc += tap * sample;
                    weight_sum += tap;
                }
            }

            *out = acc / weight_sum;
        }
    };

    let mut filtered = vec![0.0f32; expected];
    if expected >= PARALLEL_THRESHOLD {
        filtered
            .par_chunks_mut(w)
            .enumerate()
            .for_each(|(y, row)| filter_row(y, row));
    } else {
        filtered
            .chunks_mut(w)
            .enumerate()
            .for_each(|(y, row)| filter_row(y, row));
    }

    Ok(filtered)
}
