//! Core tone-mapping math for HDR → LDR conversion.
//!
//! This crate provides the pure computational components of the pipeline:
//! - Luminance extraction and per-channel rescale
//! - Spatial filtering (box / Gaussian kernels, optional edge-aware weights)
//! - Global and detail-preserving (base/detail) tone mapping
//!
//! This crate has **no I/O and no file-format dependency**. For PPM/RGBE
//! decoding and encoding around the pipeline, use the `hdrtone` crate.
//!
//! Every operation is a pure function of its inputs: buffers go in, a freshly
//! allocated buffer comes out, and no state is held between calls. Interactive
//! callers re-invoke the pipeline with a new [`ToneMapParams`] on every
//! parameter change.
//!
//! # Example
//!
//! ```ignore
//! use hdrtone_core::{tonemap, FilterParams, ImageBuffer, KernelType, ToneMapParams};
//!
//! let image = ImageBuffer::from_data(width, height, 3, samples)?;
//!
//! // Detail-preserving tone mapping: only the low-frequency base is
//! // gamma-compressed, local contrast passes through.
//! let params = ToneMapParams {
//!     gamma: 0.5,
//!     filter: Some(FilterParams {
//!         radius: 2,
//!         kernel: KernelType::Gaussian,
//!         edge_aware: true,
//!     }),
//!     ..ToneMapParams::default()
//! };
//! let ldr = tonemap(&image, &params)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod filter;
pub mod luminance;
pub mod tonemap;
mod types;

// Re-export core types
pub use filter::{convolve, reflect, Kernel, KernelType};
pub use luminance::{extract, rescale, LUMA_EPSILON, LUMA_WEIGHTS};
pub use tonemap::{tonemap, FilterParams, ToneMapParams};
pub use types::{Error, ImageBuffer, Result, SampleRange};

/// Safety limits for allocation.
pub mod limits {
    /// Maximum image dimension (width or height).
    pub const MAX_IMAGE_DIMENSION: u32 = 65535;

    /// Maximum total pixels (width * height).
    pub const MAX_TOTAL_PIXELS: u64 = 500_000_000; // 500 megapixels
}

/// Threshold (in elements) for switching per-pixel loops to rayon.
pub(crate) const PARALLEL_THRESHOLD: usize = 100_000;
