//! HDR tone mapping with file-format adapters.
//!
//! This crate wraps the pure pipeline of [`hdrtone_core`] with the thin
//! format-adapter layer the core deliberately excludes:
//!
//! - Decoding Radiance RGBE (`.hdr`) and PPM images into the core's
//!   [`ImageBuffer`], normalized to the canonical `[0, 1]` float range.
//! - Encoding tone-mapped buffers back to PPM or PNG.
//!
//! # Crate Structure
//!
//! - [`hdrtone_core`] - Pure tone-mapping math (no I/O, no file formats)
//! - `hdrtone` (this crate) - Format adapters around the core
//!
//! # Example
//!
//! ```ignore
//! use hdrtone::{decode_path, write_ppm, tonemap, FilterParams, KernelType, ToneMapParams};
//!
//! let radiance = decode_path("memorial.hdr")?;
//! let params = ToneMapParams {
//!     gamma: 0.4,
//!     filter: Some(FilterParams::default()),
//!     ..ToneMapParams::default()
//! };
//! let ldr = tonemap(&radiance, &params)?;
//! write_ppm(&ldr, "memorial.ppm")?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

use thiserror::Error;

// Re-export the core modules
pub use hdrtone_core::filter;
pub use hdrtone_core::luminance;

// Re-export core types at crate root
pub use hdrtone_core::{
    convolve, extract, limits, rescale, tonemap, Error as CoreError, FilterParams, ImageBuffer,
    Kernel, KernelType, SampleRange, ToneMapParams, LUMA_EPSILON, LUMA_WEIGHTS,
};

mod decode;
mod encode;

pub use decode::{decode_bytes, decode_path};
pub use encode::{encode_png, encode_ppm, to_rgb8, write_png, write_ppm};

/// Errors from the format-adapter layer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// An error from the core pipeline.
    #[error(transparent)]
    Core(#[from] hdrtone_core::Error),

    /// The image codec failed to decode or encode.
    #[error("image codec error: {0}")]
    Codec(#[from] image::ImageError),

    /// Filesystem I/O failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for adapter operations.
pub type Result<T> = std::result::Result<T, Error>;
