//! Core types for the tone-mapping pipeline.

use thiserror::Error;

use crate::filter::reflect;
use crate::limits;

/// Errors that can occur during tone-mapping operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Image dimensions are invalid (zero width or height).
    #[error("invalid image dimensions: {0}x{1}")]
    InvalidDimensions(u32, u32),

    /// Buffer length is inconsistent with the declared shape.
    #[error(
        "shape mismatch: {width}x{height}x{channels} requires {expected} samples, got {actual}"
    )]
    ShapeMismatch {
        /// Declared image width.
        width: u32,
        /// Declared image height.
        height: u32,
        /// Declared channels per pixel.
        channels: u8,
        /// Sample count implied by the declared shape.
        expected: usize,
        /// Sample count actually supplied.
        actual: usize,
    },

    /// Kernel radius is negative.
    #[error("invalid kernel radius: {0}")]
    InvalidRadius(i32),

    /// Luminance is non-finite or negative, which can only come from invalid
    /// input samples. Zero luminance is not degenerate: it is floored to
    /// [`LUMA_EPSILON`](crate::luminance::LUMA_EPSILON) wherever a logarithm
    /// or a division needs it.
    #[error("degenerate luminance {value} at pixel ({x}, {y})")]
    DegenerateLuminance {
        /// Pixel column.
        x: u32,
        /// Pixel row.
        y: u32,
        /// The offending luminance value.
        value: f32,
    },

    /// A textual kernel code did not name a known kernel type.
    #[error("unknown kernel type: {0:?} (expected \"box\" or \"gaussian\")")]
    InvalidKernelType(String),

    /// A tone-mapping parameter is outside its numeric domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    /// Input exceeds safety limits.
    #[error("input exceeds safety limit: {0}")]
    LimitExceeded(String),
}

/// Result type for tone-mapping operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Output clamp bounds for a pixel buffer.
///
/// The pipeline itself is range-agnostic: it clamps reconstructed channels to
/// whatever bounds the caller declares. The canonical internal convention is
/// [`SampleRange::NORMALIZED`]; 8-bit-scaled buffers use
/// [`SampleRange::EIGHT_BIT`]. Range conversion belongs to the format
/// adapter, never to the core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRange {
    /// Lower clamp bound.
    pub min: f32,
    /// Upper clamp bound.
    pub max: f32,
}

impl SampleRange {
    /// Normalized float range `[0, 1]` (canonical).
    pub const NORMALIZED: Self = Self { min: 0.0, max: 1.0 };

    /// Integer-scaled float range `[0, 255]`.
    pub const EIGHT_BIT: Self = Self { min: 0.0, max: 255.0 };

    /// Clamp a single sample to this range.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

impl Default for SampleRange {
    fn default() -> Self {
        Self::NORMALIZED
    }
}

/// An in-memory float image: row-major, `channels` interleaved per pixel.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Channels per pixel (3 for RGB, 4 for RGBA).
    pub channels: u8,
    /// Sample data, `width * height * channels` values.
    pub data: Vec<f32>,
}

impl ImageBuffer {
    /// Create a zero-filled image with the given shape.
    ///
    /// Returns an error if dimensions are zero, exceed safety limits, or
    /// `channels == 0`.
    pub fn new(width: u32, height: u32, channels: u8) -> Result<Self> {
        Self::validate_shape(width, height, channels)?;

        let len = width as usize * height as usize * channels as usize;
        Ok(Self {
            width,
            height,
            channels,
            data: vec![0.0; len],
        })
    }

    /// Create an image from existing samples.
    ///
    /// Fails with [`Error::ShapeMismatch`] unless
    /// `data.len() == width * height * channels` exactly.
    pub fn from_data(width: u32, height: u32, channels: u8, data: Vec<f32>) -> Result<Self> {
        Self::validate_shape(width, height, channels)?;

        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(Error::ShapeMismatch {
                width,
                height,
                channels,
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Validate shape against basic and safety constraints.
    fn validate_shape(width: u32, height: u32, channels: u8) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions(width, height));
        }
        if channels == 0 {
            return Err(Error::InvalidParameter("channels must be at least 1"));
        }

        if width > limits::MAX_IMAGE_DIMENSION || height > limits::MAX_IMAGE_DIMENSION {
            return Err(Error::LimitExceeded(format!(
                "dimension {} exceeds maximum {}",
                width.max(height),
                limits::MAX_IMAGE_DIMENSION
            )));
        }

        let total_pixels = width as u64 * height as u64;
        if total_pixels > limits::MAX_TOTAL_PIXELS {
            return Err(Error::LimitExceeded(format!(
                "total pixels {} exceeds maximum {}",
                total_pixels,
                limits::MAX_TOTAL_PIXELS
            )));
        }

        Ok(())
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Read one sample. Out-of-range `x`/`y` are mirror-reflected back into
    /// the image (see [`reflect`]); `channel` must be in range.
    #[inline]
    pub fn get(&self, x: i64, y: i64, channel: usize) -> f32 {
        debug_assert!(channel < self.channels as usize);
        let x = reflect(x, self.width) as usize;
        let y = reflect(y, self.height) as usize;
        self.data[(y * self.width as usize + x) * self.channels as usize + channel]
    }

    /// Write one sample at an in-bounds position.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, channel: usize, value: f32) {
        debug_assert!(x < self.width && y < self.height);
        debug_assert!(channel < self.channels as usize);
        self.data[(y as usize * self.width as usize + x as usize) * self.channels as usize
            + channel] = value;
    }

    /// Read the RGB triple of the pixel at flat index `i` (first three
    /// channels; the buffer must have at least three).
    #[inline]
    pub(crate) fn rgb_at(&self, i: usize) -> [f32; 3] {
        let base = i * self.channels as usize;
        [self.data[base], self.data[base + 1], self.data[base + 2]]
    }
}
