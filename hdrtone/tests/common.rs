//! Common test utilities for synthetic image generation.
//!
//! These helpers create test images programmatically, avoiding the need to
//! include binary test files in the repository.

#![allow(dead_code)]

use hdrtone::ImageBuffer;

/// Create a constant-color image.
pub fn create_constant(width: u32, height: u32, value: f32) -> ImageBuffer {
    ImageBuffer::from_data(
        width,
        height,
        3,
        vec![value; (width * height * 3) as usize],
    )
    .unwrap()
}

/// Create a horizontal radiance gradient from black to `peak`.
pub fn create_gradient(width: u32, height: u32, peak: f32) -> ImageBuffer {
    let mut img = ImageBuffer::new(width, height, 3).unwrap();
    for y in 0..height {
        for x in 0..width {
            let t = x as f32 / (width - 1).max(1) as f32;
            let value = t * peak;
            img.set(x, y, 0, value);
            img.set(x, y, 1, value);
            img.set(x, y, 2, value);
        }
    }
    img
}

/// Create a dark field with a single bright spot in the center.
pub fn create_spot(width: u32, height: u32, floor: f32, spot: f32) -> ImageBuffer {
    let mut img = create_constant(width, height, floor);
    for c in 0..3 {
        img.set(width / 2, height / 2, c, spot);
    }
    img
}

/// Maximum absolute difference between two buffers of equal shape.
pub fn max_abs_diff(a: &ImageBuffer, b: &ImageBuffer) -> f32 {
    assert_eq!(a.data.len(), b.data.len());
    a.data
        .iter()
        .zip(b.data.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f32::max)
}
