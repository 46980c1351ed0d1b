//! Image inspection utilities for testing.
//!
//! This module provides helper functions for decoding and probing rendered images.

use image::{DynamicImage, GenericImageView, ImageError, ImageFormat};

/// Load an image from a byte array
pub fn load_image_from_bytes(bytes: &[u8]) -> Result<DynamicImage, ImageError> {
    image::load_from_memory(bytes)
}

/// Detect image format from bytes
pub fn detect_image_format(bytes: &[u8]) -> Option<ImageFormat> {
    image::guess_format(bytes).ok()
}

/// Check image dimensions
pub fn assert_image_dimensions(
    image: &DynamicImage,
    expected_width: u32,
    expected_height: u32,
) -> Result<(), String> {
    let (width, height) = image.dimensions();
    if width != expected_width || height != expected_height {
        return Err(format!(
            "Image dimensions differ: actual = {}x{}, expected = {}x{}",
            width, height, expected_width, expected_height
        ));
    }
    Ok(())
}

/// RGB of one pixel
pub fn rgb_at(image: &DynamicImage, x: u32, y: u32) -> [u8; 3] {
    let [r, g, b, _] = image.get_pixel(x, y).0;
    [r, g, b]
}

/// Mean RGB over a square of side `2 * half + 1` centered on `(x, y)`.
///
/// Averaging keeps JPEG block artifacts from deciding a test.
pub fn mean_rgb(image: &DynamicImage, x: u32, y: u32, half: u32) -> [u8; 3] {
    let mut sum = [0u64; 3];
    let mut count = 0u64;
    for py in y.saturating_sub(half)..=(y + half).min(image.height() - 1) {
        for px in x.saturating_sub(half)..=(x + half).min(image.width() - 1) {
            let rgb = rgb_at(image, px, py);
            for (s, c) in sum.iter_mut().zip(rgb) {
                *s += c as u64;
            }
            count += 1;
        }
    }
    sum.map(|s| ((s + count / 2) / count) as u8)
}

/// Whether every channel is at least `min`
pub fn is_near_white(rgb: [u8; 3], min: u8) -> bool {
    rgb.iter().all(|&c| c >= min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_mean_rgb() {
        let mut img = RgbaImage::from_pixel(4, 4, Rgba([100, 100, 100, 255]));
        img.put_pixel(0, 0, Rgba([200, 200, 200, 255]));
        let img = DynamicImage::ImageRgba8(img);

        assert_eq!(mean_rgb(&img, 3, 3, 0), [100, 100, 100]);
        assert_eq!(rgb_at(&img, 0, 0), [200, 200, 200]);
        // (200 + 3 * 100) / 4
        assert_eq!(mean_rgb(&img, 0, 0, 1), [125, 125, 125]);
    }

    #[test]
    fn test_is_near_white() {
        assert!(is_near_white([250, 251, 255], 245));
        assert!(!is_near_white([250, 200, 255], 245));
    }
}
