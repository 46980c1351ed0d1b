//! Assertion utilities for testing.
//!
//! This module provides helper functions for making assertions in tests,
//! particularly for floating-point and color comparisons.

/// Default epsilon for floating-point comparisons
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Assert that two floating-point values are approximately equal.
///
/// # Panics
///
/// Panics if the absolute difference between `actual` and `expected` is greater than `epsilon`.
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: Option<f64>) {
    let epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
    let diff = (actual - expected).abs();

    assert!(
        diff <= epsilon,
        "Values not approximately equal: actual = {}, expected = {}, diff = {}, epsilon = {}",
        actual,
        expected,
        diff,
        epsilon
    );
}

/// Assert that every channel of `actual` is within `tolerance` of `expected`.
///
/// Lossy encodings shift colors slightly, so exact comparisons only make
/// sense for PNG output.
pub fn assert_color_close(actual: [u8; 3], expected: [u8; 3], tolerance: u8) {
    for (channel, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        let diff = (*a as i16 - *e as i16).unsigned_abs();
        assert!(
            diff <= tolerance as u16,
            "Colors differ in channel {}: actual = {:?}, expected = {:?}, tolerance = {}",
            channel,
            actual,
            expected,
            tolerance
        );
    }
}

/// Assert that a value is within expected bounds (inclusive).
pub fn assert_in_range(actual: f64, min: f64, max: f64) {
    assert!(
        actual >= min && actual <= max,
        "Value not in range: actual = {}, min = {}, max = {}",
        actual,
        min,
        max
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0, None);
        assert_approx_eq(1.0, 1.001, Some(0.01));
    }

    #[test]
    fn test_assert_color_close() {
        assert_color_close([10, 20, 30], [12, 18, 30], 2);
    }

    #[test]
    #[should_panic]
    fn test_assert_color_close_fails() {
        assert_color_close([10, 20, 30], [10, 20, 40], 5);
    }

    #[test]
    fn test_assert_in_range() {
        assert_in_range(5.0, 0.0, 10.0);
        assert_in_range(0.0, 0.0, 10.0);
        assert_in_range(10.0, 0.0, 10.0);
    }
}
