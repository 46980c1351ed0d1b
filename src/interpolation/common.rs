//! Common utilities for interpolation algorithms.

/// Catmull-Rom cubic convolution weights for taps at offsets -1, 0, +1, +2
/// and fractional position `t` in `[0, 1)`.
pub fn catmull_rom_weights(t: f64) -> [f64; 4] {
    let t2 = t * t;
    let t3 = t2 * t;
    [
        (-t3 + 2.0 * t2 - t) / 2.0,
        (3.0 * t3 - 5.0 * t2 + 2.0) / 2.0,
        (-3.0 * t3 + 4.0 * t2 + t) / 2.0,
        (t3 - t2) / 2.0,
    ]
}

/// Split a fractional index into its floor and the offset from it
pub fn split_index(index: f64) -> (i64, f64) {
    let base = index.floor();
    (base as i64, index - base)
}

/// Nearest integer index, rounding halves up
pub fn nearest_index(index: f64) -> i64 {
    (index + 0.5).floor() as i64
}
