//! Built-in colorways.
//!
//! These tables are fixed reference data; the rendered imagery is compared
//! against them, so thresholds and colors must not drift.

use once_cell::sync::Lazy;

use super::colormap::ColorRamp;

/// Names accepted by [`super::get_colormap`]
pub const COLORWAY_NAMES: [&str; 4] = ["thermal", "classic", "earth", "vivid"];

/// Colorway used when a request names neither a colorway nor custom stops
pub const DEFAULT_COLORWAY: &str = "thermal";

/// Deep violet through blue and cream to yellow, orange and dark red
pub const THERMAL: [(f64, [u8; 3]); 13] = [
    (-40.0, [40, 0, 90]),
    (-30.0, [60, 20, 160]),
    (-20.0, [40, 70, 220]),
    (-10.0, [60, 150, 240]),
    (0.0, [140, 210, 250]),
    (8.0, [170, 230, 200]),
    (13.0, [210, 240, 140]),
    (18.0, [255, 235, 50]),
    (25.0, [255, 220, 40]),
    (30.0, [255, 160, 30]),
    (35.0, [240, 90, 20]),
    (40.0, [200, 30, 20]),
    (45.0, [130, 0, 30]),
];

/// Rainbow ramp in the style of a classic weather map
pub const CLASSIC: [(f64, [u8; 3]); 9] = [
    (-40.0, [0, 0, 130]),
    (-25.0, [0, 0, 255]),
    (-10.0, [0, 128, 255]),
    (0.0, [0, 255, 255]),
    (10.0, [0, 255, 0]),
    (20.0, [255, 255, 0]),
    (30.0, [255, 128, 0]),
    (38.0, [255, 0, 0]),
    (45.0, [128, 0, 0]),
];

/// Muted, atlas-like tones from ice through forest to desert
pub const EARTH: [(f64, [u8; 3]); 9] = [
    (-40.0, [236, 240, 245]),
    (-25.0, [190, 205, 220]),
    (-10.0, [130, 160, 170]),
    (0.0, [110, 150, 120]),
    (10.0, [80, 130, 70]),
    (18.0, [150, 160, 80]),
    (25.0, [200, 175, 110]),
    (33.0, [180, 120, 70]),
    (45.0, [120, 60, 40]),
];

/// Saturated high-contrast ramp
pub const VIVID: [(f64, [u8; 3]); 10] = [
    (-40.0, [255, 0, 255]),
    (-30.0, [128, 0, 255]),
    (-20.0, [0, 0, 255]),
    (-10.0, [0, 160, 255]),
    (0.0, [0, 255, 200]),
    (10.0, [0, 230, 0]),
    (20.0, [200, 255, 0]),
    (28.0, [255, 200, 0]),
    (36.0, [255, 60, 0]),
    (45.0, [200, 0, 0]),
];

pub static THERMAL_RAMP: Lazy<ColorRamp> = Lazy::new(|| ColorRamp::from_table("thermal", &THERMAL));
pub static CLASSIC_RAMP: Lazy<ColorRamp> = Lazy::new(|| ColorRamp::from_table("classic", &CLASSIC));
pub static EARTH_RAMP: Lazy<ColorRamp> = Lazy::new(|| ColorRamp::from_table("earth", &EARTH));
pub static VIVID_RAMP: Lazy<ColorRamp> = Lazy::new(|| ColorRamp::from_table("vivid", &VIVID));
