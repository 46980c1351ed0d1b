//! Piecewise-linear color ramps.
//!
//! A ramp is an ordered table of `(threshold, rgb)` stops. Values between two
//! stops are blended channel by channel; values outside the table clamp to the
//! end colors and missing values map to white.

use serde::{Deserialize, Serialize};

use crate::error::{IsothermError, Result};

/// Color used for missing data and ocean pixels
pub const MISSING_COLOR: [u8; 3] = [255, 255, 255];

/// One entry of a color ramp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// Temperature at which `color` applies exactly
    pub threshold: f64,
    /// RGB color
    pub color: [u8; 3],
}

impl ColorStop {
    pub const fn new(threshold: f64, color: [u8; 3]) -> Self {
        Self { threshold, color }
    }
}

/// A validated, strictly increasing stop table.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRamp {
    name: String,
    stops: Vec<ColorStop>,
}

impl ColorRamp {
    /// Validate a stop table. Fails when there are fewer than two stops or the
    /// thresholds are not finite and strictly increasing.
    pub fn new(name: impl Into<String>, stops: Vec<ColorStop>) -> Result<Self> {
        if stops.len() < 2 {
            return Err(IsothermError::InvalidColorRamp {
                message: format!("at least 2 stops are required, got {}", stops.len()),
            });
        }

        if let Some(stop) = stops.iter().find(|s| !s.threshold.is_finite()) {
            return Err(IsothermError::InvalidColorRamp {
                message: format!("threshold {} is not finite", stop.threshold),
            });
        }

        if let Some(pair) = stops.windows(2).find(|w| w[0].threshold >= w[1].threshold) {
            return Err(IsothermError::InvalidColorRamp {
                message: format!(
                    "thresholds must be strictly increasing ({} is followed by {})",
                    pair[0].threshold, pair[1].threshold
                ),
            });
        }

        Ok(Self {
            name: name.into(),
            stops,
        })
    }

    /// Build a ramp from a constant table. Panics on a malformed table, so it
    /// is only meant for the built-in colorways.
    pub(crate) fn from_table(name: &str, table: &[(f64, [u8; 3])]) -> Self {
        let stops = table
            .iter()
            .map(|&(threshold, color)| ColorStop::new(threshold, color))
            .collect();
        match Self::new(name, stops) {
            Ok(ramp) => ramp,
            Err(e) => panic!("built-in colorway {name} is malformed: {e}"),
        }
    }

    /// Name of the colorway, or `custom`
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Map a temperature to RGB. `None` and NaN map to [`MISSING_COLOR`].
    pub fn color_of(&self, value: Option<f64>) -> [u8; 3] {
        let t = match value {
            Some(t) if !t.is_nan() => t,
            _ => return MISSING_COLOR,
        };

        let first = &self.stops[0];
        let last = &self.stops[self.stops.len() - 1];
        if t <= first.threshold {
            return first.color;
        }
        if t >= last.threshold {
            return last.color;
        }

        for pair in self.stops.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if a.threshold <= t && t <= b.threshold {
                let p = (t - a.threshold) / (b.threshold - a.threshold);
                return lerp_color(a.color, b.color, p);
            }
        }

        MISSING_COLOR
    }

    /// RGBA variant of [`ColorRamp::color_of`] with full opacity.
    pub fn rgba_of(&self, value: Option<f64>) -> [u8; 4] {
        let [r, g, b] = self.color_of(value);
        [r, g, b, 255]
    }
}

/// Round half up, matching the reference rendering.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Linear interpolation between two colors, rounded to the nearest integer
pub fn lerp_color(c1: [u8; 3], c2: [u8; 3], t: f64) -> [u8; 3] {
    let channel = |a: u8, b: u8| -> u8 {
        let v = a as f64 + (b as f64 - a as f64) * t;
        round_half_up(v).clamp(0.0, 255.0) as u8
    };
    [
        channel(c1[0], c2[0]),
        channel(c1[1], c2[1]),
        channel(c1[2], c2[2]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_stop() -> ColorRamp {
        ColorRamp::new(
            "test",
            vec![
                ColorStop::new(0.0, [0, 0, 0]),
                ColorStop::new(10.0, [255, 255, 255]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_lerp_color() {
        let black = [0, 0, 0];
        let white = [255, 255, 255];

        // 127.5 rounds up
        let mid = lerp_color(black, white, 0.5);
        assert_eq!(mid, [128, 128, 128]);
        assert_eq!(lerp_color(black, white, 0.0), black);
        assert_eq!(lerp_color(black, white, 1.0), white);
    }

    #[test]
    fn test_color_of_clamps_and_interpolates() {
        let ramp = two_stop();
        assert_eq!(ramp.color_of(Some(-50.0)), [0, 0, 0]);
        assert_eq!(ramp.color_of(Some(50.0)), [255, 255, 255]);
        assert_eq!(ramp.color_of(Some(2.0)), [51, 51, 51]);
    }

    #[test]
    fn test_color_of_stop_boundaries_are_exact() {
        let ramp = ColorRamp::new(
            "test",
            vec![
                ColorStop::new(-10.0, [10, 20, 30]),
                ColorStop::new(0.0, [100, 110, 120]),
                ColorStop::new(10.0, [200, 210, 220]),
            ],
        )
        .unwrap();

        for stop in ramp.stops() {
            assert_eq!(ramp.color_of(Some(stop.threshold)), stop.color);
        }
    }

    #[test]
    fn test_missing_is_white() {
        let ramp = two_stop();
        assert_eq!(ramp.color_of(None), MISSING_COLOR);
        assert_eq!(ramp.color_of(Some(f64::NAN)), MISSING_COLOR);
        assert_eq!(ramp.rgba_of(None), [255, 255, 255, 255]);
    }

    #[test]
    fn test_malformed_tables_fail_fast() {
        assert!(ColorRamp::new("empty", Vec::new()).is_err());
        assert!(ColorRamp::new("single", vec![ColorStop::new(0.0, [0, 0, 0])]).is_err());
        assert!(ColorRamp::new(
            "unsorted",
            vec![
                ColorStop::new(5.0, [0, 0, 0]),
                ColorStop::new(1.0, [9, 9, 9]),
            ],
        )
        .is_err());
        assert!(ColorRamp::new(
            "duplicate",
            vec![
                ColorStop::new(1.0, [0, 0, 0]),
                ColorStop::new(1.0, [9, 9, 9]),
            ],
        )
        .is_err());
        assert!(ColorRamp::new(
            "nan",
            vec![
                ColorStop::new(f64::NAN, [0, 0, 0]),
                ColorStop::new(1.0, [9, 9, 9]),
            ],
        )
        .is_err());
    }
}
