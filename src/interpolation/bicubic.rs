//! Bicubic interpolation.
//!
//! Uses the 4x4 neighborhood around a point with separable Catmull-Rom
//! weights. Missing neighbors are replaced by the mean of the valid ones so
//! coastlines do not ring; a fully missing neighborhood stays missing.

use super::common::{catmull_rom_weights, split_index};
use super::Interpolator;
use crate::grid::{grid_coords, GridView};

/// Bicubic (Catmull-Rom) interpolator
pub struct BicubicInterpolator;

impl BicubicInterpolator {
    /// Sample at fractional grid coordinates.
    pub fn sample(grid: GridView<'_>, g_lat: f64, g_lng: f64) -> Option<f64> {
        let (row0, t_lat) = split_index(g_lat);
        let (col0, t_lng) = split_index(g_lng);

        let mut taps = [[None; 4]; 4];
        let mut valid_sum = 0.0;
        let mut valid_count = 0usize;
        for (r, row) in taps.iter_mut().enumerate() {
            for (c, tap) in row.iter_mut().enumerate() {
                let value = grid
                    .get(row0 + r as i64 - 1, col0 + c as i64 - 1)
                    .map(f64::from);
                if let Some(v) = value {
                    valid_sum += v;
                    valid_count += 1;
                }
                *tap = value;
            }
        }

        if valid_count == 0 {
            return None;
        }
        let fill = valid_sum / valid_count as f64;

        let w_lng = catmull_rom_weights(t_lng);
        let w_lat = catmull_rom_weights(t_lat);

        let mut value = 0.0;
        for (row, wr) in taps.iter().zip(w_lat) {
            let row_value: f64 = row
                .iter()
                .zip(w_lng)
                .map(|(tap, wc)| tap.unwrap_or(fill) * wc)
                .sum();
            value += row_value * wr;
        }
        Some(value)
    }
}

impl Interpolator for BicubicInterpolator {
    fn interpolate(&self, grid: GridView<'_>, lat: f64, lng: f64) -> Option<f64> {
        let (g_lat, g_lng) = grid_coords(lat, lng);
        Self::sample(grid, g_lat, g_lng)
    }

    fn name(&self) -> &str {
        "bicubic"
    }
}
