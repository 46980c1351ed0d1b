//! Nearest neighbor interpolation.
//!
//! Selects the value of the nearest grid node. The renderer uses it as the
//! ocean mask: a pixel is ocean exactly when its nearest node is missing,
//! regardless of what the smoothed bicubic value says.

use super::common::nearest_index;
use super::Interpolator;
use crate::grid::{grid_coords, GridView};

/// Nearest neighbor interpolator
pub struct NearestInterpolator;

impl NearestInterpolator {
    /// Value of the nearest node to fractional grid coordinates.
    pub fn sample(grid: GridView<'_>, g_lat: f64, g_lng: f64) -> Option<f64> {
        grid.get(nearest_index(g_lat), nearest_index(g_lng))
            .map(f64::from)
    }
}

impl Interpolator for NearestInterpolator {
    fn interpolate(&self, grid: GridView<'_>, lat: f64, lng: f64) -> Option<f64> {
        let (g_lat, g_lng) = grid_coords(lat, lng);
        Self::sample(grid, g_lat, g_lng)
    }

    fn name(&self) -> &str {
        "nearest"
    }
}

/// Whether the nearest grid node to `(lat, lng)` has no data.
pub fn is_ocean(grid: GridView<'_>, lat: f64, lng: f64) -> bool {
    let (g_lat, g_lng) = grid_coords(lat, lng);
    grid.is_missing(nearest_index(g_lat), nearest_index(g_lng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::TemperatureGrid;

    fn island() -> TemperatureGrid {
        // A single land node at (0°, 0°)
        TemperatureGrid::from_fn(|lat, lng| {
            if lat == 0.0 && lng == 0.0 {
                Some(21.0)
            } else {
                None
            }
        })
    }

    #[test]
    fn test_nearest_picks_closest_node() {
        let grid = TemperatureGrid::from_fn(|lat, lng| Some((lat + lng) as f32));
        let view = grid.view();

        // 0.9° from (0, 0) rounds to the node itself
        assert_eq!(NearestInterpolator.interpolate(view, 0.9, -0.9), Some(0.0));
        // 1.0° is half a cell and rounds up the index (south / east)
        assert_eq!(NearestInterpolator.interpolate(view, 1.0, 1.0), Some(2.0));
        assert_eq!(NearestInterpolator.interpolate(view, 89.5, 179.5), Some(270.0));
    }

    #[test]
    fn test_is_ocean() {
        let grid = island();
        let view = grid.view();

        assert!(!is_ocean(view, 0.0, 0.0));
        assert!(!is_ocean(view, 0.5, -0.5));
        assert!(is_ocean(view, 3.0, 0.0));
        assert!(is_ocean(view, 0.0, 2.0));
        assert!(is_ocean(view, 45.0, 90.0));
    }

    #[test]
    fn test_mask_ignores_smoothing() {
        // A point next to the island still reads land through bicubic but is ocean
        let grid = island();
        let view = grid.view();
        assert!(is_ocean(view, 0.0, 1.5));
        assert!(crate::interpolation::BicubicInterpolator
            .interpolate(view, 0.0, 1.5)
            .is_some());
    }
}
