//! Interpolation over the temperature grid.
//!
//! Two samplers read a [`GridView`] at continuous geographic coordinates:
//! bicubic for the smooth temperature value and nearest for the ocean mask.

pub mod bicubic;
pub mod common;
pub mod nearest;

pub use bicubic::BicubicInterpolator;
pub use nearest::{is_ocean, NearestInterpolator};

use crate::error::{IsothermError, Result};
use crate::grid::GridView;

/// Trait for interpolation methods
pub trait Interpolator: Send + Sync {
    /// Sample the grid at a geographic point. `None` means no data.
    fn interpolate(&self, grid: GridView<'_>, lat: f64, lng: f64) -> Option<f64>;

    /// Get the name of this interpolation method
    fn name(&self) -> &str;
}

/// Get an interpolator by name
pub fn get_interpolator(name: &str) -> Result<Box<dyn Interpolator>> {
    match name.to_lowercase().as_str() {
        "nearest" => Ok(Box::new(NearestInterpolator)),
        "bicubic" => Ok(Box::new(BicubicInterpolator)),
        _ => Err(IsothermError::InvalidParameter {
            param: "interpolation".to_string(),
            message: format!("Unknown interpolation method: {}", name),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_interpolator() {
        assert_eq!(get_interpolator("nearest").unwrap().name(), "nearest");
        assert_eq!(get_interpolator("Bicubic").unwrap().name(), "bicubic");
        assert!(get_interpolator("bilinear").is_err());
    }
}
