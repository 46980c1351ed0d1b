//! Color ramps for temperature rendering.
//!
//! This module provides the stop-table ramp type and the built-in colorways.

pub mod colormap;
pub mod named;

pub use colormap::{lerp_color, ColorRamp, ColorStop, MISSING_COLOR};
pub use named::{COLORWAY_NAMES, DEFAULT_COLORWAY};

use crate::error::{IsothermError, Result};

/// Get a built-in colorway by name
pub fn get_colormap(name: &str) -> Result<&'static ColorRamp> {
    match name.to_lowercase().as_str() {
        "thermal" => Ok(&*named::THERMAL_RAMP),
        "classic" => Ok(&*named::CLASSIC_RAMP),
        "earth" => Ok(&*named::EARTH_RAMP),
        "vivid" => Ok(&*named::VIVID_RAMP),
        _ => Err(IsothermError::InvalidParameter {
            param: "colorway".to_string(),
            message: format!(
                "Unknown colorway: {}. Must be one of: {}",
                name,
                COLORWAY_NAMES.join(", ")
            ),
        }),
    }
}

/// Map one temperature through a named colorway.
pub fn color_of(value: Option<f64>, colorway: &str) -> Result<[u8; 3]> {
    Ok(get_colormap(colorway)?.color_of(value))
}
