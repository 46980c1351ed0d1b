//! Render options as supplied by callers.

use serde::{Deserialize, Serialize};

use crate::colormaps::{self, ColorRamp, ColorStop, DEFAULT_COLORWAY};
use crate::error::{IsothermError, Result};
use crate::grid::{DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH};

/// Width at which `blur_radius` is expressed; radii scale with actual width
pub const BLUR_REFERENCE_WIDTH: f64 = 2048.0;

/// Options for one frame or one atlas job.
///
/// Exactly one of `colorway` and `custom_stops` may be set; with neither the
/// default colorway is used. Field names are camelCase on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    /// Name of a built-in colorway
    #[serde(default)]
    pub colorway: Option<String>,

    /// Explicit stop table
    #[serde(default)]
    pub custom_stops: Option<Vec<ColorStop>>,

    /// Blur radius in pixels at [`BLUR_REFERENCE_WIDTH`]; unset means the
    /// host default, an explicit 0 turns blur off
    #[serde(default)]
    pub blur_radius: Option<f64>,

    /// Output width for single frames (ignored by atlas jobs)
    #[serde(default)]
    pub width: Option<u32>,

    /// Output height for single frames (ignored by atlas jobs)
    #[serde(default)]
    pub height: Option<u32>,
}

impl RenderOptions {
    /// Options rendering with a named colorway and no blur.
    pub fn with_colorway(name: impl Into<String>) -> Self {
        Self {
            colorway: Some(name.into()),
            ..Default::default()
        }
    }

    /// Options rendering with a custom stop table and no blur.
    pub fn with_custom_stops(stops: Vec<ColorStop>) -> Self {
        Self {
            custom_stops: Some(stops),
            ..Default::default()
        }
    }

    pub fn blur(mut self, radius: f64) -> Self {
        self.blur_radius = Some(radius);
        self
    }

    /// Requested blur radius, 0 when unset.
    pub fn requested_blur(&self) -> f64 {
        self.blur_radius.unwrap_or(0.0)
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Frame size, defaulting to 1024x512.
    pub fn frame_size(&self) -> (u32, u32) {
        (
            self.width.unwrap_or(DEFAULT_FRAME_WIDTH),
            self.height.unwrap_or(DEFAULT_FRAME_HEIGHT),
        )
    }

    /// Resolve the color ramp, failing on a malformed or ambiguous request.
    pub fn resolve_ramp(&self) -> Result<ColorRamp> {
        match (&self.colorway, &self.custom_stops) {
            (Some(_), Some(_)) => Err(IsothermError::invalid_parameter(
                "customStops",
                "colorway and customStops are mutually exclusive",
            )),
            (Some(name), None) => Ok(colormaps::get_colormap(name)?.clone()),
            (None, Some(stops)) => ColorRamp::new("custom", stops.clone()),
            (None, None) => Ok(colormaps::get_colormap(DEFAULT_COLORWAY)?.clone()),
        }
    }

    /// Check the blur radius.
    pub fn validate_blur(&self) -> Result<()> {
        let radius = self.requested_blur();
        if !radius.is_finite() || radius < 0.0 {
            return Err(IsothermError::invalid_parameter(
                "blurRadius",
                format!("must be a non-negative number, got {}", radius),
            ));
        }
        Ok(())
    }
}

/// Blur radius in pixels for a frame of `width`, at least 1 whenever blur is
/// requested at all.
pub fn effective_blur_radius(blur_radius: f64, width: u32) -> usize {
    if blur_radius <= 0.0 {
        return 0;
    }
    let scaled = (blur_radius * width as f64 / BLUR_REFERENCE_WIDTH + 0.5).floor();
    scaled.max(1.0) as usize
}
