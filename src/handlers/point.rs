//! Point query endpoint handler.
//!
//! Returns the sampled temperature at one location and day, whether the
//! location is masked as ocean, and the color a frame would paint there
//! before blurring.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use super::error_response;
use crate::colormaps::{get_colormap, MISSING_COLOR};
use crate::error::{IsothermError, Result};
use crate::grid::{LAT_MAX, LAT_MIN};
use crate::interpolation::{get_interpolator, is_ocean};
use crate::logging::generate_request_id;
use crate::state::AppState;

/// Query parameters for point endpoint
#[derive(Debug, Default, Deserialize)]
pub struct PointQuery {
    /// Latitude in degrees, -90 to 90
    pub lat: f64,
    /// Longitude in degrees; wraps around the globe
    pub lng: f64,
    /// Day index (0-based)
    pub day: Option<usize>,
    /// Interpolation method (bicubic, nearest)
    pub interpolation: Option<String>,
    /// Colorway used for `color`
    pub colorway: Option<String>,
}

/// Response for point query
#[derive(Debug, PartialEq, Serialize)]
pub struct PointResponse {
    pub lat: f64,
    pub lng: f64,
    pub day: usize,
    /// Sampled temperature, `null` when no data surrounds the point
    pub value: Option<f64>,
    /// Nearest grid node is missing
    pub ocean: bool,
    /// RGB color for this point
    pub color: [u8; 3],
    pub interpolation: String,
    pub colorway: String,
}

/// Handle GET /point requests
pub async fn point_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PointQuery>,
) -> Response {
    let request_id = generate_request_id();

    debug!(
        endpoint = "/point",
        request_id = %request_id,
        lat = params.lat,
        lng = params.lng,
        day = ?params.day,
        interpolation = ?params.interpolation,
        "Processing point request"
    );

    match query_point(&state, &params) {
        Ok(response) => Json(response).into_response(),
        Err(error) => error_response(
            &error,
            "/point",
            &request_id,
            Some(&format!("{:?}", params)),
        ),
    }
}

fn query_point(state: &AppState, params: &PointQuery) -> Result<PointResponse> {
    if !(LAT_MIN..=LAT_MAX).contains(&params.lat) {
        return Err(IsothermError::invalid_parameter(
            "lat",
            format!("must be between -90 and 90, got {}", params.lat),
        ));
    }
    if !params.lng.is_finite() {
        return Err(IsothermError::invalid_parameter(
            "lng",
            format!("must be a finite number, got {}", params.lng),
        ));
    }

    let day = params.day.unwrap_or(0);
    let grid = state.day(day)?;
    let interpolator = get_interpolator(params.interpolation.as_deref().unwrap_or("bicubic"))?;
    let ramp = get_colormap(
        params
            .colorway
            .as_deref()
            .unwrap_or(&state.config.render.colorway),
    )?;

    let value = interpolator.interpolate(grid, params.lat, params.lng);
    let ocean = is_ocean(grid, params.lat, params.lng);
    let color = if ocean {
        MISSING_COLOR
    } else {
        ramp.color_of(value)
    };

    Ok(PointResponse {
        lat: params.lat,
        lng: params.lng,
        day,
        value,
        ocean,
        color,
        interpolation: interpolator.name().to_string(),
        colorway: ramp.name().to_string(),
    })
}
