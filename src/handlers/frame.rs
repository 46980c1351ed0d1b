//! Frame endpoint handler.
//!
//! Returns one day of the grid rendered as a PNG or JPEG image.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::error_response;
use crate::error::{IsothermError, Result};
use crate::logging::{generate_request_id, log_timed_operation};
use crate::render::{encode, render_frame, OutputFormat, RenderOptions};
use crate::state::AppState;

/// Largest frame edge served over HTTP
pub const MAX_FRAME_DIMENSION: u32 = 8192;

/// Query parameters for frame endpoint
#[derive(Debug, Default, Deserialize)]
pub struct FrameQuery {
    /// Day index (0-based)
    pub day: Option<usize>,
    /// Colorway name (thermal, classic, earth, vivid)
    pub colorway: Option<String>,
    /// Blur radius in pixels at 2048 px width
    pub blur_radius: Option<f64>,
    /// Image width in pixels
    pub width: Option<u32>,
    /// Image height in pixels
    pub height: Option<u32>,
    /// Output format (png or jpeg)
    pub format: Option<String>,
}

/// Rendered frame ready to send
struct FrameResponse {
    bytes: Vec<u8>,
    format: OutputFormat,
    width: u32,
    height: u32,
}

/// Handle GET /frame requests
pub async fn frame_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FrameQuery>,
) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = "/frame",
        request_id = %request_id,
        day = ?params.day,
        colorway = ?params.colorway,
        blur_radius = ?params.blur_radius,
        width = ?params.width,
        height = ?params.height,
        format = ?params.format,
        "Processing frame request"
    );

    match generate_frame(&state, &params) {
        Ok(frame) => {
            info!(
                endpoint = "/frame",
                request_id = %request_id,
                day = params.day.unwrap_or(0),
                width = frame.width,
                height = frame.height,
                bytes = frame.bytes.len(),
                duration_ms = start_time.elapsed().as_millis() as u64,
                "Frame generation successful"
            );

            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, frame.format.content_type()),
                    (header::CACHE_CONTROL, "public, max-age=3600"),
                ],
                frame.bytes,
            )
                .into_response()
        }
        Err(error) => error_response(
            &error,
            "/frame",
            &request_id,
            Some(&format!("{:?}", params)),
        ),
    }
}

/// Resolve request options against the configured defaults
fn frame_options(state: &AppState, params: &FrameQuery) -> Result<RenderOptions> {
    let defaults = &state.config.render;
    let width = params.width.unwrap_or(defaults.width);
    let height = params.height.unwrap_or(defaults.height);

    for (name, value) in [("width", width), ("height", height)] {
        if value == 0 || value > MAX_FRAME_DIMENSION {
            return Err(IsothermError::invalid_parameter(
                name,
                format!("must be between 1 and {MAX_FRAME_DIMENSION}, got {value}"),
            ));
        }
    }

    Ok(RenderOptions::with_colorway(
        params
            .colorway
            .clone()
            .unwrap_or_else(|| defaults.colorway.clone()),
    )
    .blur(params.blur_radius.unwrap_or(defaults.blur_radius))
    .size(width, height))
}

fn generate_frame(state: &AppState, params: &FrameQuery) -> Result<FrameResponse> {
    let format = OutputFormat::parse(params.format.as_deref().unwrap_or("png"))?;
    let options = frame_options(state, params)?;
    let grid = state.day(params.day.unwrap_or(0))?;

    let frame = log_timed_operation("render_frame", || render_frame(grid, &options))?;
    let bytes = encode(&frame, format)?;

    Ok(FrameResponse {
        bytes,
        format,
        width: frame.width(),
        height: frame.height(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::grid::{GridSeries, TemperatureGrid};
    use std::path::PathBuf;

    fn state() -> AppState {
        let grid = GridSeries::from_days(vec![
            TemperatureGrid::uniform(20.0),
            TemperatureGrid::uniform(-20.0),
        ])
        .unwrap();
        AppState::new(Config::default(), grid, PathBuf::from("grid.json"))
    }

    #[test]
    fn test_frame_options_use_defaults() {
        let mut state = state();
        state.config.render.colorway = "earth".to_string();
        state.config.render.blur_radius = 6.0;

        let options = frame_options(&state, &FrameQuery::default()).unwrap();
        assert_eq!(options.colorway.as_deref(), Some("earth"));
        assert_eq!(options.blur_radius, Some(6.0));
        assert_eq!(options.frame_size(), (1024, 512));

        let query = FrameQuery {
            colorway: Some("vivid".to_string()),
            blur_radius: Some(0.0),
            width: Some(64),
            height: Some(32),
            ..Default::default()
        };
        let options = frame_options(&state, &query).unwrap();
        assert_eq!(options.colorway.as_deref(), Some("vivid"));
        assert_eq!(options.blur_radius, Some(0.0));
        assert_eq!(options.frame_size(), (64, 32));
    }

    #[test]
    fn test_frame_options_reject_bad_sizes() {
        let state = state();
        for (width, height) in [(0, 32), (64, 0), (MAX_FRAME_DIMENSION + 1, 32)] {
            let query = FrameQuery {
                width: Some(width),
                height: Some(height),
                ..Default::default()
            };
            assert!(frame_options(&state, &query).is_err());
        }
    }

    #[test]
    fn test_generate_frame() {
        let state = state();
        let query = FrameQuery {
            day: Some(1),
            width: Some(32),
            height: Some(16),
            format: Some("jpeg".to_string()),
            ..Default::default()
        };
        let frame = generate_frame(&state, &query).unwrap();
        assert_eq!(frame.format, OutputFormat::Jpeg);
        assert_eq!((frame.width, frame.height), (32, 16));
        assert_eq!(&frame.bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_generate_frame_errors() {
        let state = state();
        let past_end = FrameQuery {
            day: Some(2),
            ..Default::default()
        };
        assert!(matches!(
            generate_frame(&state, &past_end),
            Err(IsothermError::IndexOutOfBounds { .. })
        ));

        let bad_format = FrameQuery {
            format: Some("gif".to_string()),
            ..Default::default()
        };
        assert!(generate_frame(&state, &bad_format).is_err());

        let bad_colorway = FrameQuery {
            colorway: Some("viridis".to_string()),
            width: Some(8),
            height: Some(4),
            ..Default::default()
        };
        assert!(generate_frame(&state, &bad_colorway).is_err());
    }
}
