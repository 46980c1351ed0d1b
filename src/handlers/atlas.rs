//! Atlas job endpoint handlers.
//!
//! Starting, cancelling and polling the background atlas build, and fetching
//! the finished sprite sheet.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use super::error_response;
use crate::atlas::{AtlasGeometry, AtlasResult, JobStatus};
use crate::error::IsothermError;
use crate::logging::generate_request_id;
use crate::render::RenderOptions;
use crate::state::AppState;

/// Response for a started job
#[derive(Debug, Serialize)]
pub struct AtlasStartResponse {
    pub job_id: String,
    pub num_days: usize,
    pub status: JobStatus,
}

/// Response for a cancel request
#[derive(Debug, Serialize)]
pub struct AtlasCancelResponse {
    /// A running job was signalled
    pub cancelled: bool,
    pub status: JobStatus,
}

/// Handle POST /atlas requests
pub async fn atlas_start_handler(
    State(state): State<Arc<AppState>>,
    Json(options): Json<RenderOptions>,
) -> Response {
    let request_id = generate_request_id();
    let options = state.config.render.fill(&options);

    match state.worker.start(Arc::clone(&state.grid), &options) {
        Ok(job_id) => {
            info!(
                endpoint = "/atlas",
                request_id = %request_id,
                job_id = %job_id,
                colorway = ?options.colorway,
                blur_radius = options.requested_blur(),
                "Atlas job accepted"
            );
            (
                StatusCode::ACCEPTED,
                Json(AtlasStartResponse {
                    job_id,
                    num_days: state.grid.num_days(),
                    status: state.worker.status(),
                }),
            )
                .into_response()
        }
        Err(error) => error_response(
            &error,
            "/atlas",
            &request_id,
            Some(&format!("{:?}", options)),
        ),
    }
}

/// Handle POST /atlas/cancel requests
pub async fn atlas_cancel_handler(State(state): State<Arc<AppState>>) -> Json<AtlasCancelResponse> {
    let cancelled = state.worker.cancel();
    Json(AtlasCancelResponse {
        cancelled,
        status: state.worker.status(),
    })
}

/// Handle GET /atlas/status requests
pub async fn atlas_status_handler(State(state): State<Arc<AppState>>) -> Json<JobStatus> {
    Json(state.worker.status())
}

/// Handle GET /atlas/result requests
pub async fn atlas_result_handler(State(state): State<Arc<AppState>>) -> Response {
    result_response(state.worker.result(), "/atlas/result")
}

/// Handle DELETE /atlas/result requests; the worker returns to idle
pub async fn atlas_take_result_handler(State(state): State<Arc<AppState>>) -> Response {
    result_response(state.worker.take_result(), "/atlas/result")
}

fn result_response(result: Option<AtlasResult>, endpoint: &str) -> Response {
    match result {
        Some(result) => {
            let mut headers = geometry_headers(&result.geometry);
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("image/jpeg"));
            (StatusCode::OK, headers, result.bytes).into_response()
        }
        None => error_response(
            &IsothermError::NoResult {
                message: "no completed atlas is available".to_string(),
            },
            endpoint,
            &generate_request_id(),
            None,
        ),
    }
}

/// Sheet layout as `X-Atlas-*` headers
pub fn geometry_headers(geometry: &AtlasGeometry) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, value) in [
        ("x-atlas-num-days", geometry.num_days),
        ("x-atlas-cols", geometry.cols),
        ("x-atlas-rows", geometry.rows),
        ("x-atlas-frame-width", geometry.frame_width),
        ("x-atlas-frame-height", geometry.frame_height),
        ("x-atlas-width", geometry.width),
        ("x-atlas-height", geometry.height),
    ] {
        headers.insert(HeaderName::from_static(name), HeaderValue::from(value));
    }
    headers
}
