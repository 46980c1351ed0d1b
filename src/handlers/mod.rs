//! HTTP request handlers for the isotherm API.
//!
//! This module contains all the endpoint handlers for the web server and the
//! router that wires them together.

pub mod atlas;
pub mod frame;
pub mod heartbeat;
pub mod point;

pub use atlas::{
    atlas_cancel_handler, atlas_result_handler, atlas_start_handler, atlas_status_handler,
    atlas_take_result_handler,
};
pub use frame::frame_handler;
pub use heartbeat::heartbeat_handler;
pub use point::point_handler;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::error::IsothermError;
use crate::logging::{create_http_trace_layer, log_request_error};
use crate::state::AppState;

/// Build the application router over shared state
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/heartbeat", get(heartbeat_handler))
        .route("/frame", get(frame_handler))
        .route("/point", get(point_handler))
        .route("/atlas", post(atlas_start_handler))
        .route("/atlas/cancel", post(atlas_cancel_handler))
        .route("/atlas/status", get(atlas_status_handler))
        .route(
            "/atlas/result",
            get(atlas_result_handler).delete(atlas_take_result_handler),
        )
        .layer(create_http_trace_layer())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// HTTP status for an error
pub fn status_for(error: &IsothermError) -> StatusCode {
    match error {
        IsothermError::InvalidParameter { .. }
        | IsothermError::InvalidColorRamp { .. }
        | IsothermError::IndexOutOfBounds { .. }
        | IsothermError::GridSize { .. }
        | IsothermError::Json(_) => StatusCode::BAD_REQUEST,
        IsothermError::JobAlreadyRunning { .. } => StatusCode::CONFLICT,
        IsothermError::NoResult { .. } => StatusCode::NOT_FOUND,
        IsothermError::Io(_)
        | IsothermError::Image(_)
        | IsothermError::Config { .. }
        | IsothermError::Encoding { .. }
        | IsothermError::Server { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Log a failed request and turn it into a JSON error body
pub fn error_response(
    error: &IsothermError,
    endpoint: &str,
    request_id: &str,
    params: Option<&str>,
) -> Response {
    log_request_error(error, endpoint, request_id, params);

    (
        status_for(error),
        Json(serde_json::json!({
            "error": error.to_string(),
            "request_id": request_id
        })),
    )
        .into_response()
}
