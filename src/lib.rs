//! # isotherm
//!
//! Renders gridded daily temperature fields into color-mapped map frames and
//! tiles many days into a single sprite-sheet atlas.
//!
//! ## Key Features
//!
//! - **Fixed global grid**: 2° equirectangular cells with missing values for ocean
//! - **Smooth resampling**: bicubic interpolation that fills coastlines from valid neighbors
//! - **Stop-table colorways**: built-in ramps or caller-supplied stops
//! - **Cancellable atlas jobs**: progress events, cooperative yielding and one final JPEG
//!
//! ## Architecture
//!
//! - **Grid Layer**: [`grid`] and [`data_loader`] hold and load day-major cell buffers
//! - **Rendering**: [`interpolation`], [`colormaps`] and [`render`] turn one day into pixels
//! - **Jobs**: [`atlas`] builds sprite sheets on the tokio runtime
//! - **API Layer**: [`handlers`] exposes frames, points and atlas jobs over HTTP

pub mod atlas;
pub mod colormaps;
pub mod config;
pub mod data_loader;
pub mod error;
pub mod grid;
pub mod handlers;
pub mod interpolation;
pub mod logging;
pub mod render;
pub mod state;

pub use atlas::{
    AtlasGeometry, AtlasJob, AtlasResult, AtlasWorker, CancelToken, JobEvent, JobStatus,
};
pub use colormaps::{ColorRamp, ColorStop};
pub use config::Config;
pub use error::{IsothermError, Result};
pub use grid::{GridSeries, GridView, TemperatureGrid};
pub use logging::{
    create_http_trace_layer, generate_request_id, init_tracing, log_error, log_grid_load_stats,
    log_operation_end, log_operation_start, log_request_error, log_timed_operation,
};
pub use render::{render_frame, RenderOptions, Renderer};
pub use state::AppState;
