//! Atlas building: many daily frames tiled into one sprite sheet.

pub mod geometry;
pub mod job;
pub mod worker;

pub use geometry::{AtlasGeometry, ATLAS_COLUMNS, TILE_HEIGHT, TILE_WIDTH};
pub use job::{AtlasJob, AtlasResult, CancelToken, JobEvent, JobOutcome, YIELD_EVERY};
pub use worker::{AtlasWorker, JobStatus};
