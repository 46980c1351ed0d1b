//! Application state management for isotherm.
//!
//! This module defines the shared state that is passed to all handlers:
//! the configuration, the loaded grid and the atlas worker.

use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::atlas::AtlasWorker;
use crate::config::Config;
use crate::error::Result;
use crate::grid::{GridSeries, GridView, NUM_LAT, NUM_LNG};

/// Summary of the loaded grid
#[derive(Debug, Clone, Serialize)]
pub struct GridInfo {
    /// Path the grid was loaded from
    pub file_path: String,
    /// Number of days
    pub num_days: usize,
    /// Latitude rows per day
    pub num_lat: usize,
    /// Longitude columns per day
    pub num_lng: usize,
    /// Missing cells across all days
    pub missing_cells: usize,
    /// Approximate memory held by the cells in bytes
    pub data_memory_bytes: usize,
}

/// The main application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Loaded grid, shared with atlas jobs
    pub grid: Arc<GridSeries>,
    /// Atlas job runner
    pub worker: AtlasWorker,
    /// Where the grid came from
    pub grid_path: PathBuf,
}

impl AppState {
    /// Create a new AppState
    pub fn new(config: Config, grid: GridSeries, grid_path: PathBuf) -> Self {
        Self {
            config,
            grid: Arc::new(grid),
            worker: AtlasWorker::new(),
            grid_path,
        }
    }

    /// Create a new AppState wrapped in an Arc for shared ownership
    pub fn new_shared(config: Config, grid: GridSeries, grid_path: PathBuf) -> Arc<Self> {
        Arc::new(Self::new(config, grid, grid_path))
    }

    /// View of one day, failing when `day` is past the series
    pub fn day(&self, day: usize) -> Result<GridView<'_>> {
        self.grid.day(day)
    }

    pub fn grid_info(&self) -> GridInfo {
        GridInfo {
            file_path: self.grid_path.display().to_string(),
            num_days: self.grid.num_days(),
            num_lat: NUM_LAT,
            num_lng: NUM_LNG,
            missing_cells: self.grid.missing_count(),
            data_memory_bytes: self.grid.len() * std::mem::size_of::<Option<f32>>(),
        }
    }
}
