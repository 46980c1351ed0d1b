//! The atlas build job.
//!
//! A job renders every day of a [`GridSeries`] into its tile, reports one
//! progress event per finished day and, once all days are drawn, encodes the
//! sheet and reports exactly one result. Cancellation is polled before each
//! day only; a day that has started always finishes. A cancelled job reports
//! nothing further.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use image::{GenericImage, Rgba, RgbaImage};
use tracing::{debug, info};

use super::geometry::{AtlasGeometry, TILE_HEIGHT, TILE_WIDTH};
use crate::error::{IsothermError, Result};
use crate::grid::GridSeries;
use crate::logging::{generate_request_id, log_error, log_operation_end, log_operation_start};
use crate::render::{encode_jpeg, RenderOptions, Renderer, ATLAS_JPEG_QUALITY};

/// Days rendered between cooperative yields to the runtime
pub const YIELD_EVERY: usize = 5;

/// Per-job cancellation flag, shared between the job and whoever may stop it.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the job to stop at the next day boundary.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Encoded sheet plus its layout
#[derive(Debug, Clone, PartialEq)]
pub struct AtlasResult {
    pub bytes: Bytes,
    pub geometry: AtlasGeometry,
}

/// Messages a job sends to its initiator
#[derive(Debug, Clone, PartialEq)]
pub enum JobEvent {
    /// `done` of `total` days are in the sheet
    Progress { done: usize, total: usize },
    /// All days rendered and encoded; sent at most once
    Completed(AtlasResult),
    /// The job stopped on an error; sent at most once
    Failed { message: String },
}

/// How a job ended without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    Completed(AtlasGeometry),
    /// Stopped at a day boundary after `done` days
    Cancelled { done: usize },
}

/// One atlas build, owning its grid.
#[derive(Debug)]
pub struct AtlasJob {
    id: String,
    grid: Arc<GridSeries>,
    renderer: Renderer,
    geometry: AtlasGeometry,
}

impl AtlasJob {
    /// Validate a start request: the grid must hold exactly `num_days` days
    /// and the options must resolve.
    pub fn new(
        grid: impl Into<Arc<GridSeries>>,
        num_days: usize,
        options: &RenderOptions,
    ) -> Result<Self> {
        let grid = grid.into();
        if grid.num_days() != num_days {
            return Err(IsothermError::GridSize {
                expected: num_days * crate::grid::NUM_POINTS,
                actual: grid.len(),
                num_days,
            });
        }
        Ok(Self {
            id: generate_request_id(),
            geometry: AtlasGeometry::new(num_days)?,
            renderer: Renderer::new(options)?,
            grid,
        })
    }

    /// Build a job from raw concatenated cells.
    pub fn from_cells(
        cells: Vec<Option<f32>>,
        num_days: usize,
        options: &RenderOptions,
    ) -> Result<Self> {
        Self::new(GridSeries::new(cells, num_days)?, num_days, options)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn geometry(&self) -> AtlasGeometry {
        self.geometry
    }

    /// Run to completion or cancellation, sending events through `emit`.
    ///
    /// Errors are also sent as a [`JobEvent::Failed`] before being returned.
    pub async fn run<F>(self, token: CancelToken, mut emit: F) -> Result<JobOutcome>
    where
        F: FnMut(JobEvent),
    {
        let start = Instant::now();
        log_operation_start(
            "atlas_build",
            Some(&format!(
                "job_id={} days={} rows={} size={}x{}",
                self.id,
                self.geometry.num_days,
                self.geometry.rows,
                self.geometry.width,
                self.geometry.height
            )),
        );

        let outcome = self.execute(&token, &mut emit).await;
        match &outcome {
            Ok(JobOutcome::Completed(_)) => log_operation_end("atlas_build", start, true),
            Ok(JobOutcome::Cancelled { done }) => {
                info!(job_id = %self.id, done = *done, "Atlas job cancelled");
                log_operation_end("atlas_build", start, false);
            }
            Err(e) => {
                log_error(e, "atlas_build");
                emit(JobEvent::Failed {
                    message: e.to_string(),
                });
            }
        }
        outcome
    }

    async fn execute<F>(&self, token: &CancelToken, emit: &mut F) -> Result<JobOutcome>
    where
        F: FnMut(JobEvent),
    {
        let geometry = self.geometry;
        let total = geometry.num_days as usize;
        let mut atlas =
            RgbaImage::from_pixel(geometry.width, geometry.height, Rgba([255, 255, 255, 255]));

        for day in 0..total {
            if token.is_cancelled() {
                return Ok(JobOutcome::Cancelled { done: day });
            }

            let frame = self
                .renderer
                .render(self.grid.day(day)?, TILE_WIDTH, TILE_HEIGHT)?;
            let (x, y) = geometry.tile_origin(day);
            atlas.copy_from(&frame, x, y)?;

            debug!(job_id = %self.id, day, done = day + 1, total, "Day rendered");
            emit(JobEvent::Progress {
                done: day + 1,
                total,
            });

            if (day + 1) % YIELD_EVERY == 0 {
                tokio::task::yield_now().await;
            }
        }

        let bytes = encode_jpeg(&atlas, ATLAS_JPEG_QUALITY)?;
        info!(
            job_id = %self.id,
            bytes = bytes.len(),
            "Atlas encoded"
        );
        emit(JobEvent::Completed(AtlasResult {
            bytes: Bytes::from(bytes),
            geometry,
        }));
        Ok(JobOutcome::Completed(geometry))
    }
}

#[cfg(test)]
impl AtlasJob {
    /// A job laid out for `num_days` over a grid holding fewer days; it
    /// fails on the first day past the grid.
    pub(crate) fn overrunning(grid: GridSeries, num_days: usize) -> Result<Self> {
        Ok(Self {
            id: generate_request_id(),
            grid: Arc::new(grid),
            renderer: Renderer::new(&RenderOptions::default())?,
            geometry: AtlasGeometry::new(num_days)?,
        })
    }
}
