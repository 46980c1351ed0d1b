//! The fixed equirectangular temperature grid.
//!
//! Cells are stored row-major with latitude descending from +90 to -90 and
//! longitude ascending from -180 to +180, both in [`GRID_STEP`] degree
//! steps. A cell is `None` where the source has no measurement (ocean).
//! Several days are stored back to back in a [`GridSeries`].

use crate::error::{IsothermError, Result};

/// Angular spacing of the grid in degrees
pub const GRID_STEP: f64 = 2.0;

/// Southern and northern latitude bounds
pub const LAT_MIN: f64 = -90.0;
pub const LAT_MAX: f64 = 90.0;

/// Western and eastern longitude bounds
pub const LNG_MIN: f64 = -180.0;
pub const LNG_MAX: f64 = 180.0;

/// Number of latitude rows (91 at 2° spacing)
pub const NUM_LAT: usize = ((LAT_MAX - LAT_MIN) / GRID_STEP) as usize + 1;

/// Number of longitude columns (181 at 2° spacing)
pub const NUM_LNG: usize = ((LNG_MAX - LNG_MIN) / GRID_STEP) as usize + 1;

/// Cells per day
pub const NUM_POINTS: usize = NUM_LAT * NUM_LNG;

/// Default size of a single rendered frame
pub const DEFAULT_FRAME_WIDTH: u32 = 1024;
pub const DEFAULT_FRAME_HEIGHT: u32 = 512;

/// Wrap a longitude index onto the cylinder, so -1 maps to `NUM_LNG - 1`.
pub fn wrap_lng_index(index: i64) -> usize {
    index.rem_euclid(NUM_LNG as i64) as usize
}

/// Clamp a latitude index to the valid rows; the poles do not wrap.
pub fn clamp_lat_index(index: i64) -> usize {
    index.clamp(0, NUM_LAT as i64 - 1) as usize
}

/// Fractional grid coordinates `(row, column)` of a geographic point.
pub fn grid_coords(lat: f64, lng: f64) -> (f64, f64) {
    ((LAT_MAX - lat) / GRID_STEP, (lng - LNG_MIN) / GRID_STEP)
}

/// Read-only view over exactly one day of cells.
#[derive(Debug, Clone, Copy)]
pub struct GridView<'a> {
    cells: &'a [Option<f32>],
}

impl<'a> GridView<'a> {
    /// Wrap a slice of one day's cells.
    pub fn new(cells: &'a [Option<f32>]) -> Result<Self> {
        if cells.len() != NUM_POINTS {
            return Err(IsothermError::GridSize {
                expected: NUM_POINTS,
                actual: cells.len(),
                num_days: 1,
            });
        }
        Ok(Self { cells })
    }

    /// Cell value at signed indices, applying the longitude wrap and
    /// latitude clamp rules.
    pub fn get(&self, lat_index: i64, lng_index: i64) -> Option<f32> {
        let row = clamp_lat_index(lat_index);
        let col = wrap_lng_index(lng_index);
        self.cells[row * NUM_LNG + col]
    }

    /// Whether the cell at the given indices is missing.
    pub fn is_missing(&self, lat_index: i64, lng_index: i64) -> bool {
        self.get(lat_index, lng_index).is_none()
    }

    /// The underlying cells.
    pub fn cells(&self) -> &'a [Option<f32>] {
        self.cells
    }
}

/// A single day's temperature grid.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureGrid {
    cells: Vec<Option<f32>>,
}

impl TemperatureGrid {
    /// Build a grid from exactly [`NUM_POINTS`] cells.
    pub fn new(cells: Vec<Option<f32>>) -> Result<Self> {
        GridView::new(&cells)?;
        Ok(Self { cells })
    }

    /// Build a grid by evaluating `f(lat, lng)` at every grid node.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(f64, f64) -> Option<f32>,
    {
        let mut cells = Vec::with_capacity(NUM_POINTS);
        for row in 0..NUM_LAT {
            let lat = LAT_MAX - row as f64 * GRID_STEP;
            for col in 0..NUM_LNG {
                let lng = LNG_MIN + col as f64 * GRID_STEP;
                cells.push(f(lat, lng));
            }
        }
        Self { cells }
    }

    /// Every cell holds `value`.
    pub fn uniform(value: f32) -> Self {
        Self {
            cells: vec![Some(value); NUM_POINTS],
        }
    }

    /// Borrow the grid for sampling.
    pub fn view(&self) -> GridView<'_> {
        GridView { cells: &self.cells }
    }

    /// Consume the grid, returning its cells.
    pub fn into_cells(self) -> Vec<Option<f32>> {
        self.cells
    }
}

/// Contiguous concatenation of several days of cells, day `d` starting at
/// `d * NUM_POINTS`.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSeries {
    cells: Vec<Option<f32>>,
    num_days: usize,
}

impl GridSeries {
    /// Validate that `cells` holds exactly `num_days` days.
    pub fn new(cells: Vec<Option<f32>>, num_days: usize) -> Result<Self> {
        if num_days == 0 {
            return Err(IsothermError::invalid_parameter(
                "num_days",
                "at least one day is required",
            ));
        }
        let expected = num_days * NUM_POINTS;
        if cells.len() != expected {
            return Err(IsothermError::GridSize {
                expected,
                actual: cells.len(),
                num_days,
            });
        }
        Ok(Self { cells, num_days })
    }

    /// Concatenate whole days.
    pub fn from_days(days: Vec<TemperatureGrid>) -> Result<Self> {
        let num_days = days.len();
        let mut cells = Vec::with_capacity(num_days * NUM_POINTS);
        for day in days {
            cells.extend(day.into_cells());
        }
        Self::new(cells, num_days)
    }

    /// Number of days held.
    pub fn num_days(&self) -> usize {
        self.num_days
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// A series always holds at least one day.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of missing cells across all days.
    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// View of one day.
    pub fn day(&self, day: usize) -> Result<GridView<'_>> {
        if day >= self.num_days {
            return Err(IsothermError::IndexOutOfBounds {
                param: "day".to_string(),
                value: day.to_string(),
                max: self.num_days - 1,
            });
        }
        let start = day * NUM_POINTS;
        Ok(GridView {
            cells: &self.cells[start..start + NUM_POINTS],
        })
    }
}
