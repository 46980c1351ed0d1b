//! Test data generation utilities.
//!
//! This module provides functions to generate grids and grid files with
//! known patterns for testing the isotherm library and server.

use isotherm::grid::{GridSeries, TemperatureGrid, NUM_POINTS};
use std::io;
use std::path::Path;

/// Western edge of the synthetic continent
pub const CONTINENT_WEST: f64 = -120.0;
/// Eastern edge of the synthetic continent
pub const CONTINENT_EAST: f64 = 60.0;
/// Southern edge of the synthetic continent
pub const CONTINENT_SOUTH: f64 = -40.0;
/// Northern edge of the synthetic continent
pub const CONTINENT_NORTH: f64 = 70.0;

/// Whether a grid node lies on the synthetic continent
pub fn on_continent(lat: f64, lng: f64) -> bool {
    (CONTINENT_SOUTH..=CONTINENT_NORTH).contains(&lat)
        && (CONTINENT_WEST..=CONTINENT_EAST).contains(&lng)
}

/// One day with a rectangular continent at a uniform `value` and ocean
/// everywhere else.
pub fn continent_day(value: f32) -> TemperatureGrid {
    TemperatureGrid::from_fn(|lat, lng| on_continent(lat, lng).then_some(value))
}

/// One day where land temperature falls linearly from the equator to the poles.
///
/// # Arguments
///
/// * `equator` - Temperature at the equator
/// * `lapse` - Degrees lost per degree of latitude
pub fn latitude_gradient_day(equator: f32, lapse: f32) -> TemperatureGrid {
    TemperatureGrid::from_fn(|lat, _| Some(equator - lapse * lat.abs() as f32))
}

/// `num_days` days of the continent, warming by one degree per day.
pub fn warming_continent_series(num_days: usize, start: f32) -> GridSeries {
    GridSeries::from_days(
        (0..num_days)
            .map(|day| continent_day(start + day as f32))
            .collect(),
    )
    .expect("Failed to build test series")
}

/// `num_days` identical uniform days.
pub fn uniform_series(num_days: usize, value: f32) -> GridSeries {
    GridSeries::from_days(
        (0..num_days)
            .map(|_| TemperatureGrid::uniform(value))
            .collect(),
    )
    .expect("Failed to build test series")
}

/// Concatenate days into a flat cell buffer.
pub fn cells_of(days: Vec<TemperatureGrid>) -> Vec<Option<f32>> {
    let mut cells = Vec::with_capacity(days.len() * NUM_POINTS);
    for day in days {
        cells.extend(day.into_cells());
    }
    cells
}

/// Write cells as raw little-endian f32, missing cells as NaN.
pub fn write_raw_grid(path: &Path, cells: &[Option<f32>]) -> io::Result<()> {
    let bytes: Vec<u8> = cells
        .iter()
        .flat_map(|c| c.unwrap_or(f32::NAN).to_le_bytes())
        .collect();
    std::fs::write(path, bytes)
}

/// Write cells as a JSON grid document with an explicit day count.
pub fn write_json_grid(path: &Path, cells: &[Option<f32>], num_days: usize) -> io::Result<()> {
    let document = serde_json::json!({
        "num_days": num_days,
        "values": cells,
    });
    std::fs::write(path, serde_json::to_vec(&document)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_continent_has_land_and_ocean() {
        let series = warming_continent_series(2, 10.0);
        assert_eq!(series.num_days(), 2);
        let missing = series.missing_count();
        assert!(missing > 0 && missing < series.len());
    }

    #[test]
    fn test_write_raw_grid_round_trips_length() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.f32");
        write_raw_grid(&path, &cells_of(vec![continent_day(1.0)])).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), (NUM_POINTS * 4) as u64);
    }
}
