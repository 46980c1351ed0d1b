//! Grid file loading.
//!
//! Reads a multi-day temperature grid from disk into a [`GridSeries`]. Two
//! formats are understood:
//!
//! - JSON, either a flat array of numbers and `null`s or an object
//!   `{ "num_days": N, "values": [...] }`
//! - raw little-endian `f32` (`.bin`, `.f32`), where non-finite values are
//!   missing cells
//!
//! Cells are laid out day-major, then latitude-major, then longitude.

use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{IsothermError, Result};
use crate::grid::{GridSeries, NUM_POINTS};
use crate::logging::log_grid_load_stats;

/// On-disk grid encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridFormat {
    Json,
    RawF32,
}

impl GridFormat {
    /// Pick a format from the file extension, falling back to sniffing the
    /// first non-whitespace byte.
    pub fn detect(path: &Path, bytes: &[u8]) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("json") => GridFormat::Json,
            Some("bin") | Some("f32") => GridFormat::RawF32,
            _ => match bytes.iter().find(|b| !b.is_ascii_whitespace()) {
                Some(b'[') | Some(b'{') => GridFormat::Json,
                _ => GridFormat::RawF32,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GridDocument {
    Values(Vec<Option<f32>>),
    Series {
        #[serde(default)]
        num_days: Option<usize>,
        values: Vec<Option<f32>>,
    },
}

/// Load a grid file. `num_days` overrides the day count stored in or
/// inferred from the file; a conflicting stored count is an error.
pub fn load_grid_file(path: &Path, num_days: Option<usize>) -> Result<GridSeries> {
    if !path.exists() {
        return Err(IsothermError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File not found: {}", path.display()),
        )));
    }

    let bytes = std::fs::read(path)?;
    let format = GridFormat::detect(path, &bytes);
    debug!(
        file_path = %path.display(),
        format = ?format,
        bytes = bytes.len(),
        "Reading grid file"
    );

    let series = parse_grid(&bytes, format, num_days)?;

    info!("Loaded grid file: {}", path.display());
    log_grid_load_stats(
        &path.display().to_string(),
        series.num_days(),
        series.missing_count(),
        series.len(),
    );

    Ok(series)
}

/// Parse grid bytes in a known format.
pub fn parse_grid(bytes: &[u8], format: GridFormat, num_days: Option<usize>) -> Result<GridSeries> {
    let (cells, stored_days) = match format {
        GridFormat::Json => parse_json(bytes)?,
        GridFormat::RawF32 => (parse_raw_f32(bytes)?, None),
    };

    let num_days = match (num_days, stored_days) {
        (Some(given), Some(stored)) if given != stored => {
            return Err(IsothermError::invalid_parameter(
                "num_days",
                format!("{given} day(s) requested but the file declares {stored}"),
            ));
        }
        (Some(given), _) => given,
        (None, Some(stored)) => stored,
        (None, None) => infer_num_days(cells.len())?,
    };

    GridSeries::new(cells, num_days)
}

fn parse_json(bytes: &[u8]) -> Result<(Vec<Option<f32>>, Option<usize>)> {
    let document: GridDocument = serde_json::from_slice(bytes)?;
    let (values, num_days) = match document {
        GridDocument::Values(values) => (values, None),
        GridDocument::Series { num_days, values } => (values, num_days),
    };
    // Values beyond f32 range arrive as infinities
    let cells = values
        .into_iter()
        .map(|value| value.filter(|v| v.is_finite()))
        .collect();
    Ok((cells, num_days))
}

fn parse_raw_f32(bytes: &[u8]) -> Result<Vec<Option<f32>>> {
    if bytes.len() % 4 != 0 {
        return Err(IsothermError::invalid_parameter(
            "grid_file",
            format!(
                "raw f32 grid must be a multiple of 4 bytes, got {}",
                bytes.len()
            ),
        ));
    }

    Ok(bytes
        .chunks_exact(4)
        .map(|chunk| {
            let value = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            value.is_finite().then_some(value)
        })
        .collect())
}

/// Day count implied by a value count.
pub fn infer_num_days(len: usize) -> Result<usize> {
    if len == 0 || len % NUM_POINTS != 0 {
        return Err(IsothermError::invalid_parameter(
            "num_days",
            format!(
                "cannot infer the day count from {len} values; expected a positive multiple of {NUM_POINTS}"
            ),
        ));
    }
    Ok(len / NUM_POINTS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn raw_bytes(values: impl IntoIterator<Item = f32>) -> Vec<u8> {
        values.into_iter().flat_map(f32::to_le_bytes).collect()
    }

    #[test]
    fn test_infer_num_days() {
        assert_eq!(infer_num_days(NUM_POINTS).unwrap(), 1);
        assert_eq!(infer_num_days(3 * NUM_POINTS).unwrap(), 3);
        assert!(infer_num_days(0).is_err());
        assert!(infer_num_days(NUM_POINTS + 1).is_err());
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(
            GridFormat::detect(Path::new("a.json"), b"\x00\x00"),
            GridFormat::Json
        );
        assert_eq!(
            GridFormat::detect(Path::new("a.F32"), b"[1]"),
            GridFormat::RawF32
        );
        assert_eq!(
            GridFormat::detect(Path::new("grid"), b"  {\"values\": []}"),
            GridFormat::Json
        );
        assert_eq!(
            GridFormat::detect(Path::new("grid"), &[0, 0, 128, 63]),
            GridFormat::RawF32
        );
    }

    #[test]
    fn test_parse_raw_marks_non_finite_missing() {
        let mut values = vec![12.5f32; NUM_POINTS];
        values[0] = f32::NAN;
        values[1] = f32::INFINITY;

        let series = parse_grid(&raw_bytes(values), GridFormat::RawF32, None).unwrap();
        assert_eq!(series.num_days(), 1);
        assert_eq!(series.missing_count(), 2);

        let day = series.day(0).unwrap();
        assert_eq!(day.get(0, 0), None);
        assert_eq!(day.get(0, 2), Some(12.5));
    }

    #[test]
    fn test_parse_raw_rejects_partial_value() {
        let mut bytes = raw_bytes(vec![1.0f32; NUM_POINTS]);
        bytes.push(0);
        assert!(parse_grid(&bytes, GridFormat::RawF32, None).is_err());
    }

    #[test]
    fn test_parse_json_marks_out_of_range_missing() {
        let mut values = vec!["4.5".to_string(); NUM_POINTS];
        values[0] = "1e39".to_string();
        values[1] = "-1e39".to_string();
        let json = format!("[{}]", values.join(","));

        let series = parse_grid(json.as_bytes(), GridFormat::Json, None).unwrap();
        assert_eq!(series.missing_count(), 2);
        let day = series.day(0).unwrap();
        assert_eq!(day.cells()[0], None);
        assert_eq!(day.cells()[2], Some(4.5));
    }

    #[test]
    fn test_parse_json_array_with_nulls() {
        let mut values: Vec<Option<f32>> = vec![Some(-3.0); 2 * NUM_POINTS];
        values[5] = None;
        let json = serde_json::to_vec(&values).unwrap();

        let series = parse_grid(&json, GridFormat::Json, None).unwrap();
        assert_eq!(series.num_days(), 2);
        assert_eq!(series.missing_count(), 1);
    }

    #[test]
    fn test_parse_json_object_day_count() {
        let values: Vec<Option<f32>> = vec![Some(1.0); 2 * NUM_POINTS];
        let json = serde_json::to_vec(&serde_json::json!({
            "num_days": 2,
            "values": values,
        }))
        .unwrap();

        assert_eq!(
            parse_grid(&json, GridFormat::Json, None).unwrap().num_days(),
            2
        );
        assert_eq!(
            parse_grid(&json, GridFormat::Json, Some(2))
                .unwrap()
                .num_days(),
            2
        );
        assert!(matches!(
            parse_grid(&json, GridFormat::Json, Some(1)),
            Err(IsothermError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_explicit_day_count_must_match_length() {
        let bytes = raw_bytes(vec![0.0f32; 2 * NUM_POINTS]);
        assert!(matches!(
            parse_grid(&bytes, GridFormat::RawF32, Some(3)),
            Err(IsothermError::GridSize {
                num_days: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_load_grid_file() {
        let mut file = tempfile::Builder::new().suffix(".f32").tempfile().unwrap();
        file.write_all(&raw_bytes(vec![20.0f32; NUM_POINTS])).unwrap();

        let series = load_grid_file(file.path(), None).unwrap();
        assert_eq!(series.num_days(), 1);
        assert_eq!(series.missing_count(), 0);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_grid_file(Path::new("/nonexistent/grid.json"), None);
        assert!(matches!(result, Err(IsothermError::Io(_))));
    }
}
