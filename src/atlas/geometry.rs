//! Sprite-sheet layout.

use serde::{Deserialize, Serialize};

use crate::error::{IsothermError, Result};

/// Tiles per atlas row
pub const ATLAS_COLUMNS: u32 = 16;

/// Size of one day's tile
pub const TILE_WIDTH: u32 = 512;
pub const TILE_HEIGHT: u32 = 256;

/// Placement of `num_days` tiles in a padded sprite sheet.
///
/// The sheet is always [`ATLAS_COLUMNS`] tiles wide; its height is the tile
/// rows rounded up to the next power of two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtlasGeometry {
    pub num_days: u32,
    pub cols: u32,
    pub rows: u32,
    pub frame_width: u32,
    pub frame_height: u32,
    /// Pixel width of the whole sheet
    pub width: u32,
    /// Pixel height of the whole sheet, a power of two
    pub height: u32,
}

impl AtlasGeometry {
    pub fn new(num_days: usize) -> Result<Self> {
        if num_days == 0 {
            return Err(IsothermError::invalid_parameter(
                "num_days",
                "an atlas needs at least one day",
            ));
        }
        let num_days = u32::try_from(num_days).map_err(|_| {
            IsothermError::invalid_parameter("num_days", format!("{} days is too many", num_days))
        })?;

        let rows = num_days.div_ceil(ATLAS_COLUMNS);
        let height = (rows * TILE_HEIGHT).next_power_of_two();

        Ok(Self {
            num_days,
            cols: ATLAS_COLUMNS,
            rows,
            frame_width: TILE_WIDTH,
            frame_height: TILE_HEIGHT,
            width: ATLAS_COLUMNS * TILE_WIDTH,
            height,
        })
    }

    /// `(col, row)` of a day's tile
    pub fn tile_position(&self, day: usize) -> (u32, u32) {
        let day = day as u32;
        (day % self.cols, day / self.cols)
    }

    /// Top-left pixel of a day's tile
    pub fn tile_origin(&self, day: usize) -> (u32, u32) {
        let (col, row) = self.tile_position(day);
        (col * self.frame_width, row * self.frame_height)
    }
}
