//! Tunable generation parameters and their validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MAP_WIDTH: usize = 80;
pub const DEFAULT_MAP_HEIGHT: usize = 23;

/// Smallest room the generator may place. Anything below leaves no interior
/// for stairs and spawns, so cells must be able to hold at least this much.
pub const MIN_ROOM_WIDTH: usize = 8;
pub const MAX_ROOM_WIDTH: usize = 19;
pub const MIN_ROOM_HEIGHT: usize = 4;

/// Upper bound on either map dimension; keeps tile buffers small and
/// coordinates well inside `i32`.
pub const MAX_MAP_SIDE: usize = 1024;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorConfig {
    pub width: usize,
    pub height: usize,
    /// Failed spanning attempts tolerated before giving up on the remaining cells.
    pub spanning_retry_limit: u32,
    pub extra_corridors_min: usize,
    pub extra_corridors_max: usize,
    pub dropped_cells: usize,
    pub prune_depth: u32,
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_MAP_WIDTH,
            height: DEFAULT_MAP_HEIGHT,
            spanning_retry_limit: 20,
            extra_corridors_min: 1,
            extra_corridors_max: 2,
            dropped_cells: 2,
            prune_depth: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("map dimensions must be non-zero, got {width}x{height}")]
    EmptyMap { width: usize, height: usize },
    #[error("map {width}x{height} exceeds the {max}x{max} limit")]
    MapTooLarge { width: usize, height: usize, max: usize },
    #[error("map {width}x{height} leaves {cell_width}x{cell_height} cells, below the {min_width}x{min_height} room minimum")]
    CellsTooSmall {
        width: usize,
        height: usize,
        cell_width: usize,
        cell_height: usize,
        min_width: usize,
        min_height: usize,
    },
    #[error("extra corridor range {min}..={max} is inverted")]
    InvertedCorridorRange { min: usize, max: usize },
    #[error("cannot drop {requested} of 9 cells")]
    TooManyDroppedCells { requested: usize },
}

impl FloorConfig {
    pub fn cell_width(&self) -> usize {
        self.width.saturating_sub(2) / 3
    }

    pub fn cell_height(&self) -> usize {
        self.height.saturating_sub(2) / 3
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyMap { width: self.width, height: self.height });
        }
        if self.width > MAX_MAP_SIDE || self.height > MAX_MAP_SIDE {
            return Err(ConfigError::MapTooLarge {
                width: self.width,
                height: self.height,
                max: MAX_MAP_SIDE,
            });
        }
        // Rooms need at least one spare column/row inside their cell for the offset roll.
        if self.cell_width() <= MIN_ROOM_WIDTH || self.cell_height() <= MIN_ROOM_HEIGHT {
            return Err(ConfigError::CellsTooSmall {
                width: self.width,
                height: self.height,
                cell_width: self.cell_width(),
                cell_height: self.cell_height(),
                min_width: MIN_ROOM_WIDTH + 1,
                min_height: MIN_ROOM_HEIGHT + 1,
            });
        }
        if self.extra_corridors_min > self.extra_corridors_max {
            return Err(ConfigError::InvertedCorridorRange {
                min: self.extra_corridors_min,
                max: self.extra_corridors_max,
            });
        }
        if self.dropped_cells >= 9 {
            return Err(ConfigError::TooManyDroppedCells { requested: self.dropped_cells });
        }
        Ok(())
    }
}
