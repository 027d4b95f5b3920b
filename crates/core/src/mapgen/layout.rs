//! Cell partitioning and room rectangle placement for the 3x3 macro layout.

use serde::{Deserialize, Serialize};

use crate::config::{FloorConfig, MAX_ROOM_WIDTH, MIN_ROOM_HEIGHT, MIN_ROOM_WIDTH};
use crate::types::Coord;

use super::seed::FloorRng;

pub const GRID_COLUMNS: usize = 3;
pub const GRID_ROWS: usize = 3;
pub const CELL_COUNT: usize = GRID_COLUMNS * GRID_ROWS;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn right(self) -> i32 {
        self.x + self.w - 1
    }

    pub fn bottom(self) -> i32 {
        self.y + self.h - 1
    }

    pub fn center(self) -> Coord {
        Coord { x: self.x + self.w / 2, y: self.y + self.h / 2 }
    }

    pub fn contains(self, pos: Coord) -> bool {
        pos.x >= self.x && pos.x <= self.right() && pos.y >= self.y && pos.y <= self.bottom()
    }

    pub fn contains_interior(self, pos: Coord) -> bool {
        pos.x > self.x && pos.x < self.right() && pos.y > self.y && pos.y < self.bottom()
    }

    /// True for tiles inside the interior grown by `margin` on every side.
    /// A margin of one covers the walls.
    pub fn contains_with_margin(self, pos: Coord, margin: i32) -> bool {
        pos.x >= self.x + 1 - margin
            && pos.x <= self.right() - 1 + margin
            && pos.y >= self.y + 1 - margin
            && pos.y <= self.bottom() - 1 + margin
    }

    pub fn interior_points(self) -> impl Iterator<Item = Coord> {
        let Rect { x, y, w, h } = self;
        ((y + 1)..(y + h - 1))
            .flat_map(move |py| ((x + 1)..(x + w - 1)).map(move |px| Coord { x: px, y: py }))
    }

    pub fn random_interior_point(self, rng: &mut FloorRng) -> Coord {
        Coord {
            x: self.x + 1 + rng.below((self.w - 2) as usize) as i32,
            y: self.y + 1 + rng.below((self.h - 2) as usize) as i32,
        }
    }
}

/// Splits the map into the nine cell boundaries, row-major.
pub(super) fn cell_boundaries(config: &FloorConfig) -> [Rect; CELL_COUNT] {
    let cell_w = config.cell_width() as i32;
    let cell_h = config.cell_height() as i32;
    let mut boundaries = [Rect { x: 0, y: 0, w: cell_w, h: cell_h }; CELL_COUNT];
    for row in 0..GRID_ROWS {
        for column in 0..GRID_COLUMNS {
            boundaries[row * GRID_COLUMNS + column] = Rect {
                x: (cell_w + 1) * column as i32,
                y: (cell_h + 1) * row as i32,
                w: cell_w,
                h: cell_h,
            };
        }
    }
    boundaries
}

/// Rolls a room rectangle that fits inside `boundary`, leaving at least one
/// spare column and row for the placement offset.
pub(super) fn random_room_in(boundary: Rect, rng: &mut FloorRng) -> Rect {
    let max_width = (MAX_ROOM_WIDTH as i32).min(boundary.w - 1);
    let width = rng.range_inclusive(MIN_ROOM_WIDTH, max_width as usize) as i32;
    let height = rng.range_inclusive(MIN_ROOM_HEIGHT, (boundary.h - 1) as usize) as i32;
    let dx = rng.below((boundary.w - width) as usize) as i32;
    let dy = rng.below((boundary.h - height) as usize) as i32;
    Rect { x: boundary.x + dx, y: boundary.y + dy, w: width, h: height }
}
