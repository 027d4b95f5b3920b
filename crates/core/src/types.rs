use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Tile-space coordinate. `x` grows east, `y` grows south.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn chebyshev(self, other: Coord) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    pub fn is_diagonal(self) -> bool {
        self.x != 0 && self.y != 0
    }

    pub fn is_diagonal_to(self, other: Coord) -> bool {
        (other - self).is_diagonal()
    }

    /// Component-wise signum, turning any offset into a unit step.
    pub fn signum(self) -> Coord {
        Coord { x: self.x.signum(), y: self.y.signum() }
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        Coord { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Coord {
    type Output = Coord;

    fn sub(self, rhs: Coord) -> Coord {
        Coord { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::North | Direction::South)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        };
        f.write_str(name)
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum TileKind {
    #[default]
    Empty,
    WallHorizontal,
    WallVertical,
    WallUpperLeft,
    WallUpperRight,
    WallLowerLeft,
    WallLowerRight,
    Floor,
    Corridor,
    Door,
    StairsUp,
    StairsDown,
}

impl TileKind {
    pub fn is_wall(self) -> bool {
        matches!(
            self,
            TileKind::WallHorizontal
                | TileKind::WallVertical
                | TileKind::WallUpperLeft
                | TileKind::WallUpperRight
                | TileKind::WallLowerLeft
                | TileKind::WallLowerRight
        )
    }

    pub fn is_walkable(self) -> bool {
        matches!(
            self,
            TileKind::Floor
                | TileKind::Corridor
                | TileKind::Door
                | TileKind::StairsUp
                | TileKind::StairsDown
        )
    }

    /// Doors and corridors forbid diagonal steps into or out of them.
    pub fn is_passage(self) -> bool {
        matches!(self, TileKind::Door | TileKind::Corridor)
    }

    pub fn glyph(self) -> char {
        match self {
            TileKind::Empty => ' ',
            TileKind::WallHorizontal
            | TileKind::WallUpperLeft
            | TileKind::WallUpperRight
            | TileKind::WallLowerLeft
            | TileKind::WallLowerRight => '-',
            TileKind::WallVertical => '|',
            TileKind::Floor => '.',
            TileKind::Corridor => '#',
            TileKind::Door => '+',
            TileKind::StairsUp => '<',
            TileKind::StairsDown => '>',
        }
    }

    pub(crate) fn code(self) -> u8 {
        self as u8
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    Moved { tile: TileKind },
    EnteredDoorway,
    Blocked,
    OutOfBounds,
}
