pub mod config;
pub mod diagnostics;
pub mod game;
pub mod mapgen;
pub mod navigation;
pub mod state;
pub mod types;

mod visibility;

#[cfg(test)]
mod test_support;

pub use config::{ConfigError, FloorConfig};
pub use game::Game;
pub use mapgen::{GeneratedFloor, Rect, RoomGraph, generate_floor};
pub use navigation::{DistanceMap, NEIGHBOUR_OFFSETS, Path, PathSource, find_path};
pub use state::{FloorState, Map, Tile};
pub use types::*;
