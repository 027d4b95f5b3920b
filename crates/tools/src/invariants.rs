//! Structural checks run by the fuzz sweep over every generated floor.

use anyhow::{Result, ensure};
use dungeon_core::mapgen::{CELL_COUNT, RoomMark};
use dungeon_core::{DistanceMap, GeneratedFloor, Map, TileKind};

pub fn check_floor(floor: &GeneratedFloor) -> Result<()> {
    let map = &floor.map;
    ensure!(map.count_kind(TileKind::StairsUp) == 1, "expected exactly one up staircase");
    ensure!(map.count_kind(TileKind::StairsDown) == 1, "expected exactly one down staircase");

    let graph = &floor.graph;
    for cell in 0..CELL_COUNT {
        if graph.mark(cell) == RoomMark::Dropped {
            ensure!(
                graph.live_corridor_count(cell) != 1,
                "dropped cell {cell} kept a dead-end corridor"
            );
        }
        if graph.mark(cell) == RoomMark::Unconnected {
            ensure!(graph.live_corridor_count(cell) == 0, "unconnected cell {cell} has corridors");
        }
    }

    let field = DistanceMap::build(map, &[floor.stairs_up]);
    ensure!(field.distance(floor.stairs_down).is_some(), "down stairs unreachable from up stairs");
    for pos in map.coords() {
        if map.tile_kind_at(pos).is_walkable() {
            ensure!(field.distance(pos).is_some(), "walkable tile {pos} is cut off");
        }
    }
    Ok(())
}

/// Lit tiles must also be remembered.
pub fn check_sight(map: &Map) -> Result<()> {
    for pos in map.coords() {
        ensure!(!map.is_visible(pos) || map.is_visited(pos), "{pos} visible but not visited");
    }
    Ok(())
}
