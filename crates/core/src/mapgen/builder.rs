//! Rasterizes a finished room graph into tiles: walled rooms, L-shaped
//! corridors and the two stairways.

use tracing::debug;

use crate::state::Map;
use crate::types::{Coord, Direction, TileKind};

use super::graph::{Corridor, RoomGraph, RoomMark};
use super::layout::{GRID_COLUMNS, Rect};
use super::seed::FloorRng;

/// The first corridor run covers `offset / FIRST_RUN_DIVISOR` tiles along the
/// starting axis; the bend point only needs to look reasonable.
const FIRST_RUN_DIVISOR: i32 = 2;

pub(crate) fn carve_room(map: &mut Map, rect: Rect) {
    let right = rect.right();
    let bottom = rect.bottom();
    for x in rect.x..=right {
        map.set_tile_kind(Coord { x, y: rect.y }, TileKind::WallHorizontal);
        map.set_tile_kind(Coord { x, y: bottom }, TileKind::WallHorizontal);
    }
    for y in rect.y..=bottom {
        map.set_tile_kind(Coord { x: rect.x, y }, TileKind::WallVertical);
        map.set_tile_kind(Coord { x: right, y }, TileKind::WallVertical);
    }
    for point in rect.interior_points() {
        map.set_tile_kind(point, TileKind::Floor);
    }
    map.set_tile_kind(Coord { x: rect.x, y: rect.y }, TileKind::WallUpperLeft);
    map.set_tile_kind(Coord { x: right, y: rect.y }, TileKind::WallUpperRight);
    map.set_tile_kind(Coord { x: rect.x, y: bottom }, TileKind::WallLowerLeft);
    map.set_tile_kind(Coord { x: right, y: bottom }, TileKind::WallLowerRight);
}

/// What a tile becomes when a corridor is laid over it. Floor and doors are
/// kept, walls are pierced into doors, anything else turns into corridor.
pub(crate) fn convert_stepped_tile(kind: TileKind) -> TileKind {
    match kind {
        TileKind::Floor | TileKind::Door => kind,
        wall if wall.is_wall() => TileKind::Door,
        _ => TileKind::Corridor,
    }
}

fn lay_tile(map: &mut Map, pos: Coord) {
    let converted = convert_stepped_tile(map.tile_kind_at(pos));
    map.set_tile_kind(pos, converted);
}

fn lay_run(map: &mut Map, from: Coord, step: Coord, length: i32) -> Coord {
    let mut pos = from;
    for _ in 0..length.abs() {
        lay_tile(map, pos);
        pos = pos + step;
    }
    pos
}

/// Lays an L-shaped (or Z-shaped) route from `start` to `end`, both included.
/// Vertical starts split the vertical offset around a single horizontal run,
/// horizontal starts do the opposite.
pub(crate) fn carve_route(map: &mut Map, start: Coord, end: Coord, start_vertical: bool) {
    let offset = end - start;
    let unit = offset.signum();
    let horizontal = Coord { x: unit.x, y: 0 };
    let vertical = Coord { x: 0, y: unit.y };

    let (lead, cross, lead_length, cross_length) = if start_vertical {
        (vertical, horizontal, offset.y.abs(), offset.x.abs())
    } else {
        (horizontal, vertical, offset.x.abs(), offset.y.abs())
    };
    let first = lead_length / FIRST_RUN_DIVISOR;

    let mut pos = lay_run(map, start, lead, first);
    pos = lay_run(map, pos, cross, cross_length);
    pos = lay_run(map, pos, lead, lead_length - first);
    debug_assert_eq!(pos, end);
    lay_tile(map, end);
}

/// Direction from cell `from` toward its grid neighbour `to`.
fn facing(from: usize, to: usize) -> Direction {
    if to == from + 1 {
        Direction::East
    } else if to + 1 == from {
        Direction::West
    } else if to > from {
        debug_assert_eq!(to, from + GRID_COLUMNS);
        Direction::South
    } else {
        Direction::North
    }
}

/// A point on the wall of `rect` facing `direction`, never a corner.
fn wall_point(rect: Rect, direction: Direction, rng: &mut FloorRng) -> Coord {
    let along_x = rect.x + 1 + rng.below((rect.w - 2) as usize) as i32;
    let along_y = rect.y + 1 + rng.below((rect.h - 2) as usize) as i32;
    match direction {
        Direction::North => Coord { x: along_x, y: rect.y },
        Direction::South => Coord { x: along_x, y: rect.bottom() },
        Direction::East => Coord { x: rect.right(), y: along_y },
        Direction::West => Coord { x: rect.x, y: along_y },
    }
}

fn corridor_endpoint(
    graph: &RoomGraph,
    cell: usize,
    toward: Direction,
    rng: &mut FloorRng,
) -> Coord {
    let room = graph.rooms[cell];
    match room.mark {
        RoomMark::Connected => wall_point(room.rect, toward, rng),
        // Dropped cells only contribute a waypoint for the corridor to pass through.
        RoomMark::Dropped | RoomMark::Unconnected => room.rect.center(),
    }
}

pub(crate) fn carve_corridor(
    map: &mut Map,
    graph: &RoomGraph,
    corridor: &Corridor,
    rng: &mut FloorRng,
) {
    let direction = facing(corridor.origin, corridor.dest);
    let start = corridor_endpoint(graph, corridor.origin, direction, rng);
    let end = corridor_endpoint(graph, corridor.dest, direction.opposite(), rng);
    carve_route(map, start, end, direction.is_vertical());
}

/// Picks the up and down stairs inside connected rooms. When both land in
/// the same room the down stairs avoid the up tile.
pub(crate) fn place_stairs(map: &mut Map, rng: &mut FloorRng) -> Option<(Coord, Coord)> {
    let rooms = map.rooms().to_vec();
    let up_room = rng.pick(&rooms)?;
    let down_room = rng.pick(&rooms)?;
    let up = up_room.random_interior_point(rng);
    let down = if down_room == up_room {
        let spots: Vec<Coord> = down_room.interior_points().filter(|&point| point != up).collect();
        rng.pick(&spots)?
    } else {
        down_room.random_interior_point(rng)
    };
    map.set_tile_kind(up, TileKind::StairsUp);
    map.set_tile_kind(down, TileKind::StairsDown);
    Some((up, down))
}

/// Rasterizes `graph` onto a blank map of the given size. Returns the map and
/// the up/down stairs, or `None` if no connected room survived.
pub(crate) fn build_map(
    width: usize,
    height: usize,
    graph: &RoomGraph,
    rng: &mut FloorRng,
) -> Option<(Map, Coord, Coord)> {
    let mut map = Map::new(width, height);
    for room in graph.rooms.iter().filter(|room| room.mark == RoomMark::Connected) {
        carve_room(&mut map, room.rect);
        map.add_room(room.rect);
    }
    for corridor in graph.live_corridors() {
        carve_corridor(&mut map, graph, corridor, rng);
    }
    let (up, down) = place_stairs(&mut map, rng)?;
    debug!(
        rooms = map.rooms().len(),
        doors = map.count_kind(TileKind::Door),
        %up,
        %down,
        "map rasterized"
    );
    Some((map, up, down))
}
