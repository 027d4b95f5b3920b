//! Shared map fixtures for unit tests across modules.

use crate::mapgen::Rect;
use crate::state::Map;
use crate::types::{Coord, TileKind};

pub(crate) fn open_floor_fixture(width: usize, height: usize) -> Map {
    let mut map = Map::new(width, height);
    map.fill(TileKind::Floor);
    map
}

/// Two rooms on a 30x8 map joined along row 3 by doors and a corridor:
/// `|....+###+....|`.
pub(crate) fn two_room_fixture() -> (Map, [Rect; 2]) {
    let mut map = Map::new(30, 8);
    let rooms = [Rect { x: 1, y: 1, w: 8, h: 5 }, Rect { x: 16, y: 1, w: 9, h: 6 }];
    for room in rooms {
        for y in room.y..=room.bottom() {
            for x in room.x..=room.right() {
                let pos = Coord { x, y };
                let on_edge = !room.contains_interior(pos);
                let kind = match (on_edge, y == room.y || y == room.bottom()) {
                    (false, _) => TileKind::Floor,
                    (true, true) => TileKind::WallHorizontal,
                    (true, false) => TileKind::WallVertical,
                };
                map.set_tile_kind(pos, kind);
            }
        }
        map.add_room(room);
    }
    map.set_tile_kind(Coord::new(rooms[0].right(), 3), TileKind::Door);
    map.set_tile_kind(Coord::new(rooms[1].x, 3), TileKind::Door);
    for x in (rooms[0].right() + 1)..rooms[1].x {
        map.set_tile_kind(Coord::new(x, 3), TileKind::Corridor);
    }
    (map, rooms)
}
