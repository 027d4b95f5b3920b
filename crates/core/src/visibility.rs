//! Radius-one field of view. Rooms light up whole on entry; corridors only
//! reveal the passage around the actor.

use crate::navigation::NEIGHBOUR_OFFSETS;
use crate::state::Map;
use crate::types::{Coord, TileKind};

impl Map {
    /// Recomputes the visible set around `actor`. Previously seen tiles stay
    /// visited.
    pub fn update_visibility(&mut self, actor: Coord) {
        self.clear_visible();

        let in_passage = self.tile_kind_at(actor).is_passage();
        self.light(actor);
        for offset in NEIGHBOUR_OFFSETS {
            let pos = actor + offset;
            if !in_passage || lit_from_passage(self.tile_kind_at(pos)) {
                self.light(pos);
            }
        }

        if let Some(room) = self.room_at(actor) {
            for y in room.y..=room.bottom() {
                for x in room.x..=room.right() {
                    self.light(Coord { x, y });
                }
            }
        }
    }

    pub fn can_see(&self, pos: Coord) -> bool {
        self.is_visible(pos)
    }
}

fn lit_from_passage(kind: TileKind) -> bool {
    matches!(kind, TileKind::Corridor | TileKind::Door | TileKind::Floor)
}
