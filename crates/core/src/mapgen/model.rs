//! Output of a single floor generation pass.

use crate::state::Map;
use crate::types::Coord;

use super::graph::RoomGraph;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedFloor {
    pub map: Map,
    pub graph: RoomGraph,
    pub stairs_up: Coord,
    pub stairs_down: Coord,
}

impl GeneratedFloor {
    /// Where a player arriving from above appears.
    pub fn spawn(&self) -> Coord {
        self.stairs_up
    }

    /// Stable byte encoding of the layout, used for determinism hashing.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.map.width() * self.map.height() + 64);
        bytes.extend((self.map.width() as u32).to_le_bytes());
        bytes.extend((self.map.height() as u32).to_le_bytes());
        for pos in self.map.coords() {
            bytes.push(self.map.tile_kind_at(pos).code());
        }
        for room in &self.graph.rooms {
            bytes.push(room.mark.code() as u8);
            for value in [room.rect.x, room.rect.y, room.rect.w, room.rect.h] {
                bytes.extend(value.to_le_bytes());
            }
        }
        bytes.extend((self.graph.live_corridors().count() as u32).to_le_bytes());
        for corridor in self.graph.live_corridors() {
            bytes.push(corridor.origin as u8);
            bytes.push(corridor.dest as u8);
        }
        for pos in [self.stairs_up, self.stairs_down] {
            bytes.extend(pos.x.to_le_bytes());
            bytes.extend(pos.y.to_le_bytes());
        }
        bytes
    }
}
