use serde::{Deserialize, Serialize};

use crate::mapgen::{FloorRng, GeneratedFloor, Rect, RoomGraph};
use crate::navigation::{DistanceMap, NEIGHBOUR_OFFSETS};
use crate::types::{Coord, TileKind};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    pub visible: bool,
    pub visited: bool,
}

/// Fixed-size tile grid plus the rooms rasterized into it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Map {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
    rooms: Vec<Rect>,
}

impl Map {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, tiles: vec![Tile::default(); width * height], rooms: Vec::new() }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Coord) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn tile(&self, pos: Coord) -> Option<&Tile> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(&self.tiles[self.index(pos)])
    }

    /// Out-of-bounds positions read as `Empty`.
    pub fn tile_kind_at(&self, pos: Coord) -> TileKind {
        self.tile(pos).map_or(TileKind::Empty, |tile| tile.kind)
    }

    pub fn set_tile_kind(&mut self, pos: Coord, kind: TileKind) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.tiles[idx].kind = kind;
    }

    pub fn fill(&mut self, kind: TileKind) {
        for tile in &mut self.tiles {
            tile.kind = kind;
        }
    }

    pub fn is_walkable(&self, from: Coord, to: Coord) -> bool {
        let destination = self.tile_kind_at(to);
        if !destination.is_walkable() {
            return false;
        }
        let through_passage = destination.is_passage() || self.tile_kind_at(from).is_passage();
        !(from.is_diagonal_to(to) && through_passage)
    }

    pub fn walkable_neighbours(&self, pos: Coord) -> Vec<Coord> {
        NEIGHBOUR_OFFSETS
            .iter()
            .map(|&offset| pos + offset)
            .filter(|&next| self.is_walkable(pos, next))
            .collect()
    }

    pub fn rooms(&self) -> &[Rect] {
        &self.rooms
    }

    pub(crate) fn add_room(&mut self, rect: Rect) {
        self.rooms.push(rect);
    }

    /// The room whose interior, grown by a one tile margin, holds `pos`.
    /// Standing in a doorway therefore counts as being in the room.
    pub fn room_at(&self, pos: Coord) -> Option<Rect> {
        self.rooms.iter().copied().find(|room| room.contains_with_margin(pos, 1))
    }

    /// Random open floor tile of a random room accepted by `filter`. Stairs
    /// are never returned.
    pub fn random_point_in_room(
        &self,
        rng: &mut FloorRng,
        filter: impl Fn(&Rect) -> bool,
    ) -> Option<Coord> {
        let candidates: Vec<Rect> =
            self.rooms.iter().copied().filter(|room| filter(room)).collect();
        let room = rng.pick(&candidates)?;
        let open: Vec<Coord> = room
            .interior_points()
            .filter(|&point| self.tile_kind_at(point) == TileKind::Floor)
            .collect();
        rng.pick(&open)
    }

    pub fn is_visible(&self, pos: Coord) -> bool {
        self.tile(pos).is_some_and(|tile| tile.visible)
    }

    pub fn is_visited(&self, pos: Coord) -> bool {
        self.tile(pos).is_some_and(|tile| tile.visited)
    }

    pub fn light(&mut self, pos: Coord) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.tiles[idx].visible = true;
        self.tiles[idx].visited = true;
    }

    pub fn clear_visible(&mut self) {
        for tile in &mut self.tiles {
            tile.visible = false;
        }
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let width = self.width as i32;
        let height = self.height as i32;
        (0..height).flat_map(move |y| (0..width).map(move |x| Coord { x, y }))
    }

    pub fn count_kind(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|tile| tile.kind == kind).count()
    }

    pub(crate) fn index(&self, pos: Coord) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

/// The live floor: tile grid, the graph it was built from, and the standing
/// distance field toward the current chase target.
#[derive(Clone, Debug)]
pub struct FloorState {
    pub floor_index: u32,
    pub map: Map,
    pub graph: RoomGraph,
    pub stairs_up: Coord,
    pub stairs_down: Coord,
    pub distance: DistanceMap,
}

impl FloorState {
    pub fn from_generated(floor_index: u32, generated: GeneratedFloor) -> Self {
        let distance = DistanceMap::build(&generated.map, &[generated.stairs_up]);
        Self {
            floor_index,
            map: generated.map,
            graph: generated.graph,
            stairs_up: generated.stairs_up,
            stairs_down: generated.stairs_down,
            distance,
        }
    }

    pub fn spawn_point(&self) -> Coord {
        self.stairs_up
    }

    pub fn retarget(&mut self, target: Coord) {
        self.distance.reset(&self.map, &[target]);
    }
}
