//! Cell graph over the fixed 3x3 layout.
//!
//! Generation runs in four passes over the same graph: a first connection, a
//! spanning pass that grows one connected component, a handful of extra edges
//! so the floor is not a strict tree, and finally dropping cells for variety
//! while pruning the corridors that would dangle from them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::FloorConfig;

use super::layout::{CELL_COUNT, GRID_COLUMNS, GRID_ROWS, Rect, cell_boundaries, random_room_in};
use super::seed::FloorRng;

/// Fixed 3x3 adjacency, cells numbered row-major.
const NEIGHBOURS: [&[usize]; CELL_COUNT] = [
    &[1, 3],
    &[0, 2, 4],
    &[1, 5],
    &[0, 4, 6],
    &[1, 3, 5, 7],
    &[2, 4, 8],
    &[3, 7],
    &[4, 6, 8],
    &[5, 7],
];

pub fn neighbours(cell: usize) -> &'static [usize] {
    NEIGHBOURS[cell]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomMark {
    Unconnected,
    Connected,
    Dropped,
}

impl RoomMark {
    /// Numeric form used by debug dumps: 0, 1 and -1.
    pub fn code(self) -> i8 {
        match self {
            RoomMark::Unconnected => 0,
            RoomMark::Connected => 1,
            RoomMark::Dropped => -1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub rect: Rect,
    pub mark: RoomMark,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CorridorMark {
    Normal,
    Dropped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corridor {
    pub origin: usize,
    pub dest: usize,
    pub mark: CorridorMark,
}

impl Corridor {
    pub fn is_live(&self) -> bool {
        self.mark == CorridorMark::Normal
    }

    pub fn touches(&self, cell: usize) -> bool {
        self.origin == cell || self.dest == cell
    }

    pub fn joins(&self, a: usize, b: usize) -> bool {
        (self.origin == a && self.dest == b) || (self.origin == b && self.dest == a)
    }

    pub fn other_end(&self, cell: usize) -> usize {
        if self.origin == cell { self.dest } else { self.origin }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomGraph {
    pub rooms: [Room; CELL_COUNT],
    pub corridors: Vec<Corridor>,
    pub boundaries: [Rect; CELL_COUNT],
}

impl RoomGraph {
    pub fn new(config: &FloorConfig, rng: &mut FloorRng) -> Self {
        let boundaries = cell_boundaries(config);
        let rooms = boundaries.map(|boundary| Room {
            rect: random_room_in(boundary, rng),
            mark: RoomMark::Unconnected,
        });
        Self { rooms, corridors: Vec::new(), boundaries }
    }

    pub fn generate(config: &FloorConfig, rng: &mut FloorRng) -> Self {
        let mut graph = Self::new(config, rng);
        graph.connect_first(rng);
        let failures = graph.span(rng, config.spanning_retry_limit);
        let extra = graph.add_cycles(rng, config.extra_corridors_min, config.extra_corridors_max);
        let dropped = graph.drop_rooms(rng, config.dropped_cells, config.prune_depth);
        debug!(
            failures,
            extra,
            ?dropped,
            corridors = graph.live_corridors().count(),
            "room graph generated"
        );
        graph
    }

    pub fn mark(&self, cell: usize) -> RoomMark {
        self.rooms[cell].mark
    }

    pub fn live_corridors(&self) -> impl Iterator<Item = &Corridor> {
        self.corridors.iter().filter(|corridor| corridor.is_live())
    }

    pub fn are_connected(&self, a: usize, b: usize) -> bool {
        self.live_corridors().any(|corridor| corridor.joins(a, b))
    }

    pub fn live_corridor_count(&self, cell: usize) -> usize {
        self.live_corridors().filter(|corridor| corridor.touches(cell)).count()
    }

    pub fn cells_marked(&self, mark: RoomMark) -> Vec<usize> {
        (0..CELL_COUNT).filter(|&cell| self.rooms[cell].mark == mark).collect()
    }

    fn connect(&mut self, origin: usize, dest: usize) {
        self.corridors.push(Corridor { origin, dest, mark: CorridorMark::Normal });
        self.rooms[origin].mark = RoomMark::Connected;
        self.rooms[dest].mark = RoomMark::Connected;
    }

    fn random_cell(&self, mark: RoomMark, rng: &mut FloorRng) -> Option<usize> {
        rng.pick(&self.cells_marked(mark))
    }

    fn random_neighbour(
        &self,
        cell: usize,
        rng: &mut FloorRng,
        eligible: impl Fn(usize) -> bool,
    ) -> Option<usize> {
        let candidates: Vec<usize> =
            neighbours(cell).iter().copied().filter(|&next| eligible(next)).collect();
        rng.pick(&candidates)
    }

    pub fn connect_first(&mut self, rng: &mut FloorRng) -> Option<(usize, usize)> {
        let cell = self.random_cell(RoomMark::Unconnected, rng)?;
        let next = self.random_neighbour(cell, rng, |_| true)?;
        self.connect(cell, next);
        Some((cell, next))
    }

    /// Attaches unconnected cells to the component until none remain or
    /// `retry_limit` draws found no connected neighbour. Returns the number of
    /// failed draws.
    pub fn span(&mut self, rng: &mut FloorRng, retry_limit: u32) -> u32 {
        let mut failures = 0;
        while failures < retry_limit {
            let Some(cell) = self.random_cell(RoomMark::Unconnected, rng) else {
                return failures;
            };
            match self.random_neighbour(cell, rng, |next| self.mark(next) == RoomMark::Connected)
            {
                Some(next) => self.connect(next, cell),
                None => failures += 1,
            }
        }
        debug!(
            failures,
            left = self.cells_marked(RoomMark::Unconnected).len(),
            "spanning retry ceiling reached"
        );
        failures
    }

    /// Adds between `min` and `max` corridors joining connected neighbours that
    /// are not yet directly joined. Returns how many were added.
    pub fn add_cycles(&mut self, rng: &mut FloorRng, min: usize, max: usize) -> usize {
        let wanted = rng.range_inclusive(min, max);
        let mut added = 0;
        while added < wanted {
            let mut candidates = Vec::new();
            for cell in self.cells_marked(RoomMark::Connected) {
                for &next in neighbours(cell) {
                    if next > cell
                        && self.mark(next) == RoomMark::Connected
                        && !self.are_connected(cell, next)
                    {
                        candidates.push((cell, next));
                    }
                }
            }
            let Some((cell, next)) = rng.pick(&candidates) else {
                break;
            };
            self.connect(cell, next);
            added += 1;
        }
        added
    }

    /// Drops up to `count` connected cells, always leaving at least one
    /// connected room standing, then prunes dead ends around each one.
    pub fn drop_rooms(&mut self, rng: &mut FloorRng, count: usize, prune_depth: u32) -> Vec<usize> {
        let mut dropped = Vec::new();
        for _ in 0..count {
            let connected = self.cells_marked(RoomMark::Connected);
            if connected.len() <= 1 {
                break;
            }
            let Some(cell) = rng.pick(&connected) else {
                break;
            };
            self.rooms[cell].mark = RoomMark::Dropped;
            dropped.push(cell);
        }
        for &cell in &dropped {
            self.prune_dead_end(cell, prune_depth);
        }
        dropped
    }

    /// Removes the single live corridor of a dropped cell, then re-checks the
    /// corridor's far end with one less level of depth.
    pub fn prune_dead_end(&mut self, cell: usize, remaining_depth: u32) {
        if remaining_depth == 0 || self.mark(cell) != RoomMark::Dropped {
            return;
        }
        let mut touching = self
            .corridors
            .iter()
            .enumerate()
            .filter(|(_, corridor)| corridor.is_live() && corridor.touches(cell))
            .map(|(index, _)| index);
        let (Some(index), None) = (touching.next(), touching.next()) else {
            return;
        };
        self.corridors[index].mark = CorridorMark::Dropped;
        let other = self.corridors[index].other_end(cell);
        debug!(cell, other, "pruned dead-end corridor");
        self.prune_dead_end(other, remaining_depth - 1);
    }

    /// Cells reachable from `start` over live corridors, passing through
    /// dropped waypoints.
    pub fn reachable_from(&self, start: usize) -> [bool; CELL_COUNT] {
        let mut seen = [false; CELL_COUNT];
        let mut stack = vec![start];
        seen[start] = true;
        while let Some(cell) = stack.pop() {
            for corridor in self.live_corridors().filter(|corridor| corridor.touches(cell)) {
                let next = corridor.other_end(cell);
                if !seen[next] {
                    seen[next] = true;
                    stack.push(next);
                }
            }
        }
        seen
    }

    /// Small text diagram: cell ids, `-` and `|` for live corridors, blanks
    /// where a cell was dropped.
    pub fn schematic(&self) -> String {
        let mut lines = Vec::new();
        for row in 0..GRID_ROWS {
            let mut cells = vec![' '; GRID_COLUMNS * 4];
            let mut links = vec![' '; GRID_COLUMNS * 4];
            for column in 0..GRID_COLUMNS {
                let cell = row * GRID_COLUMNS + column;
                if self.mark(cell) != RoomMark::Dropped {
                    cells[column * 4] = char::from(b'0' + cell as u8);
                }
                if column + 1 < GRID_COLUMNS && self.are_connected(cell, cell + 1) {
                    cells[column * 4 + 2] = '-';
                }
                if row + 1 < GRID_ROWS && self.are_connected(cell, cell + GRID_COLUMNS) {
                    links[column * 4] = '|';
                }
            }
            lines.push(cells.into_iter().collect::<String>().trim_end().to_string());
            if row + 1 < GRID_ROWS {
                lines.push(links.into_iter().collect::<String>().trim_end().to_string());
            }
        }
        lines.join("\n")
    }
}
