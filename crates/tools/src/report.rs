//! Printable and JSON views of a generated floor.

use clap::ValueEnum;
use dungeon_core::diagnostics::{render_distance_overlay, render_map, render_path_overlay};
use dungeon_core::{Coord, DistanceMap, GeneratedFloor, Rect, find_path};
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Overlay {
    #[default]
    None,
    /// Breadth-first route from the up stairs to the down stairs.
    Path,
    /// Distance to the down stairs, modulo ten.
    Distance,
}

#[derive(Clone, Debug, Serialize)]
pub struct FloorReport {
    pub run_seed: u64,
    pub floor_index: u32,
    pub stairs_up: Coord,
    pub stairs_down: Coord,
    pub rooms: Vec<Rect>,
    pub live_corridors: usize,
    /// Summary of the stairs-to-stairs route, `None` when unreachable.
    pub route: Option<String>,
    pub schematic: Vec<String>,
    pub rows: Vec<String>,
}

impl FloorReport {
    pub fn new(run_seed: u64, floor_index: u32, floor: &GeneratedFloor, overlay: Overlay) -> Self {
        let route = find_path(&floor.map, floor.stairs_up, floor.stairs_down);
        let rendered = match (overlay, &route) {
            (Overlay::Path, Some(path)) => render_path_overlay(&floor.map, path),
            (Overlay::Distance, _) => {
                let field = DistanceMap::build(&floor.map, &[floor.stairs_down]);
                render_distance_overlay(&floor.map, &field)
            }
            _ => render_map(&floor.map),
        };
        Self {
            run_seed,
            floor_index,
            stairs_up: floor.stairs_up,
            stairs_down: floor.stairs_down,
            rooms: floor.map.rooms().to_vec(),
            live_corridors: floor.graph.live_corridors().count(),
            route: route.map(|path| path.to_string()),
            schematic: floor.graph.schematic().lines().map(str::to_owned).collect(),
            rows: rendered.lines().map(str::to_owned).collect(),
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = format!(
            "seed {} floor {}: {} rooms, {} corridors, up {} down {}\n",
            self.run_seed,
            self.floor_index,
            self.rooms.len(),
            self.live_corridors,
            self.stairs_up,
            self.stairs_down,
        );
        if let Some(route) = &self.route {
            out.push_str(&format!("route: {route}\n"));
        }
        for line in &self.schematic {
            out.push_str(line);
            out.push('\n');
        }
        for row in &self.rows {
            out.push_str(row);
            out.push('\n');
        }
        out
    }
}
