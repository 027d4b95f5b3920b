//! ASCII dumps of floors and navigation state for debugging and tools.

use crate::navigation::{DistanceMap, Path};
use crate::state::Map;
use crate::types::Coord;

pub fn render_map(map: &Map) -> String {
    render_with(map, |_| None)
}

/// The map with path steps numbered `1..9, 0` cycling.
pub fn render_path_overlay(map: &Map, path: &Path) -> String {
    render_with(map, |pos| {
        path.steps.iter().position(|&step| step == pos).map(|index| digit((index + 1) as u32))
    })
}

/// The map with each reached tile replaced by its distance modulo ten and
/// targets drawn as `*`.
pub fn render_distance_overlay(map: &Map, field: &DistanceMap) -> String {
    render_with(map, |pos| {
        if field.targets().contains(&pos) {
            return Some('*');
        }
        field.distance(pos).map(digit)
    })
}

fn digit(value: u32) -> char {
    char::from_digit(value % 10, 10).unwrap_or('?')
}

fn render_with(map: &Map, overlay: impl Fn(Coord) -> Option<char>) -> String {
    let mut out = String::with_capacity((map.width() + 1) * map.height());
    for y in 0..map.height() as i32 {
        for x in 0..map.width() as i32 {
            let pos = Coord { x, y };
            out.push(overlay(pos).unwrap_or_else(|| map.tile_kind_at(pos).glyph()));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::find_path;
    use crate::test_support::{open_floor_fixture, two_room_fixture};
    use crate::types::TileKind;

    #[test]
    fn rendered_rooms_use_rogue_glyphs() {
        let (map, _) = two_room_fixture();
        let rendered = render_map(&map);
        let rows: Vec<&str> = rendered.lines().collect();
        assert_eq!(rows.len(), 8);
        assert!(rows.iter().all(|row| row.chars().count() == 30));
        assert_eq!(rows[1].trim_end(), " --------       ---------");
        assert_eq!(rows[3].trim_end(), " |......+#######+.......|");
    }

    #[test]
    fn path_overlay_numbers_steps_and_wraps_after_nine() {
        let map = open_floor_fixture(12, 1);
        let path = find_path(&map, Coord::new(0, 0), Coord::new(11, 0)).expect("straight line");
        assert_eq!(render_path_overlay(&map, &path), ".12345678901\n");
    }

    #[test]
    fn distance_overlay_marks_targets_and_unreached_tiles() {
        let mut map = open_floor_fixture(13, 1);
        map.set_tile_kind(Coord::new(12, 0), TileKind::WallVertical);
        let field = DistanceMap::build(&map, &[Coord::new(0, 0)]);
        assert_eq!(render_distance_overlay(&map, &field), "*12345678901|\n");
    }
}
