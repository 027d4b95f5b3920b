use std::collections::VecDeque;

use crate::state::Map;
use crate::types::Coord;

use super::{Path, PathSource};

/// Breadth-first route from `from` to `to`. `from == to` yields an empty
/// path; an unreachable or out-of-bounds destination yields `None`.
pub fn find_path(map: &Map, from: Coord, to: Coord) -> Option<Path> {
    if from == to {
        return Some(Path { steps: Vec::new(), source: PathSource::Bfs, iterations: 0 });
    }
    if !map.in_bounds(from) || !map.in_bounds(to) {
        return None;
    }

    let mut came_from: Vec<Option<Coord>> = vec![None; map.width() * map.height()];
    let mut seen = vec![false; map.width() * map.height()];
    seen[map.index(from)] = true;
    let mut frontier = VecDeque::from([from]);
    let mut iterations = 0_u32;

    while let Some(current) = frontier.pop_front() {
        iterations += 1;
        for next in map.walkable_neighbours(current) {
            let idx = map.index(next);
            if seen[idx] {
                continue;
            }
            seen[idx] = true;
            came_from[idx] = Some(current);
            if next == to {
                let steps = reconstruct(map, &came_from, from, to);
                return Some(Path { steps, source: PathSource::Bfs, iterations });
            }
            frontier.push_back(next);
        }
    }
    None
}

fn reconstruct(map: &Map, came_from: &[Option<Coord>], from: Coord, to: Coord) -> Vec<Coord> {
    let mut steps = vec![to];
    let mut pos = to;
    while let Some(previous) = came_from[map.index(pos)] {
        if previous == from {
            break;
        }
        steps.push(previous);
        pos = previous;
    }
    steps.reverse();
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::open_floor_fixture;
    use crate::types::TileKind;

    #[test]
    fn path_to_self_is_empty() {
        let map = Map::new(4, 4);
        let path = find_path(&map, Coord::new(0, 0), Coord::new(0, 0)).expect("trivial path");
        assert!(path.is_empty());
        assert_eq!(path.to_string(), "len=0, algo=bfs, iter=0");
    }

    #[test]
    fn open_floor_path_is_chebyshev_length_and_excludes_start() {
        let map = open_floor_fixture(12, 12);
        let from = Coord::new(1, 1);
        let to = Coord::new(7, 4);
        let path = find_path(&map, from, to).expect("open floor is connected");
        assert_eq!(path.len() as u32, from.chebyshev(to));
        assert_eq!(path.destination(), Some(to));
        assert!(!path.steps.contains(&from));
        let mut previous = from;
        for &step in &path.steps {
            assert!(map.is_walkable(previous, step), "{previous} -> {step}");
            previous = step;
        }
        assert!(path.iterations > 0);
    }

    #[test]
    fn unreachable_destination_has_no_path() {
        let mut map = open_floor_fixture(7, 5);
        for y in 0..5 {
            map.set_tile_kind(Coord::new(3, y), TileKind::WallVertical);
        }
        assert_eq!(find_path(&map, Coord::new(1, 2), Coord::new(5, 2)), None);
        assert_eq!(find_path(&map, Coord::new(1, 2), Coord::new(9, 2)), None);
    }

    #[test]
    fn corridor_route_never_cuts_corners() {
        let mut map = Map::new(6, 6);
        for pos in [(1, 1), (2, 1), (3, 1), (3, 2), (3, 3), (4, 3)] {
            map.set_tile_kind(Coord::new(pos.0, pos.1), TileKind::Corridor);
        }
        let path = find_path(&map, Coord::new(1, 1), Coord::new(4, 3)).expect("corridor joins");
        assert_eq!(path.len(), 5);
        assert!(path.steps.windows(2).all(|pair| !pair[0].is_diagonal_to(pair[1])));
    }
}
