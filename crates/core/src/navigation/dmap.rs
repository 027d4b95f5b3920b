//! Static Dijkstra map: breadth-first distance to the nearest target over the
//! whole reachable floor, queried in constant time per step.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::state::Map;
use crate::types::Coord;

use super::{NEIGHBOUR_OFFSETS, Path, PathSource};

const CARDINAL_COUNT: usize = 4;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceMap {
    width: usize,
    height: usize,
    targets: Vec<Coord>,
    distance: Vec<Option<u32>>,
    /// Door and corridor tiles at flood time; diagonal steps touching them are refused.
    passages: Vec<bool>,
    iterations: u32,
}

impl DistanceMap {
    pub fn build(map: &Map, targets: &[Coord]) -> Self {
        let mut field = Self::default();
        field.reset(map, targets);
        field
    }

    pub fn reset(&mut self, map: &Map, targets: &[Coord]) {
        self.targets.clear();
        self.targets.extend_from_slice(targets);
        self.flood(map);
    }

    pub fn add_targets(&mut self, map: &Map, targets: &[Coord]) {
        for &target in targets {
            if !self.targets.contains(&target) {
                self.targets.push(target);
            }
        }
        self.flood(map);
    }

    pub fn targets(&self) -> &[Coord] {
        &self.targets
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn distance(&self, pos: Coord) -> Option<u32> {
        self.index(pos).and_then(|idx| self.distance[idx])
    }

    /// The neighbour one step closer to a target. Cardinals are tried before
    /// diagonals, each group in reverse flooding order.
    pub fn next_step(&self, pos: Coord) -> Option<Coord> {
        let here = self.distance(pos)?;
        if here == 0 {
            return None;
        }
        let wanted = here - 1;
        let (cardinals, diagonals) = NEIGHBOUR_OFFSETS.split_at(CARDINAL_COUNT);
        cardinals
            .iter()
            .rev()
            .chain(diagonals.iter().rev())
            .map(|&offset| pos + offset)
            .find(|&next| self.distance(next) == Some(wanted) && self.can_step(pos, next))
    }

    pub fn path_from(&self, pos: Coord) -> Option<Path> {
        let mut remaining = self.distance(pos)?;
        let mut steps = Vec::with_capacity(remaining as usize);
        let mut current = pos;
        while remaining > 0 {
            current = self.next_step(current)?;
            steps.push(current);
            remaining -= 1;
        }
        Some(Path { steps, source: PathSource::DistanceMap, iterations: self.iterations })
    }

    fn flood(&mut self, map: &Map) {
        self.width = map.width();
        self.height = map.height();
        self.distance.clear();
        self.distance.resize(self.width * self.height, None);
        self.passages = map.coords().map(|pos| map.tile_kind_at(pos).is_passage()).collect();
        self.iterations = 0;

        let mut frontier = VecDeque::new();
        for &target in &self.targets {
            if let Some(idx) = self.index(target)
                && self.distance[idx].is_none()
            {
                self.distance[idx] = Some(0);
                frontier.push_back(target);
            }
        }

        while let Some(current) = frontier.pop_front() {
            self.iterations += 1;
            let Some(here) = self.distance(current) else {
                continue;
            };
            for next in map.walkable_neighbours(current) {
                let idx = map.index(next);
                if self.distance[idx].is_none() {
                    self.distance[idx] = Some(here + 1);
                    frontier.push_back(next);
                }
            }
        }
        trace!(targets = self.targets.len(), iterations = self.iterations, "distance map flooded");
    }

    fn can_step(&self, from: Coord, to: Coord) -> bool {
        if !from.is_diagonal_to(to) {
            return true;
        }
        let touches_passage = |pos| self.index(pos).is_some_and(|idx| self.passages[idx]);
        !touches_passage(from) && !touches_passage(to)
    }

    fn index(&self, pos: Coord) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::test_support::open_floor_fixture;
    use crate::types::TileKind;

    #[test]
    fn open_floor_distances_radiate_from_single_target() {
        let map = open_floor_fixture(20, 20);
        let target = Coord::new(10, 10);
        let field = DistanceMap::build(&map, &[target]);

        assert_eq!(field.distance(target), Some(0));
        assert_eq!(field.distance(Coord::new(11, 10)), Some(1));
        assert_eq!(field.distance(Coord::new(11, 11)), Some(1));
        assert_eq!(field.next_step(Coord::new(12, 12)), Some(Coord::new(12, 11)));
        assert_eq!(field.next_step(Coord::new(11, 11)), Some(target));
        assert_eq!(field.next_step(target), None);
    }

    #[test]
    fn chase_along_a_row_stays_on_the_row() {
        let map = open_floor_fixture(20, 20);
        let target = Coord::new(10, 10);
        let field = DistanceMap::build(&map, &[target]);

        assert_eq!(field.next_step(Coord::new(12, 10)), Some(Coord::new(11, 10)));
        let path = field.path_from(Coord::new(14, 10)).expect("open floor");
        assert_eq!(
            path.steps,
            vec![Coord::new(13, 10), Coord::new(12, 10), Coord::new(11, 10), target]
        );
        let column = field.path_from(Coord::new(10, 6)).expect("open floor");
        assert!(column.steps.iter().all(|step| step.x == 10), "{column}");
    }

    #[test]
    fn unreachable_and_out_of_bounds_tiles_have_no_distance() {
        let mut map = open_floor_fixture(7, 5);
        for y in 0..5 {
            map.set_tile_kind(Coord::new(3, y), TileKind::WallVertical);
        }
        let field = DistanceMap::build(&map, &[Coord::new(1, 2)]);
        assert_eq!(field.distance(Coord::new(5, 2)), None);
        assert_eq!(field.distance(Coord::new(3, 2)), None);
        assert_eq!(field.distance(Coord::new(-1, 2)), None);
        assert_eq!(field.next_step(Coord::new(5, 2)), None);
        assert_eq!(field.path_from(Coord::new(5, 2)), None);
    }

    #[test]
    fn next_step_does_not_cut_diagonally_out_of_a_doorway() {
        // Room floor on the right, doorway at (2,2) and corridor leading west.
        let mut map = Map::new(8, 5);
        for y in 1..=3 {
            for x in 3..=6 {
                map.set_tile_kind(Coord::new(x, y), TileKind::Floor);
            }
        }
        map.set_tile_kind(Coord::new(2, 2), TileKind::Door);
        map.set_tile_kind(Coord::new(1, 2), TileKind::Corridor);
        let field = DistanceMap::build(&map, &[Coord::new(4, 2)]);

        assert_eq!(field.distance(Coord::new(3, 1)), Some(1));
        assert_eq!(field.distance(Coord::new(3, 2)), Some(1));
        assert_eq!(field.next_step(Coord::new(2, 2)), Some(Coord::new(3, 2)));
        let path = field.path_from(Coord::new(1, 2)).expect("corridor reaches the room");
        assert_eq!(path.steps, vec![Coord::new(2, 2), Coord::new(3, 2), Coord::new(4, 2)]);
        assert_eq!(path.source, PathSource::DistanceMap);
    }

    #[test]
    fn added_targets_pull_distances_down() {
        let map = open_floor_fixture(30, 3);
        let mut field = DistanceMap::build(&map, &[Coord::new(0, 1)]);
        assert_eq!(field.distance(Coord::new(29, 1)), Some(29));

        field.add_targets(&map, &[Coord::new(29, 1), Coord::new(0, 1)]);
        assert_eq!(field.targets().len(), 2);
        assert_eq!(field.distance(Coord::new(29, 1)), Some(0));
        assert_eq!(field.distance(Coord::new(15, 1)), Some(14));

        field.reset(&map, &[Coord::new(15, 1)]);
        assert_eq!(field.targets(), &[Coord::new(15, 1)]);
        assert_eq!(field.distance(Coord::new(0, 1)), Some(15));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]
        #[test]
        fn every_reached_tile_is_one_more_than_its_best_neighbour(
            seed in any::<u64>(),
            tx in 1_i32..15,
            ty in 1_i32..11,
        ) {
            // Scatter a few walls with a cheap LCG so the field has obstacles.
            let mut map = open_floor_fixture(16, 12);
            let mut state = seed | 1;
            for _ in 0..30 {
                state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
                let x = ((state >> 33) % 16) as i32;
                let y = ((state >> 17) % 12) as i32;
                map.set_tile_kind(Coord::new(x, y), TileKind::WallHorizontal);
            }
            let target = Coord::new(tx, ty);
            map.set_tile_kind(target, TileKind::Floor);
            let field = DistanceMap::build(&map, &[target]);

            for pos in map.coords() {
                let Some(here) = field.distance(pos) else { continue };
                let best = map
                    .walkable_neighbours(pos)
                    .into_iter()
                    .filter_map(|next| field.distance(next))
                    .min();
                if pos == target {
                    prop_assert_eq!(here, 0);
                    continue;
                }
                prop_assert_eq!(Some(here - 1), best, "pos={}", pos);
                let step = field.next_step(pos);
                prop_assert!(step.is_some_and(|next| field.distance(next) == Some(here - 1)));
                prop_assert!(step.is_some_and(|next| map.is_walkable(pos, next)));
            }
        }
    }
}
