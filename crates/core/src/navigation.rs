//! Shortest-route queries over a floor: a one-shot breadth-first path used for
//! diagnostics and a standing distance field used for chasing.

mod bfs;
mod dmap;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Coord;

pub use bfs::find_path;
pub use dmap::DistanceMap;

/// Flooding order: the four cardinals (W, S, E, N) then the diagonals.
pub const NEIGHBOUR_OFFSETS: [Coord; 8] = [
    Coord::new(-1, 0),
    Coord::new(0, 1),
    Coord::new(1, 0),
    Coord::new(0, -1),
    Coord::new(-1, -1),
    Coord::new(-1, 1),
    Coord::new(1, -1),
    Coord::new(1, 1),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathSource {
    Bfs,
    DistanceMap,
}

impl fmt::Display for PathSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PathSource::Bfs => "bfs",
            PathSource::DistanceMap => "dmap",
        })
    }
}

/// Ordered steps toward a destination, start excluded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    pub steps: Vec<Coord>,
    pub source: PathSource,
    /// Frontier expansions the producing search performed.
    pub iterations: u32,
}

impl Path {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn first_step(&self) -> Option<Coord> {
        self.steps.first().copied()
    }

    pub fn destination(&self) -> Option<Coord> {
        self.steps.last().copied()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "len={}, algo={}, iter={}", self.len(), self.source, self.iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_summary_names_length_source_and_work() {
        let path = Path {
            steps: vec![Coord::new(1, 0), Coord::new(2, 0)],
            source: PathSource::Bfs,
            iterations: 7,
        };
        assert_eq!(path.to_string(), "len=2, algo=bfs, iter=7");
        assert_eq!(path.first_step(), Some(Coord::new(1, 0)));
        assert_eq!(path.destination(), Some(Coord::new(2, 0)));
    }

    #[test]
    fn offsets_list_cardinals_before_diagonals() {
        assert!(NEIGHBOUR_OFFSETS[..4].iter().all(|offset| !offset.is_diagonal()));
        assert!(NEIGHBOUR_OFFSETS[4..].iter().all(|offset| offset.is_diagonal()));
        assert!(NEIGHBOUR_OFFSETS.iter().all(|offset| offset.chebyshev(Coord::default()) == 1));
    }
}
