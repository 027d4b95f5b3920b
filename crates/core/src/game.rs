//! Session state for one run: the live floor, the player and floor transitions.
//! The turn loop that drives it lives with the caller.

mod hash;

use tracing::{debug, info};

use crate::config::{ConfigError, FloorConfig};
use crate::mapgen::{FloorRng, derive_floor_seed, generate_floor, generate_with};
use crate::state::FloorState;
use crate::types::{Coord, MoveOutcome, TileKind};

/// Floors are numbered from one, matching the depth shown to players.
pub const FIRST_FLOOR_INDEX: u32 = 1;

/// Salt separating the session's own draws from floor generation streams.
const SESSION_STREAM: u32 = u32::MAX;

#[derive(Clone, Debug)]
pub struct Game {
    run_seed: u64,
    config: FloorConfig,
    floor: FloorState,
    player: Coord,
    rng: FloorRng,
}

impl Game {
    pub fn new(run_seed: u64, config: FloorConfig) -> Result<Self, ConfigError> {
        let generated = generate_floor(&config, run_seed, FIRST_FLOOR_INDEX)?;
        let floor = FloorState::from_generated(FIRST_FLOOR_INDEX, generated);
        let rng = FloorRng::from_seed(derive_floor_seed(run_seed, SESSION_STREAM));
        let mut game = Self { run_seed, config, player: floor.spawn_point(), floor, rng };
        game.settle_player();
        info!(run_seed, "run started");
        Ok(game)
    }

    pub fn floor(&self) -> &FloorState {
        &self.floor
    }

    pub fn floor_index(&self) -> u32 {
        self.floor.floor_index
    }

    pub fn player(&self) -> Coord {
        self.player
    }

    /// Attempts a single step. Anything but a unit step is refused.
    pub fn move_player(&mut self, delta: Coord) -> MoveOutcome {
        let to = self.player + delta;
        let map = &self.floor.map;
        if !map.in_bounds(to) {
            return MoveOutcome::OutOfBounds;
        }
        if delta.chebyshev(Coord::default()) != 1 || !map.is_walkable(self.player, to) {
            return MoveOutcome::Blocked;
        }

        self.player = to;
        self.settle_player();
        match self.floor.map.tile_kind_at(to) {
            TileKind::Door => MoveOutcome::EnteredDoorway,
            tile => MoveOutcome::Moved { tile },
        }
    }

    pub fn descend(&mut self) -> bool {
        if self.floor.map.tile_kind_at(self.player) != TileKind::StairsDown {
            return false;
        }
        let next_index = self.floor.floor_index + 1;
        let mut rng = FloorRng::from_seed(derive_floor_seed(self.run_seed, next_index));
        let generated = generate_with(&self.config, &mut rng, next_index);
        self.floor = FloorState::from_generated(next_index, generated);
        self.player = self.floor.spawn_point();
        self.settle_player();
        info!(floor_index = next_index, "descended");
        true
    }

    /// The way up is sealed; only one floor is ever live.
    pub fn ascend(&mut self) -> bool {
        debug!(floor_index = self.floor.floor_index, "ascend refused");
        false
    }

    pub fn chase_step(&self, from: Coord) -> Option<Coord> {
        self.floor.distance.next_step(from)
    }

    /// A random room tile outside the player's current room, for placing
    /// newcomers out of sight.
    pub fn random_point_away_from_player(&mut self) -> Option<Coord> {
        let player_room = self.floor.map.room_at(self.player);
        self.floor.map.random_point_in_room(&mut self.rng, |room| Some(*room) != player_room)
    }

    fn settle_player(&mut self) {
        self.floor.retarget(self.player);
        self.floor.map.update_visibility(self.player);
    }
}
