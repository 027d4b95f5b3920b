use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use dungeon_core::{DistanceMap, FloorConfig, Game, MoveOutcome, generate_floor};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tools::config_file;
use tools::invariants::{check_floor, check_sight};
use tracing::{debug, info};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Independent runs to sweep
    #[arg(short, long, default_value_t = 200)]
    runs: u32,
    /// Floors to walk through per run
    #[arg(short, long, default_value_t = 5)]
    floors: u32,
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    tools::init_tracing(args.verbose);
    let config = config_file::load_or_default(args.config.as_deref())?;

    println!("Sweeping {} runs of {} floors from seed {}...", args.runs, args.floors, args.seed);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    for run in 0..args.runs {
        let run_seed = rng.next_u64();
        for floor_index in 1..=args.floors {
            let floor = generate_floor(&config, run_seed, floor_index)?;
            check_floor(&floor)
                .with_context(|| format!("run seed {run_seed}, floor {floor_index}"))?;
        }
        walk_run(run_seed, &config, args.floors)
            .with_context(|| format!("walking run seed {run_seed}"))?;
        debug!(run, run_seed, "run clean");
    }

    info!(runs = args.runs, "sweep finished");
    println!("Fuzzing completed successfully.");
    Ok(())
}

/// Walks the player stairs to stairs through `floors` floors, checking sight
/// bookkeeping after every step.
fn walk_run(run_seed: u64, config: &FloorConfig, floors: u32) -> Result<()> {
    let mut game = Game::new(run_seed, config.clone())?;
    for _ in 1..floors {
        let down = game.floor().stairs_down;
        let field = DistanceMap::build(&game.floor().map, &[down]);
        let Some(path) = field.path_from(game.player()) else {
            bail!("floor {}: no route to the down stairs", game.floor_index());
        };
        for step in path.steps {
            let outcome = game.move_player(step - game.player());
            if matches!(outcome, MoveOutcome::Blocked | MoveOutcome::OutOfBounds) {
                bail!("floor {}: step to {step} refused ({outcome:?})", game.floor_index());
            }
            check_sight(&game.floor().map)?;
        }
        if !game.descend() {
            bail!("floor {}: descend refused on the down stairs", game.floor_index());
        }
    }
    Ok(())
}
