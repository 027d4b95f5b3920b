use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dungeon_core::generate_floor;
use tools::config_file;
use tools::report::{FloorReport, Overlay};
use tracing::info;

#[derive(Parser)]
#[command(author, version, about = "Generate dungeon floors and print them", long_about = None)]
struct Args {
    /// Run seed; floors derive their own seeds from it
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// First floor to generate
    #[arg(long, default_value_t = 1)]
    first_floor: u32,
    /// Number of consecutive floors to generate
    #[arg(short, long, default_value_t = 1)]
    floors: u32,
    /// TOML file overriding generation parameters
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Write the effective config to this path and exit
    #[arg(long)]
    write_config: Option<PathBuf>,
    /// Overlay drawn over the floor
    #[arg(short, long, value_enum, default_value_t = Overlay::None)]
    overlay: Overlay,
    /// Emit one JSON document per floor instead of ASCII
    #[arg(long)]
    json: bool,
    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    tools::init_tracing(args.verbose);

    let config = config_file::load_or_default(args.config.as_deref())?;
    if let Some(path) = &args.write_config {
        config_file::write_atomic(&config, path)?;
        println!("Wrote config to {}", path.display());
        return Ok(());
    }

    info!(seed = args.seed, floors = args.floors, "generating floors");
    for floor_index in args.first_floor..args.first_floor.saturating_add(args.floors) {
        let floor = generate_floor(&config, args.seed, floor_index)
            .with_context(|| format!("Failed to generate floor {floor_index}"))?;
        let report = FloorReport::new(args.seed, floor_index, &floor, args.overlay);
        if args.json {
            let json = serde_json::to_string(&report)
                .with_context(|| format!("Failed to serialize floor {floor_index}"))?;
            println!("{json}");
        } else {
            print!("{}", report.to_text());
        }
    }
    Ok(())
}
