//! Shared plumbing for the command-line front ends.

pub mod config_file;
pub mod invariants;
pub mod report;

use std::io;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Installs a stderr subscriber so rendered floors on stdout stay clean.
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { "dungeon_core=debug,tools=debug,info" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_writer(io::stderr))
        .init();
}
