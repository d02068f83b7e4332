//! # Skirmish
//!
//! Entry point for the two-player platform fighter.
//!
//! Usage: `skirmish [CONFIG_PATH]`. Without a path the per-user
//! `skirmish.toml` is used, falling back to defaults.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use anyhow::{Context, Result};
use skirmish_engine::EngineConfig;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Main entry point.
fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("skirmish=info".parse()?))
        .init();

    info!("Skirmish starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let mut config = match std::env::args_os().nth(1) {
        Some(path) => EngineConfig::try_load_from(&path)
            .with_context(|| format!("Failed to read config {}", path.to_string_lossy()))?,
        None => EngineConfig::load(),
    };
    config.validate();

    let summary = skirmish_engine::run(config)?;

    for (round, result) in summary.results.iter().enumerate() {
        info!(
            round = round + 1,
            outcome = ?result.outcome,
            reason = ?result.reason,
            p1_health = result.health[0],
            p2_health = result.health[1],
            "Match result"
        );
    }
    if let Some(destination) = &summary.destination {
        info!(destination = %destination, "Next destination");
    }

    info!(frames = summary.frames, "Skirmish shutdown complete");
    Ok(())
}
