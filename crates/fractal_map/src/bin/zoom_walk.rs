//! # Zoom Walk
//!
//! Headless scripted walk over the infinite map:
//!
//! Origin → Zoom Out x2 → Pan Loop → Zoom In → Shutdown
//!
//! Logs registry statistics after every phase.
//!
//! Usage: `zoom_walk [config.toml]`. Log level comes from `RUST_LOG`
//! (default `info`).

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fractal_core::{ChildPosition, Direction};
use fractal_map::{MapConfig, MapSession};

/// Pans a ring around the focus and ends where it started.
const PAN_LOOP: [Direction; 10] = [
    Direction::Right,
    Direction::Down,
    Direction::Left,
    Direction::Left,
    Direction::Up,
    Direction::Up,
    Direction::Right,
    Direction::Right,
    Direction::Down,
    Direction::Left,
];

fn log_stats(phase: &str, session: &MapSession) -> anyhow::Result<()> {
    let stats = session.stats()?;
    info!(
        phase,
        blocks = stats.blocks,
        chunks = stats.chunks,
        focus_level = stats.focus_level,
        top_level = stats.top_level,
        "registry statistics"
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => MapConfig::load(&path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => MapConfig::default(),
    };
    info!(
        max_blocks = ?config.hierarchy.max_blocks,
        fill = config.fill.is_some(),
        "configuration loaded"
    );

    let start = Instant::now();
    let mut session = MapSession::new(&config).context("failed to start session")?;
    log_stats("origin", &session)?;

    // =========================================================================
    // PHASE 1: Zoom out twice
    // =========================================================================
    session.zoom_out().context("first zoom out")?;
    session.zoom_out().context("second zoom out")?;
    log_stats("zoom_out", &session)?;

    // =========================================================================
    // PHASE 2: Pan loop
    // =========================================================================
    let loop_start = session.focus();
    for direction in PAN_LOOP {
        session
            .pan(direction)
            .with_context(|| format!("pan {direction} from {}", session.focus()))?;
    }
    anyhow::ensure!(
        session.focus() == loop_start,
        "pan loop ended on {} instead of {}",
        session.focus(),
        loop_start
    );
    log_stats("pan_loop", &session)?;

    // =========================================================================
    // PHASE 3: Zoom back in to the origin's parent
    // =========================================================================
    session
        .zoom_in(ChildPosition::CenterCenter)
        .context("zoom in")?;
    log_stats("zoom_in", &session)?;

    let outcome = session.shutdown();
    info!(elapsed_ms = start.elapsed().as_millis(), ?outcome, "walk complete");
    Ok(())
}
