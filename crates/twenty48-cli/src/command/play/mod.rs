use std::{path::PathBuf, time::Duration};

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{command::play::app::PlayApp, logging, tui::Tui, util};

mod app;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Spawn a random tile after every committed move
    #[clap(long)]
    spawn_tiles: bool,
    /// Seed for tile spawning and randomization
    #[clap(long)]
    seed: Option<u64>,
    /// Delay between auto-play moves in milliseconds
    #[clap(long, default_value_t = 200)]
    interval_ms: u64,
    /// Path to an expectimax configuration file (JSON format)
    #[clap(long)]
    selector_config: Option<PathBuf>,
    /// Write logs to this file
    #[clap(long)]
    log_file: Option<PathBuf>,
    /// Log filter used with --log-file
    #[clap(long, default_value = "debug")]
    log: String,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            spawn_tiles: false,
            seed: None,
            interval_ms: 200,
            selector_config: None,
            log_file: None,
            log: "debug".to_owned(),
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        spawn_tiles,
        seed,
        interval_ms,
        selector_config,
        log_file,
        log,
    } = arg;

    if let Some(path) = log_file {
        logging::init_file(log, path)?;
    }

    let selector = util::build_selector(selector_config.as_deref())?;
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    tracing::info!(seed, spawn_tiles, "starting terminal session");

    let mut app = PlayApp::new(
        Box::new(selector),
        Pcg32::seed_from_u64(seed),
        *spawn_tiles,
        Duration::from_millis(*interval_ms),
    );
    Tui::new().run(&mut app)?;

    let stats = app.stats();
    tracing::info!(
        score = stats.score(),
        moves = stats.moves(),
        "terminal session finished"
    );
    Ok(())
}
