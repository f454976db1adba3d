//! Burger Dash headless runner
//!
//! Plays the game on autopilot for a fixed number of ticks and prints a JSON
//! summary. Useful for soak-testing the generator and the state machine.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use serde::Serialize;

use burger_dash::sim::{GameEvent, autopilot};
use burger_dash::{
    ConfigError, Headless, HighScoreStore, Hud, JsonFileStore, MemoryStore, Session, Settings,
};

#[derive(Debug, Parser)]
#[command(name = "burger-dash", about = "Run Burger Dash headless on autopilot")]
struct Args {
    /// RNG seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 3600)]
    ticks: u64,

    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// JSON file holding the best level; kept in memory if omitted
    #[arg(long)]
    high_score_file: Option<PathBuf>,

    /// Start a new run after a game over instead of stopping
    #[arg(long)]
    restart: bool,
}

#[derive(Debug, Default, Serialize)]
struct Summary {
    seed: u64,
    ticks: u64,
    runs: u32,
    levels_cleared: u32,
    pickups: u32,
    hits: u32,
    hud: Option<Hud>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Args::parse()) {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), ConfigError> {
    let settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let store: Box<dyn HighScoreStore> = match &args.high_score_file {
        Some(path) => Box::new(JsonFileStore::open(path)),
        None => Box::new(MemoryStore::new()),
    };
    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    });

    let mut session = Session::new(settings, seed, store, Box::new(Headless))?;
    let mut summary = Summary {
        seed,
        runs: 1,
        ..Default::default()
    };

    while summary.ticks < args.ticks {
        if session.is_game_over() {
            if !args.restart {
                break;
            }
            session.restart();
            summary.runs += 1;
        }

        let directions = autopilot(session.state(), session.settings());
        for event in session.step(directions) {
            match event {
                GameEvent::PickupCollected { .. } => summary.pickups += 1,
                GameEvent::PlayerHit { .. } => summary.hits += 1,
                GameEvent::LevelCleared { .. } => summary.levels_cleared += 1,
                _ => {}
            }
        }
        summary.ticks += 1;
    }

    summary.hud = Some(session.hud());
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Could not serialize summary: {e}"),
    }
    Ok(())
}
