//! Tiny Golf entry point
//!
//! Loads settings, generates a scene and runs the game in the terminal.

use std::path::PathBuf;

use tiny_golf::platform::{TerminalPlatform, ThreadPacer};
use tiny_golf::sim::GameState;
use tiny_golf::{AppError, FrameScheduler, SessionOutcome, SessionSummary, Settings};

fn main() {
    env_logger::init();
    log::info!("Tiny Golf starting...");

    match run() {
        Ok(summary) => {
            if summary.outcome == SessionOutcome::Won {
                println!("You reached the hole!");
            }
            println!("Total collisions: {}", summary.collisions);
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("tiny-golf: {}", e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<SessionSummary, AppError> {
    let settings_path = std::env::args_os().nth(1).map(PathBuf::from);
    let settings = Settings::load(settings_path.as_deref())?;

    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Starting session with seed: {}", seed);
    let mut state = GameState::new(seed, &settings)?;

    let scheduler = FrameScheduler::from_settings(&settings);
    // Dropped before the summary is printed so the terminal is restored first
    let mut platform = TerminalPlatform::new(state.arena)?;
    let summary = scheduler.run(&mut state, &mut platform, &mut ThreadPacer)?;
    Ok(summary)
}
