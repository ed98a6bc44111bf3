//! Pong entry point
//!
//! Sets up logging and the terminal, then runs the frame loop until the
//! player quits.

use std::fs::File;

use anyhow::Context;

use pong_screens::audio::AudioManager;
use pong_screens::platform::terminal::{
    LogAudio, SystemClock, TerminalAssets, TerminalCanvas, TerminalGuard, TerminalInput,
};
use pong_screens::{GameLoop, Settings};

const LOG_FILE: &str = "pong.log";

fn init_logging() -> anyhow::Result<()> {
    let file = File::create(LOG_FILE).with_context(|| format!("Failed to create {LOG_FILE}"))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    log::info!("Pong starting...");

    let settings = Settings::load();
    let audio = AudioManager::new(Box::new(LogAudio), &settings);

    // Restores the terminal on every exit path, including errors
    let guard = TerminalGuard::enter()?;
    let (cols, rows) = guard.size()?;
    log::info!("Terminal grid {}x{}", cols, rows);

    let canvas = TerminalCanvas::stdout()?;
    let assets = TerminalAssets::new(canvas.metrics());
    let mut game = GameLoop::new(
        canvas,
        assets,
        TerminalInput,
        SystemClock::default(),
        audio,
    );
    game.run().context("Game loop failed")?;

    drop(guard);
    log::info!("Pong exited after {} frames", game.frames());
    Ok(())
}
