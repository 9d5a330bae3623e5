//! Timer control commands.
//!
//! The engine is persisted in the database between invocations. `watch`
//! is the tick driver: it delivers one tick per second in the foreground
//! and records completed phases as sessions.

use std::thread;
use std::time::Duration;

use clap::Subcommand;
use focusdo_core::storage::Database;
use focusdo_core::{Config, Event, Phase};

use super::{load_engine, save_engine};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start a work session (restarts any session in progress)
    Start,
    /// Pause the countdown, or resume it (starts a session from idle)
    Toggle,
    /// Jump straight into a short break
    SkipBreak,
    /// Reset to idle state
    Reset,
    /// Print current timer state as JSON
    Status,
    /// Run the countdown in the foreground, one tick per second
    Watch {
        /// Stop after this many seconds instead of the end of the phase
        #[arg(long)]
        seconds: Option<u64>,
    },
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = Database::open()?;
    let mut engine = load_engine(&db, &config);

    match action {
        TimerAction::Start => {
            if let Some(event) = engine.start() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
        TimerAction::Toggle => {
            if let Some(event) = engine.pause_or_resume() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
        TimerAction::SkipBreak => {
            if let Some(event) = engine.skip_to_break() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
        TimerAction::Reset => {
            if let Some(event) = engine.reset() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
        TimerAction::Status => {
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
        TimerAction::Watch { seconds } => {
            watch(&db, &mut engine, seconds)?;
        }
    }

    save_engine(&db, &engine)?;
    Ok(())
}

fn watch(
    db: &Database,
    engine: &mut focusdo_core::PomodoroEngine,
    seconds: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    if !engine.is_running() {
        println!("timer is paused; run `focusdo timer toggle` first");
        return Ok(());
    }

    let mut elapsed = 0u64;
    loop {
        thread::sleep(Duration::from_secs(1));
        elapsed += 1;

        if let Some(event) = engine.tick() {
            println!("{}", serde_json::to_string_pretty(&event)?);
            if let Event::PhaseCompleted { from, at, .. } = event {
                record_completed(db, engine, from, at);
            }
            if !engine.is_running() {
                break;
            }
        }
        if let Some(max) = seconds {
            if elapsed >= max {
                break;
            }
        }
        // Persist every tick so a killed watch loses at most one second.
        save_engine(db, engine)?;
    }

    println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    Ok(())
}

fn record_completed(
    db: &Database,
    engine: &focusdo_core::PomodoroEngine,
    phase: Phase,
    at: chrono::DateTime<chrono::Utc>,
) {
    let duration_secs = engine.config().durations.duration_secs(phase);
    if let Err(e) = db.record_session(phase, duration_secs, at) {
        tracing::error!(error = %e, "failed to record session");
    }
}
