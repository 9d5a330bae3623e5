pub mod config;
pub mod game;
pub mod stats;
pub mod task;
pub mod timer;

use focusdo_core::storage::Database;
use focusdo_core::{Config, PomodoroEngine};

const ENGINE_KEY: &str = "pomodoro_engine";

/// Restore the persisted engine, or build a fresh one from config.
///
/// The current config is re-applied either way, so duration edits take
/// effect on the next phase without wiping an in-flight countdown.
pub(crate) fn load_engine(db: &Database, config: &Config) -> PomodoroEngine {
    let mut engine = db
        .kv_get(ENGINE_KEY)
        .ok()
        .flatten()
        .and_then(|json| serde_json::from_str::<PomodoroEngine>(&json).ok())
        .unwrap_or_else(|| PomodoroEngine::new(config.engine_config()));
    engine.set_config(config.engine_config());
    engine
}

pub(crate) fn save_engine(
    db: &Database,
    engine: &PomodoroEngine,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(engine)?;
    db.kv_set(ENGINE_KEY, &json)?;
    Ok(())
}
