mod config;
pub mod database;
mod tasks;

pub use config::{Config, GameConfig, TimerConfig};
pub use database::{Database, SessionRecord, Stats};
pub use tasks::TaskStore;

use std::path::PathBuf;

use crate::error::CoreError;

/// Returns `~/.config/focusdo[-dev]/` based on FOCUSDO_ENV.
///
/// Set FOCUSDO_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, CoreError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FOCUSDO_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("focusdo-dev")
    } else {
        base_dir.join("focusdo")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
