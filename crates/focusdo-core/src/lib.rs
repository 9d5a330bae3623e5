//! # Focusdo Core Library
//!
//! This library provides the core business logic for the Focusdo
//! productivity app: a configurable Pomodoro timer engine, a tap-for-points
//! break minigame, and a persisted task list. All operations are available
//! via a standalone CLI binary; any GUI is a thin layer over the same core.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a tick-driven state machine with no internal thread.
//!   The caller delivers one `tick()` per elapsed second while the engine
//!   is running
//! - **Storage**: JSON-file task persistence, SQLite session storage, and
//!   TOML-based configuration
//! - **Events**: every state change produces an [`Event`]; observers attach
//!   through a typed [`EventBus`]
//!
//! ## Key Components
//!
//! - [`PomodoroEngine`]: core timer state machine
//! - [`TaskStore`]: task list with JSON persistence and change notification
//! - [`Database`]: completed-session records and statistics
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod storage;
pub mod task;
pub mod timer;

pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::{Event, EventBus, SubscriberId};
pub use storage::{Config, Database, SessionRecord, Stats, TaskStore};
pub use task::{Priority, TaskItem};
pub use timer::{
    BreakGameState, EngineConfig, Phase, PhaseDurations, PomodoroEngine, TimerSnapshot,
};
