mod engine;
mod game;
mod phase;

pub use engine::{EngineConfig, PomodoroEngine, TimerSnapshot};
pub use game::BreakGameState;
pub use phase::{Phase, PhaseDurations};
