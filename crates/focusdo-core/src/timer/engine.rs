//! Pomodoro engine implementation.
//!
//! The engine is a tick-driven state machine. It does not use internal
//! threads - the caller delivers one `tick()` per elapsed second while the
//! engine is running.
//!
//! ## Phase Transitions
//!
//! ```text
//! Idle -> Work -> (ShortBreak | LongBreak) -> Work -> ...
//! ```
//!
//! A running/paused flag is orthogonal to the phase: a break can be paused
//! or actively counting down. Ticks delivered while paused are ignored, so
//! a tick that races a pause cannot resurrect the countdown.
//!
//! Ticks are wall-clock-approximate: if the host process is suspended the
//! countdown falls behind real elapsed time. The driver owns that concern.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = PomodoroEngine::new(EngineConfig::default());
//! engine.start();
//! // Once per second:
//! engine.tick(); // Returns Some(Event::PhaseCompleted) on a transition
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::game::BreakGameState;
use super::phase::{Phase, PhaseDurations};
use crate::events::Event;

/// Engine policy knobs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub durations: PhaseDurations,
    /// Take a long break after every Nth completed work phase.
    /// `None` means every break is a short one.
    pub long_break_every: Option<u32>,
    /// Keep counting down into the next phase after a completion.
    /// When false (the default) the engine stops and waits for an
    /// explicit resume.
    pub resume_on_completion: bool,
    /// Score multiplier for break-game taps.
    pub game_multiplier: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            durations: PhaseDurations::default(),
            long_break_every: None,
            resume_on_completion: false,
            game_multiplier: 1.0,
        }
    }
}

/// Read-only view of the engine state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub remaining_secs: u64,
    /// Work+break pairing currently in progress, 1-based once started.
    pub current_cycle: u32,
    pub total_cycles_completed: u32,
    pub is_running: bool,
}

impl Default for TimerSnapshot {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            remaining_secs: 0,
            current_cycle: 0,
            total_cycles_completed: 0,
            is_running: false,
        }
    }
}

/// Core Pomodoro state machine.
///
/// All commands are total over the state space: calls that make no sense
/// in the current state either delegate (pause-or-resume before any start
/// behaves as start) or return `None` without mutating anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PomodoroEngine {
    config: EngineConfig,
    phase: Phase,
    remaining_secs: u64,
    current_cycle: u32,
    total_cycles_completed: u32,
    is_running: bool,
    /// Open break-game session, if any. Only ever `Some` in a break phase.
    #[serde(default)]
    game: Option<BreakGameState>,
}

impl PomodoroEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            remaining_secs: 0,
            current_cycle: 0,
            total_cycles_completed: 0,
            is_running: false,
            game: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn game(&self) -> Option<&BreakGameState> {
        self.game.as_ref()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            current_cycle: self.current_cycle,
            total_cycles_completed: self.total_cycles_completed,
            is_running: self.is_running,
        }
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn phase_progress(&self) -> f64 {
        let total = self.config.durations.duration_secs(self.phase);
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs as f64 / total as f64)
    }

    /// Replace the policy knobs. Durations apply from the next phase
    /// transition; the remaining time of the phase in flight is kept,
    /// clamped to the new duration so it never exceeds it.
    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
        if self.phase != Phase::Idle {
            self.remaining_secs = self
                .remaining_secs
                .min(self.config.durations.duration_secs(self.phase));
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a work session. Acts as a force-restart from any state.
    pub fn start(&mut self) -> Option<Event> {
        self.phase = Phase::Work;
        self.remaining_secs = self.config.durations.duration_secs(Phase::Work);
        self.current_cycle = 1;
        self.is_running = true;
        self.game = None;
        tracing::info!(
            phase = self.phase.as_str(),
            remaining_secs = self.remaining_secs,
            "session started"
        );
        Some(Event::TimerStarted {
            phase: self.phase,
            duration_secs: self.remaining_secs,
            cycle: self.current_cycle,
            at: Utc::now(),
        })
    }

    /// Toggle the countdown. From `Idle` this delegates to [`start`], so
    /// the command stays total rather than silently doing nothing.
    ///
    /// [`start`]: PomodoroEngine::start
    pub fn pause_or_resume(&mut self) -> Option<Event> {
        if self.phase == Phase::Idle {
            return self.start();
        }
        if self.is_running {
            self.is_running = false;
            tracing::debug!(remaining_secs = self.remaining_secs, "paused");
            Some(Event::TimerPaused {
                phase: self.phase,
                remaining_secs: self.remaining_secs,
                at: Utc::now(),
            })
        } else {
            self.is_running = true;
            tracing::debug!(remaining_secs = self.remaining_secs, "resumed");
            Some(Event::TimerResumed {
                phase: self.phase,
                remaining_secs: self.remaining_secs,
                at: Utc::now(),
            })
        }
    }

    /// Deliver one elapsed second. Ignored unless running.
    ///
    /// Returns `Some(Event::PhaseCompleted)` when the countdown reaches
    /// zero; the transition happens in the same tick, so at most one phase
    /// change occurs per call regardless of delivery jitter.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            return Some(self.complete_phase());
        }
        None
    }

    /// Restore the default-constructed state. Policy knobs are kept.
    pub fn reset(&mut self) -> Option<Event> {
        self.phase = Phase::Idle;
        self.remaining_secs = 0;
        self.current_cycle = 0;
        self.total_cycles_completed = 0;
        self.is_running = false;
        self.game = None;
        tracing::info!("engine reset");
        Some(Event::TimerReset { at: Utc::now() })
    }

    /// Jump straight into a short break with its full duration.
    ///
    /// Cycle counters are untouched (the work phase was not completed) and
    /// the running flag keeps its current value.
    pub fn skip_to_break(&mut self) -> Option<Event> {
        self.phase = Phase::ShortBreak;
        self.remaining_secs = self.config.durations.duration_secs(Phase::ShortBreak);
        tracing::info!(remaining_secs = self.remaining_secs, "skipped to break");
        Some(Event::SkippedToBreak {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Open a fresh break-game session. Only valid during a break phase;
    /// the countdown is not altered.
    pub fn start_break_game(&mut self) -> Option<Event> {
        if !self.phase.is_break() {
            return None;
        }
        self.game = Some(BreakGameState::new(self.config.game_multiplier));
        tracing::debug!("break game started");
        Some(Event::BreakGameStarted { at: Utc::now() })
    }

    /// Record taps in the open game session.
    pub fn add_game_points(&mut self, points: u64) -> Option<Event> {
        let game = self.game.as_mut()?;
        let score = game.add_points(points);
        Some(Event::BreakGameScored {
            added: points,
            score,
            at: Utc::now(),
        })
    }

    /// Close the game session. Countdown and phase are untouched.
    pub fn end_break_game(&mut self) -> Option<Event> {
        let game = self.game.take()?;
        tracing::debug!(score = game.score, "break game ended");
        Some(Event::BreakGameEnded {
            score: game.score,
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete_phase(&mut self) -> Event {
        let from = self.phase;
        match self.phase {
            Phase::Work => {
                self.total_cycles_completed += 1;
                self.phase = match self.config.long_break_every {
                    Some(n) if n > 0 && self.total_cycles_completed % n == 0 => Phase::LongBreak,
                    _ => Phase::ShortBreak,
                };
            }
            Phase::ShortBreak | Phase::LongBreak => {
                self.current_cycle += 1;
                self.phase = Phase::Work;
                self.game = None;
            }
            // Idle never runs, but keep the match total.
            Phase::Idle => {}
        }
        self.remaining_secs = self.config.durations.duration_secs(self.phase);
        self.is_running = self.config.resume_on_completion;
        tracing::info!(
            from = from.as_str(),
            to = self.phase.as_str(),
            total_cycles_completed = self.total_cycles_completed,
            "phase completed"
        );
        Event::PhaseCompleted {
            from,
            to: self.phase,
            total_cycles_completed: self.total_cycles_completed,
            at: Utc::now(),
        }
    }
}

impl Default for PomodoroEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
