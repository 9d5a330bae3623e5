//! State-change events and the observer bus.
//!
//! Every mutation in the system produces an [`Event`]. Presentation layers
//! either poll snapshots or attach a listener to an [`EventBus`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every state change in the system produces an Event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        duration_secs: u64,
        cycle: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// A phase counted down to zero and the engine moved to the next one.
    PhaseCompleted {
        from: Phase,
        to: Phase,
        total_cycles_completed: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// User jumped straight into a short break.
    SkippedToBreak {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    BreakGameStarted {
        at: DateTime<Utc>,
    },
    BreakGameScored {
        added: u64,
        score: u64,
        at: DateTime<Utc>,
    },
    BreakGameEnded {
        score: u64,
        at: DateTime<Utc>,
    },
    /// The task list changed (add/toggle/delete); observers should reload.
    TasksChanged {
        count: usize,
        at: DateTime<Utc>,
    },
}

/// Opaque token returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Listener = Box<dyn Fn(&Event) + Send>;

/// Typed observer registry.
///
/// Listeners are invoked synchronously, in subscription order, on the
/// caller's thread. Owned by whoever emits (the task store, or the layer
/// driving the engine); never shared across mutation paths.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Returns a token for [`EventBus::unsubscribe`].
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriberId
    where
        F: Fn(&Event) + Send + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        SubscriberId(id)
    }

    /// Remove a listener. Returns false if the token is not registered.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id.0);
        self.listeners.len() != before
    }

    /// Deliver an event to every listener.
    pub fn emit(&self, event: &Event) {
        for (_, listener) in &self.listeners {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
