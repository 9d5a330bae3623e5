use serde::{Deserialize, Serialize};

/// One segment of the Pomodoro cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub fn is_break(self) -> bool {
        matches!(self, Phase::ShortBreak | Phase::LongBreak)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Work => "work",
            Phase::ShortBreak => "short_break",
            Phase::LongBreak => "long_break",
        }
    }
}

/// Nominal phase durations in seconds.
///
/// The 25/5/15-minute defaults are configuration, never hardcoded at call
/// sites; `Idle` always has duration zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseDurations {
    pub work_secs: u64,
    pub short_break_secs: u64,
    pub long_break_secs: u64,
}

impl PhaseDurations {
    pub fn duration_secs(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Idle => 0,
            Phase::Work => self.work_secs,
            Phase::ShortBreak => self.short_break_secs,
            Phase::LongBreak => self.long_break_secs,
        }
    }
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self {
            work_secs: 25 * 60,
            short_break_secs: 5 * 60,
            long_break_secs: 15 * 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_durations() {
        let d = PhaseDurations::default();
        assert_eq!(d.duration_secs(Phase::Work), 1500);
        assert_eq!(d.duration_secs(Phase::ShortBreak), 300);
        assert_eq!(d.duration_secs(Phase::LongBreak), 900);
        assert_eq!(d.duration_secs(Phase::Idle), 0);
    }

    #[test]
    fn break_detection() {
        assert!(Phase::ShortBreak.is_break());
        assert!(Phase::LongBreak.is_break());
        assert!(!Phase::Work.is_break());
        assert!(!Phase::Idle.is_break());
    }
}
