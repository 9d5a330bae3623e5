//! Break minigame: tap for points while a break phase counts down.

use serde::{Deserialize, Serialize};

/// Score counter for one break-game session.
///
/// Created fresh when a session starts, discarded when the break ends or
/// the game is ended. Never persisted. The multiplier is fixed at 1.0 by
/// default and exists as a configuration hook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakGameState {
    pub score: u64,
    pub multiplier: f64,
}

impl BreakGameState {
    pub fn new(multiplier: f64) -> Self {
        Self {
            score: 0,
            multiplier,
        }
    }

    /// Add `points` taps, scaled by the multiplier. Returns the new score.
    pub fn add_points(&mut self, points: u64) -> u64 {
        self.score += (points as f64 * self.multiplier).round() as u64;
        self.score
    }
}

impl Default for BreakGameState {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_multiplier_counts_taps() {
        let mut game = BreakGameState::default();
        for _ in 0..5 {
            game.add_points(1);
        }
        assert_eq!(game.score, 5);
    }

    #[test]
    fn multiplier_scales_and_rounds() {
        let mut game = BreakGameState::new(1.5);
        assert_eq!(game.add_points(1), 2); // 1.5 rounds up
        assert_eq!(game.add_points(2), 5); // +3.0
    }
}
