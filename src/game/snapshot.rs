//! Read-only view of a machine at one instant.

use super::card::Card;
use super::context::GameContext;
use super::phase::Phase;
use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Phase plus context, detached from the machine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub context: GameContext,
    /// Logical machine time the snapshot was taken at.
    pub at: Duration,
}

impl GameSnapshot {
    pub fn new(phase: Phase, context: GameContext, at: Duration) -> Self {
        Self { phase, context, at }
    }

    pub fn is_running(&self) -> bool {
        self.phase.is_running()
    }

    /// Whether a view should draw `card` face-up: everything is shown during
    /// the pre-game reveal, afterwards only matched and temp cards.
    pub fn is_card_face_up(&self, card: &Card) -> bool {
        self.phase == Phase::PreGameRevealing
            || self.context.is_revealed(card.id())
            || self.context.is_temp(card.id())
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_card_is_face_up_during_reveal() {
        let snapshot = GameSnapshot::new(
            Phase::PreGameRevealing,
            GameContext::new(4, 10),
            Duration::ZERO,
        );
        assert!(snapshot.is_card_face_up(&Card::new(1)));
    }

    #[test]
    fn only_temp_and_revealed_cards_are_face_up_while_running() {
        let mut context = GameContext::new(4, 10);
        let temp = Card::new(2);
        context.push_temp(temp.clone());
        let snapshot = GameSnapshot::new(Phase::ACTIVE, context, Duration::ZERO);

        assert!(snapshot.is_card_face_up(&temp));
        assert!(!snapshot.is_card_face_up(&Card::new(2)));
        assert!(snapshot.is_running());
    }

    #[test]
    fn json_carries_phase_and_context() {
        let snapshot = GameSnapshot::new(
            Phase::GameOver,
            GameContext::new(2, 0),
            Duration::from_secs(3),
        );
        let json = snapshot.to_json().unwrap();

        assert!(json.contains(r#""phase":"game_over""#));
        assert!(json.contains(r#""remaining_time":0"#));
        let back: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
