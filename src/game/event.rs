//! Events consumed by the game machine.

use super::card::Card;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Events a caller may send.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// Start or restart. Always accepted.
    Start,
    /// The player clicked a card.
    OpenCard { card: Card },
    /// One second of game time elapsed. Normally produced by the game clock.
    Tick,
}

/// Named delays armed by phases on entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delay {
    PreGameReveal,
    SingleCard,
    Showcase,
}

/// Every event the machine processes, external or internal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum MachineEvent {
    Start,
    OpenCard(Card),
    Tick,
    GameWon,
    GameOver,
    DelayElapsed(Delay),
    /// Eventless check run after every settled transition.
    Always,
}

/// Discriminant used to index the transition table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EventKind {
    Start,
    OpenCard,
    Tick,
    GameWon,
    GameOver,
    Delay(Delay),
    Always,
}

impl MachineEvent {
    pub(crate) fn kind(&self) -> EventKind {
        match self {
            Self::Start => EventKind::Start,
            Self::OpenCard(_) => EventKind::OpenCard,
            Self::Tick => EventKind::Tick,
            Self::GameWon => EventKind::GameWon,
            Self::GameOver => EventKind::GameOver,
            Self::DelayElapsed(delay) => EventKind::Delay(*delay),
            Self::Always => EventKind::Always,
        }
    }

    /// Card payload, for `open_card`.
    pub(crate) fn card(&self) -> Option<&Card> {
        match self {
            Self::OpenCard(card) => Some(card),
            _ => None,
        }
    }
}

impl From<GameEvent> for MachineEvent {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::Start => Self::Start,
            GameEvent::OpenCard { card } => Self::OpenCard(card),
            GameEvent::Tick => Self::Tick,
        }
    }
}

impl fmt::Display for MachineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::OpenCard(card) => write!(f, "open_card({})", card.id()),
            Self::Tick => f.write_str("tick"),
            Self::GameWon => f.write_str("game_won"),
            Self::GameOver => f.write_str("game_over"),
            Self::DelayElapsed(delay) => write!(f, "after({delay:?})"),
            Self::Always => f.write_str("always"),
        }
    }
}
