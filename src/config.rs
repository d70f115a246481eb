//! Game configuration and its validation.
//!
//! Validation accumulates every violation with `stillwater::Validation`
//! instead of stopping at the first, so a caller fixing a bad config sees the
//! whole list at once.

use crate::error::{ConfigError, GameError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

pub const DEFAULT_TOTAL_CARDS: usize = 30;
pub const DEFAULT_PRE_GAME_REVEAL_MS: u64 = 5_000;
pub const DEFAULT_GAME_TIME_SECS: u32 = 30;
pub const DEFAULT_SHOWCASE_MS: u64 = 1_000;
pub const DEFAULT_SINGLE_CARD_DELAY_MS: u64 = 1_000;

/// Period of the game clock.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Per-game constants. Missing fields deserialize to their defaults.
///
/// # Example
///
/// ```rust
/// use memory_match::GameConfig;
///
/// let config: GameConfig = serde_json::from_str(r#"{ "total_cards": 12 }"#).unwrap();
/// assert_eq!(config.total_cards, 12);
/// assert_eq!(config.game_time_secs, 30);
/// assert!(config.validated().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub total_cards: usize,
    pub pre_game_reveal_ms: u64,
    pub game_time_secs: u32,
    pub showcase_ms: u64,
    pub single_card_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            total_cards: DEFAULT_TOTAL_CARDS,
            pre_game_reveal_ms: DEFAULT_PRE_GAME_REVEAL_MS,
            game_time_secs: DEFAULT_GAME_TIME_SECS,
            showcase_ms: DEFAULT_SHOWCASE_MS,
            single_card_delay_ms: DEFAULT_SINGLE_CARD_DELAY_MS,
        }
    }
}

impl GameConfig {
    pub fn pre_game_reveal(&self) -> Duration {
        Duration::from_millis(self.pre_game_reveal_ms)
    }

    pub fn showcase(&self) -> Duration {
        Duration::from_millis(self.showcase_ms)
    }

    pub fn single_card_delay(&self) -> Duration {
        Duration::from_millis(self.single_card_delay_ms)
    }

    pub fn game_time(&self) -> Duration {
        Duration::from_secs(u64::from(self.game_time_secs))
    }

    /// Check every rule, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigError>> {
        let checks = vec![
            validate_card_count(self.total_cards),
            require_positive(self.pre_game_reveal_ms, "pre_game_reveal_ms"),
            require_positive(u64::from(self.game_time_secs), "game_time_secs"),
            require_positive(self.showcase_ms, "showcase_ms"),
            require_positive(self.single_card_delay_ms, "single_card_delay_ms"),
        ];

        Validation::all_vec(checks).map(|_| ())
    }

    /// Consume the config, returning it unchanged if it is valid.
    pub fn validated(self) -> Result<Self, GameError> {
        into_result(self.validate()).map(|()| self)
    }
}

/// Rules for a card count: at least one pair, and only whole pairs.
pub fn validate_card_count(total: usize) -> Validation<(), NonEmptyVec<ConfigError>> {
    let too_few = if total < 2 {
        Validation::fail(ConfigError::TooFewCards { total })
    } else {
        Validation::success(())
    };
    let odd = if total % 2 != 0 {
        Validation::fail(ConfigError::OddCardCount { total })
    } else {
        Validation::success(())
    };

    Validation::all_vec(vec![too_few, odd]).map(|_| ())
}

/// Convert an accumulated validation into the crate's error type.
pub(crate) fn into_result(
    validation: Validation<(), NonEmptyVec<ConfigError>>,
) -> Result<(), GameError> {
    match validation {
        Validation::Success(()) => Ok(()),
        Validation::Failure(errors) => Err(GameError::InvalidConfiguration(
            errors.iter().cloned().collect(),
        )),
    }
}

fn require_positive(value: u64, name: &'static str) -> Validation<(), NonEmptyVec<ConfigError>> {
    if value > 0 {
        Validation::success(())
    } else {
        Validation::fail(ConfigError::ZeroDuration { name })
    }
}
