//! Fluent construction of a [`Game`].

use crate::config::GameConfig;
use crate::error::GameError;
use crate::layout::{LayoutProvider, RandomLayout};
use crate::session::Game;
use std::time::Duration;

/// Builder for [`Game`]s. Unset fields keep the [`GameConfig`] defaults.
///
/// ```rust
/// use memory_match::{GameBuilder, Phase, RandomLayout};
/// use std::time::Duration;
///
/// let mut game = GameBuilder::new()
///     .total_cards(12)
///     .pre_game_reveal(Duration::from_secs(2))
///     .layout_provider(RandomLayout::seeded(42))
///     .build()
///     .unwrap();
///
/// game.start().unwrap();
/// game.advance(Duration::from_secs(2));
/// assert_eq!(game.phase(), Phase::ACTIVE);
/// assert_eq!(game.layout().rows().len(), 3);
/// ```
pub struct GameBuilder<L: LayoutProvider = RandomLayout> {
    config: GameConfig,
    provider: L,
}

impl GameBuilder<RandomLayout> {
    /// Start from the defaults with OS-seeded shuffles.
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            provider: RandomLayout::new(),
        }
    }
}

impl Default for GameBuilder<RandomLayout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: LayoutProvider> GameBuilder<L> {
    /// Replace the whole config.
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn total_cards(mut self, total: usize) -> Self {
        self.config.total_cards = total;
        self
    }

    pub fn pre_game_reveal(mut self, delay: Duration) -> Self {
        self.config.pre_game_reveal_ms = as_millis(delay);
        self
    }

    pub fn game_time_secs(mut self, secs: u32) -> Self {
        self.config.game_time_secs = secs;
        self
    }

    pub fn showcase(mut self, delay: Duration) -> Self {
        self.config.showcase_ms = as_millis(delay);
        self
    }

    pub fn single_card_delay(mut self, delay: Duration) -> Self {
        self.config.single_card_delay_ms = as_millis(delay);
        self
    }

    /// Swap the source of boards, keeping the config set so far.
    pub fn layout_provider<P: LayoutProvider>(self, provider: P) -> GameBuilder<P> {
        GameBuilder {
            config: self.config,
            provider,
        }
    }

    /// Validate the config and deal the first board.
    /// Returns every configuration violation if the config is invalid.
    pub fn build(self) -> Result<Game<L>, GameError> {
        Game::new(self.config, self.provider)
    }
}

fn as_millis(delay: Duration) -> u64 {
    u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)
}
