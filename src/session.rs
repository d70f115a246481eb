//! A playable game: one machine paired with the board it is played on.

use crate::config::GameConfig;
use crate::error::{ConfigError, GameError};
use crate::game::{Card, GameMachine, GameSnapshot, Phase};
use crate::layout::{Layout, LayoutProvider, RandomLayout};
use std::time::Duration;
use tracing::info;

/// Owns the config, the layout provider, the current board and the machine.
///
/// The machine only ever sees cards; the board lives here so that a restart
/// can deal a fresh shuffle before the machine re-enters its reveal phase.
pub struct Game<L: LayoutProvider = RandomLayout> {
    config: GameConfig,
    provider: L,
    layout: Layout,
    machine: GameMachine,
}

impl Game<RandomLayout> {
    /// A game with OS-seeded shuffles.
    pub fn with_config(config: GameConfig) -> Result<Self, GameError> {
        Self::new(config, RandomLayout::new())
    }
}

impl<L: LayoutProvider> Game<L> {
    /// Validate the config and deal the first board. The machine starts in
    /// `not_started`.
    pub fn new(config: GameConfig, provider: L) -> Result<Self, GameError> {
        let machine = GameMachine::new(config.clone())?;
        let mut game = Self {
            config,
            provider,
            layout: Layout::default(),
            machine,
        };
        game.init()?;
        Ok(game)
    }

    /// Deal a fresh board without touching the machine.
    pub fn init(&mut self) -> Result<(), GameError> {
        let layout = self.provider.layout(self.config.total_cards)?;
        if layout.len() != self.config.total_cards {
            return Err(GameError::InvalidConfiguration(vec![
                ConfigError::LayoutMismatch {
                    expected: self.config.total_cards,
                    actual: layout.len(),
                },
            ]));
        }
        self.layout = layout;
        Ok(())
    }

    /// Deal a fresh board and (re)start the round from any phase.
    pub fn start(&mut self) -> Result<(), GameError> {
        self.init()?;
        self.machine.start();
        info!(cards = self.layout.len(), "new round dealt");
        Ok(())
    }

    pub fn open_card(&mut self, card: &Card) -> bool {
        self.machine.open_card(card)
    }

    /// Open the card at a board position. Out-of-range positions are ignored.
    pub fn open_card_at(&mut self, row: usize, col: usize) -> bool {
        match self.layout.get(row, col).cloned() {
            Some(card) => self.machine.open_card(&card),
            None => false,
        }
    }

    pub fn tick(&mut self) -> bool {
        self.machine.tick()
    }

    pub fn advance(&mut self, by: Duration) -> usize {
        self.machine.advance(by)
    }

    pub fn advance_to(&mut self, at: Duration) -> usize {
        self.machine.advance_to(at)
    }

    pub fn is_card_face_up(&self, card: &Card) -> bool {
        self.snapshot().is_card_face_up(card)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.machine.snapshot()
    }

    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    pub fn now(&self) -> Duration {
        self.machine.now()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.machine.next_deadline()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn machine(&self) -> &GameMachine {
        &self.machine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paired_board(_: usize) -> Result<Layout, GameError> {
        Ok(Layout::from_rows(vec![
            vec![Card::new(1), Card::new(2)],
            vec![Card::new(1), Card::new(2)],
        ]))
    }

    fn four_cards() -> GameConfig {
        GameConfig {
            total_cards: 4,
            ..GameConfig::default()
        }
    }

    #[test]
    fn new_game_deals_but_does_not_start() {
        let game = Game::new(four_cards(), paired_board).unwrap();

        assert_eq!(game.phase(), Phase::NotStarted);
        assert_eq!(game.layout().len(), 4);
        assert_eq!(game.next_deadline(), None);
    }

    #[test]
    fn start_deals_a_fresh_board() {
        let mut game = Game::new(four_cards(), paired_board).unwrap();
        let before = game.layout().get(0, 0).unwrap().id();

        game.start().unwrap();

        assert_eq!(game.phase(), Phase::PreGameRevealing);
        assert_ne!(game.layout().get(0, 0).unwrap().id(), before);
    }

    #[test]
    fn board_positions_drive_the_round_to_a_win() {
        let mut game = Game::new(four_cards(), paired_board).unwrap();
        game.start().unwrap();
        game.advance(Duration::from_millis(5000));
        assert_eq!(game.phase(), Phase::ACTIVE);

        assert!(game.open_card_at(0, 0));
        assert!(game.open_card_at(1, 0));
        assert_eq!(game.phase(), Phase::ACTIVE);
        assert_eq!(game.snapshot().context.revealed_cards().len(), 2);

        game.open_card_at(0, 1);
        game.open_card_at(1, 1);
        assert_eq!(game.phase(), Phase::GameWon);
    }

    #[test]
    fn out_of_range_positions_are_ignored() {
        let mut game = Game::new(four_cards(), paired_board).unwrap();
        game.start().unwrap();
        game.advance(Duration::from_millis(5000));

        assert!(!game.open_card_at(5, 0));
        assert!(game.snapshot().context.temp_cards().is_empty());
    }

    #[test]
    fn every_card_is_face_up_only_during_the_reveal() {
        let mut game = Game::new(four_cards(), paired_board).unwrap();
        game.start().unwrap();
        let card = game.layout().get(1, 1).unwrap().clone();
        assert!(game.is_card_face_up(&card));

        game.advance(Duration::from_millis(5000));
        assert!(!game.is_card_face_up(&card));

        game.open_card(&card);
        assert!(game.is_card_face_up(&card));
    }

    #[test]
    fn mismatched_layouts_are_rejected() {
        let short = |_: usize| -> Result<Layout, GameError> {
            Ok(Layout::from_rows(vec![vec![Card::new(1), Card::new(1)]]))
        };
        let err = Game::new(four_cards(), short).err().unwrap();

        assert_eq!(
            err.config_errors(),
            &[ConfigError::LayoutMismatch {
                expected: 4,
                actual: 2
            }]
        );
    }

    #[test]
    fn invalid_config_fails_before_dealing() {
        let config = GameConfig {
            total_cards: 3,
            ..GameConfig::default()
        };
        assert!(Game::new(config, paired_board).is_err());
    }
}
