//! Memory Match: a timed pair-matching card game built on a hierarchical
//! state machine.
//!
//! The machine is pure and runs on logical time: every delay and the one
//! second game clock live in a [`timer::Scheduler`], and time only moves
//! when the caller advances it. The [`runtime`] module drives a game in real
//! time on tokio.
//!
//! # Core Concepts
//!
//! - **Phase**: where the round is (`not_started`, `pre_game_revealing`,
//!   `running.active`, `running.showcase`, `game_won`, `game_over`)
//! - **Context**: remaining time, the up-to-two temporarily open cards, and
//!   the ids of matched cards
//! - **Guards**: named predicates that pick between transitions
//! - **Layout**: the shuffled board, regenerated on every start
//!
//! # Example
//!
//! ```rust
//! use memory_match::{GameBuilder, Phase, RandomLayout};
//! use std::time::Duration;
//!
//! let mut game = GameBuilder::new()
//!     .total_cards(4)
//!     .layout_provider(RandomLayout::seeded(7))
//!     .build()
//!     .unwrap();
//!
//! game.start().unwrap();
//! assert_eq!(game.phase(), Phase::PreGameRevealing);
//!
//! game.advance(Duration::from_secs(5));
//! assert!(game.phase().is_running());
//!
//! game.advance(Duration::from_secs(30));
//! assert_eq!(game.phase(), Phase::GameOver);
//! assert_eq!(game.snapshot().context.remaining_time(), 0);
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod error;
pub mod game;
pub mod layout;
pub mod runtime;
pub mod session;
pub mod timer;

// Re-export commonly used types
pub use builder::GameBuilder;
pub use config::GameConfig;
pub use core::{Guard, PhaseHistory, PhaseTransition, State};
pub use error::{ConfigError, GameError};
pub use game::{
    Card, CardId, Delay, GameContext, GameEvent, GameMachine, GameSnapshot, Phase, RunningPhase,
};
pub use layout::{Layout, LayoutProvider, RandomLayout};
pub use runtime::{GameHandle, GameService};
pub use session::Game;
