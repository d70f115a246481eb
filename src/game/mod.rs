//! The memory-match game chart.
//!
//! ```text
//! not_started ──start──▶ pre_game_revealing ──after reveal──▶ running
//!                                                              ├─ active ◀─┐
//!                                                              └─ showcase ┘
//! running ──game_won──▶ game_won      running ──game_over──▶ game_over
//! (start from anywhere returns to pre_game_revealing)
//! ```

mod card;
mod context;
mod event;
pub mod guards;
mod machine;
mod phase;
mod snapshot;
mod transition;

pub use card::{Card, CardId};
pub use context::{GameContext, MAX_TEMP_CARDS};
pub use event::{Delay, GameEvent};
pub use machine::GameMachine;
pub use phase::{Phase, RunningPhase, RUNNING_TAG};
pub use snapshot::GameSnapshot;
