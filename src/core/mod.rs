//! Core state machine vocabulary.
//!
//! This module is independent of the card game:
//! - Phase definitions via the `State` trait
//! - Guard predicates over context and event
//! - Phase history tracking
//!
//! Nothing here performs I/O or schedules time.

mod guard;
mod history;
mod state;

pub use guard::Guard;
pub use history::{PhaseHistory, PhaseTransition};
pub use state::State;
