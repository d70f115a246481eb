//! Time for the machine: scoped delays and the game clock.
//!
//! Both run on logical time owned by a [`Scheduler`]; nothing here sleeps.
//! The `runtime` module maps real time onto it.

mod clock;
mod scheduler;

pub use clock::GameClock;
pub use scheduler::{Fired, Scheduler, TimerId};
