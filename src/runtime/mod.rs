//! Real-time driver for a [`Game`](crate::Game).
//!
//! The machine itself runs on logical time. [`GameService`] owns a game on a
//! tokio task, maps wall-clock time onto the machine's clock and publishes a
//! snapshot whenever the phase or context changes.

mod messages;
mod service;

pub use messages::GameMessage;
pub use service::{GameHandle, GameService};
