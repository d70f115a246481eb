//! Requests accepted by a running [`GameService`](super::GameService).

use crate::error::GameError;
use crate::game::{Card, GameSnapshot};
use crate::layout::Layout;
use tokio::sync::oneshot;

/// Messages that can be sent to a game service.
#[derive(Debug)]
pub enum GameMessage {
    /// Deal a fresh board and (re)start the round.
    Start {
        response: oneshot::Sender<Result<(), GameError>>,
    },

    OpenCard {
        card: Card,
        response: oneshot::Sender<bool>,
    },

    OpenCardAt {
        row: usize,
        col: usize,
        response: oneshot::Sender<bool>,
    },

    Snapshot {
        response: oneshot::Sender<GameSnapshot>,
    },

    /// The board currently dealt.
    Layout {
        response: oneshot::Sender<Layout>,
    },
}
