//! Tokio task owning a game.

use super::messages::GameMessage;
use crate::error::GameError;
use crate::game::{Card, GameSnapshot};
use crate::layout::{Layout, LayoutProvider};
use crate::session::Game;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

const INBOX_CAPACITY: usize = 64;

/// Cloneable handle to a running [`GameService`]. The service stops once
/// every handle has been dropped.
#[derive(Clone)]
pub struct GameHandle {
    sender: mpsc::Sender<GameMessage>,
    updates: watch::Receiver<GameSnapshot>,
}

impl GameHandle {
    pub async fn start(&self) -> Result<(), GameError> {
        self.request(|response| GameMessage::Start { response })
            .await?
    }

    /// Returns whether the machine accepted the click.
    pub async fn open_card(&self, card: Card) -> Result<bool, GameError> {
        self.request(|response| GameMessage::OpenCard { card, response })
            .await
    }

    pub async fn open_card_at(&self, row: usize, col: usize) -> Result<bool, GameError> {
        self.request(|response| GameMessage::OpenCardAt { row, col, response })
            .await
    }

    pub async fn snapshot(&self) -> Result<GameSnapshot, GameError> {
        self.request(|response| GameMessage::Snapshot { response })
            .await
    }

    pub async fn layout(&self) -> Result<Layout, GameError> {
        self.request(|response| GameMessage::Layout { response })
            .await
    }

    /// Receiver that sees every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.updates.clone()
    }

    async fn request<T>(
        &self,
        message: impl FnOnce(oneshot::Sender<T>) -> GameMessage,
    ) -> Result<T, GameError> {
        let (response, reply) = oneshot::channel();
        self.sender
            .send(message(response))
            .await
            .map_err(|_| GameError::ServiceStopped)?;
        reply.await.map_err(|_| GameError::ServiceStopped)
    }
}

/// Drives a [`Game`] in real time.
pub struct GameService<L: LayoutProvider> {
    game: Game<L>,
    inbox: mpsc::Receiver<GameMessage>,
    updates: watch::Sender<GameSnapshot>,
    /// Wall-clock instant matching `base` on the machine's clock.
    epoch: Instant,
    base: Duration,
}

impl<L> GameService<L>
where
    L: LayoutProvider + Send + 'static,
{
    /// Create the service and its first handle without spawning it.
    pub fn new(game: Game<L>) -> (Self, GameHandle) {
        let (sender, inbox) = mpsc::channel(INBOX_CAPACITY);
        let (updates, receiver) = watch::channel(game.snapshot());
        let base = game.now();

        let service = Self {
            game,
            inbox,
            updates,
            epoch: Instant::now(),
            base,
        };
        let handle = GameHandle {
            sender,
            updates: receiver,
        };

        (service, handle)
    }

    /// Spawn the service on the current tokio runtime.
    pub fn spawn(game: Game<L>) -> GameHandle {
        let (service, handle) = Self::new(game);
        tokio::spawn(service.run());
        handle
    }

    /// Run until every handle is dropped.
    pub async fn run(mut self) {
        info!(phase = %self.game.phase(), "game service starting");

        loop {
            let deadline = self.game.next_deadline().map(|at| self.instant_of(at));

            tokio::select! {
                message = self.inbox.recv() => match message {
                    Some(message) => {
                        self.catch_up();
                        self.handle_message(message);
                    }
                    None => break,
                },
                () = sleep_until_deadline(deadline) => self.catch_up(),
            }

            self.publish();
        }

        info!(phase = %self.game.phase(), "game service stopped");
    }

    fn handle_message(&mut self, message: GameMessage) {
        match message {
            GameMessage::Start { response } => {
                let _ = response.send(self.game.start());
            }
            GameMessage::OpenCard { card, response } => {
                let _ = response.send(self.game.open_card(&card));
            }
            GameMessage::OpenCardAt { row, col, response } => {
                debug!(row, col, "open card at position");
                let _ = response.send(self.game.open_card_at(row, col));
            }
            GameMessage::Snapshot { response } => {
                let _ = response.send(self.game.snapshot());
            }
            GameMessage::Layout { response } => {
                let _ = response.send(self.game.layout().clone());
            }
        }
    }

    /// Fire every timer that fell due in wall-clock time.
    fn catch_up(&mut self) {
        let now = self.base + self.epoch.elapsed();
        let fired = self.game.advance_to(now);
        if fired > 0 {
            debug!(fired, now_ms = now.as_millis() as u64, "timers caught up");
        }
    }

    fn instant_of(&self, at: Duration) -> Instant {
        self.epoch + at.saturating_sub(self.base)
    }

    /// Publish only when the phase or context changed.
    fn publish(&self) {
        let snapshot = self.game.snapshot();
        self.updates.send_if_modified(|current| {
            if current.phase == snapshot.phase && current.context == snapshot.context {
                return false;
            }
            *current = snapshot;
            true
        });
    }
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}
