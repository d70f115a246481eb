//! The one-second game clock.

use super::scheduler::{Scheduler, TimerId};
use crate::config::TICK_INTERVAL;
use std::time::Duration;
use tracing::trace;

/// Repeating tick source bound to a single scheduler.
///
/// Holds at most one lease on a repeating timer: starting an already
/// running clock replaces the old timer, so two clocks never tick at once.
#[derive(Debug)]
pub struct GameClock {
    interval: Duration,
    lease: Option<TimerId>,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}

impl GameClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            lease: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start ticking. Ticks are delivered as `tick` timers owned by `scope`.
    pub fn start<S, K>(&mut self, scheduler: &mut Scheduler<S, K>, scope: S, tick: K) -> TimerId
    where
        S: Copy + PartialEq,
        K: Copy + PartialEq,
    {
        self.stop(scheduler);
        let id = scheduler.schedule_repeating(scope, tick, self.interval);
        trace!(timer = ?id, interval_ms = self.interval.as_millis() as u64, "clock started");
        self.lease = Some(id);
        id
    }

    /// Stop ticking. Returns false if the clock was not running.
    pub fn stop<S, K>(&mut self, scheduler: &mut Scheduler<S, K>) -> bool
    where
        S: Copy + PartialEq,
        K: Copy + PartialEq,
    {
        match self.lease.take() {
            Some(id) => {
                scheduler.cancel(id);
                trace!(timer = ?id, "clock stopped");
                true
            }
            None => false,
        }
    }

    pub fn is_ticking(&self) -> bool {
        self.lease.is_some()
    }

    /// True if `id` is this clock's current timer.
    pub fn owns(&self, id: TimerId) -> bool {
        self.lease == Some(id)
    }
}
