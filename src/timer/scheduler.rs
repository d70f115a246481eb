//! Virtual-time scheduler for scoped, cancellable timers.
//!
//! Time only moves when the owner calls [`Scheduler::pop_due`] or
//! [`Scheduler::advance_to`], which keeps the machine deterministic under
//! test and lets a real-time driver map wall-clock time onto it.

use std::time::Duration;

/// Handle to a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Clone, Debug)]
struct Timer<S, K> {
    id: TimerId,
    scope: S,
    kind: K,
    due: Duration,
    period: Option<Duration>,
}

/// A timer that came due.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fired<K> {
    pub id: TimerId,
    pub kind: K,
    pub at: Duration,
}

/// Timers keyed by the scope that owns them.
///
/// Cancelling a scope drops every timer it armed, one-shot or repeating.
#[derive(Clone, Debug)]
pub struct Scheduler<S, K> {
    now: Duration,
    next_id: u64,
    timers: Vec<Timer<S, K>>,
}

impl<S: Copy + PartialEq, K: Copy + PartialEq> Default for Scheduler<S, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Copy + PartialEq, K: Copy + PartialEq> Scheduler<S, K> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            timers: Vec::new(),
        }
    }

    /// Current logical time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Arm a one-shot timer `delay` from now.
    pub fn schedule(&mut self, scope: S, kind: K, delay: Duration) -> TimerId {
        self.insert(scope, kind, delay, None)
    }

    /// Arm a timer that fires every `period`, first at `now + period`.
    pub fn schedule_repeating(&mut self, scope: S, kind: K, period: Duration) -> TimerId {
        debug_assert!(!period.is_zero(), "repeating timer needs a non-zero period");
        self.insert(scope, kind, period, Some(period))
    }

    fn insert(&mut self, scope: S, kind: K, delay: Duration, period: Option<Duration>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            scope,
            kind,
            due: self.now + delay,
            period,
        });
        id
    }

    /// Cancel one timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.id != id);
        self.timers.len() != before
    }

    /// Cancel every timer owned by `scope`, returning how many were dropped.
    pub fn cancel_scope(&mut self, scope: S) -> usize {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.scope != scope);
        before - self.timers.len()
    }

    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.iter().map(|timer| timer.due).min()
    }

    pub fn is_armed(&self, id: TimerId) -> bool {
        self.timers.iter().any(|timer| timer.id == id)
    }

    /// Number of live timers of the given kind.
    pub fn count_kind(&self, kind: K) -> usize {
        self.timers.iter().filter(|timer| timer.kind == kind).count()
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Fire the earliest timer due at or before `until`, moving `now` to its
    /// deadline. Ties go to the timer armed first.
    ///
    /// Callers pop one timer, react to it, then pop again, so a reaction that
    /// cancels a sibling due at the same instant prevents that sibling firing.
    pub fn pop_due(&mut self, until: Duration) -> Option<Fired<K>> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= until)
            .min_by_key(|(_, timer)| (timer.due, timer.id))
            .map(|(index, _)| index)?;

        let timer = &mut self.timers[index];
        let fired = Fired {
            id: timer.id,
            kind: timer.kind,
            at: timer.due,
        };
        self.now = self.now.max(timer.due);

        if let Some(period) = timer.period {
            timer.due += period;
        } else {
            self.timers.swap_remove(index);
        }

        Some(fired)
    }

    /// Move `now` forward without firing anything. Never moves backwards.
    pub fn advance_to(&mut self, at: Duration) {
        self.now = self.now.max(at);
    }
}
