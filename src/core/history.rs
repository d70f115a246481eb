//! Phase transition history tracking.
//!
//! Every phase change the machine makes is appended here, including
//! self-transitions, which makes re-entry observable to callers and tests.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single phase change.
///
/// # Example
///
/// ```rust
/// use memory_match::core::{PhaseTransition, State};
/// use serde::{Deserialize, Serialize};
/// use std::time::Duration;
/// use chrono::Utc;
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Step { A, B }
///
/// impl State for Step {
///     fn name(&self) -> &str {
///         match self {
///             Self::A => "A",
///             Self::B => "B",
///         }
///     }
/// }
///
/// let transition = PhaseTransition {
///     from: Step::A,
///     to: Step::B,
///     at: Duration::from_millis(250),
///     timestamp: Utc::now(),
/// };
/// assert!(!transition.is_reentry());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct PhaseTransition<S: State> {
    /// The phase being left
    pub from: S,
    /// The phase being entered
    pub to: S,
    /// Logical machine time of the change
    pub at: Duration,
    /// Wall-clock time of the change
    pub timestamp: DateTime<Utc>,
}

impl<S: State> PhaseTransition<S> {
    /// True when the phase was exited and entered again.
    pub fn is_reentry(&self) -> bool {
        self.from == self.to
    }
}

/// Ordered log of phase changes.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct PhaseHistory<S: State> {
    transitions: Vec<PhaseTransition<S>>,
}

impl<S: State> Default for PhaseHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> PhaseHistory<S> {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Append a transition.
    pub fn record(&mut self, transition: PhaseTransition<S>) {
        self.transitions.push(transition);
    }

    /// Drop every recorded transition.
    pub fn clear(&mut self) {
        self.transitions.clear();
    }

    /// Get the path of phases traversed: the first `from`, then every `to`.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Number of times `phase` was entered.
    pub fn entries_into(&self, phase: &S) -> usize {
        self.transitions.iter().filter(|t| &t.to == phase).count()
    }

    /// Logical time between the first and last recorded change.
    pub fn span(&self) -> Option<Duration> {
        match (self.transitions.first(), self.transitions.last()) {
            (Some(first), Some(last)) => Some(last.at.saturating_sub(first.at)),
            _ => None,
        }
    }

    pub fn transitions(&self) -> &[PhaseTransition<S>] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
