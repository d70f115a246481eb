//! Error types for game construction and the runtime service.
//!
//! Runtime event handling is total: an event with no matching transition is
//! dropped, never reported. Only configuration problems and the plumbing
//! around the machine can fail.

use thiserror::Error;

/// A single configuration violation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("total card count must be at least 2 (got {total})")]
    TooFewCards { total: usize },

    #[error("total card count must be even (got {total})")]
    OddCardCount { total: usize },

    #[error("total card count {total} exceeds the number of distinct card values")]
    TooManyCards { total: usize },

    #[error("{name} must be greater than zero")]
    ZeroDuration { name: &'static str },

    #[error("layout has {actual} cards, expected {expected}")]
    LayoutMismatch { expected: usize, actual: usize },
}

/// Errors surfaced to callers of the crate.
#[derive(Debug, Error)]
pub enum GameError {
    /// Every violation found, not just the first one.
    #[error("invalid game configuration: {}", join_errors(.0))]
    InvalidConfiguration(Vec<ConfigError>),

    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("game service has stopped")]
    ServiceStopped,
}

impl GameError {
    /// Configuration violations carried by this error, if any.
    pub fn config_errors(&self) -> &[ConfigError] {
        match self {
            Self::InvalidConfiguration(errors) => errors,
            _ => &[],
        }
    }
}

fn join_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
