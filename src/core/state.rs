//! Core State trait for machine phases.
//!
//! Phases are plain values: inspecting them never has side effects, so the
//! view layer can query them as often as it likes.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine phases.
///
/// # Required Traits
///
/// - `Clone`: phases are copied into the transition history
/// - `PartialEq`: phases are compared by the transition table
/// - `Debug`: phases are debuggable for diagnostics
/// - `Serialize` + `Deserialize`: phases travel inside snapshots
///
/// # Example
///
/// ```rust
/// use memory_match::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Door {
///     Closed,
///     Opening,
///     Open,
/// }
///
/// impl State for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Closed => "closed",
///             Self::Opening => "opening",
///             Self::Open => "open",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Open)
///     }
///
///     fn has_tag(&self, tag: &str) -> bool {
///         tag == "moving" && matches!(self, Self::Opening)
///     }
/// }
///
/// assert!(Door::Opening.has_tag("moving"));
/// assert!(!Door::Closed.has_tag("moving"));
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the phase's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a terminal phase.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check whether the phase carries the given tag.
    ///
    /// Tags let observers ask coarse questions ("is the clock running?")
    /// without matching on every nested variant.
    ///
    /// Default implementation returns `false`.
    fn has_tag(&self, _tag: &str) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum Light {
        Off,
        Blinking,
        Burnt,
    }

    impl State for Light {
        fn name(&self) -> &str {
            match self {
                Self::Off => "off",
                Self::Blinking => "blinking",
                Self::Burnt => "burnt",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::Burnt)
        }

        fn has_tag(&self, tag: &str) -> bool {
            tag == "lit" && matches!(self, Self::Blinking)
        }
    }

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    struct Untagged;

    impl State for Untagged {
        fn name(&self) -> &str {
            "untagged"
        }
    }

    #[test]
    fn defaults_are_not_final_and_untagged() {
        assert!(!Untagged.is_final());
        assert!(!Untagged.has_tag("anything"));
    }

    #[test]
    fn overrides_are_respected() {
        assert_eq!(Light::Blinking.name(), "blinking");
        assert!(Light::Burnt.is_final());
        assert!(!Light::Off.is_final());
        assert!(Light::Blinking.has_tag("lit"));
        assert!(!Light::Off.has_tag("lit"));
    }

    #[test]
    fn state_serializes_correctly() {
        let json = serde_json::to_string(&Light::Blinking).unwrap();
        let back: Light = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Light::Blinking);
    }
}
