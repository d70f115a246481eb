//! Game phases: a tagged enum with a nested enum for `running`'s sub-phase.

use crate::core::State;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag carried by every `running` sub-phase.
pub const RUNNING_TAG: &str = "running";

/// Sub-phase of `running`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunningPhase {
    /// Waiting for cards to be opened.
    Active,
    /// Two cards are face-up and being compared.
    Showcase,
}

/// Observable phase of a game.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    NotStarted,
    PreGameRevealing,
    Running(RunningPhase),
    GameWon,
    GameOver,
}

/// A node of the phase tree. Timers are scoped to the node that armed them
/// and die when that node is exited.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PhaseNode {
    NotStarted,
    PreGameRevealing,
    Running,
    Active,
    Showcase,
    GameWon,
    GameOver,
}

impl Phase {
    pub const INITIAL: Phase = Phase::NotStarted;
    pub const ACTIVE: Phase = Phase::Running(RunningPhase::Active);
    pub const SHOWCASE: Phase = Phase::Running(RunningPhase::Showcase);

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running(_))
    }

    pub fn running(&self) -> Option<RunningPhase> {
        match self {
            Self::Running(sub) => Some(*sub),
            _ => None,
        }
    }

    /// Nodes from the root down to this phase's leaf.
    pub(crate) fn path(&self) -> &'static [PhaseNode] {
        match self {
            Self::NotStarted => &[PhaseNode::NotStarted],
            Self::PreGameRevealing => &[PhaseNode::PreGameRevealing],
            Self::Running(RunningPhase::Active) => &[PhaseNode::Running, PhaseNode::Active],
            Self::Running(RunningPhase::Showcase) => &[PhaseNode::Running, PhaseNode::Showcase],
            Self::GameWon => &[PhaseNode::GameWon],
            Self::GameOver => &[PhaseNode::GameOver],
        }
    }
}

/// Nodes exited (listed outermost first) and entered (outermost first) when
/// moving from `from` to `to`.
///
/// A transition that targets the phase it starts from, or one of its
/// ancestors, exits and re-enters the target rather than standing still.
pub(crate) fn boundary(from: Phase, to: Phase) -> (&'static [PhaseNode], &'static [PhaseNode]) {
    let from_path = from.path();
    let to_path = to.path();

    let mut shared = from_path
        .iter()
        .zip(to_path)
        .take_while(|(a, b)| a == b)
        .count();
    if shared == to_path.len() {
        shared -= 1;
    }

    (&from_path[shared..], &to_path[shared..])
}

impl State for Phase {
    fn name(&self) -> &str {
        match self {
            Self::NotStarted => "not_started",
            Self::PreGameRevealing => "pre_game_revealing",
            Self::Running(RunningPhase::Active) => "running.active",
            Self::Running(RunningPhase::Showcase) => "running.showcase",
            Self::GameWon => "game_won",
            Self::GameOver => "game_over",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::GameWon | Self::GameOver)
    }

    fn has_tag(&self, tag: &str) -> bool {
        tag == RUNNING_TAG && self.is_running()
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
