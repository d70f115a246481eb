//! The game chart as an explicit transition table.
//!
//! Each row says: in this phase, on this event, if this guard holds, run
//! these actions and (optionally) move to this target. The machine picks the
//! first row that can execute; an event with no executable row is ignored.

use super::context::GameContext;
use super::event::{Delay, EventKind, MachineEvent};
use super::guards::{self, GameGuard};
use super::phase::{Phase, PhaseNode};

/// Which phases a row applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Source {
    /// Declared on the root: every phase.
    Any,
    /// Any sub-phase of `running`.
    Running,
    Exact(Phase),
}

impl Source {
    fn covers(&self, phase: Phase) -> bool {
        match self {
            Self::Any => true,
            Self::Running => phase.is_running(),
            Self::Exact(exact) => *exact == phase,
        }
    }
}

/// Context updates performed by a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    ClearContext,
    SaveTempCard,
    SavePairs,
    ClearTempCards,
    DecrementRemainingTime,
}

/// Effects run when a phase node is entered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EntryEffect {
    ArmDelay(Delay),
    StartClock,
    CheckIfGameIsFinished,
}

/// One row of the table.
pub(crate) struct Transition {
    pub source: Source,
    pub event: EventKind,
    pub guard: Option<GameGuard>,
    pub actions: &'static [Action],
    /// `None` runs the actions without leaving the current phase.
    pub target: Option<Phase>,
}

impl Transition {
    /// Check if this row applies to the current phase and event (pure).
    pub fn can_execute(&self, phase: Phase, ctx: &GameContext, event: &MachineEvent) -> bool {
        if !self.source.covers(phase) || self.event != event.kind() {
            return false;
        }

        self.guard.as_ref().is_none_or(|g| g.check(ctx, event))
    }
}

/// The full chart.
pub(crate) struct TransitionTable {
    transitions: Vec<Transition>,
}

impl TransitionTable {
    pub fn standard() -> Self {
        let transitions = vec![
            Transition {
                source: Source::Exact(Phase::PreGameRevealing),
                event: EventKind::Delay(Delay::PreGameReveal),
                guard: None,
                actions: &[],
                target: Some(Phase::ACTIVE),
            },
            Transition {
                source: Source::Exact(Phase::ACTIVE),
                event: EventKind::OpenCard,
                guard: Some(guards::second_selectable_card()),
                actions: &[Action::SaveTempCard],
                target: Some(Phase::SHOWCASE),
            },
            // Re-entering `active` restarts the single-card delay.
            Transition {
                source: Source::Exact(Phase::ACTIVE),
                event: EventKind::OpenCard,
                guard: Some(guards::selectable_card()),
                actions: &[Action::SaveTempCard],
                target: Some(Phase::ACTIVE),
            },
            Transition {
                source: Source::Exact(Phase::ACTIVE),
                event: EventKind::Delay(Delay::SingleCard),
                guard: None,
                actions: &[Action::ClearTempCards],
                target: None,
            },
            Transition {
                source: Source::Exact(Phase::SHOWCASE),
                event: EventKind::Always,
                guard: Some(guards::pair_matches()),
                actions: &[Action::SavePairs],
                target: Some(Phase::ACTIVE),
            },
            Transition {
                source: Source::Exact(Phase::SHOWCASE),
                event: EventKind::Delay(Delay::Showcase),
                guard: None,
                actions: &[Action::ClearTempCards],
                target: Some(Phase::ACTIVE),
            },
            Transition {
                source: Source::Running,
                event: EventKind::Tick,
                guard: None,
                actions: &[Action::DecrementRemainingTime],
                target: None,
            },
            Transition {
                source: Source::Any,
                event: EventKind::Start,
                guard: None,
                actions: &[Action::ClearContext],
                target: Some(Phase::PreGameRevealing),
            },
            Transition {
                source: Source::Running,
                event: EventKind::GameWon,
                guard: None,
                actions: &[],
                target: Some(Phase::GameWon),
            },
            Transition {
                source: Source::Running,
                event: EventKind::GameOver,
                guard: None,
                actions: &[],
                target: Some(Phase::GameOver),
            },
        ];

        Self { transitions }
    }

    /// First row that can execute, if any.
    pub fn select(
        &self,
        phase: Phase,
        ctx: &GameContext,
        event: &MachineEvent,
    ) -> Option<&Transition> {
        self.transitions
            .iter()
            .find(|t| t.can_execute(phase, ctx, event))
    }
}

/// Entry effects of a phase node, in order.
pub(crate) fn entry_effects(node: PhaseNode) -> &'static [EntryEffect] {
    match node {
        PhaseNode::PreGameRevealing => &[EntryEffect::ArmDelay(Delay::PreGameReveal)],
        PhaseNode::Running => &[EntryEffect::StartClock],
        PhaseNode::Active => &[
            EntryEffect::CheckIfGameIsFinished,
            EntryEffect::ArmDelay(Delay::SingleCard),
        ],
        PhaseNode::Showcase => &[EntryEffect::ArmDelay(Delay::Showcase)],
        PhaseNode::NotStarted | PhaseNode::GameWon | PhaseNode::GameOver => &[],
    }
}
