//! The game state machine.
//!
//! Events are processed to completion: actions, phase exits and entries,
//! eventless checks and every raised follow-up event all run before
//! [`GameMachine::send`] or [`GameMachine::advance`] return.

use super::card::Card;
use super::context::GameContext;
use super::event::{Delay, GameEvent, MachineEvent};
use super::phase::{boundary, Phase, PhaseNode};
use super::snapshot::GameSnapshot;
use super::transition::{entry_effects, Action, EntryEffect, TransitionTable};
use crate::config::GameConfig;
use crate::core::{PhaseHistory, PhaseTransition, State};
use crate::error::GameError;
use crate::timer::{GameClock, Scheduler};
use chrono::Utc;
use std::collections::VecDeque;
use std::time::Duration;
use tracing::{debug, info, trace};

/// What a scheduled timer delivers when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TimerKind {
    Delay(Delay),
    Tick,
}

/// Memory-match state machine.
///
/// # Example
///
/// ```rust
/// use memory_match::{Card, GameConfig, GameMachine, Phase};
/// use std::time::Duration;
///
/// let config = GameConfig { total_cards: 2, ..GameConfig::default() };
/// let mut machine = GameMachine::new(config).unwrap();
///
/// machine.start();
/// assert_eq!(machine.phase(), Phase::PreGameRevealing);
///
/// machine.advance(Duration::from_secs(5));
/// assert_eq!(machine.phase(), Phase::ACTIVE);
///
/// let a = Card::new(1);
/// let b = Card::new(1);
/// machine.open_card(&a);
/// machine.open_card(&b);
/// assert_eq!(machine.phase(), Phase::GameWon);
/// ```
pub struct GameMachine {
    phase: Phase,
    context: GameContext,
    config: GameConfig,
    table: TransitionTable,
    scheduler: Scheduler<PhaseNode, TimerKind>,
    clock: GameClock,
    history: PhaseHistory<Phase>,
}

impl GameMachine {
    /// Create a machine in `not_started`. Fails if the config is invalid.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        let config = config.validated()?;
        let context = GameContext::new(config.total_cards, config.game_time_secs);

        Ok(Self {
            phase: Phase::INITIAL,
            context,
            config,
            table: TransitionTable::standard(),
            scheduler: Scheduler::new(),
            clock: GameClock::default(),
            history: PhaseHistory::new(),
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn context(&self) -> &GameContext {
        &self.context
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Phase changes since the last `start`.
    pub fn history(&self) -> &PhaseHistory<Phase> {
        &self.history
    }

    /// Logical time since the machine was created.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Logical time of the next pending timer.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    pub fn is_clock_running(&self) -> bool {
        self.clock.is_ticking()
    }

    /// Number of armed one-shot delays of the given kind.
    pub fn pending_delays(&self, delay: Delay) -> usize {
        self.scheduler.count_kind(TimerKind::Delay(delay))
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::new(self.phase, self.context.clone(), self.now())
    }

    /// Process an event to completion. Returns false if the current phase
    /// has no transition for it.
    pub fn send(&mut self, event: GameEvent) -> bool {
        self.process(event.into())
    }

    pub fn start(&mut self) -> bool {
        self.send(GameEvent::Start)
    }

    pub fn open_card(&mut self, card: &Card) -> bool {
        self.send(GameEvent::OpenCard { card: card.clone() })
    }

    pub fn tick(&mut self) -> bool {
        self.send(GameEvent::Tick)
    }

    /// Let `by` of logical time pass, firing due timers in order.
    /// Returns how many timers fired.
    pub fn advance(&mut self, by: Duration) -> usize {
        let target = self.now() + by;
        self.advance_to(target)
    }

    /// Move logical time to `at`, firing every timer due on the way.
    pub fn advance_to(&mut self, at: Duration) -> usize {
        let mut fired = 0;
        while let Some(timer) = self.scheduler.pop_due(at) {
            fired += 1;
            let event = match timer.kind {
                TimerKind::Delay(delay) => MachineEvent::DelayElapsed(delay),
                TimerKind::Tick => MachineEvent::Tick,
            };
            trace!(at_ms = timer.at.as_millis() as u64, %event, "timer fired");
            self.process(event);
        }
        self.scheduler.advance_to(at);
        fired
    }

    fn process(&mut self, event: MachineEvent) -> bool {
        let mut queue = VecDeque::new();
        let handled = self.microstep(&event, &mut queue);

        while let Some(raised) = queue.pop_front() {
            self.microstep(&raised, &mut queue);
        }

        handled
    }

    fn microstep(&mut self, event: &MachineEvent, raised: &mut VecDeque<MachineEvent>) -> bool {
        let Some(transition) = self.table.select(self.phase, &self.context, event) else {
            trace!(phase = %self.phase, %event, "event ignored");
            return false;
        };
        let actions = transition.actions;
        let target = transition.target;

        match target {
            Some(target) => {
                self.transition_to(target, actions, event, raised);
                self.settle(raised);
            }
            None => self.apply_all(actions, event, raised),
        }

        true
    }

    /// Follow eventless transitions until none apply.
    fn settle(&mut self, raised: &mut VecDeque<MachineEvent>) {
        let always = MachineEvent::Always;
        while let Some(transition) = self.table.select(self.phase, &self.context, &always) {
            let actions = transition.actions;
            let target = transition.target;
            match target {
                Some(target) => self.transition_to(target, actions, &always, raised),
                None => {
                    self.apply_all(actions, &always, raised);
                    break;
                }
            }
        }
    }

    /// Exit, run actions, enter. Exits cancel every timer owned by the
    /// exited nodes before anything else happens.
    fn transition_to(
        &mut self,
        target: Phase,
        actions: &[Action],
        event: &MachineEvent,
        raised: &mut VecDeque<MachineEvent>,
    ) {
        let from = self.phase;
        let (exits, entries) = boundary(from, target);

        for node in exits.iter().rev() {
            self.exit_node(*node);
        }

        self.apply_all(actions, event, raised);

        self.phase = target;
        self.history.record(PhaseTransition {
            from,
            to: target,
            at: self.now(),
            timestamp: Utc::now(),
        });
        debug!(from = %from, to = %target, %event, "phase transition");

        for node in entries {
            self.enter_node(*node, raised);
        }

        if target.is_final() {
            info!(
                outcome = target.name(),
                revealed = self.context.revealed_cards().len(),
                remaining_time = self.context.remaining_time(),
                "game finished"
            );
        }
    }

    fn exit_node(&mut self, node: PhaseNode) {
        if node == PhaseNode::Running {
            self.clock.stop(&mut self.scheduler);
        }
        let cancelled = self.scheduler.cancel_scope(node);
        if cancelled > 0 {
            trace!(?node, cancelled, "cancelled timers on exit");
        }
    }

    fn enter_node(&mut self, node: PhaseNode, raised: &mut VecDeque<MachineEvent>) {
        for effect in entry_effects(node) {
            match effect {
                EntryEffect::ArmDelay(delay) => {
                    let after = self.delay(*delay);
                    self.scheduler.schedule(node, TimerKind::Delay(*delay), after);
                }
                EntryEffect::StartClock => {
                    self.clock.start(&mut self.scheduler, node, TimerKind::Tick);
                }
                EntryEffect::CheckIfGameIsFinished => {
                    if self.context.all_revealed() {
                        raised.push_back(MachineEvent::GameWon);
                    }
                }
            }
        }
    }

    fn apply_all(
        &mut self,
        actions: &[Action],
        event: &MachineEvent,
        raised: &mut VecDeque<MachineEvent>,
    ) {
        for action in actions {
            self.apply(*action, event, raised);
        }
    }

    fn apply(&mut self, action: Action, event: &MachineEvent, raised: &mut VecDeque<MachineEvent>) {
        match action {
            Action::ClearContext => {
                self.context.reset(self.config.game_time_secs);
                self.history.clear();
                info!(
                    total_cards = self.context.total_cards(),
                    game_time_secs = self.config.game_time_secs,
                    "game started"
                );
            }
            Action::SaveTempCard => {
                if let Some(card) = event.card() {
                    self.context.push_temp(card.clone());
                }
            }
            Action::SavePairs => {
                if self.context.reveal_temp_pair() {
                    debug!(
                        revealed = self.context.revealed_cards().len(),
                        total = self.context.total_cards(),
                        "pair matched"
                    );
                }
            }
            Action::ClearTempCards => self.context.clear_temp(),
            Action::DecrementRemainingTime => {
                if self.context.decrement_time() == 0 {
                    raised.push_back(MachineEvent::GameOver);
                }
            }
        }
    }

    fn delay(&self, delay: Delay) -> Duration {
        match delay {
            Delay::PreGameReveal => self.config.pre_game_reveal(),
            Delay::SingleCard => self.config.single_card_delay(),
            Delay::Showcase => self.config.showcase(),
        }
    }
}
