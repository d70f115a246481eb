//! Mutable game data owned by the machine.

use super::card::{Card, CardId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Upper bound on face-up, unconfirmed cards.
pub const MAX_TEMP_CARDS: usize = 2;

/// Context carried between transitions.
///
/// Only the machine mutates it; everyone else sees it through snapshots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameContext {
    total_cards: usize,
    remaining_time: u32,
    temp_cards: Vec<Card>,
    revealed_cards: BTreeSet<CardId>,
}

impl GameContext {
    pub fn new(total_cards: usize, remaining_time: u32) -> Self {
        Self {
            total_cards,
            remaining_time,
            temp_cards: Vec::with_capacity(MAX_TEMP_CARDS),
            revealed_cards: BTreeSet::new(),
        }
    }

    pub fn total_cards(&self) -> usize {
        self.total_cards
    }

    /// Seconds left on the game clock.
    pub fn remaining_time(&self) -> u32 {
        self.remaining_time
    }

    /// Face-up, unconfirmed cards in the order they were opened.
    pub fn temp_cards(&self) -> &[Card] {
        &self.temp_cards
    }

    /// Ids of permanently matched cards.
    pub fn revealed_cards(&self) -> &BTreeSet<CardId> {
        &self.revealed_cards
    }

    pub fn is_temp(&self, id: CardId) -> bool {
        self.temp_cards.iter().any(|card| card.id() == id)
    }

    pub fn is_revealed(&self, id: CardId) -> bool {
        self.revealed_cards.contains(&id)
    }

    pub fn all_revealed(&self) -> bool {
        self.revealed_cards.len() == self.total_cards
    }

    pub(crate) fn reset(&mut self, remaining_time: u32) {
        self.remaining_time = remaining_time;
        self.temp_cards.clear();
        self.revealed_cards.clear();
    }

    pub(crate) fn push_temp(&mut self, card: Card) {
        debug_assert!(self.temp_cards.len() < MAX_TEMP_CARDS);
        self.temp_cards.push(card);
    }

    pub(crate) fn clear_temp(&mut self) {
        self.temp_cards.clear();
    }

    /// Move a matching temp pair into the revealed set.
    ///
    /// Leaves the context untouched unless exactly two matching cards are held.
    pub(crate) fn reveal_temp_pair(&mut self) -> bool {
        match self.temp_cards.as_slice() {
            [first, second] if first.matches(second) => {
                self.revealed_cards.insert(first.id());
                self.revealed_cards.insert(second.id());
                self.temp_cards.clear();
                true
            }
            _ => false,
        }
    }

    /// Take one second off the clock, returning what is left.
    pub(crate) fn decrement_time(&mut self) -> u32 {
        self.remaining_time = self.remaining_time.saturating_sub(1);
        self.remaining_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_moves_matching_pair() {
        let mut ctx = GameContext::new(4, 10);
        let a = Card::new(1);
        let b = Card::new(1);
        ctx.push_temp(a.clone());
        ctx.push_temp(b.clone());

        assert!(ctx.reveal_temp_pair());
        assert!(ctx.temp_cards().is_empty());
        assert!(ctx.is_revealed(a.id()));
        assert!(ctx.is_revealed(b.id()));
        assert!(!ctx.all_revealed());
    }

    #[test]
    fn reveal_ignores_mismatch_and_single_card() {
        let mut ctx = GameContext::new(4, 10);
        ctx.push_temp(Card::new(1));
        assert!(!ctx.reveal_temp_pair());

        ctx.push_temp(Card::new(2));
        assert!(!ctx.reveal_temp_pair());
        assert_eq!(ctx.temp_cards().len(), 2);
        assert!(ctx.revealed_cards().is_empty());
    }

    #[test]
    fn decrement_saturates_at_zero() {
        let mut ctx = GameContext::new(2, 1);
        assert_eq!(ctx.decrement_time(), 0);
        assert_eq!(ctx.decrement_time(), 0);
    }

    #[test]
    fn reset_keeps_total_cards() {
        let mut ctx = GameContext::new(2, 3);
        ctx.push_temp(Card::new(1));
        ctx.decrement_time();
        ctx.reset(9);

        assert_eq!(ctx, GameContext::new(2, 9));
    }
}
