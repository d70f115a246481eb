//! Named guard predicates of the game chart.
//!
//! The plain functions are public so views can ask the same questions the
//! machine does; the `Guard` wrappers are what the transition table holds.

use super::card::Card;
use super::context::GameContext;
use super::event::MachineEvent;
use crate::core::Guard;

pub(crate) type GameGuard = Guard<GameContext, MachineEvent>;

/// `card.id` is not among the temp cards.
pub fn card_does_not_exist_in_temp(ctx: &GameContext, card: &Card) -> bool {
    !ctx.is_temp(card.id())
}

/// `card.id` has not been matched yet.
pub fn card_not_revealed(ctx: &GameContext, card: &Card) -> bool {
    !ctx.is_revealed(card.id())
}

/// Exactly one card is face-up, so the next one completes a pair.
pub fn second_card_being_open(ctx: &GameContext) -> bool {
    ctx.temp_cards().len() == 1
}

/// Both temp cards are present and share a value.
pub fn temp_cards_match(ctx: &GameContext) -> bool {
    matches!(ctx.temp_cards(), [first, second] if first.matches(second))
}

fn card_guard(name: &'static str, predicate: fn(&GameContext, &Card) -> bool) -> GameGuard {
    Guard::new(name, move |ctx: &GameContext, event: &MachineEvent| {
        event.card().is_some_and(|card| predicate(ctx, card))
    })
}

fn context_guard(name: &'static str, predicate: fn(&GameContext) -> bool) -> GameGuard {
    Guard::new(name, move |ctx: &GameContext, _: &MachineEvent| predicate(ctx))
}

/// Guard on `open_card` for a card that is neither face-up nor matched.
pub(crate) fn selectable_card() -> GameGuard {
    card_guard("card_does_not_exist_in_temp", card_does_not_exist_in_temp)
        .and(card_guard("card_not_revealed", card_not_revealed))
}

/// Guard on the `active -> showcase` move.
pub(crate) fn second_selectable_card() -> GameGuard {
    context_guard("second_card_being_open", second_card_being_open).and(selectable_card())
}

pub(crate) fn pair_matches() -> GameGuard {
    context_guard("temp_cards_match", temp_cards_match)
}
