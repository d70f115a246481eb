//! Card layout generation.
//!
//! The machine never looks at the grid; it is reference data the view zips
//! together with the machine's temp and revealed sets.

use crate::config::{into_result, validate_card_count};
use crate::error::{ConfigError, GameError};
use crate::game::{Card, CardId};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A grid of cards, row by row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    rows: Vec<Vec<Card>>,
}

impl Layout {
    pub fn from_rows(rows: Vec<Vec<Card>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Card>] {
        &self.rows
    }

    /// All cards, row-major.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.rows.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Card> {
        self.rows.get(row).and_then(|cards| cards.get(col))
    }

    pub fn find(&self, id: CardId) -> Option<&Card> {
        self.cards().find(|card| card.id() == id)
    }
}

/// Source of fresh layouts. Called once per game start.
pub trait LayoutProvider {
    /// Produce a new grid of `total_cards` cards: values `1..=total_cards / 2`,
    /// each exactly twice, with fresh ids.
    fn layout(&mut self, total_cards: usize) -> Result<Layout, GameError>;
}

impl<F> LayoutProvider for F
where
    F: FnMut(usize) -> Result<Layout, GameError>,
{
    fn layout(&mut self, total_cards: usize) -> Result<Layout, GameError> {
        self(total_cards)
    }
}

/// Uniformly shuffled layouts arranged in a near-square grid.
#[derive(Debug, Clone)]
pub struct RandomLayout<R = StdRng> {
    rng: R,
}

impl RandomLayout<StdRng> {
    /// Seeded from the operating system.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Reproducible shuffles, for tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for RandomLayout<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomLayout<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> LayoutProvider for RandomLayout<R> {
    fn layout(&mut self, total_cards: usize) -> Result<Layout, GameError> {
        into_result(validate_card_count(total_cards))?;

        let pairs = u32::try_from(total_cards / 2).map_err(|_| {
            GameError::InvalidConfiguration(vec![ConfigError::TooManyCards { total: total_cards }])
        })?;
        let mut cards: Vec<Card> = (1..=pairs)
            .flat_map(|value| [Card::new(value), Card::new(value)])
            .collect();
        cards.shuffle(&mut self.rng);

        let (row_len, rows) = mid_divisors(total_cards).unwrap_or((total_cards, 1));
        debug!(total_cards, row_len, rows, "generated layout");

        Ok(Layout::from_rows(
            cards.chunks(row_len).map(<[Card]>::to_vec).collect(),
        ))
    }
}

/// The most balanced divisor pair of `n`, larger member first.
///
/// ```rust
/// use memory_match::layout::mid_divisors;
///
/// assert_eq!(mid_divisors(12), Some((4, 3)));
/// assert_eq!(mid_divisors(30), Some((6, 5)));
/// assert_eq!(mid_divisors(16), Some((4, 4)));
/// assert_eq!(mid_divisors(14), Some((7, 2)));
/// assert_eq!(mid_divisors(0), None);
/// ```
pub fn mid_divisors(n: usize) -> Option<(usize, usize)> {
    (1usize..)
        .take_while(|i| i * i <= n)
        .filter(|i| n % i == 0)
        .last()
        .map(|i| (n / i, i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashSet};

    #[test]
    fn each_value_appears_twice() {
        let layout = RandomLayout::seeded(7).layout(12).unwrap();

        let mut counts = BTreeMap::new();
        for card in layout.cards() {
            *counts.entry(card.value()).or_insert(0) += 1;
        }

        assert_eq!(counts.len(), 6);
        assert!(counts.values().all(|&n| n == 2));
        assert_eq!(counts.keys().copied().collect::<Vec<_>>(), (1..=6).collect::<Vec<_>>());
    }

    #[test]
    fn rows_use_larger_balanced_divisor() {
        let layout = RandomLayout::seeded(1).layout(12).unwrap();
        assert_eq!(layout.rows().len(), 3);
        assert!(layout.rows().iter().all(|row| row.len() == 4));

        let layout = RandomLayout::seeded(1).layout(2).unwrap();
        assert_eq!(layout.rows().len(), 1);
        assert_eq!(layout.rows()[0].len(), 2);
    }

    #[test]
    fn ids_are_fresh_on_every_call() {
        let mut provider = RandomLayout::seeded(3);
        let first: HashSet<_> = provider.layout(8).unwrap().cards().map(Card::id).collect();
        let second: HashSet<_> = provider.layout(8).unwrap().cards().map(Card::id).collect();

        assert_eq!(first.len(), 8);
        assert!(first.is_disjoint(&second));
    }

    #[test]
    fn invalid_counts_are_rejected() {
        let mut provider = RandomLayout::seeded(0);
        assert!(matches!(
            provider.layout(0),
            Err(GameError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            provider.layout(9),
            Err(GameError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn lookup_by_position_and_id() {
        let layout = RandomLayout::seeded(5).layout(6).unwrap();
        let card = layout.get(1, 2).unwrap().clone();

        assert_eq!(layout.find(card.id()), Some(&card));
        assert!(layout.get(2, 0).is_none());
        assert_eq!(layout.len(), 6);
    }

    #[test]
    fn closures_can_provide_layouts() {
        let fixed = vec![vec![Card::new(1), Card::new(1)]];
        let mut provider =
            |_: usize| -> Result<Layout, GameError> { Ok(Layout::from_rows(fixed.clone())) };

        assert_eq!(provider.layout(2).unwrap().len(), 2);
    }
}
