//! Card records handed out by the layout provider.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque, globally unique card identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(Uuid);

impl CardId {
    /// Mint a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for CardId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable `{ id, value }` record. Two cards share each value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    value: u32,
}

impl Card {
    /// Create a card with a freshly minted id.
    pub fn new(value: u32) -> Self {
        Self::with_id(CardId::new(), value)
    }

    pub fn with_id(id: CardId, value: u32) -> Self {
        Self { id, value }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// True when both cards belong to the same pair.
    pub fn matches(&self, other: &Card) -> bool {
        self.value == other.value
    }
}
