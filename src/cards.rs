//! Card instances - the physical cards of one game.
//!
//! A `CardInstance` is immutable once created: it names which definition
//! it is a copy of and nothing else. All mutable battlefield state
//! (facing, readiness, preparation tokens) lives on the `Slot` holding
//! the card. Instances are created at setup when decks are populated and
//! never destroyed; play only relocates them between containers (deck,
//! hand, discard pile, slot).

use serde::{Deserialize, Serialize};

use crate::catalog::DefId;

/// Per-game unique card instance id, allocated by `GameState`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Whether a card deploys to the board or resolves from hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// Deploys to a slot and fights for front control.
    Unit,
    /// Played from hand for its effect-list, then discarded.
    Event,
}

/// A card in a specific game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique id for this instance.
    pub id: CardId,

    /// Unit or Event.
    pub kind: CardKind,

    /// The catalog definition this card is a copy of.
    pub def: DefId,
}

impl CardInstance {
    /// Create a card instance.
    #[must_use]
    pub fn new(id: CardId, kind: CardKind, def: DefId) -> Self {
        Self { id, kind, def }
    }

    /// Is this a unit?
    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.kind == CardKind::Unit
    }

    /// Is this an event?
    #[must_use]
    pub fn is_event(&self) -> bool {
        self.kind == CardKind::Event
    }
}
