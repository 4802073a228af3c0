//! Board slots.
//!
//! A slot is the single card-holding position at a (column, player, line)
//! triple. Occupancy is the `Option<CardId>`; facing and readiness are
//! slot state, not card state, and are wiped whenever the slot empties.
//!
//! Invariant: `operational` implies `face_up`. The slot API enforces it;
//! violating it through direct construction is a programming error and
//! asserts loudly in debug builds.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// A single board position.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    card: Option<CardId>,
    face_up: bool,
    operational: bool,
    /// Preparation tokens. Opaque to the engine; card text gives them meaning.
    tokens: u32,
}

impl Slot {
    /// An empty slot.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Is this slot occupied?
    #[must_use]
    pub fn is_occupied(&self) -> bool {
        self.card.is_some()
    }

    /// Is this slot empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.card.is_none()
    }

    /// The occupying card, if any.
    #[must_use]
    pub fn card(&self) -> Option<CardId> {
        self.card
    }

    /// Is the occupying card face-up?
    #[must_use]
    pub fn is_face_up(&self) -> bool {
        self.face_up
    }

    /// Is the occupying card operational (readied)?
    #[must_use]
    pub fn is_operational(&self) -> bool {
        self.operational
    }

    /// Face-up but not yet operational.
    #[must_use]
    pub fn is_exposed(&self) -> bool {
        self.is_occupied() && self.face_up && !self.operational
    }

    /// Preparation token count.
    #[must_use]
    pub fn tokens(&self) -> u32 {
        self.tokens
    }

    /// Place a card face-down and not operational.
    ///
    /// Panics if the slot is already occupied: double occupancy is an
    /// engine bug, not a game state.
    pub fn place(&mut self, card: CardId) {
        assert!(
            self.card.is_none(),
            "slot already occupied by {:?}",
            self.card
        );
        self.card = Some(card);
        self.face_up = false;
        self.operational = false;
        self.tokens = 0;
    }

    /// Place a card with explicit facing (promotion keeps a revealed card
    /// revealed).
    pub fn place_with_facing(&mut self, card: CardId, face_up: bool) {
        self.place(card);
        self.face_up = face_up;
    }

    /// Remove and return the occupying card, clearing facing, readiness,
    /// and tokens.
    pub fn take(&mut self) -> Option<CardId> {
        let card = self.card.take();
        self.face_up = false;
        self.operational = false;
        self.tokens = 0;
        card
    }

    /// Turn the occupying card face-up.
    pub fn reveal(&mut self) {
        debug_assert!(self.card.is_some(), "revealing an empty slot");
        self.face_up = true;
    }

    /// Ready the occupying card. Requires it to be face-up.
    pub fn ready(&mut self) {
        debug_assert!(self.face_up, "readying a face-down card");
        self.operational = true;
    }

    /// Exhaust the occupying card (it stays face-up).
    pub fn exhaust(&mut self) {
        self.operational = false;
    }

    /// Add preparation tokens.
    pub fn add_tokens(&mut self, amount: u32) {
        debug_assert!(self.card.is_some(), "tokens on an empty slot");
        self.tokens += amount;
    }

    /// Remove preparation tokens, saturating at zero.
    pub fn remove_tokens(&mut self, amount: u32) {
        self.tokens = self.tokens.saturating_sub(amount);
    }
}
