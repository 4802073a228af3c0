//! The five turn phases.
//!
//! Phase *transitions* (auto-skip, exit effects, turn wrap) are the
//! engine's job; this module only defines the cycle itself.

use serde::{Deserialize, Serialize};

/// A phase of one player's turn, in cycle order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Mandatory draw, hand-limit enforcement.
    Supply,
    /// Events and the single movement (Advance or Withdraw).
    Logistics,
    /// Entered only when a card reached a Front slot this Logistics.
    Arrival,
    /// Primary actions from operational Front cards.
    Engagement,
    /// The single deployment; ends the turn.
    Commitment,
}

impl Phase {
    /// The phase that follows this one within a turn.
    ///
    /// Returns `None` for `Commitment`: leaving it ends the turn. The
    /// conditional skip of `Arrival` is the state machine's decision,
    /// not the cycle's.
    #[must_use]
    pub fn successor(self) -> Option<Phase> {
        match self {
            Phase::Supply => Some(Phase::Logistics),
            Phase::Logistics => Some(Phase::Arrival),
            Phase::Arrival => Some(Phase::Engagement),
            Phase::Engagement => Some(Phase::Commitment),
            Phase::Commitment => None,
        }
    }

    /// Parse from the name used in card data (case-insensitive).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "supply" => Some(Phase::Supply),
            "logistics" => Some(Phase::Logistics),
            "arrival" => Some(Phase::Arrival),
            "engagement" => Some(Phase::Engagement),
            "commitment" => Some(Phase::Commitment),
            _ => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Supply => "Supply",
            Phase::Logistics => "Logistics",
            Phase::Arrival => "Arrival",
            Phase::Engagement => "Engagement",
            Phase::Commitment => "Commitment",
        };
        write!(f, "{name}")
    }
}
