//! Player commands.
//!
//! A command is the only way a player mutates the game. Each variant is
//! scoped to exactly one phase (except `Pass`); the engine validates the
//! phase and preconditions before touching state, so a rejected command
//! leaves no trace.

use serde::{Deserialize, Serialize};

use super::phase::Phase;
use super::player::PlayerId;
use crate::board::ColumnId;

/// A player-issued command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Supply: move cards deck to hand. The first draw of a turn is the
    /// mandatory one.
    DrawCard { amount: u32 },

    /// Supply or Logistics: move a hand card to the discard pile.
    DiscardCard { hand_index: usize },

    /// Logistics: discard an event card and resolve its effects, with an
    /// optional column as context. Does not consume the movement option.
    PlayEvent {
        hand_index: usize,
        column: Option<ColumnId>,
    },

    /// Logistics: push a column forward (Reserve to Front, then Rear to
    /// Reserve, each step independent).
    Advance { column: ColumnId },

    /// Logistics: return the own revealed Front card to hand.
    Withdraw { column: ColumnId },

    /// Commitment: place a unit face-down in an empty Rear slot. Ends
    /// the turn.
    Deploy {
        column: ColumnId,
        hand_index: usize,
    },

    /// Engagement: resolve the operational Front card's primary action,
    /// picking a branch when the action defines choices.
    PrimaryAction {
        column: ColumnId,
        choice: Option<String>,
    },

    /// Any phase: apply the phase's exit effects and move on.
    Pass,
}

impl Command {
    /// A single-card draw.
    #[must_use]
    pub fn draw() -> Self {
        Command::DrawCard { amount: 1 }
    }

    /// A primary action without a branch choice.
    #[must_use]
    pub fn primary(column: ColumnId) -> Self {
        Command::PrimaryAction {
            column,
            choice: None,
        }
    }

    /// Short name for diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Command::DrawCard { .. } => "DrawCard",
            Command::DiscardCard { .. } => "DiscardCard",
            Command::PlayEvent { .. } => "PlayEvent",
            Command::Advance { .. } => "Advance",
            Command::Withdraw { .. } => "Withdraw",
            Command::Deploy { .. } => "Deploy",
            Command::PrimaryAction { .. } => "PrimaryAction",
            Command::Pass => "Pass",
        }
    }
}

/// An accepted command with its context, for the history log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    /// Who issued it.
    pub player: PlayerId,

    /// The command.
    pub command: Command,

    /// Phase it resolved in.
    pub phase: Phase,

    /// Turn number it resolved in.
    pub turn: u32,
}

impl CommandRecord {
    /// Create a record.
    #[must_use]
    pub fn new(player: PlayerId, command: Command, phase: Phase, turn: u32) -> Self {
        Self {
            player,
            command,
            phase,
            turn,
        }
    }
}
