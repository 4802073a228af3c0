//! Columns and lines.
//!
//! The board is three shared lanes (West, Central, East). Each lane holds
//! one `PlayerColumn` per player, and each `PlayerColumn` is three slots
//! at increasing proximity to the opponent: Rear, Reserve, Front.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::slot::Slot;
use crate::core::{PlayerId, PlayerMap};

/// One of the three lanes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnId {
    West,
    Central,
    East,
}

impl ColumnId {
    /// All columns, west to east.
    pub const ALL: [ColumnId; 3] = [ColumnId::West, ColumnId::Central, ColumnId::East];

    /// Positional index (0..3).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            ColumnId::West => 0,
            ColumnId::Central => 1,
            ColumnId::East => 2,
        }
    }

    /// Parse from the name used in card data (case-insensitive).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "west" => Some(ColumnId::West),
            "central" => Some(ColumnId::Central),
            "east" => Some(ColumnId::East),
            _ => None,
        }
    }
}

impl std::fmt::Display for ColumnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ColumnId::West => "West",
            ColumnId::Central => "Central",
            ColumnId::East => "East",
        };
        write!(f, "{name}")
    }
}

/// Depth position within a player's side of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Line {
    Rear,
    Reserve,
    Front,
}

impl Line {
    /// All lines, rearmost first.
    pub const ALL: [Line; 3] = [Line::Rear, Line::Reserve, Line::Front];

    /// Parse from the name used in card data (case-insensitive).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "rear" => Some(Line::Rear),
            "reserve" => Some(Line::Reserve),
            "front" => Some(Line::Front),
            _ => None,
        }
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Line::Rear => "Rear",
            Line::Reserve => "Reserve",
            Line::Front => "Front",
        };
        write!(f, "{name}")
    }
}

/// One player's three slots in a column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerColumn {
    pub rear: Slot,
    pub reserve: Slot,
    pub front: Slot,
}

impl PlayerColumn {
    /// Get the slot at a line.
    #[must_use]
    pub fn slot(&self, line: Line) -> &Slot {
        match line {
            Line::Rear => &self.rear,
            Line::Reserve => &self.reserve,
            Line::Front => &self.front,
        }
    }

    /// Get the slot at a line, mutably.
    pub fn slot_mut(&mut self, line: Line) -> &mut Slot {
        match line {
            Line::Rear => &mut self.rear,
            Line::Reserve => &mut self.reserve,
            Line::Front => &mut self.front,
        }
    }

    /// All three slots occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        Line::ALL.iter().all(|&l| self.slot(l).is_occupied())
    }

    /// Any slot occupied.
    #[must_use]
    pub fn has_cards(&self) -> bool {
        Line::ALL.iter().any(|&l| self.slot(l).is_occupied())
    }
}

/// A lane: one `PlayerColumn` per player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    sides: PlayerMap<PlayerColumn>,
}

impl Default for Column {
    fn default() -> Self {
        Self {
            sides: PlayerMap::with_default(),
        }
    }
}

impl Column {
    /// Get a player's side of this column.
    #[must_use]
    pub fn side(&self, player: PlayerId) -> &PlayerColumn {
        &self.sides[player]
    }

    /// Get a player's side of this column, mutably.
    pub fn side_mut(&mut self, player: PlayerId) -> &mut PlayerColumn {
        &mut self.sides[player]
    }
}

/// The full battlefield: three columns.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    columns: [Column; 3],
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a specific slot.
    #[must_use]
    pub fn slot(&self, column: ColumnId, player: PlayerId, line: Line) -> &Slot {
        self.columns[column.index()].side(player).slot(line)
    }

    /// Shorthand for a specific slot, mutably.
    pub fn slot_mut(&mut self, column: ColumnId, player: PlayerId, line: Line) -> &mut Slot {
        self.columns[column.index()].side_mut(player).slot_mut(line)
    }

    /// Move a card between two lines of one column side, carrying its
    /// preparation tokens. Facing and readiness reset; promotion rules
    /// that keep a card revealed re-reveal it afterwards.
    ///
    /// Returns the moved card, or `None` when the source is empty, the
    /// destination is occupied, or the lines coincide.
    pub fn transfer(
        &mut self,
        column: ColumnId,
        player: PlayerId,
        from: Line,
        to: Line,
    ) -> Option<crate::cards::CardId> {
        if from == to {
            return None;
        }
        let side = self.columns[column.index()].side_mut(player);
        if side.slot(to).is_occupied() {
            return None;
        }
        let tokens = side.slot(from).tokens();
        let card = side.slot_mut(from).take()?;
        let dest = side.slot_mut(to);
        dest.place(card);
        if tokens > 0 {
            dest.add_tokens(tokens);
        }
        Some(card)
    }

    /// Does the player have any card on the board?
    #[must_use]
    pub fn player_has_cards(&self, player: PlayerId) -> bool {
        ColumnId::ALL
            .iter()
            .any(|&c| self[c].side(player).has_cards())
    }

    /// Iterate over every slot of a player, with its position.
    pub fn player_slots(
        &self,
        player: PlayerId,
    ) -> impl Iterator<Item = (ColumnId, Line, &Slot)> {
        ColumnId::ALL.iter().flat_map(move |&c| {
            Line::ALL
                .iter()
                .map(move |&l| (c, l, self[c].side(player).slot(l)))
        })
    }
}

impl Index<ColumnId> for Board {
    type Output = Column;

    fn index(&self, column: ColumnId) -> &Self::Output {
        &self.columns[column.index()]
    }
}

impl IndexMut<ColumnId> for Board {
    fn index_mut(&mut self, column: ColumnId) -> &mut Self::Output {
        &mut self.columns[column.index()]
    }
}
