//! The verb library.
//!
//! Card text is data; the verbs are the fixed vocabulary it is written
//! in. `Verb` is a closed enum parsed from the authored verb string:
//! dispatch is an exhaustive match, and a name that fails to parse is a
//! non-fatal authoring error handled by the interpreter (logged and
//! skipped), never by the type system.

use crate::board::Line;
use crate::effects::params::EffectParams;

/// A recognized effect verb.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verb {
    /// Draw cards from deck to hand.
    DrawCards,
    /// Discard cards from the end of a hand.
    DiscardCards,
    /// Turn a slotted card face-up.
    RevealAsset,
    /// Move a slotted card to its owner's discard pile.
    DestroyAsset,
    /// Move a slotted card back to its owner's hand.
    ReturnToHand,
    /// Move a card between lines of one column.
    MoveAsset,
    /// Add preparation tokens to a slot.
    AddPreparation,
    /// Remove preparation tokens from a slot.
    RemovePreparation,
}

impl Verb {
    /// Parse an authored verb name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "draw_cards" => Some(Verb::DrawCards),
            "discard_cards" => Some(Verb::DiscardCards),
            "reveal_asset" => Some(Verb::RevealAsset),
            "destroy_asset" => Some(Verb::DestroyAsset),
            "return_to_hand" => Some(Verb::ReturnToHand),
            "move_asset" => Some(Verb::MoveAsset),
            "add_preparation" => Some(Verb::AddPreparation),
            "remove_preparation" => Some(Verb::RemovePreparation),
            _ => None,
        }
    }

    /// The authored name of this verb.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Verb::DrawCards => "draw_cards",
            Verb::DiscardCards => "discard_cards",
            Verb::RevealAsset => "reveal_asset",
            Verb::DestroyAsset => "destroy_asset",
            Verb::ReturnToHand => "return_to_hand",
            Verb::MoveAsset => "move_asset",
            Verb::AddPreparation => "add_preparation",
            Verb::RemovePreparation => "remove_preparation",
        }
    }

    /// Check authored params against what this verb requires.
    ///
    /// Used at catalog-validation time so that a definition whose known
    /// verbs are unusable fails before any game starts. Unknown keys are
    /// ignored; unknown verb *names* are not an error here (they are
    /// skipped at resolution time instead).
    pub fn check_params(self, params: &EffectParams) -> Result<(), String> {
        // Shared optional params must at least parse when present.
        if let Some(text) = params.get_text("column") {
            if crate::board::ColumnId::parse(text).is_none() {
                return Err(format!("unknown column {text:?}"));
            }
        }
        if let Some(text) = params.get_text("side") {
            if super::params::Side::parse(text).is_none() {
                return Err(format!("unknown side {text:?}"));
            }
        }
        if let Some(text) = params.get_text("line") {
            if Line::parse(text).is_none() {
                return Err(format!("unknown line {text:?}"));
            }
        }
        if params.contains("amount") && params.get("amount").and_then(|v| v.as_int()).is_none() {
            return Err("amount must be an integer".to_string());
        }

        match self {
            Verb::DrawCards
            | Verb::DiscardCards
            | Verb::AddPreparation
            | Verb::RemovePreparation => {
                if params.get_int("amount", 1) < 1 {
                    return Err("amount must be at least 1".to_string());
                }
                Ok(())
            }
            Verb::MoveAsset => {
                let from = params
                    .get_text("from")
                    .ok_or_else(|| "move_asset requires a `from` line".to_string())?;
                let to = params
                    .get_text("to")
                    .ok_or_else(|| "move_asset requires a `to` line".to_string())?;
                Line::parse(from).ok_or_else(|| format!("unknown line {from:?}"))?;
                Line::parse(to).ok_or_else(|| format!("unknown line {to:?}"))?;
                Ok(())
            }
            Verb::RevealAsset | Verb::DestroyAsset | Verb::ReturnToHand => Ok(()),
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
