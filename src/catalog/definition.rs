//! Card definitions - the static card data.
//!
//! Definitions are authored externally (JSON card files) and consumed
//! here as plain data. A definition never changes during play; per-game
//! card state lives in `CardInstance` and on the slots.

use serde::{Deserialize, Serialize};

use crate::core::Phase;
use crate::effects::EffectList;

/// Key into the catalog: the authored definition id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefId(pub String);

impl DefId {
    /// Create a definition id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DefId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for DefId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unit weight class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weight {
    /// Utility units, often disruptive or informational.
    Light,
    /// Balanced combat units.
    Medium,
    /// Powerful units that exert strong control.
    Heavy,
}

/// One selectable branch of a choice-based primary action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrimaryChoice {
    /// Choice id as referenced by the `PrimaryAction` command.
    pub id: String,

    /// Effects of this branch.
    pub effects: EffectList,
}

/// A unit's primary action: a single effect-list, or a choice between
/// named branches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryAction {
    /// Unconditional effect-list.
    Effects { effects: EffectList },
    /// The acting player picks one branch.
    Choices { choices: Vec<PrimaryChoice> },
}

impl PrimaryAction {
    /// Resolve the effect-list for an optional choice id.
    ///
    /// Returns `None` when a choice id is required but missing/unknown,
    /// or when one is supplied for a choiceless action.
    #[must_use]
    pub fn effects_for(&self, choice: Option<&str>) -> Option<&EffectList> {
        match (self, choice) {
            (PrimaryAction::Effects { effects }, None) => Some(effects),
            (PrimaryAction::Effects { .. }, Some(_)) => None,
            (PrimaryAction::Choices { choices }, Some(id)) => {
                choices.iter().find(|c| c.id == id).map(|c| &c.effects)
            }
            (PrimaryAction::Choices { .. }, None) => None,
        }
    }
}

/// A deployable unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitDefinition {
    /// Authored id.
    pub id: DefId,

    /// Display name.
    pub name: String,

    /// Weight class.
    pub weight: Weight,

    /// Resolved when the unit is revealed at the Front.
    #[serde(default)]
    pub activate: Option<EffectList>,

    /// Available once the unit is operational.
    #[serde(default)]
    pub primary_action: Option<PrimaryAction>,
}

/// A one-shot event card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventDefinition {
    /// Authored id.
    pub id: DefId,

    /// Display name.
    pub name: String,

    /// Effects resolved when the event is played.
    pub effects: EffectList,

    /// Phase in which the event may be played.
    #[serde(default = "default_play_phase")]
    pub play_phase: Phase,
}

fn default_play_phase() -> Phase {
    Phase::Logistics
}

/// Either kind of card definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardDefinition {
    Unit(UnitDefinition),
    Event(EventDefinition),
}

impl CardDefinition {
    /// The authored id.
    #[must_use]
    pub fn id(&self) -> &DefId {
        match self {
            CardDefinition::Unit(u) => &u.id,
            CardDefinition::Event(e) => &e.id,
        }
    }

    /// The display name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            CardDefinition::Unit(u) => &u.name,
            CardDefinition::Event(e) => &e.name,
        }
    }

    /// The unit definition, if this is a unit.
    #[must_use]
    pub fn as_unit(&self) -> Option<&UnitDefinition> {
        match self {
            CardDefinition::Unit(u) => Some(u),
            CardDefinition::Event(_) => None,
        }
    }

    /// The event definition, if this is an event.
    #[must_use]
    pub fn as_event(&self) -> Option<&EventDefinition> {
        match self {
            CardDefinition::Unit(_) => None,
            CardDefinition::Event(e) => Some(e),
        }
    }
}
