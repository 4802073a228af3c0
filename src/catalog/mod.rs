//! The card catalog: an immutable mapping from definition id to card
//! definition.
//!
//! The engine does not author or load card files; it consumes a built
//! catalog. `Catalog::validate` runs the fail-fast structural checks
//! that must reject a malformed catalog before any game starts - a
//! mis-authored *verb name*, by contrast, is deliberately left to the
//! interpreter's skip-and-log path so one bad entry cannot take a whole
//! card set down.

mod definition;

pub use definition::{
    CardDefinition, DefId, EventDefinition, PrimaryAction, PrimaryChoice, UnitDefinition, Weight,
};

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::effects::{EffectList, Verb};

/// Catalog validation failure.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate definition id {0:?}")]
    DuplicateId(DefId),
    #[error("definition {0:?} has an empty id or name")]
    EmptyIdOrName(DefId),
    #[error("unit {0:?} has a choice primary action with no choices")]
    NoChoices(DefId),
    #[error("unit {def:?} repeats choice id {choice:?}")]
    DuplicateChoice { def: DefId, choice: String },
    #[error("definition {def:?}, verb {verb:?}: {reason}")]
    BadEffect {
        def: DefId,
        verb: String,
        reason: String,
    },
}

/// Immutable mapping `DefId -> CardDefinition`.
///
/// ## Example
///
/// ```
/// use cannonade::catalog::{Catalog, UnitDefinition, DefId, Weight};
///
/// let catalog = Catalog::new().with_unit(UnitDefinition {
///     id: DefId::new("line_infantry"),
///     name: "Line Infantry".to_string(),
///     weight: Weight::Medium,
///     activate: None,
///     primary_action: None,
/// });
///
/// assert!(catalog.get_unit(&DefId::new("line_infantry")).is_some());
/// catalog.validate().unwrap();
/// ```
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    defs: FxHashMap<DefId, CardDefinition>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition.
    ///
    /// Panics if the id is already present; duplicate authoring ids are
    /// caught by `validate` when building from data instead.
    pub fn insert(&mut self, def: CardDefinition) {
        let id = def.id().clone();
        if self.defs.insert(id.clone(), def).is_some() {
            panic!("definition {id:?} already in catalog");
        }
    }

    /// Add a unit definition (builder pattern).
    #[must_use]
    pub fn with_unit(mut self, unit: UnitDefinition) -> Self {
        self.insert(CardDefinition::Unit(unit));
        self
    }

    /// Add an event definition (builder pattern).
    #[must_use]
    pub fn with_event(mut self, event: EventDefinition) -> Self {
        self.insert(CardDefinition::Event(event));
        self
    }

    /// Build from already-parsed definitions, rejecting duplicates.
    pub fn from_definitions(
        defs: impl IntoIterator<Item = CardDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for def in defs {
            let id = def.id().clone();
            if catalog.defs.insert(id.clone(), def).is_some() {
                return Err(CatalogError::DuplicateId(id));
            }
        }
        Ok(catalog)
    }

    /// Look up any definition.
    #[must_use]
    pub fn get(&self, id: &DefId) -> Option<&CardDefinition> {
        self.defs.get(id)
    }

    /// Look up a unit definition.
    #[must_use]
    pub fn get_unit(&self, id: &DefId) -> Option<&UnitDefinition> {
        self.defs.get(id).and_then(CardDefinition::as_unit)
    }

    /// Look up an event definition.
    #[must_use]
    pub fn get_event(&self, id: &DefId) -> Option<&EventDefinition> {
        self.defs.get(id).and_then(CardDefinition::as_event)
    }

    /// Check if an id is present.
    #[must_use]
    pub fn contains(&self, id: &DefId) -> bool {
        self.defs.contains_key(id)
    }

    /// Number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Iterate over all definitions.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.defs.values()
    }

    /// Iterate over unit definitions only.
    pub fn units(&self) -> impl Iterator<Item = &UnitDefinition> {
        self.defs.values().filter_map(CardDefinition::as_unit)
    }

    /// Fail-fast structural validation.
    ///
    /// Rejects empty ids/names, empty or duplicated choice branches, and
    /// recognized verbs whose params cannot be used. Must pass before a
    /// game is started with this catalog.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for def in self.defs.values() {
            let id = def.id().clone();
            if id.as_str().is_empty() || def.name().is_empty() {
                return Err(CatalogError::EmptyIdOrName(id));
            }

            match def {
                CardDefinition::Unit(unit) => {
                    if let Some(activate) = &unit.activate {
                        Self::check_effects(&id, activate)?;
                    }
                    match &unit.primary_action {
                        Some(PrimaryAction::Effects { effects }) => {
                            Self::check_effects(&id, effects)?;
                        }
                        Some(PrimaryAction::Choices { choices }) => {
                            if choices.is_empty() {
                                return Err(CatalogError::NoChoices(id));
                            }
                            for (i, choice) in choices.iter().enumerate() {
                                if choices[..i].iter().any(|c| c.id == choice.id) {
                                    return Err(CatalogError::DuplicateChoice {
                                        def: id.clone(),
                                        choice: choice.id.clone(),
                                    });
                                }
                                Self::check_effects(&id, &choice.effects)?;
                            }
                        }
                        None => {}
                    }
                }
                CardDefinition::Event(event) => {
                    Self::check_effects(&id, &event.effects)?;
                }
            }
        }
        Ok(())
    }

    fn check_effects(def: &DefId, effects: &EffectList) -> Result<(), CatalogError> {
        for spec in effects.iter() {
            // Unknown names resolve to a skip at runtime, not a load error.
            if let Some(verb) = Verb::parse(&spec.verb) {
                verb.check_params(&spec.params)
                    .map_err(|reason| CatalogError::BadEffect {
                        def: def.clone(),
                        verb: spec.verb.clone(),
                        reason,
                    })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{EffectParams, EffectSpec};

    fn unit(id: &str, weight: Weight) -> UnitDefinition {
        UnitDefinition {
            id: DefId::new(id),
            name: id.to_string(),
            weight,
            activate: None,
            primary_action: None,
        }
    }

    #[test]
    fn test_insert_and_lookup() {
        let catalog = Catalog::new()
            .with_unit(unit("infantry", Weight::Medium))
            .with_event(EventDefinition {
                id: DefId::new("barrage"),
                name: "Barrage".to_string(),
                effects: EffectList::new().then(EffectSpec::new("destroy_asset")),
                play_phase: crate::core::Phase::Logistics,
            });

        assert_eq!(catalog.len(), 2);
        assert!(catalog.get_unit(&DefId::new("infantry")).is_some());
        assert!(catalog.get_event(&DefId::new("infantry")).is_none());
        assert!(catalog.get_event(&DefId::new("barrage")).is_some());
        assert!(!catalog.contains(&DefId::new("cavalry")));
    }

    #[test]
    #[should_panic(expected = "already in catalog")]
    fn test_duplicate_insert_panics() {
        let _ = Catalog::new()
            .with_unit(unit("infantry", Weight::Medium))
            .with_unit(unit("infantry", Weight::Light));
    }

    #[test]
    fn test_from_definitions_rejects_duplicates() {
        let result = Catalog::from_definitions([
            CardDefinition::Unit(unit("a", Weight::Light)),
            CardDefinition::Unit(unit("a", Weight::Heavy)),
        ]);

        assert!(matches!(result, Err(CatalogError::DuplicateId(_))));
    }

    #[test]
    fn test_validate_ok() {
        let catalog = Catalog::new().with_unit(UnitDefinition {
            id: DefId::new("howitzer"),
            name: "Howitzer".to_string(),
            weight: Weight::Heavy,
            activate: Some(EffectList::new().then(EffectSpec::with_params(
                "add_preparation",
                EffectParams::new().with("amount", 1i64),
            ))),
            primary_action: Some(PrimaryAction::Effects {
                effects: EffectList::new().then(EffectSpec::new("destroy_asset")),
            }),
        });

        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_params() {
        let catalog = Catalog::new().with_event(EventDefinition {
            id: DefId::new("resupply"),
            name: "Resupply".to_string(),
            effects: EffectList::new().then(EffectSpec::with_params(
                "draw_cards",
                EffectParams::new().with("amount", 0i64),
            )),
            play_phase: crate::core::Phase::Logistics,
        });

        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::BadEffect { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_empty_choices() {
        let catalog = Catalog::new().with_unit(UnitDefinition {
            id: DefId::new("sapper"),
            name: "Sapper".to_string(),
            weight: Weight::Light,
            activate: None,
            primary_action: Some(PrimaryAction::Choices { choices: vec![] }),
        });

        assert!(matches!(catalog.validate(), Err(CatalogError::NoChoices(_))));
    }

    #[test]
    fn test_validate_rejects_duplicate_choices() {
        let catalog = Catalog::new().with_unit(UnitDefinition {
            id: DefId::new("sapper"),
            name: "Sapper".to_string(),
            weight: Weight::Light,
            activate: None,
            primary_action: Some(PrimaryAction::Choices {
                choices: vec![
                    PrimaryChoice {
                        id: "dig".to_string(),
                        effects: EffectList::new(),
                    },
                    PrimaryChoice {
                        id: "dig".to_string(),
                        effects: EffectList::new(),
                    },
                ],
            }),
        });

        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::DuplicateChoice { .. })
        ));
    }

    #[test]
    fn test_validate_tolerates_unknown_verbs() {
        // Unknown verb names are a resolution-time concern, not a load error.
        let catalog = Catalog::new().with_event(EventDefinition {
            id: DefId::new("experimental"),
            name: "Experimental".to_string(),
            effects: EffectList::new().then(EffectSpec::new("summon_zeppelin")),
            play_phase: crate::core::Phase::Logistics,
        });

        assert!(catalog.validate().is_ok());
    }
}
