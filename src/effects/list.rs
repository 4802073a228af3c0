//! Effect lists - the card-text instruction sequences.
//!
//! An `EffectList` is the ordered program a card carries: each entry
//! names a verb and its parameters. Lists come from external card data,
//! not code; the interpreter executes them in order. Verb names stay
//! strings here so that a mis-authored entry survives deserialization
//! and can be skipped at resolution time instead of poisoning the whole
//! catalog.

use serde::{Deserialize, Serialize};

use super::params::EffectParams;

/// One `{verb, params}` entry of an effect list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectSpec {
    /// Verb name as authored in the card data.
    pub verb: String,

    /// Parameters for the verb.
    #[serde(default)]
    pub params: EffectParams,
}

impl EffectSpec {
    /// Create an effect entry with no parameters.
    #[must_use]
    pub fn new(verb: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            params: EffectParams::new(),
        }
    }

    /// Create an effect entry with parameters.
    #[must_use]
    pub fn with_params(verb: impl Into<String>, params: EffectParams) -> Self {
        Self {
            verb: verb.into(),
            params,
        }
    }
}

/// An ordered sequence of effects.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectList(Vec<EffectSpec>);

impl EffectList {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an effect (builder pattern).
    #[must_use]
    pub fn then(mut self, spec: EffectSpec) -> Self {
        self.0.push(spec);
        self
    }

    /// Iterate in execution order.
    pub fn iter(&self) -> impl Iterator<Item = &EffectSpec> {
        self.0.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<EffectSpec> for EffectList {
    fn from_iter<I: IntoIterator<Item = EffectSpec>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
