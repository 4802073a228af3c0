//! Effect parameters.
//!
//! Card data attaches a free-form parameter map to each effect entry.
//! Values are typed but the keys are whatever the card text needs; the
//! verb implementations pull out what they understand and ignore the
//! rest. The map deserializes untagged straight from the catalog JSON
//! (`{"amount": 2, "side": "enemy"}`).

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::board::{ColumnId, Line};

/// A single parameter value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Numbers (amounts, counts).
    Int(i64),
    /// Flags.
    Bool(bool),
    /// Names (columns, lines, sides, choice ids).
    Text(String),
    /// Name lists.
    TextList(Vec<String>),
}

impl ParamValue {
    /// Get as integer if this is an Int value.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as bool if this is a Bool value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as string reference if this is a Text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

/// Which player's side of a column an effect targets, relative to the
/// acting player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// The acting player's own side.
    Ally,
    /// The opposing player's side.
    Enemy,
}

impl Side {
    /// Parse from the name used in card data (case-insensitive).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "ally" | "own" | "self" => Some(Side::Ally),
            "enemy" | "opponent" => Some(Side::Enemy),
            _ => None,
        }
    }
}

/// The parameter map attached to one effect entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectParams(FxHashMap<String, ParamValue>);

impl EffectParams {
    /// Create an empty parameter map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter (builder pattern).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Insert a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Is a key present?
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Raw value lookup.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    /// Integer parameter with a default.
    #[must_use]
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.0.get(key).and_then(ParamValue::as_int).unwrap_or(default)
    }

    /// Non-negative amount parameter with a default; negative values in
    /// data read as zero.
    #[must_use]
    pub fn get_amount(&self, key: &str, default: u32) -> u32 {
        self.0
            .get(key)
            .and_then(ParamValue::as_int)
            .map(|v| u32::try_from(v).unwrap_or(0))
            .unwrap_or(default)
    }

    /// Text parameter.
    #[must_use]
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(ParamValue::as_text)
    }

    /// The `column` parameter, parsed.
    #[must_use]
    pub fn column(&self) -> Option<ColumnId> {
        self.get_text("column").and_then(ColumnId::parse)
    }

    /// The `line` parameter, parsed, with a per-verb default.
    #[must_use]
    pub fn line_or(&self, default: Line) -> Line {
        self.get_text("line").and_then(Line::parse).unwrap_or(default)
    }

    /// The `side` parameter, parsed, with a per-verb default.
    #[must_use]
    pub fn side_or(&self, default: Side) -> Side {
        self.get_text("side").and_then(Side::parse).unwrap_or(default)
    }
}
