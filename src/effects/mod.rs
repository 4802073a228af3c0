//! The effect system: card text as data.
//!
//! Card definitions carry ordered effect-lists; the interpreter resolves
//! them against the game state. New cards are added purely as data -
//! the verb library is the only code surface.

mod interpreter;
mod list;
mod params;
mod verb;

pub use interpreter::{resolve_effect_list, resolve_primary_action, EffectContext};
pub use list::{EffectList, EffectSpec};
pub use params::{EffectParams, ParamValue, Side};
pub use verb::Verb;
