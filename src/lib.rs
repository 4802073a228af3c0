//! # cannonade
//!
//! Rules engine for a two-player positional card game: three shared
//! columns, three depth lines per side, a five-phase turn cycle, and
//! data-driven card effects.
//!
//! ## Design Principles
//!
//! 1. **Cards are data**: definitions live in an external catalog; their
//!    abilities are ordered effect-lists over a fixed verb vocabulary.
//!    New cards need no code.
//!
//! 2. **One owned state**: `GameState` is the single aggregate; every
//!    command, verb, and reaction receives it explicitly. No globals.
//!
//! 3. **Atomic commands**: a command is validated completely before any
//!    mutation. A success already includes the synchronous reactions
//!    (Overrun, breakthrough awards), the phase-machine advance, and
//!    the win check; a rejection changes nothing.
//!
//! 4. **Deterministic**: deck shuffling is the only randomness, seeded
//!    and reproducible for replay and testing.
//!
//! ## Modules
//!
//! - `core`: players, phases, commands, configuration, RNG, game state
//! - `board`: columns, lines, slots
//! - `cards`: card instances
//! - `catalog`: card definitions and validation
//! - `effects`: effect-lists and the verb interpreter
//! - `rules`: passive reactions, the phase machine, the win evaluator
//! - `engine`: the command processor (`Game`)

pub mod board;
pub mod cards;
pub mod catalog;
pub mod core;
pub mod effects;
pub mod engine;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Command, CommandRecord, GameConfig, GameRng, GameRngState, GameState, Phase, PlayerId,
    PlayerMap, PlayerState, TurnFlags,
};

pub use crate::board::{Board, Column, ColumnId, Line, PlayerColumn, Slot};

pub use crate::cards::{CardId, CardInstance, CardKind};

pub use crate::catalog::{
    Catalog, CatalogError, CardDefinition, DefId, EventDefinition, PrimaryAction, PrimaryChoice,
    UnitDefinition, Weight,
};

pub use crate::effects::{
    resolve_effect_list, resolve_primary_action, EffectContext, EffectList, EffectParams,
    EffectSpec, ParamValue, Side, Verb,
};

pub use crate::rules::{GameOutcome, Removal, RemovalCause};

pub use crate::engine::{CommandError, Game, GameBuilder, SetupError};
