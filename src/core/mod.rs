//! Core types: players, phases, commands, configuration, RNG, and the
//! game state aggregate.

mod command;
mod config;
mod phase;
mod player;
mod rng;
mod state;

pub use command::{Command, CommandRecord};
pub use config::GameConfig;
pub use phase::Phase;
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use state::{GameState, PlayerState, TurnFlags};
