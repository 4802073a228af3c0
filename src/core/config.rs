//! Game configuration.
//!
//! The rule constants that are tunable without touching the engine:
//! hand limit, breakthrough target, front-control target, deck sizing.
//! Defaults follow the current rules revision of the game.

use serde::{Deserialize, Serialize};

/// Tunable rule constants.
///
/// ## Example
///
/// ```
/// use cannonade::core::GameConfig;
///
/// let config = GameConfig::default().with_breakthrough_target(3);
/// assert_eq!(config.breakthrough_target, 3);
/// assert_eq!(config.hand_limit, 7);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Maximum hand size a player may hold when leaving the Supply phase.
    pub hand_limit: usize,

    /// Breakthrough tokens needed to win.
    pub breakthrough_target: u32,

    /// Number of simultaneously controlled fronts needed to win (of 3).
    pub front_control_target: usize,

    /// Cards per deck at setup.
    pub deck_size: usize,

    /// Cards drawn into each hand at setup, before the first turn.
    pub starting_hand: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            hand_limit: 7,
            breakthrough_target: 2,
            front_control_target: 2,
            deck_size: 20,
            starting_hand: 5,
        }
    }
}

impl GameConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hand limit.
    #[must_use]
    pub fn with_hand_limit(mut self, limit: usize) -> Self {
        self.hand_limit = limit;
        self
    }

    /// Set the breakthrough-token win target.
    #[must_use]
    pub fn with_breakthrough_target(mut self, target: u32) -> Self {
        self.breakthrough_target = target;
        self
    }

    /// Set the front-control win target.
    #[must_use]
    pub fn with_front_control_target(mut self, target: usize) -> Self {
        self.front_control_target = target;
        self
    }

    /// Set the deck size used when generating decks.
    #[must_use]
    pub fn with_deck_size(mut self, size: usize) -> Self {
        self.deck_size = size;
        self
    }

    /// Set the starting hand size.
    #[must_use]
    pub fn with_starting_hand(mut self, size: usize) -> Self {
        self.starting_hand = size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();

        assert_eq!(config.hand_limit, 7);
        assert_eq!(config.breakthrough_target, 2);
        assert_eq!(config.front_control_target, 2);
        assert_eq!(config.deck_size, 20);
        assert_eq!(config.starting_hand, 5);
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::new()
            .with_hand_limit(5)
            .with_breakthrough_target(3)
            .with_front_control_target(3)
            .with_deck_size(30)
            .with_starting_hand(0);

        assert_eq!(config.hand_limit, 5);
        assert_eq!(config.breakthrough_target, 3);
        assert_eq!(config.front_control_target, 3);
        assert_eq!(config.deck_size, 30);
        assert_eq!(config.starting_hand, 0);
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
