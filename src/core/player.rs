//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! The game is strictly two-player. `PlayerId` is a copyable identifier
//! with an `opponent()` involution; there is no N-player generality here.
//!
//! ## PlayerMap
//!
//! Per-player data storage backed by a fixed two-slot array for O(1)
//! access. Supports iteration and indexing by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two players.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// The player who takes the first turn.
    pub const FIRST: PlayerId = PlayerId(0);
    /// The player who takes the second turn.
    pub const SECOND: PlayerId = PlayerId(1);

    /// Create a new player ID. Panics if `id` is not 0 or 1.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        assert!(id < 2, "two-player game");
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Iterate over both player IDs in turn order.
    pub fn both() -> impl Iterator<Item = PlayerId> {
        [Self::FIRST, Self::SECOND].into_iter()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// Backed by a fixed `[T; 2]`, one entry per player.
///
/// ## Example
///
/// ```
/// use cannonade::core::{PlayerId, PlayerMap};
///
/// let mut tokens: PlayerMap<u32> = PlayerMap::with_value(0);
///
/// tokens[PlayerId::SECOND] = 2;
/// assert_eq!(tokens[PlayerId::FIRST], 0);
/// assert_eq!(tokens[PlayerId::SECOND], 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    ///
    /// The factory receives the `PlayerId` for each slot.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::FIRST), factory(PlayerId::SECOND)],
        }
    }

    /// Create a new PlayerMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
