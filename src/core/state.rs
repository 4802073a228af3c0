//! Game state: the single owned aggregate.
//!
//! `GameState` holds everything a game is: the board, both players'
//! card containers and tokens, the per-turn flags, the phase cursor,
//! the card instance table, and the seeded RNG. Every operation
//! receives it explicitly; nothing holds a back-reference to it and
//! there is no ambient singleton.
//!
//! Card instances live in one central table keyed by `CardId`;
//! containers (deck, hand, discard pile, slots) hold only ids, so
//! moving a card between containers is moving its id, never copying.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::command::CommandRecord;
use super::phase::Phase;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::board::{Board, ColumnId};
use crate::cards::{CardId, CardInstance, CardKind};
use crate::catalog::DefId;

/// One player's card containers and victory progress.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Cards in hand, in draw order.
    pub hand: Vec<CardId>,

    /// Deck; the top of the deck is the end of the vec.
    pub deck: Vec<CardId>,

    /// Discard pile, oldest first.
    pub discard_pile: Vec<CardId>,

    /// Breakthrough (victory) tokens.
    pub breakthroughs: u32,

    /// Set once the player's first Heavy primary action resolves.
    pub used_heavy_primary: bool,
}

/// Per-turn tracking, reset at every turn start.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnFlags {
    /// The mandatory Supply draw happened.
    pub drawn_card: bool,

    /// The single Logistics movement (Advance/Withdraw) happened.
    pub moved_in_logistics: bool,

    /// The single Commitment deployment happened.
    pub deployed: bool,

    /// Cards that entered a Front slot this turn by player movement.
    /// Overrun promotions are deliberately absent: they reveal but never
    /// activate.
    pub entered_front: SmallVec<[CardId; 4]>,

    /// Columns where the opponent held an operational Front card, and
    /// the current player did not, when this turn began.
    pub fronts_opponent_held: SmallVec<[ColumnId; 3]>,
}

impl TurnFlags {
    /// Record a card entering a Front slot.
    pub fn record_entered_front(&mut self, card: CardId) {
        if !self.entered_front.contains(&card) {
            self.entered_front.push(card);
        }
    }
}

/// The complete game state.
#[derive(Clone, Debug)]
pub struct GameState {
    /// The battlefield.
    pub board: Board,

    /// Per-player containers and tokens.
    players: PlayerMap<PlayerState>,

    /// Per-turn flags.
    pub flags: TurnFlags,

    /// Active phase.
    pub phase: Phase,

    /// Whose turn it is.
    pub current_player: PlayerId,

    /// Turn number, starting at 1; each player's turn counts.
    pub turn_number: u32,

    /// Card instance table.
    cards: FxHashMap<CardId, CardInstance>,

    /// Deterministic RNG (deck shuffling).
    pub rng: GameRng,

    /// Accepted-command log.
    history: Vector<CommandRecord>,

    /// Next instance id to allocate.
    next_card_id: u32,

    /// Test-only draw override; see `force_next_draw`.
    #[cfg(any(test, feature = "debug-hooks"))]
    forced_draws: Vec<CardId>,
}

impl GameState {
    /// Create an empty state: empty board, empty containers, Supply
    /// phase of turn 1 for the first player.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            board: Board::new(),
            players: PlayerMap::with_default(),
            flags: TurnFlags::default(),
            phase: Phase::Supply,
            current_player: PlayerId::FIRST,
            turn_number: 1,
            cards: FxHashMap::default(),
            rng: GameRng::new(seed),
            history: Vector::new(),
            next_card_id: 0,
            #[cfg(any(test, feature = "debug-hooks"))]
            forced_draws: Vec::new(),
        }
    }

    // === Players ===

    /// A player's containers and tokens.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.players[player]
    }

    /// A player's containers and tokens, mutably.
    pub fn player_mut(&mut self, player: PlayerId) -> &mut PlayerState {
        &mut self.players[player]
    }

    /// The player whose turn it is not.
    #[must_use]
    pub fn opponent(&self) -> PlayerId {
        self.current_player.opponent()
    }

    // === Cards ===

    /// Create a card instance and return its id. The caller places the
    /// id into a container.
    pub fn spawn_card(&mut self, kind: CardKind, def: DefId) -> CardId {
        let id = CardId::new(self.next_card_id);
        self.next_card_id += 1;
        self.cards.insert(id, CardInstance::new(id, kind, def));
        id
    }

    /// Look up a card instance.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&CardInstance> {
        self.cards.get(&id)
    }

    /// Look up a card instance, panicking if absent.
    ///
    /// Ids in containers always resolve; a miss is an engine bug.
    #[must_use]
    pub fn card_unchecked(&self, id: CardId) -> &CardInstance {
        self.cards.get(&id).expect("card id not in instance table")
    }

    /// Total number of card instances in the game.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    // === Draw / discard ===

    /// Draw one card from a player's deck to their hand.
    ///
    /// Returns the drawn card, or `None` if the deck is empty. Honors
    /// the test-only forced-draw hook.
    pub fn draw_card(&mut self, player: PlayerId) -> Option<CardId> {
        #[cfg(any(test, feature = "debug-hooks"))]
        if let Some(card) = self.take_forced_draw(player) {
            self.players[player].hand.push(card);
            return Some(card);
        }

        let card = self.players[player].deck.pop()?;
        self.players[player].hand.push(card);
        Some(card)
    }

    /// Draw up to `amount` cards; returns how many were actually drawn.
    pub fn draw_cards(&mut self, player: PlayerId, amount: u32) -> u32 {
        let mut drawn = 0;
        for _ in 0..amount {
            if self.draw_card(player).is_none() {
                break;
            }
            drawn += 1;
        }
        drawn
    }

    /// Move the card at `hand_index` to the discard pile.
    ///
    /// Panics on a bad index; command validation happens before this.
    pub fn discard_from_hand(&mut self, player: PlayerId, hand_index: usize) -> CardId {
        let card = self.players[player].hand.remove(hand_index);
        self.players[player].discard_pile.push(card);
        card
    }

    /// Shuffle a player's deck with the game RNG.
    pub fn shuffle_deck(&mut self, player: PlayerId) {
        let mut deck = std::mem::take(&mut self.players[player].deck);
        self.rng.shuffle(&mut deck);
        self.players[player].deck = deck;
    }

    // === History ===

    /// Append to the accepted-command log.
    pub fn record_command(&mut self, record: CommandRecord) {
        self.history.push_back(record);
    }

    /// The accepted-command log.
    #[must_use]
    pub fn history(&self) -> &Vector<CommandRecord> {
        &self.history
    }

    // === Test hooks ===

    /// Force the next draw by this player to fetch a specific card from
    /// their deck (wherever it sits), instead of the top card.
    ///
    /// Test-only: compiled under `cfg(test)` or the `debug-hooks`
    /// feature, never part of production state.
    #[cfg(any(test, feature = "debug-hooks"))]
    pub fn force_next_draw(&mut self, card: CardId) {
        self.forced_draws.push(card);
    }

    #[cfg(any(test, feature = "debug-hooks"))]
    fn take_forced_draw(&mut self, player: PlayerId) -> Option<CardId> {
        let next = *self.forced_draws.first()?;
        let pos = self.players[player].deck.iter().position(|&c| c == next)?;
        self.forced_draws.remove(0);
        Some(self.players[player].deck.remove(pos))
    }
}
