//! Passive reaction rules.
//!
//! These fire synchronously inside the primary operation that causes
//! them - there is no deferred queue. Overrun promotes a Reserve card
//! the moment its Front empties; the breakthrough triggers (Escalation,
//! Decisive Breach, Collapse) award tokens as a side effect of the
//! action that earned them. The win evaluator reads the result after
//! the command completes.

use log::{debug, info};

use crate::board::{ColumnId, Line};
use crate::cards::CardId;
use crate::catalog::{Catalog, Weight};
use crate::core::{GameState, Phase, PlayerId};

/// How a card leaves a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Removal {
    /// To its owner's discard pile.
    Destroy,
    /// To its owner's hand.
    Withdraw,
}

/// Attribution for a removal, so reactions credit the right player.
#[derive(Clone, Copy, Debug)]
pub struct RemovalCause {
    /// The player whose action caused the removal.
    pub actor: PlayerId,
    /// The removal happened while resolving a primary action.
    pub via_primary: bool,
}

impl RemovalCause {
    /// A removal caused directly by a player command.
    #[must_use]
    pub fn command(actor: PlayerId) -> Self {
        Self {
            actor,
            via_primary: false,
        }
    }

    /// A removal caused while resolving a primary action.
    #[must_use]
    pub fn primary_action(actor: PlayerId) -> Self {
        Self {
            actor,
            via_primary: true,
        }
    }
}

/// Remove the card at a slot, route it to its owner's discard pile or
/// hand, and fire every reaction the removal earns.
///
/// Returns the removed card, or `None` if the slot was empty. Front
/// removals run Overrun for the vacated side and the Decisive Breach
/// check for the actor before this function returns; there is no
/// observable intermediate state.
pub fn remove_from_slot(
    state: &mut GameState,
    catalog: &Catalog,
    column: ColumnId,
    owner: PlayerId,
    line: Line,
    removal: Removal,
    cause: RemovalCause,
) -> Option<CardId> {
    let card = state.board.slot_mut(column, owner, line).take()?;

    match removal {
        Removal::Destroy => state.player_mut(owner).discard_pile.push(card),
        Removal::Withdraw => state.player_mut(owner).hand.push(card),
    }
    debug!("{card} of {owner} removed from {column}/{line} ({removal:?})");

    if line == Line::Front {
        overrun(state, column, owner);
        decisive_breach_check(state, column, owner, cause.actor);
    }

    // A Heavy kill through a primary action resupplies the attacker.
    if removal == Removal::Destroy && cause.via_primary {
        let weight = state
            .card(card)
            .and_then(|c| catalog.get_unit(&c.def))
            .map(|u| u.weight);
        if weight == Some(Weight::Heavy) {
            state.draw_card(cause.actor);
        }
    }

    Some(card)
}

/// Overrun: when a side's Front slot is empty and its Reserve occupied,
/// the Reserve card is promoted immediately. It arrives revealed but
/// not operational, and never resolves its activate ability.
pub fn overrun(state: &mut GameState, column: ColumnId, player: PlayerId) {
    let side_front_empty = state.board.slot(column, player, Line::Front).is_empty();
    let reserve_occupied = state.board.slot(column, player, Line::Reserve).is_occupied();
    if !side_front_empty || !reserve_occupied {
        return;
    }

    let card = state
        .board
        .transfer(column, player, Line::Reserve, Line::Front)
        .expect("overrun transfer cannot fail");
    state.board.slot_mut(column, player, Line::Front).reveal();
    debug!("overrun: {card} of {player} promoted to {column} front");
}

/// Decisive Breach: removing an opponent's Front card from a column the
/// opponent held at the start of the actor's turn earns a breakthrough.
fn decisive_breach_check(
    state: &mut GameState,
    column: ColumnId,
    removed_owner: PlayerId,
    actor: PlayerId,
) {
    if removed_owner == actor {
        return;
    }
    if state.flags.fronts_opponent_held.contains(&column) {
        award_breakthroughs(state, actor, 1, "decisive breach");
    }
}

/// Escalation: the first Heavy primary action each player resolves in
/// the whole game earns a breakthrough. Checked before the action's
/// effect-list runs.
pub fn escalation_check(state: &mut GameState, player: PlayerId, weight: Weight) {
    if weight != Weight::Heavy || state.player(player).used_heavy_primary {
        return;
    }
    state.player_mut(player).used_heavy_primary = true;
    award_breakthroughs(state, player, 1, "escalation");
}

/// Collapse: an opponent starting the turn with nothing on the board
/// and nothing in hand forfeits two breakthroughs to the current
/// player. Run at turn begin.
pub fn collapse_check(state: &mut GameState) {
    let current = state.current_player;
    let opponent = current.opponent();

    let opponent_spent = !state.board.player_has_cards(opponent)
        && state.player(opponent).hand.is_empty();
    if opponent_spent {
        award_breakthroughs(state, current, 2, "collapse");
    }
}

/// Award breakthrough tokens. A breakthrough gained during the
/// Engagement phase also lets the gaining player draw a card.
pub fn award_breakthroughs(state: &mut GameState, player: PlayerId, amount: u32, source: &str) {
    state.player_mut(player).breakthroughs += amount;
    info!(
        "{player} gains {amount} breakthrough(s) ({source}), total {}",
        state.player(player).breakthroughs
    );
    if state.phase == Phase::Engagement {
        state.draw_card(player);
    }
}

/// Does `player` control the front of `column`: own Front occupied and
/// operational, opposing Front empty.
#[must_use]
pub fn controls_front(state: &GameState, column: ColumnId, player: PlayerId) -> bool {
    let own = state.board.slot(column, player, Line::Front);
    let theirs = state.board.slot(column, player.opponent(), Line::Front);
    own.is_occupied() && own.is_operational() && theirs.is_empty()
}

/// Columns where the opponent of `player` has an operational Front card
/// and `player` does not. Captured into the turn flags at turn begin
/// for the Decisive Breach check.
#[must_use]
pub fn fronts_held_against(
    state: &GameState,
    player: PlayerId,
) -> smallvec::SmallVec<[ColumnId; 3]> {
    let opponent = player.opponent();
    ColumnId::ALL
        .iter()
        .copied()
        .filter(|&column| {
            let theirs = state.board.slot(column, opponent, Line::Front);
            let own = state.board.slot(column, player, Line::Front);
            theirs.is_occupied() && theirs.is_operational() && !own.is_operational()
        })
        .collect()
}
