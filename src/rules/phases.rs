//! The turn/phase state machine.
//!
//! Phases always move forward through the cycle, wrapping to the other
//! player's Supply. Two kinds of transition work live here:
//!
//! - **Exit/entry effects**: leaving Logistics reveals the cards that
//!   entered a Front slot this turn and resolves their activate lists;
//!   entering Engagement readies every face-up Front card. These apply
//!   exactly once per transition, whether the player passed or the
//!   phase was skipped.
//! - **Auto-skip**: after every command the machine advances through
//!   phases that offer the player no legal command. The loop terminates
//!   because the cycle is finite and a fresh Supply phase always offers
//!   the mandatory draw.

use log::debug;

use crate::board::{ColumnId, Line};
use crate::cards::CardId;
use crate::catalog::Catalog;
use crate::core::{GameConfig, GameState, Phase, PlayerId};
use crate::effects::{resolve_effect_list, EffectContext};
use crate::rules::passive;

/// Reset flags, capture the opponent-held fronts, and run the Collapse
/// check for the player whose turn is starting.
fn turn_begin(state: &mut GameState) {
    let player = state.current_player;
    let held = passive::fronts_held_against(state, player);
    state.flags = Default::default();
    state.flags.fronts_opponent_held = held;
    passive::collapse_check(state);
    debug!("turn {} begins for {player}", state.turn_number);
}

/// Begin the very first turn of a fresh game.
pub fn begin_first_turn(state: &mut GameState) {
    turn_begin(state);
}

/// Wrap to the other player's Supply phase.
fn begin_next_turn(state: &mut GameState) {
    state.current_player = state.current_player.opponent();
    state.turn_number += 1;
    state.phase = Phase::Supply;
    turn_begin(state);
}

/// Would an Advance command move anything in this column?
#[must_use]
pub fn can_advance(state: &GameState, column: ColumnId, player: PlayerId) -> bool {
    let side = |line| state.board.slot(column, player, line);
    (side(Line::Reserve).is_occupied() && side(Line::Front).is_empty())
        || (side(Line::Rear).is_occupied() && side(Line::Reserve).is_empty())
}

/// Would a Withdraw command be legal in this column?
#[must_use]
pub fn can_withdraw(state: &GameState, column: ColumnId, player: PlayerId) -> bool {
    let front = state.board.slot(column, player, Line::Front);
    front.is_occupied() && (front.is_face_up() || front.is_operational())
}

/// Does the active phase offer the current player any legal command?
///
/// These are the per-phase terminal conditions of the auto-skip loop.
#[must_use]
pub fn has_legal_action(state: &GameState, config: &GameConfig) -> bool {
    let player = state.current_player;
    match state.phase {
        // The phase cannot end before the mandatory draw, nor while the
        // hand exceeds the limit.
        Phase::Supply => {
            !(state.flags.drawn_card && state.player(player).hand.len() <= config.hand_limit)
        }

        Phase::Logistics => {
            let holds_event = state
                .player(player)
                .hand
                .iter()
                .any(|&id| state.card_unchecked(id).is_event());
            if holds_event {
                return true;
            }
            !state.flags.moved_in_logistics
                && ColumnId::ALL
                    .iter()
                    .any(|&c| can_advance(state, c, player) || can_withdraw(state, c, player))
        }

        // Arrival offers no commands; its work rides on the transition
        // effects around it.
        Phase::Arrival => false,

        Phase::Engagement => ColumnId::ALL.iter().any(|&c| {
            let front = state.board.slot(c, player, Line::Front);
            front.is_occupied() && front.is_operational()
        }),

        Phase::Commitment => {
            if state.flags.deployed {
                return false;
            }
            let holds_unit = state
                .player(player)
                .hand
                .iter()
                .any(|&id| state.card_unchecked(id).is_unit());
            holds_unit
                && ColumnId::ALL
                    .iter()
                    .any(|&c| state.board.slot(c, player, Line::Rear).is_empty())
        }
    }
}

/// Find the Front slot currently holding a card, either side.
fn find_front(state: &GameState, card: CardId) -> Option<(ColumnId, PlayerId)> {
    for &column in &ColumnId::ALL {
        for player in PlayerId::both() {
            if state.board.slot(column, player, Line::Front).card() == Some(card) {
                return Some((column, player));
            }
        }
    }
    None
}

/// Logistics exit: reveal everything that entered a Front slot this
/// turn, then resolve each card's activate list in entry order, then
/// clear the tracking set.
fn logistics_exit(state: &mut GameState, catalog: &Catalog) {
    let entered = std::mem::take(&mut state.flags.entered_front);

    // Reveal all before any activation resolves.
    for &card in &entered {
        if let Some((column, owner)) = find_front(state, card) {
            state.board.slot_mut(column, owner, Line::Front).reveal();
        }
    }

    // Activations run in entry order; an earlier activation may have
    // displaced a later card, so re-locate each one.
    for &card in &entered {
        let Some((column, owner)) = find_front(state, card) else {
            continue;
        };
        let def = state.card_unchecked(card).def.clone();
        let Some(activate) = catalog.get_unit(&def).and_then(|u| u.activate.clone()) else {
            continue;
        };
        debug!("activating {card} ({def}) in {column}");
        let ctx = EffectContext::new(owner).in_column(column);
        resolve_effect_list(state, catalog, &activate, &ctx);
    }
}

/// Engagement entry: every face-up Front card, both sides, becomes
/// operational.
fn engagement_entry(state: &mut GameState) {
    for &column in &ColumnId::ALL {
        for player in PlayerId::both() {
            let slot = state.board.slot_mut(column, player, Line::Front);
            if slot.is_occupied() && slot.is_face_up() {
                slot.ready();
            }
        }
    }
}

/// Leave the active phase: apply its exit effects, pick the next phase
/// (skipping Arrival when nothing entered a Front slot), and apply the
/// next phase's entry effects. Leaving Commitment wraps the turn.
pub fn advance_phase(state: &mut GameState, catalog: &Catalog) {
    let leaving = state.phase;
    // Decide Arrival before the exit effects clear the tracking set.
    let entered_front = !state.flags.entered_front.is_empty();

    match leaving {
        Phase::Supply => state.phase = Phase::Logistics,
        Phase::Logistics => {
            logistics_exit(state, catalog);
            if entered_front {
                state.phase = Phase::Arrival;
            } else {
                state.phase = Phase::Engagement;
                engagement_entry(state);
            }
        }
        Phase::Arrival => {
            state.phase = Phase::Engagement;
            engagement_entry(state);
        }
        Phase::Engagement => state.phase = Phase::Commitment,
        Phase::Commitment => begin_next_turn(state),
    }

    debug!("phase {leaving} -> {}", state.phase);
}

/// The auto-skip loop: advance while the active phase offers the
/// current player no legal command.
pub fn advance_while_no_options(state: &mut GameState, catalog: &Catalog, config: &GameConfig) {
    while !has_legal_action(state, config) {
        advance_phase(state, catalog);
    }
}
