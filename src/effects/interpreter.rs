//! Effect-list resolution.
//!
//! The interpreter is what makes cards data: it walks an `EffectList`
//! strictly in order and applies each recognized verb to the live game
//! state for an acting player and an optional column context. The
//! context column is merged into each entry's params before dispatch,
//! so card text can say "destroy the enemy front" and inherit the
//! column the ability resolved in.
//!
//! Authoring errors are contained here: an unrecognized verb name, a
//! missing target, or an empty target slot logs a warning and skips
//! that entry - the rest of the list still runs, and the engine never
//! aborts mid-resolution over bad card data.

use log::{debug, warn};

use super::list::{EffectList, EffectSpec};
use super::params::{EffectParams, Side};
use super::verb::Verb;
use crate::board::{ColumnId, Line};
use crate::catalog::{Catalog, UnitDefinition};
use crate::core::{GameState, Phase, PlayerId};
use crate::rules::passive::{self, Removal, RemovalCause};

/// Who is resolving, and in which column.
#[derive(Clone, Copy, Debug)]
pub struct EffectContext {
    /// The acting player; `ally`/`enemy` sides resolve relative to them.
    pub actor: PlayerId,

    /// Column the ability resolved in, merged into entry params.
    pub column: Option<ColumnId>,

    /// The list belongs to a primary action (drives the Heavy-kill draw).
    pub via_primary: bool,
}

impl EffectContext {
    /// Context for an event or activation outside any primary action.
    #[must_use]
    pub fn new(actor: PlayerId) -> Self {
        Self {
            actor,
            column: None,
            via_primary: false,
        }
    }

    /// Attach a column context.
    #[must_use]
    pub fn in_column(mut self, column: impl Into<Option<ColumnId>>) -> Self {
        self.column = column.into();
        self
    }

    /// Context for a primary action resolving in a column.
    #[must_use]
    pub fn primary_action(actor: PlayerId, column: ColumnId) -> Self {
        Self {
            actor,
            column: Some(column),
            via_primary: true,
        }
    }

    fn player_for(&self, side: Side) -> PlayerId {
        match side {
            Side::Ally => self.actor,
            Side::Enemy => self.actor.opponent(),
        }
    }

    fn removal_cause(&self) -> RemovalCause {
        if self.via_primary {
            RemovalCause::primary_action(self.actor)
        } else {
            RemovalCause::command(self.actor)
        }
    }
}

/// Resolve a unit's primary action: the Escalation check, then the
/// chosen effect-list.
pub fn resolve_primary_action(
    state: &mut GameState,
    catalog: &Catalog,
    unit: &UnitDefinition,
    effects: &EffectList,
    ctx: &EffectContext,
) {
    passive::escalation_check(state, ctx.actor, unit.weight);
    resolve_effect_list(state, catalog, effects, ctx);
}

/// Execute an effect-list in order.
pub fn resolve_effect_list(
    state: &mut GameState,
    catalog: &Catalog,
    effects: &EffectList,
    ctx: &EffectContext,
) {
    for spec in effects.iter() {
        resolve_effect(state, catalog, spec, ctx);
    }
}

fn resolve_effect(state: &mut GameState, catalog: &Catalog, spec: &EffectSpec, ctx: &EffectContext) {
    let Some(verb) = Verb::parse(&spec.verb) else {
        warn!("unknown verb {:?}; skipping entry", spec.verb);
        return;
    };

    let params = merge_context(&spec.params, ctx);
    debug!("resolving {verb} for {}", ctx.actor);

    match verb {
        Verb::DrawCards => {
            let player = ctx.player_for(params.side_or(Side::Ally));
            let amount = params.get_amount("amount", 1);
            state.draw_cards(player, amount);
        }

        Verb::DiscardCards => {
            let player = ctx.player_for(params.side_or(Side::Ally));
            let amount = params.get_amount("amount", 1);
            for _ in 0..amount {
                let hand_size = state.player(player).hand.len();
                if hand_size == 0 {
                    break;
                }
                state.discard_from_hand(player, hand_size - 1);
            }
        }

        Verb::RevealAsset => {
            let Some((column, player, line)) = target_slot(&params, ctx, Side::Enemy) else {
                return;
            };
            if state.board.slot(column, player, line).is_occupied() {
                state.board.slot_mut(column, player, line).reveal();
            } else {
                warn!("reveal_asset: {column}/{line} of {player} is empty; skipping");
            }
        }

        Verb::DestroyAsset => {
            let Some((column, player, line)) = target_slot(&params, ctx, Side::Enemy) else {
                return;
            };
            if passive::remove_from_slot(
                state,
                catalog,
                column,
                player,
                line,
                Removal::Destroy,
                ctx.removal_cause(),
            )
            .is_none()
            {
                warn!("destroy_asset: {column}/{line} of {player} is empty; skipping");
            }
        }

        Verb::ReturnToHand => {
            let Some((column, player, line)) = target_slot(&params, ctx, Side::Enemy) else {
                return;
            };
            if passive::remove_from_slot(
                state,
                catalog,
                column,
                player,
                line,
                Removal::Withdraw,
                ctx.removal_cause(),
            )
            .is_none()
            {
                warn!("return_to_hand: {column}/{line} of {player} is empty; skipping");
            }
        }

        Verb::MoveAsset => {
            let Some(column) = params.column() else {
                warn!("move_asset: no column in params or context; skipping");
                return;
            };
            let player = ctx.player_for(params.side_or(Side::Ally));
            let (Some(from), Some(to)) = (
                params.get_text("from").and_then(Line::parse),
                params.get_text("to").and_then(Line::parse),
            ) else {
                warn!("move_asset: missing or unknown from/to line; skipping");
                return;
            };

            match state.board.transfer(column, player, from, to) {
                Some(card) => {
                    if to == Line::Front && state.phase == Phase::Logistics {
                        state.flags.record_entered_front(card);
                    }
                }
                None => {
                    warn!("move_asset: cannot move {from} to {to} in {column} for {player}");
                }
            }
        }

        Verb::AddPreparation => {
            let Some((column, player, line)) = target_slot(&params, ctx, Side::Ally) else {
                return;
            };
            let amount = params.get_amount("amount", 1);
            if state.board.slot(column, player, line).is_occupied() {
                state.board.slot_mut(column, player, line).add_tokens(amount);
            } else {
                warn!("add_preparation: {column}/{line} of {player} is empty; skipping");
            }
        }

        Verb::RemovePreparation => {
            let Some((column, player, line)) = target_slot(&params, ctx, Side::Ally) else {
                return;
            };
            let amount = params.get_amount("amount", 1);
            state.board.slot_mut(column, player, line).remove_tokens(amount);
        }
    }
}

/// Clone the params with the context column filled in when the data did
/// not name one.
fn merge_context(params: &EffectParams, ctx: &EffectContext) -> EffectParams {
    let mut merged = params.clone();
    if !merged.contains("column") {
        if let Some(column) = ctx.column {
            merged.insert("column", column.to_string());
        }
    }
    merged
}

/// Resolve the slot a targeted verb operates on.
fn target_slot(
    params: &EffectParams,
    ctx: &EffectContext,
    default_side: Side,
) -> Option<(ColumnId, PlayerId, Line)> {
    let Some(column) = params.column() else {
        warn!("effect has no column in params or context; skipping");
        return None;
    };
    let player = ctx.player_for(params.side_or(default_side));
    let line = params.line_or(Line::Front);
    Some((column, player, line))
}
