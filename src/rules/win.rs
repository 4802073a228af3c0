//! The win evaluator.
//!
//! Checked after every accepted command (and after turn-begin awards):
//! a player wins by reaching the breakthrough-token target or by
//! controlling enough fronts simultaneously. The first winner found is
//! terminal; the engine accepts no further commands for that game.

use crate::board::ColumnId;
use crate::core::{GameConfig, GameState, PlayerId};
use crate::rules::passive::controls_front;

/// The terminal game-over signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameOutcome {
    /// The winning player.
    pub winner: PlayerId,
}

/// Number of fronts a player controls.
#[must_use]
pub fn front_control_count(state: &GameState, player: PlayerId) -> usize {
    ColumnId::ALL
        .iter()
        .filter(|&&c| controls_front(state, c, player))
        .count()
}

/// Evaluate the win conditions. The current player is checked first;
/// token awards only ever go to one player per command, and front
/// control is exclusive per column, so order only breaks exact ties in
/// the acting player's favor.
#[must_use]
pub fn evaluate(state: &GameState, config: &GameConfig) -> Option<GameOutcome> {
    let current = state.current_player;
    for player in [current, current.opponent()] {
        if state.player(player).breakthroughs >= config.breakthrough_target {
            return Some(GameOutcome { winner: player });
        }
        if front_control_count(state, player) >= config.front_control_target {
            return Some(GameOutcome { winner: player });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Line;
    use crate::cards::CardKind;
    use crate::catalog::DefId;

    fn operational_front(state: &mut GameState, column: ColumnId, player: PlayerId) {
        let card = state.spawn_card(CardKind::Unit, DefId::new("u"));
        let slot = state.board.slot_mut(column, player, Line::Front);
        slot.place(card);
        slot.reveal();
        slot.ready();
    }

    #[test]
    fn test_no_winner_initially() {
        let state = GameState::new(1);
        assert_eq!(evaluate(&state, &GameConfig::default()), None);
    }

    #[test]
    fn test_breakthrough_target() {
        let mut state = GameState::new(1);
        state.player_mut(PlayerId::SECOND).breakthroughs = 2;

        let outcome = evaluate(&state, &GameConfig::default());
        assert_eq!(outcome, Some(GameOutcome { winner: PlayerId::SECOND }));
    }

    #[test]
    fn test_breakthrough_target_configurable() {
        let mut state = GameState::new(1);
        state.player_mut(PlayerId::FIRST).breakthroughs = 2;

        let config = GameConfig::default().with_breakthrough_target(3);
        assert_eq!(evaluate(&state, &config), None);

        state.player_mut(PlayerId::FIRST).breakthroughs = 3;
        assert!(evaluate(&state, &config).is_some());
    }

    #[test]
    fn test_front_control_count() {
        let mut state = GameState::new(1);

        operational_front(&mut state, ColumnId::West, PlayerId::FIRST);
        assert_eq!(front_control_count(&state, PlayerId::FIRST), 1);

        // Contesting the front removes control.
        let contester = state.spawn_card(CardKind::Unit, DefId::new("u"));
        state
            .board
            .slot_mut(ColumnId::West, PlayerId::SECOND, Line::Front)
            .place(contester);
        assert_eq!(front_control_count(&state, PlayerId::FIRST), 0);
    }

    #[test]
    fn test_front_control_win() {
        let mut state = GameState::new(1);

        operational_front(&mut state, ColumnId::West, PlayerId::FIRST);
        assert_eq!(evaluate(&state, &GameConfig::default()), None);

        operational_front(&mut state, ColumnId::East, PlayerId::FIRST);
        assert_eq!(
            evaluate(&state, &GameConfig::default()),
            Some(GameOutcome { winner: PlayerId::FIRST })
        );
    }

    #[test]
    fn test_opponent_can_win_on_your_turn() {
        let mut state = GameState::new(1);
        // current player is FIRST; SECOND reaches the token target.
        state.player_mut(PlayerId::SECOND).breakthroughs = 5;

        let outcome = evaluate(&state, &GameConfig::default());
        assert_eq!(outcome, Some(GameOutcome { winner: PlayerId::SECOND }));
    }
}
