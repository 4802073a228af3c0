//! The command processor.
//!
//! `Game` owns the catalog, the configuration, and the live state. One
//! command is in flight at a time; each is validated completely before
//! any mutation, so a rejection is free of side effects and a success
//! includes every synchronous reaction, the state-machine advance, and
//! the win check. Once a winner is set the game accepts nothing more.

use log::{debug, info};
use thiserror::Error;

use crate::board::{ColumnId, Line};
use crate::cards::{CardId, CardKind};
use crate::catalog::{Catalog, CatalogError, DefId, PrimaryAction};
use crate::core::{Command, CommandRecord, GameConfig, GameState, Phase, PlayerId};
use crate::effects::{resolve_effect_list, resolve_primary_action, EffectContext};
use crate::rules::passive::{self, Removal, RemovalCause};
use crate::rules::phases;
use crate::rules::win::{self, GameOutcome};

/// Why a command was rejected. The state is untouched in every case.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("the game is over")]
    GameOver,
    #[error("{command} is not legal during {phase}")]
    WrongPhase {
        command: &'static str,
        phase: Phase,
    },
    #[error("draw amount must be at least 1")]
    ZeroDraw,
    #[error("the mandatory draw has not happened yet")]
    MandatoryDrawPending,
    #[error("hand size {hand_size} exceeds the limit of {limit}")]
    HandLimitExceeded { hand_size: usize, limit: usize },
    #[error("hand index {index} out of range for hand of {hand_size}")]
    HandIndexOutOfRange { index: usize, hand_size: usize },
    #[error("card at hand index {0} is not an event")]
    NotAnEvent(usize),
    #[error("card at hand index {0} is not a unit")]
    NotAUnit(usize),
    #[error("event is playable during {0}, not now")]
    EventNotPlayable(Phase),
    #[error("the movement option was already used this turn")]
    AlreadyMoved,
    #[error("nothing can advance in {0}")]
    NothingToAdvance(ColumnId),
    #[error("no withdrawable front card in {0}")]
    NothingToWithdraw(ColumnId),
    #[error("a card was already deployed this turn")]
    AlreadyDeployed,
    #[error("the {0} rear slot is occupied")]
    RearOccupied(ColumnId),
    #[error("no operational front card in {0}")]
    FrontNotOperational(ColumnId),
    #[error("front card in {0} has no primary action")]
    NoPrimaryAction(ColumnId),
    #[error("this primary action requires a choice")]
    MissingChoice,
    #[error("this primary action has no choices")]
    UnexpectedChoice,
    #[error("unknown choice {0:?}")]
    UnknownChoice(String),
}

/// Why a game could not be set up.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("deck for {player} references unknown definition {def:?}")]
    UnknownDefinition { player: PlayerId, def: DefId },
    #[error("cannot generate decks from an empty catalog")]
    EmptyCatalog,
}

/// A running game: catalog, configuration, state, and outcome.
pub struct Game {
    catalog: Catalog,
    config: GameConfig,
    state: GameState,
    outcome: Option<GameOutcome>,
}

/// Builder for a fresh game.
///
/// Decks may be given explicitly per player; otherwise they are
/// generated from the catalog with the seeded RNG. The catalog is
/// validated here, before any game exists.
pub struct GameBuilder {
    catalog: Catalog,
    config: GameConfig,
    seed: u64,
    decks: [Option<Vec<DefId>>; 2],
}

impl GameBuilder {
    fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            config: GameConfig::default(),
            seed: 0,
            decks: [None, None],
        }
    }

    /// Set the configuration.
    #[must_use]
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the RNG seed. The same seed and inputs produce an identical
    /// game.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Give a player an explicit deck list.
    #[must_use]
    pub fn deck(mut self, player: PlayerId, defs: Vec<DefId>) -> Self {
        self.decks[player.index()] = Some(defs);
        self
    }

    /// Validate the catalog, build decks and hands, and start the first
    /// turn.
    pub fn build(self) -> Result<Game, SetupError> {
        self.catalog.validate()?;

        let mut state = GameState::new(self.seed);

        // Stable ordering of definition ids keeps generated decks
        // deterministic per seed.
        let mut all_defs: Vec<&DefId> = self.catalog.iter().map(|d| d.id()).collect();
        all_defs.sort();

        for (index, deck_list) in self.decks.iter().enumerate() {
            let player = PlayerId::new(index as u8);

            let defs: Vec<DefId> = match deck_list {
                Some(list) => {
                    for def in list {
                        if !self.catalog.contains(def) {
                            return Err(SetupError::UnknownDefinition {
                                player,
                                def: def.clone(),
                            });
                        }
                    }
                    list.clone()
                }
                None => {
                    if all_defs.is_empty() {
                        return Err(SetupError::EmptyCatalog);
                    }
                    (0..self.config.deck_size)
                        .map(|_| {
                            let pick = state.rng.gen_range(0..all_defs.len());
                            all_defs[pick].clone()
                        })
                        .collect()
                }
            };

            for def in defs {
                let kind = match self.catalog.get(&def) {
                    Some(d) if d.as_unit().is_some() => CardKind::Unit,
                    _ => CardKind::Event,
                };
                let card = state.spawn_card(kind, def);
                state.player_mut(player).deck.push(card);
            }

            state.shuffle_deck(player);
            state.draw_cards(player, self.config.starting_hand as u32);
        }

        phases::begin_first_turn(&mut state);
        let outcome = win::evaluate(&state, &self.config);

        Ok(Game {
            catalog: self.catalog,
            config: self.config,
            state,
            outcome,
        })
    }
}

impl Game {
    /// Start building a game over a catalog.
    #[must_use]
    pub fn builder(catalog: Catalog) -> GameBuilder {
        GameBuilder::new(catalog)
    }

    /// The live state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The game-over signal, once set.
    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Has a winner been declared?
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Force the next draw to fetch a specific card; see
    /// `GameState::force_next_draw`.
    #[cfg(any(test, feature = "debug-hooks"))]
    pub fn force_next_draw(&mut self, card: CardId) {
        self.state.force_next_draw(card);
    }

    /// Process one command for the current player.
    ///
    /// On success the returned state already includes every passive
    /// reaction, the machine advance, and the win check. On rejection
    /// nothing changed.
    pub fn submit(&mut self, command: Command) -> Result<&GameState, CommandError> {
        if self.outcome.is_some() {
            return Err(CommandError::GameOver);
        }

        let player = self.state.current_player;
        let phase = self.state.phase;
        let turn = self.state.turn_number;

        self.apply(&command)?;
        debug!("{player} {:?} accepted in {phase}", command.name());
        self.state
            .record_command(CommandRecord::new(player, command.clone(), phase, turn));

        // A token award mid-command ends the game before any advance.
        if self.check_winner() {
            return Ok(&self.state);
        }

        match command {
            // Pass leaves the phase explicitly; Deploy ends the turn.
            Command::Pass | Command::Deploy { .. } => {
                phases::advance_phase(&mut self.state, &self.catalog);
            }
            _ => {}
        }
        phases::advance_while_no_options(&mut self.state, &self.catalog, &self.config);

        self.check_winner();
        Ok(&self.state)
    }

    fn check_winner(&mut self) -> bool {
        if let Some(outcome) = win::evaluate(&self.state, &self.config) {
            info!("game over: {} wins", outcome.winner);
            self.outcome = Some(outcome);
            true
        } else {
            false
        }
    }

    fn require_phase(&self, command: &Command, allowed: &[Phase]) -> Result<(), CommandError> {
        if allowed.contains(&self.state.phase) {
            Ok(())
        } else {
            Err(CommandError::WrongPhase {
                command: command.name(),
                phase: self.state.phase,
            })
        }
    }

    fn require_hand_index(&self, player: PlayerId, index: usize) -> Result<CardId, CommandError> {
        let hand = &self.state.player(player).hand;
        hand.get(index)
            .copied()
            .ok_or(CommandError::HandIndexOutOfRange {
                index,
                hand_size: hand.len(),
            })
    }

    fn apply(&mut self, command: &Command) -> Result<(), CommandError> {
        let player = self.state.current_player;

        match command {
            Command::DrawCard { amount } => {
                self.require_phase(command, &[Phase::Supply])?;
                if *amount == 0 {
                    return Err(CommandError::ZeroDraw);
                }
                self.state.draw_cards(player, *amount);
                self.state.flags.drawn_card = true;
                Ok(())
            }

            Command::DiscardCard { hand_index } => {
                self.require_phase(command, &[Phase::Supply, Phase::Logistics])?;
                self.require_hand_index(player, *hand_index)?;
                self.state.discard_from_hand(player, *hand_index);
                Ok(())
            }

            Command::PlayEvent { hand_index, column } => {
                self.require_phase(command, &[Phase::Logistics])?;
                let card = self.require_hand_index(player, *hand_index)?;
                let def = self.state.card_unchecked(card).def.clone();
                let Some(event) = self.catalog.get_event(&def) else {
                    return Err(CommandError::NotAnEvent(*hand_index));
                };
                if event.play_phase != self.state.phase {
                    return Err(CommandError::EventNotPlayable(event.play_phase));
                }

                let effects = event.effects.clone();
                self.state.discard_from_hand(player, *hand_index);
                let ctx = EffectContext::new(player).in_column(*column);
                resolve_effect_list(&mut self.state, &self.catalog, &effects, &ctx);
                Ok(())
            }

            Command::Advance { column } => {
                self.require_phase(command, &[Phase::Logistics])?;
                if self.state.flags.moved_in_logistics {
                    return Err(CommandError::AlreadyMoved);
                }
                if !phases::can_advance(&self.state, *column, player) {
                    return Err(CommandError::NothingToAdvance(*column));
                }

                // Reserve -> Front first; record the mover for Arrival.
                if let Some(card) =
                    self.state
                        .board
                        .transfer(*column, player, Line::Reserve, Line::Front)
                {
                    self.state.flags.record_entered_front(card);
                }
                // Rear -> Reserve is evaluated independently, against
                // the occupancy left by the first step.
                self.state
                    .board
                    .transfer(*column, player, Line::Rear, Line::Reserve);

                self.state.flags.moved_in_logistics = true;
                Ok(())
            }

            Command::Withdraw { column } => {
                self.require_phase(command, &[Phase::Logistics])?;
                if self.state.flags.moved_in_logistics {
                    return Err(CommandError::AlreadyMoved);
                }
                if !phases::can_withdraw(&self.state, *column, player) {
                    return Err(CommandError::NothingToWithdraw(*column));
                }

                passive::remove_from_slot(
                    &mut self.state,
                    &self.catalog,
                    *column,
                    player,
                    Line::Front,
                    Removal::Withdraw,
                    RemovalCause::command(player),
                );
                self.state.flags.moved_in_logistics = true;
                Ok(())
            }

            Command::Deploy { column, hand_index } => {
                self.require_phase(command, &[Phase::Commitment])?;
                if self.state.flags.deployed {
                    return Err(CommandError::AlreadyDeployed);
                }
                let card = self.require_hand_index(player, *hand_index)?;
                if !self.state.card_unchecked(card).is_unit() {
                    return Err(CommandError::NotAUnit(*hand_index));
                }
                if self
                    .state
                    .board
                    .slot(*column, player, Line::Rear)
                    .is_occupied()
                {
                    return Err(CommandError::RearOccupied(*column));
                }

                self.state.player_mut(player).hand.remove(*hand_index);
                self.state
                    .board
                    .slot_mut(*column, player, Line::Rear)
                    .place(card);
                self.state.flags.deployed = true;
                Ok(())
            }

            Command::PrimaryAction { column, choice } => {
                self.require_phase(command, &[Phase::Engagement])?;
                let front = self.state.board.slot(*column, player, Line::Front);
                if !(front.is_occupied() && front.is_operational()) {
                    return Err(CommandError::FrontNotOperational(*column));
                }
                let card = front.card().expect("occupied front slot has a card");
                let def = self.state.card_unchecked(card).def.clone();
                let Some(unit) = self.catalog.get_unit(&def).cloned() else {
                    return Err(CommandError::NoPrimaryAction(*column));
                };
                let Some(action) = &unit.primary_action else {
                    return Err(CommandError::NoPrimaryAction(*column));
                };
                let effects = match (action, choice.as_deref()) {
                    (PrimaryAction::Effects { effects }, None) => effects.clone(),
                    (PrimaryAction::Effects { .. }, Some(_)) => {
                        return Err(CommandError::UnexpectedChoice)
                    }
                    (PrimaryAction::Choices { .. }, None) => {
                        return Err(CommandError::MissingChoice)
                    }
                    (PrimaryAction::Choices { choices }, Some(id)) => choices
                        .iter()
                        .find(|c| c.id == id)
                        .map(|c| c.effects.clone())
                        .ok_or_else(|| CommandError::UnknownChoice(id.to_string()))?,
                };

                let ctx = EffectContext::primary_action(player, *column);
                resolve_primary_action(&mut self.state, &self.catalog, &unit, &effects, &ctx);

                // The acting card is spent for the turn, wherever the
                // effects left the slot.
                self.state
                    .board
                    .slot_mut(*column, player, Line::Front)
                    .exhaust();
                Ok(())
            }

            Command::Pass => {
                // Supply cannot be passed before the mandatory draw or
                // with an oversized hand.
                if self.state.phase == Phase::Supply {
                    if !self.state.flags.drawn_card {
                        return Err(CommandError::MandatoryDrawPending);
                    }
                    let hand_size = self.state.player(player).hand.len();
                    if hand_size > self.config.hand_limit {
                        return Err(CommandError::HandLimitExceeded {
                            hand_size,
                            limit: self.config.hand_limit,
                        });
                    }
                }
                Ok(())
            }
        }
    }
}
