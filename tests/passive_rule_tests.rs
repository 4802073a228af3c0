//! Passive reaction integration tests: Overrun, Decisive Breach,
//! Escalation, and Collapse, all driven through the public command API.

use cannonade::{
    Catalog, ColumnId, Command, CommandError, DefId, EffectList, EffectParams, EffectSpec, Game,
    GameConfig, Line, Phase, PlayerId, PrimaryAction, UnitDefinition, Weight,
};

fn unit(id: &str, weight: Weight) -> UnitDefinition {
    UnitDefinition {
        id: DefId::new(id),
        name: id.to_string(),
        weight,
        activate: None,
        primary_action: None,
    }
}

fn destroyer(id: &str, weight: Weight) -> UnitDefinition {
    UnitDefinition {
        id: DefId::new(id),
        name: id.to_string(),
        weight,
        activate: None,
        primary_action: Some(PrimaryAction::Effects {
            effects: EffectList::new().then(EffectSpec::with_params(
                "destroy_asset",
                EffectParams::new().with("side", "enemy").with("line", "front"),
            )),
        }),
    }
}

fn catalog() -> Catalog {
    Catalog::new()
        .with_unit(unit("militia", Weight::Light))
        .with_unit(destroyer("mortar", Weight::Medium))
        .with_unit(destroyer("cannon", Weight::Heavy))
}

fn uniform_deck(def: &str, count: usize) -> Vec<DefId> {
    (0..count).map(|_| DefId::new(def)).collect()
}

/// Walk FIRST's militia to the West front with a second militia behind
/// it in Reserve, then walk SECOND's `attacker` to its own West front
/// and leave the game parked on SECOND's Engagement phase.
fn front_standoff(attacker: &str, config: GameConfig) -> Game {
    let mut game = Game::builder(catalog())
        .config(config)
        .seed(9)
        .deck(PlayerId::FIRST, uniform_deck("militia", 20))
        .deck(PlayerId::SECOND, uniform_deck(attacker, 20))
        .build()
        .unwrap();

    // Turn 1 (FIRST): deploy to West.
    game.submit(Command::draw()).unwrap();
    game.submit(Command::Deploy { column: ColumnId::West, hand_index: 0 }).unwrap();
    // Turn 2 (SECOND): deploy to West.
    game.submit(Command::draw()).unwrap();
    game.submit(Command::Deploy { column: ColumnId::West, hand_index: 0 }).unwrap();
    // Turn 3 (FIRST): advance, then deploy a second card behind it.
    game.submit(Command::draw()).unwrap();
    game.submit(Command::Advance { column: ColumnId::West }).unwrap();
    game.submit(Command::Deploy { column: ColumnId::West, hand_index: 0 }).unwrap();
    // Turn 4 (SECOND): advance.
    game.submit(Command::draw()).unwrap();
    game.submit(Command::Advance { column: ColumnId::West }).unwrap();
    game.submit(Command::Pass).unwrap();
    // Turn 5 (FIRST): both steps fire - Front and Reserve now occupied.
    game.submit(Command::draw()).unwrap();
    game.submit(Command::Advance { column: ColumnId::West }).unwrap();
    assert_eq!(game.state().phase, Phase::Engagement);
    game.submit(Command::Pass).unwrap();
    game.submit(Command::Pass).unwrap();
    // Turn 6 (SECOND): the attacker reaches its front, readied.
    game.submit(Command::draw()).unwrap();
    game.submit(Command::Advance { column: ColumnId::West }).unwrap();
    assert_eq!(game.state().phase, Phase::Engagement);
    assert_eq!(game.state().current_player, PlayerId::SECOND);

    game
}

#[test]
fn overrun_promotes_the_reserve_within_the_destroying_command() {
    let mut game = front_standoff("mortar", GameConfig::default());

    let front_before = game
        .state()
        .board
        .slot(ColumnId::West, PlayerId::FIRST, Line::Front)
        .card()
        .unwrap();
    let reserve_before = game
        .state()
        .board
        .slot(ColumnId::West, PlayerId::FIRST, Line::Reserve)
        .card()
        .unwrap();

    game.submit(Command::primary(ColumnId::West)).unwrap();

    let state = game.state();
    // The destroyed card went to its owner's discard pile...
    assert!(state.player(PlayerId::FIRST).discard_pile.contains(&front_before));
    // ...and the Reserve card already holds the Front: revealed, not
    // operational, with the Reserve empty. No intermediate state was
    // observable because the whole cascade ran inside submit().
    let front = state.board.slot(ColumnId::West, PlayerId::FIRST, Line::Front);
    assert_eq!(front.card(), Some(reserve_before));
    assert!(front.is_face_up());
    assert!(!front.is_operational());
    assert!(state
        .board
        .slot(ColumnId::West, PlayerId::FIRST, Line::Reserve)
        .is_empty());
}

#[test]
fn decisive_breach_rewards_breaking_a_held_front() {
    // At the start of SECOND's sixth turn, FIRST operationally held
    // West and SECOND had no operational card there: the column is
    // flagged, and destroying FIRST's front card cashes it in.
    let mut game = front_standoff("mortar", GameConfig::default());

    game.submit(Command::primary(ColumnId::West)).unwrap();

    assert_eq!(game.state().player(PlayerId::SECOND).breakthroughs, 1);
    assert_eq!(game.state().player(PlayerId::FIRST).breakthroughs, 0);
    assert!(!game.is_over()); // 1 < 2
}

#[test]
fn breach_token_gained_in_engagement_draws_a_card() {
    let mut game = front_standoff("mortar", GameConfig::default());

    let hand_before = game.state().player(PlayerId::SECOND).hand.len();
    game.submit(Command::primary(ColumnId::West)).unwrap();

    assert_eq!(
        game.state().player(PlayerId::SECOND).hand.len(),
        hand_before + 1
    );
}

#[test]
fn escalation_fires_exactly_once_per_player() {
    let config = GameConfig::default().with_breakthrough_target(99);
    let mut game = front_standoff("cannon", config);

    // First Heavy primary action: Escalation (+1) on top of the
    // Decisive Breach (+1). The cannon is spent, so the machine parks
    // on SECOND's Commitment.
    game.submit(Command::primary(ColumnId::West)).unwrap();
    assert_eq!(game.state().player(PlayerId::SECOND).breakthroughs, 2);
    assert!(game.state().player(PlayerId::SECOND).used_heavy_primary);
    game.submit(Command::Pass).unwrap(); // end SECOND's turn

    // Turn 7 (FIRST): hold position all the way through.
    game.submit(Command::draw()).unwrap();
    game.submit(Command::Pass).unwrap(); // Logistics
    game.submit(Command::Pass).unwrap(); // Engagement
    game.submit(Command::Pass).unwrap(); // Commitment: end of turn

    // Turn 8 (SECOND): two engagement draws have bloated the hand to
    // ten; discard down, then fire the re-readied cannon again.
    game.submit(Command::draw()).unwrap();
    game.submit(Command::DiscardCard { hand_index: 0 }).unwrap();
    game.submit(Command::DiscardCard { hand_index: 0 }).unwrap();
    game.submit(Command::DiscardCard { hand_index: 0 }).unwrap();
    game.submit(Command::Pass).unwrap(); // Logistics
    assert_eq!(game.state().phase, Phase::Engagement);
    game.submit(Command::primary(ColumnId::West)).unwrap();

    // No second Escalation, and no breach either: SECOND already held
    // the column operationally at its own turn start.
    assert_eq!(game.state().player(PlayerId::SECOND).breakthroughs, 2);
}

#[test]
fn withdraw_triggers_overrun_for_the_withdrawing_side() {
    let mut game = Game::builder(catalog())
        .seed(4)
        .deck(PlayerId::FIRST, uniform_deck("militia", 20))
        .deck(PlayerId::SECOND, uniform_deck("militia", 20))
        .build()
        .unwrap();

    // FIRST builds a two-deep West column and gets the lead card
    // operational (turns 1-5, as in front_standoff but solo).
    game.submit(Command::draw()).unwrap();
    game.submit(Command::Deploy { column: ColumnId::West, hand_index: 0 }).unwrap();
    game.submit(Command::draw()).unwrap();
    game.submit(Command::Pass).unwrap();
    game.submit(Command::draw()).unwrap();
    game.submit(Command::Advance { column: ColumnId::West }).unwrap();
    game.submit(Command::Deploy { column: ColumnId::West, hand_index: 0 }).unwrap();
    game.submit(Command::draw()).unwrap();
    game.submit(Command::Pass).unwrap();
    game.submit(Command::draw()).unwrap();
    game.submit(Command::Advance { column: ColumnId::West }).unwrap();
    game.submit(Command::Pass).unwrap();
    game.submit(Command::Pass).unwrap();

    // Turn 6 (SECOND): idle; hand limit needs one discard by now.
    game.submit(Command::draw()).unwrap();
    game.submit(Command::DiscardCard { hand_index: 0 }).unwrap();
    game.submit(Command::Pass).unwrap();

    // Turn 7 (FIRST): withdraw the operational front card.
    game.submit(Command::draw()).unwrap();
    let front_card = game
        .state()
        .board
        .slot(ColumnId::West, PlayerId::FIRST, Line::Front)
        .card()
        .unwrap();
    let reserve_card = game
        .state()
        .board
        .slot(ColumnId::West, PlayerId::FIRST, Line::Reserve)
        .card()
        .unwrap();

    game.submit(Command::Withdraw { column: ColumnId::West }).unwrap();

    let state = game.state();
    assert!(state.player(PlayerId::FIRST).hand.contains(&front_card));
    let front = state.board.slot(ColumnId::West, PlayerId::FIRST, Line::Front);
    assert_eq!(front.card(), Some(reserve_card));
    assert!(front.is_face_up());
    assert!(!front.is_operational());
    // Withdrawing your own card never awards a breach.
    assert_eq!(state.player(PlayerId::FIRST).breakthroughs, 0);
}

#[test]
fn collapse_fires_when_the_opponent_starts_a_turn_spent() {
    // Degenerate but legal setup: SECOND begins with no deck, no hand,
    // no board. Collapse fires at the very first turn begin and, with
    // the default target of two tokens, immediately decides the game.
    let game = Game::builder(catalog())
        .config(GameConfig::default().with_starting_hand(0))
        .deck(PlayerId::FIRST, uniform_deck("militia", 5))
        .deck(PlayerId::SECOND, vec![])
        .build()
        .unwrap();

    assert_eq!(game.state().player(PlayerId::FIRST).breakthroughs, 2);
    assert!(game.is_over());
    assert_eq!(game.outcome().unwrap().winner, PlayerId::FIRST);
}

#[test]
fn finished_game_rejects_every_command() {
    let mut game = Game::builder(catalog())
        .config(GameConfig::default().with_starting_hand(0))
        .deck(PlayerId::FIRST, uniform_deck("militia", 5))
        .deck(PlayerId::SECOND, vec![])
        .build()
        .unwrap();

    assert!(game.is_over());
    for command in [
        Command::draw(),
        Command::Pass,
        Command::Advance { column: ColumnId::West },
    ] {
        assert_eq!(game.submit(command).unwrap_err(), CommandError::GameOver);
    }
}
