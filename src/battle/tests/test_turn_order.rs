use crate::battle::ai::RandomAI;
use crate::battle::engine::{player_moves_first, resolve_turn, TurnAction};
use crate::battle::state::{BattleEvent, BattlePhase, BattleRng, Side};
use crate::battle::tests::common::{count_moves_by, create_test_battle, TestCreatureBuilder};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn first_mover(events: &[BattleEvent]) -> Option<Side> {
    events.iter().find_map(|event| match event {
        BattleEvent::MoveUsed { side, .. } => Some(*side),
        _ => None,
    })
}

#[rstest]
#[case(50, 50, true)]
#[case(51, 50, true)]
#[case(49, 50, false)]
fn test_speed_decides_order(#[case] player_speed: u16, #[case] enemy_speed: u16, #[case] expected: bool) {
    let state = create_test_battle(
        TestCreatureBuilder::new(7, 5).with_speed(player_speed).build(),
        TestCreatureBuilder::new(10, 5).with_speed(enemy_speed).build(),
    );
    assert_eq!(player_moves_first(&state), expected);
}

#[test]
fn test_faster_enemy_knocks_out_player_first() {
    // Level 5 speed 22 against level 5 speed 30: the enemy moves first and its hit is lethal.
    let player = TestCreatureBuilder::new(1, 5).with_speed(22).with_hp(1).build();
    let enemy = TestCreatureBuilder::new(4, 5).with_speed(30).build();
    let mut state = create_test_battle(player, enemy);
    // Only the enemy's crit and damage variance draws; the player never gets to attack.
    let mut rng = BattleRng::new_for_test(vec![0.5, 0.5]);

    let bus = resolve_turn(&mut state, TurnAction::Attack { move_index: 0 }, &RandomAI, &mut rng);

    let events = bus.events();
    assert_eq!(first_mover(events), Some(Side::Enemy));
    assert_eq!(count_moves_by(events, Side::Player), 0);
    assert_eq!(state.phase, BattlePhase::Defeat);
    assert_eq!(state.player.current_hp(), 0);
    assert_eq!(events.last(), Some(&BattleEvent::BattleEnded { won: false }));
    assert!(!events
        .iter()
        .any(|event| matches!(event, BattleEvent::ExperienceGained { .. })));
    assert_eq!(
        bus.messages(),
        vec![
            "Bonkander used Bonk Ember!".to_string(),
            "It's super effective!".to_string(),
            "Pepasaur fainted!".to_string(),
        ]
    );
}

#[test]
fn test_speed_tie_goes_to_player() {
    let player = TestCreatureBuilder::new(7, 5).with_speed(50).build();
    let enemy = TestCreatureBuilder::new(10, 5).with_speed(50).build();
    let mut state = create_test_battle(player, enemy);
    let mut rng = BattleRng::new_for_test(vec![0.5; 4]);

    let bus = resolve_turn(&mut state, TurnAction::Attack { move_index: 0 }, &RandomAI, &mut rng);

    assert_eq!(first_mover(bus.events()), Some(Side::Player));
    assert_eq!(count_moves_by(bus.events(), Side::Enemy), 1);
    assert_eq!(state.phase, BattlePhase::Action);
    assert_eq!(state.turn_number, 2);
    assert_eq!(bus.events().last(), Some(&BattleEvent::AwaitingAction));
}

#[test]
fn test_both_sides_act_when_both_survive() {
    let player = TestCreatureBuilder::new(7, 5).with_speed(10).build();
    let enemy = TestCreatureBuilder::new(10, 5).with_speed(90).build();
    let mut state = create_test_battle(player, enemy);
    let mut rng = BattleRng::new_for_test(vec![0.5; 4]);

    let bus = resolve_turn(&mut state, TurnAction::Attack { move_index: 0 }, &RandomAI, &mut rng);

    let sides: Vec<Side> = bus
        .events()
        .iter()
        .filter_map(|event| match event {
            BattleEvent::MoveUsed { side, .. } => Some(*side),
            _ => None,
        })
        .collect();
    assert_eq!(sides, vec![Side::Enemy, Side::Player]);
    assert!(state.player.current_hp() < state.player.max_hp());
    assert!(state.enemy.current_hp() < state.enemy.max_hp());
}

#[test]
fn test_knocked_out_enemy_does_not_act() {
    let player = TestCreatureBuilder::new(7, 10).with_speed(200).build();
    let enemy = TestCreatureBuilder::new(129, 5).with_hp(1).build();
    let mut state = create_test_battle(player, enemy);
    let mut rng = BattleRng::new_for_test(vec![0.5, 0.5]);

    let bus = resolve_turn(&mut state, TurnAction::Attack { move_index: 0 }, &RandomAI, &mut rng);

    assert_eq!(count_moves_by(bus.events(), Side::Enemy), 0);
    assert_eq!(state.phase, BattlePhase::Victory);
    assert_eq!(state.player.current_hp(), state.player.max_hp());
}

#[test]
fn test_enemy_picks_among_its_moves() {
    let player = TestCreatureBuilder::new(7, 5).with_speed(200).build();
    let enemy = TestCreatureBuilder::new(4, 5)
        .with_moves(&["Scratch", "Growl"])
        .build();
    let mut state = create_test_battle(player, enemy);
    // player crit, player variance, enemy move choice (0.9 of 3 moves -> slot 2), enemy crit, enemy variance
    let mut rng = BattleRng::new_for_test(vec![0.5, 0.5, 0.9, 0.5, 0.5]);

    let bus = resolve_turn(&mut state, TurnAction::Attack { move_index: 0 }, &RandomAI, &mut rng);

    assert!(bus.events().contains(&BattleEvent::MoveUsed {
        side: Side::Enemy,
        pokememe: "Bonkander".to_string(),
        move_name: "Growl".to_string(),
    }));
}
