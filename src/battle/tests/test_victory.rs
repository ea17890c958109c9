use crate::battle::ai::RandomAI;
use crate::battle::engine::{acknowledge_level_up, resolve_turn, TurnAction};
use crate::battle::state::{BattleEvent, BattlePhase, BattleRng, BattleState};
use crate::battle::tests::common::{create_test_battle, predictable_rng, TestCreatureBuilder};
use crate::progression::StatIncreases;
use pretty_assertions::assert_eq;

const ATTACK: TurnAction = TurnAction::Attack { move_index: 0 };

fn battle_against_weak_glowkarp(level: u8, experience: u32) -> BattleState {
    let player = TestCreatureBuilder::new(7, level)
        .with_speed(200)
        .with_experience(experience)
        .build();
    let enemy = TestCreatureBuilder::new(129, 5).with_hp(1).build();
    create_test_battle(player, enemy)
}

#[test]
fn test_victory_without_level_up_ends_battle() {
    let mut state = battle_against_weak_glowkarp(10, 0);
    let mut rng = predictable_rng();

    let bus = resolve_turn(&mut state, ATTACK, &RandomAI, &mut rng);

    assert_eq!(state.phase, BattlePhase::Victory);
    assert_eq!(state.player.experience, 75);
    assert!(bus.events().contains(&BattleEvent::ExperienceChanged {
        current: 75,
        threshold: 800,
    }));
    assert_eq!(bus.events().last(), Some(&BattleEvent::BattleEnded { won: true }));
    assert!(bus.messages().contains(&"Dogetle gained 75 EXP!".to_string()));
}

#[test]
fn test_level_up_pauses_until_acknowledged() {
    let mut state = battle_against_weak_glowkarp(5, 90);
    let old_stats = state.player.stats;
    let mut draws = vec![0.5, 0.5];
    draws.extend([0.0; 6]);
    let mut rng = BattleRng::new_for_test(draws);

    let bus = resolve_turn(&mut state, ATTACK, &RandomAI, &mut rng);

    let expected_increases = StatIncreases {
        hp: 2,
        attack: 1,
        defense: 1,
        sp_attack: 1,
        sp_defense: 1,
        speed: 1,
    };
    assert_eq!(state.phase, BattlePhase::LevelUp);
    assert_eq!(state.player.level, 6);
    assert_eq!(state.player.experience, 65);
    assert_eq!(state.player.stats.hp, old_stats.hp + 2);
    assert_eq!(state.player.stats.speed, old_stats.speed + 1);
    assert!(bus.events().contains(&BattleEvent::ExperienceChanged {
        current: 65,
        threshold: 172,
    }));
    assert!(bus.events().contains(&BattleEvent::LeveledUp {
        name: "Dogetle".to_string(),
        new_level: 6,
        increases: expected_increases,
    }));
    assert!(!bus
        .events()
        .iter()
        .any(|event| matches!(event, BattleEvent::BattleEnded { .. })));

    let bus = acknowledge_level_up(&mut state);

    assert_eq!(state.phase, BattlePhase::Victory);
    assert_eq!(bus.events(), &[BattleEvent::BattleEnded { won: true }]);
}

#[test]
fn test_acknowledge_without_pending_level_up_does_nothing() {
    let mut state = battle_against_weak_glowkarp(5, 0);

    let bus = acknowledge_level_up(&mut state);

    assert!(bus.is_empty());
    assert_eq!(state.phase, BattlePhase::Action);
}

#[test]
fn test_level_up_announces_evolution() {
    // 2690 + 75 crosses the 2700 threshold of level 15
    let mut state = battle_against_weak_glowkarp(15, 2690);
    let mut rng = predictable_rng();

    let bus = resolve_turn(&mut state, ATTACK, &RandomAI, &mut rng);

    assert_eq!(state.player.level, 16);
    assert_eq!(state.phase, BattlePhase::LevelUp);
    let messages = bus.messages();
    assert!(messages.contains(&"Dogetle grew to level 16!".to_string()));
    assert_eq!(
        messages.last(),
        Some(&"Dogetle is ready to evolve into Dogortle!".to_string())
    );
    // Evolution is only announced; the species stays the same in battle.
    assert_eq!(state.player.species_id, 7);
}

#[test]
fn test_defeat_awards_nothing() {
    let player = TestCreatureBuilder::new(7, 5).with_hp(1).with_speed(1).build();
    let enemy = TestCreatureBuilder::new(4, 20).build();
    let mut state = create_test_battle(player, enemy);
    let mut rng = predictable_rng();

    let bus = resolve_turn(&mut state, ATTACK, &RandomAI, &mut rng);

    assert_eq!(state.phase, BattlePhase::Defeat);
    assert_eq!(state.player.experience, 0);
    assert_eq!(bus.events().last(), Some(&BattleEvent::BattleEnded { won: false }));
    assert!(!bus
        .events()
        .iter()
        .any(|event| matches!(event, BattleEvent::ExperienceGained { .. })));
}
