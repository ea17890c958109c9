use crate::battle::ai::Behavior;
use crate::battle::calculators::calculate_attack_commands;
use crate::battle::catch::{calculate_catch_commands, can_attempt_catch};
use crate::battle::commands::{execute_command_batch, BattleCommand};
use crate::battle::flee::calculate_flee_commands;
use crate::battle::state::{BattleEvent, BattleKind, BattlePhase, BattleRng, BattleState, EventBus, Side};
use crate::catalog::get_species_by_id;
use crate::items::ItemId;
use crate::progression::{apply_experience, xp_threshold, RewardCalculator};
use tracing::{debug, info, warn};

/// One fully validated player choice, ready to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAction {
    Attack { move_index: usize },
    ThrowDevice { device: ItemId },
    Heal { amount: u16 },
    Flee,
}

/// Play the reveal sequence and open the action menu.
pub fn run_intro(battle_state: &mut BattleState) -> EventBus {
    let mut bus = EventBus::new();
    let commands = vec![
        BattleCommand::EmitEvent(BattleEvent::OpponentAppeared {
            name: battle_state.enemy.name.clone(),
            kind: battle_state.kind,
        }),
        BattleCommand::EmitEvent(BattleEvent::PlayerSentOut {
            name: battle_state.player.name.clone(),
        }),
        BattleCommand::SetPhase(BattlePhase::Action),
        BattleCommand::EmitEvent(BattleEvent::AwaitingAction),
    ];
    execute_command_batch(commands, battle_state, &mut bus);
    bus
}

/// The player's side acts first unless the enemy is strictly faster.
pub fn player_moves_first(battle_state: &BattleState) -> bool {
    battle_state.player.stats.speed >= battle_state.enemy.stats.speed
}

/// Resolve one turn of the battle for the given player action.
///
/// The state must be in `Action`; callers validate the action beforehand.
/// Leaves the battle in `Action` for the next turn or in an end phase.
pub fn resolve_turn(
    battle_state: &mut BattleState,
    action: TurnAction,
    enemy_ai: &dyn Behavior,
    rng: &mut BattleRng,
) -> EventBus {
    let mut bus = EventBus::new();
    battle_state.phase = BattlePhase::Executing;

    debug!(
        "Resolving turn {} with {:?}",
        battle_state.turn_number, action
    );

    let enemy_acts = match action {
        TurnAction::Attack { move_index } => {
            resolve_move_exchange(battle_state, move_index, enemy_ai, rng, &mut bus);
            false
        }
        TurnAction::ThrowDevice { device } => {
            let blocked = can_attempt_catch(battle_state).is_err();
            let commands = calculate_catch_commands(device, battle_state, rng);
            execute_command_batch(commands, battle_state, &mut bus);
            !blocked && battle_state.phase != BattlePhase::Caught
        }
        TurnAction::Heal { amount } => {
            execute_command_batch(
                vec![BattleCommand::HealCreature {
                    target: Side::Player,
                    amount,
                }],
                battle_state,
                &mut bus,
            );
            true
        }
        TurnAction::Flee => {
            let commands = calculate_flee_commands(battle_state, rng);
            execute_command_batch(commands, battle_state, &mut bus);
            battle_state.kind == BattleKind::Wild && battle_state.phase != BattlePhase::Escaped
        }
    };

    if enemy_acts {
        execute_enemy_attack(battle_state, enemy_ai, rng, &mut bus);
    }

    finalize_turn(battle_state, rng, &mut bus);
    bus
}

fn resolve_move_exchange(
    battle_state: &mut BattleState,
    move_index: usize,
    enemy_ai: &dyn Behavior,
    rng: &mut BattleRng,
    bus: &mut EventBus,
) {
    let player_first = player_moves_first(battle_state);
    debug!(
        "Turn order: {} first (speed {} vs {})",
        if player_first { "player" } else { "enemy" },
        battle_state.player.stats.speed,
        battle_state.enemy.stats.speed
    );

    let order = if player_first {
        [Side::Player, Side::Enemy]
    } else {
        [Side::Enemy, Side::Player]
    };

    for side in order {
        if battle_state.player.is_fainted() || battle_state.enemy.is_fainted() {
            break;
        }
        match side {
            Side::Player => {
                let commands = calculate_attack_commands(battle_state, Side::Player, move_index, rng);
                execute_command_batch(commands, battle_state, bus);
            }
            Side::Enemy => execute_enemy_attack(battle_state, enemy_ai, rng, bus),
        }
    }
}

fn execute_enemy_attack(
    battle_state: &mut BattleState,
    enemy_ai: &dyn Behavior,
    rng: &mut BattleRng,
    bus: &mut EventBus,
) {
    if battle_state.enemy.is_fainted() || battle_state.player.is_fainted() {
        return;
    }
    let move_index = enemy_ai.choose_move(Side::Enemy, battle_state, rng);
    let commands = calculate_attack_commands(battle_state, Side::Enemy, move_index, rng);
    execute_command_batch(commands, battle_state, bus);
}

/// Advance the turn counter and settle where the battle goes next.
fn finalize_turn(battle_state: &mut BattleState, rng: &mut BattleRng, bus: &mut EventBus) {
    execute_command_batch(vec![BattleCommand::IncrementTurnNumber], battle_state, bus);

    match battle_state.phase {
        BattlePhase::Caught => {
            info!("{} was caught", battle_state.enemy.name);
            end_battle(battle_state, BattlePhase::Caught, true, bus);
        }
        BattlePhase::Escaped => {
            info!("Player escaped from {}", battle_state.enemy.name);
            end_battle(battle_state, BattlePhase::Escaped, false, bus);
        }
        _ => check_battle_end(battle_state, rng, bus),
    }
}

/// Enemy fainting is checked before the player's creature.
fn check_battle_end(battle_state: &mut BattleState, rng: &mut BattleRng, bus: &mut EventBus) {
    if battle_state.enemy.is_fainted() {
        info!("{} defeated {}", battle_state.player.name, battle_state.enemy.name);
        resolve_victory(battle_state, rng, bus);
    } else if battle_state.player.is_fainted() {
        info!("{} was defeated by {}", battle_state.player.name, battle_state.enemy.name);
        end_battle(battle_state, BattlePhase::Defeat, false, bus);
    } else {
        execute_command_batch(
            vec![
                BattleCommand::SetPhase(BattlePhase::Action),
                BattleCommand::EmitEvent(BattleEvent::AwaitingAction),
            ],
            battle_state,
            bus,
        );
    }
}

/// Award experience for the fainted enemy, pausing in `LevelUp` if it was enough to grow.
fn resolve_victory(battle_state: &mut BattleState, rng: &mut BattleRng, bus: &mut EventBus) {
    let calculator = RewardCalculator;
    let xp = calculator.victory_experience(&battle_state.enemy);
    let player_name = battle_state.player.name.clone();

    bus.push(BattleEvent::ExperienceGained {
        name: player_name.clone(),
        amount: xp,
    });

    let outcome = apply_experience(&mut battle_state.player, xp, rng);

    bus.push(BattleEvent::ExperienceChanged {
        current: battle_state.player.experience,
        threshold: xp_threshold(battle_state.player.level),
    });

    let Some(increases) = outcome.stat_increases else {
        end_battle(battle_state, BattlePhase::Victory, true, bus);
        return;
    };

    bus.push(BattleEvent::LeveledUp {
        name: player_name.clone(),
        new_level: outcome.new_level,
        increases,
    });

    match calculator.should_evolve(&battle_state.player) {
        Ok(Some(target_id)) => match get_species_by_id(target_id) {
            Ok(target) => bus.push(BattleEvent::EvolutionReady {
                name: player_name,
                into: target.name.clone(),
            }),
            Err(e) => warn!("Evolution target of {} is unavailable: {}", player_name, e),
        },
        Ok(None) => {}
        Err(e) => warn!("Could not check evolution for {}: {}", player_name, e),
    }

    battle_state.phase = BattlePhase::LevelUp;
}

/// Finalize a victory that was paused for a level-up.
///
/// Returns an empty bus and leaves the state alone if nothing is pending.
pub fn acknowledge_level_up(battle_state: &mut BattleState) -> EventBus {
    let mut bus = EventBus::new();
    if battle_state.phase == BattlePhase::LevelUp {
        end_battle(battle_state, BattlePhase::Victory, true, &mut bus);
    }
    bus
}

fn end_battle(battle_state: &mut BattleState, phase: BattlePhase, won: bool, bus: &mut EventBus) {
    execute_command_batch(
        vec![
            BattleCommand::SetPhase(phase),
            BattleCommand::EmitEvent(BattleEvent::BattleEnded { won }),
        ],
        battle_state,
        bus,
    );
}
