use crate::battle::commands::BattleCommand;
use crate::battle::state::{BattleEvent, BattleKind, BattlePhase, BattleRng, BattleState};
use tracing::debug;

const FLEE_SPEED_WEIGHT: f64 = 0.5;
const FLEE_BASE_CHANCE: f64 = 0.3;

/// Escape chance: (player speed / enemy speed) * 0.5 + 0.3.
///
/// Not capped; anything at or above 1.0 always succeeds.
pub fn calculate_flee_probability(player_speed: u16, enemy_speed: u16) -> f64 {
    (player_speed as f64 / enemy_speed.max(1) as f64) * FLEE_SPEED_WEIGHT + FLEE_BASE_CHANCE
}

pub fn roll_flee_success(probability: f64, rng: &mut BattleRng) -> bool {
    rng.next_unit("flee roll") < probability
}

/// Calculate commands for a flee attempt.
///
/// Trainer battles refuse without drawing. Success ends the battle as `Escaped`.
pub fn calculate_flee_commands(battle_state: &BattleState, rng: &mut BattleRng) -> Vec<BattleCommand> {
    if battle_state.kind == BattleKind::Trainer {
        return vec![BattleCommand::EmitEvent(BattleEvent::FleeBlocked)];
    }

    let probability = calculate_flee_probability(
        battle_state.player.stats.speed,
        battle_state.enemy.stats.speed,
    );
    let escaped = roll_flee_success(probability, rng);
    debug!("Flee attempt with p={:.3}: escaped={}", probability, escaped);

    if escaped {
        vec![
            BattleCommand::EmitEvent(BattleEvent::FleeSucceeded),
            BattleCommand::SetPhase(BattlePhase::Escaped),
        ]
    } else {
        vec![BattleCommand::EmitEvent(BattleEvent::FleeFailed)]
    }
}
