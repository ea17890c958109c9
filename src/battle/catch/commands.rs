use crate::battle::catch::{calculate_catch_probability, can_attempt_catch, roll_catch_success};
use crate::battle::commands::BattleCommand;
use crate::battle::state::{BattleEvent, BattlePhase, BattleRng, BattleState};
use crate::items::ItemId;
use tracing::debug;

/// Calculate commands for throwing `device` at the enemy.
///
/// A blocked attempt only emits `CatchBlocked`. A successful roll moves the
/// battle to `Caught`; a failed one leaves the phase for the engine to continue.
pub fn calculate_catch_commands(
    device: ItemId,
    battle_state: &BattleState,
    rng: &mut BattleRng,
) -> Vec<BattleCommand> {
    if can_attempt_catch(battle_state).is_err() {
        return vec![BattleCommand::EmitEvent(BattleEvent::CatchBlocked)];
    }

    let target = &battle_state.enemy;
    let probability = calculate_catch_probability(target);

    let mut commands = vec![
        BattleCommand::EmitEvent(BattleEvent::CaptureDeviceThrown { item: device }),
        BattleCommand::EmitEvent(BattleEvent::CatchAttempted { probability }),
    ];

    let caught = roll_catch_success(probability, rng);
    debug!(
        "Catch attempt on {} with p={:.3}: {}",
        target.name,
        probability,
        if caught { "caught" } else { "broke free" }
    );

    if caught {
        commands.push(BattleCommand::EmitEvent(BattleEvent::CatchSucceeded {
            name: target.name.clone(),
        }));
        commands.push(BattleCommand::SetPhase(BattlePhase::Caught));
    } else {
        commands.push(BattleCommand::EmitEvent(BattleEvent::CatchFailed {
            name: target.name.clone(),
        }));
    }

    commands
}
