use crate::battle::state::{BattleKind, BattleState};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatchError {
    /// Catch attempts not allowed in this battle kind
    #[error("Cannot catch in a {kind:?} battle")]
    InvalidBattleKind { kind: BattleKind },
    /// Target has already fainted
    #[error("{name} has already fainted")]
    TargetFainted { name: String },
}

/// Check if catch attempts are allowed based on battle kind
pub fn is_catch_allowed(kind: BattleKind) -> bool {
    matches!(kind, BattleKind::Wild)
}

/// Validate that the player may throw a capture device at the enemy
pub fn can_attempt_catch(battle_state: &BattleState) -> Result<(), CatchError> {
    if !is_catch_allowed(battle_state.kind) {
        return Err(CatchError::InvalidBattleKind {
            kind: battle_state.kind,
        });
    }

    if battle_state.enemy.is_fainted() {
        return Err(CatchError::TargetFainted {
            name: battle_state.enemy.name.clone(),
        });
    }

    Ok(())
}
