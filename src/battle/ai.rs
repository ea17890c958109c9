//! A module for defining AI behaviors for battle opponents.

use crate::battle::state::{BattleRng, BattleState, Side};

/// A trait for any system that can pick the move an AI-controlled side uses.
pub trait Behavior {
    /// Inspects the battle state and returns an index into the side's move list.
    fn choose_move(&self, side: Side, battle_state: &BattleState, rng: &mut BattleRng) -> usize;
}

/// Wild and trainer opponents pick uniformly among their known moves.
///
/// Intentionally simple: at most one draw per turn, no scoring of the options.
/// A creature with a single move uses it without drawing.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomAI;

impl RandomAI {
    pub fn new() -> Self {
        Self
    }
}

impl Behavior for RandomAI {
    fn choose_move(&self, side: Side, battle_state: &BattleState, rng: &mut BattleRng) -> usize {
        let move_count = battle_state.creature(side).moves.len() as u64;
        if move_count == 0 {
            return 0;
        }
        rng.range_inclusive(0, move_count - 1, "enemy move choice") as usize
    }
}
