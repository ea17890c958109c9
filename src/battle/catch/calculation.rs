use crate::battle::state::BattleRng;
use crate::creature::BattleCreature;

const BASE_CATCH_CHANCE: f64 = 0.3;
const HP_BONUS_WEIGHT: f64 = 0.5;
const LOW_LEVEL_CUTOFF: u8 = 10;
const LOW_LEVEL_BONUS_PER_LEVEL: f64 = 0.02;
pub const MAX_CATCH_CHANCE: f64 = 0.9;

/// Chance of catching `target` with any capture device.
///
/// Formula: min(0.9, 0.3 + (1 - hp fraction) * 0.5 + max(0, 10 - level) * 0.02)
pub fn calculate_catch_probability(target: &BattleCreature) -> f64 {
    catch_probability_for(target.hp_fraction(), target.level)
}

pub fn catch_probability_for(hp_fraction: f64, level: u8) -> f64 {
    let hp_bonus = (1.0 - hp_fraction.clamp(0.0, 1.0)) * HP_BONUS_WEIGHT;
    let level_bonus = LOW_LEVEL_CUTOFF.saturating_sub(level) as f64 * LOW_LEVEL_BONUS_PER_LEVEL;
    (BASE_CATCH_CHANCE + hp_bonus + level_bonus).min(MAX_CATCH_CHANCE)
}

/// Roll for catch success. Returns true if the catch succeeds.
pub fn roll_catch_success(probability: f64, rng: &mut BattleRng) -> bool {
    rng.next_unit("catch roll") < probability
}
