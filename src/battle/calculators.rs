use crate::battle::commands::BattleCommand;
use crate::battle::state::{BattleEvent, BattleRng, BattleState, Side};
use crate::creature::BattleCreature;
use schema::{MemeType, MoveCategory, MoveData};
use tracing::debug;

const CRITICAL_HIT_CHANCE: f64 = 1.0 / 16.0;
const CRITICAL_HIT_MULTIPLIER: f64 = 1.5;
const RANDOM_FACTOR_MIN: f64 = 0.85;
const RANDOM_FACTOR_SPREAD: f64 = 0.15;
pub const PUMP_PER_ATTACK: u8 = 15;

/// The attacking side's stats that feed the damage formula
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackerStats {
    pub level: u8,
    pub attack: u16,
    pub sp_attack: u16,
}

/// The defending side's stats that feed the damage formula
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefenderStats<'a> {
    pub defense: u16,
    pub sp_defense: u16,
    pub types: &'a [MemeType],
}

impl AttackerStats {
    pub fn of(creature: &BattleCreature) -> Self {
        Self {
            level: creature.level,
            attack: creature.stats.attack,
            sp_attack: creature.stats.sp_attack,
        }
    }
}

impl<'a> DefenderStats<'a> {
    pub fn of(creature: &'a BattleCreature) -> Self {
        Self {
            defense: creature.stats.defense,
            sp_defense: creature.stats.sp_defense,
            types: &creature.types,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackOutcome {
    pub damage: u16,
    pub effectiveness: f64,
    pub is_critical: bool,
}

/// Product of the chart multipliers against each defending type.
pub fn effectiveness_of(attack_type: MemeType, defender_types: &[MemeType]) -> f64 {
    defender_types
        .iter()
        .map(|&defender| MemeType::type_effectiveness(attack_type, defender))
        .product()
}

/// Resolve the damage of a single attack.
///
/// Draws the critical-hit roll and then the random factor. Moves with no
/// power and attacks the defender is immune to deal 0 damage without drawing.
pub fn resolve_attack(
    attacker: AttackerStats,
    defender: &DefenderStats,
    move_data: &MoveData,
    is_special: bool,
    rng: &mut BattleRng,
) -> AttackOutcome {
    let effectiveness = effectiveness_of(move_data.move_type, defender.types);

    if move_data.power == 0 || effectiveness == 0.0 {
        return AttackOutcome {
            damage: 0,
            effectiveness,
            is_critical: false,
        };
    }

    let is_critical = rng.next_unit("critical hit") < CRITICAL_HIT_CHANCE;

    let (attack_stat, defense_stat) = if is_special {
        (attacker.sp_attack, defender.sp_defense)
    } else {
        (attacker.attack, defender.defense)
    };

    let level_factor = 2.0 * attacker.level as f64 / 5.0 + 2.0;
    let base_damage = level_factor
        * move_data.power as f64
        * (attack_stat as f64 / defense_stat.max(1) as f64)
        / 50.0
        + 2.0;
    let crit_multiplier = if is_critical {
        CRITICAL_HIT_MULTIPLIER
    } else {
        1.0
    };
    let random_factor = RANDOM_FACTOR_MIN + rng.next_unit("damage variance") * RANDOM_FACTOR_SPREAD;

    let damage = (base_damage * effectiveness * crit_multiplier * random_factor).floor();

    AttackOutcome {
        damage: damage.clamp(0.0, u16::MAX as f64) as u16,
        effectiveness,
        is_critical,
    }
}

/// Build the commands for `attacker` using the move in `move_index`.
///
/// The caller validates the index; an out-of-range index produces no commands.
pub fn calculate_attack_commands(
    state: &BattleState,
    attacker: Side,
    move_index: usize,
    rng: &mut BattleRng,
) -> Vec<BattleCommand> {
    let attacking = state.creature(attacker);
    let defending = state.creature(attacker.opponent());

    let Some(move_data) = attacking.moves.get(move_index) else {
        return Vec::new();
    };

    let mut commands = vec![BattleCommand::EmitEvent(BattleEvent::MoveUsed {
        side: attacker,
        pokememe: attacking.name.clone(),
        move_name: move_data.name.clone(),
    })];

    let is_special = move_data.category() == MoveCategory::Special;
    let outcome = resolve_attack(
        AttackerStats::of(attacking),
        &DefenderStats::of(defending),
        move_data,
        is_special,
        rng,
    );

    debug!(
        "{} used {} on {}: {:?}",
        attacking.name, move_data.name, defending.name, outcome
    );

    if move_data.power > 0 {
        if outcome.is_critical {
            commands.push(BattleCommand::EmitEvent(BattleEvent::CriticalHit {
                side: attacker,
            }));
        }
        commands.push(BattleCommand::EmitEvent(BattleEvent::AttackTypeEffectiveness {
            multiplier: outcome.effectiveness,
        }));
        if outcome.effectiveness > 0.0 {
            commands.push(BattleCommand::DealDamage {
                target: attacker.opponent(),
                amount: outcome.damage,
            });
        }
    }

    if attacker == Side::Player {
        commands.push(BattleCommand::RaisePumpMeter {
            amount: PUMP_PER_ATTACK,
        });
    }

    commands
}
