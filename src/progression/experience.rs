use crate::battle::state::BattleRng;
use crate::creature::{BattleCreature, MAX_LEVEL};
use serde::{Deserialize, Serialize};
use tracing::debug;

const XP_CURVE_FACTOR: f64 = 0.8;
const HP_GROWTH_BASE: f64 = 2.0;
const STAT_GROWTH_BASE: f64 = 1.0;
const GROWTH_SPREAD: f64 = 2.0;

/// Stat gains from a level-up, already applied to the creature
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatIncreases {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
    pub speed: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUpOutcome {
    pub leveled_up: bool,
    pub new_level: u8,
    pub stat_increases: Option<StatIncreases>,
}

/// Experience needed to advance from `level` to `level + 1`: floor(level³ · 0.8).
pub fn xp_threshold(level: u8) -> u32 {
    ((level as f64).powi(3) * XP_CURVE_FACTOR).floor() as u32
}

/// Bank `xp_gained` on the creature and level it up as far as the experience allows.
///
/// Level is capped at 100; reaching the cap discards any banked experience.
/// Stats only change when at least one level was gained, and current HP rises
/// by the same amount as max HP.
pub fn apply_experience(
    creature: &mut BattleCreature,
    xp_gained: u32,
    rng: &mut BattleRng,
) -> LevelUpOutcome {
    let old_level = creature.level;

    if old_level >= MAX_LEVEL {
        creature.level = MAX_LEVEL;
        creature.experience = 0;
        return LevelUpOutcome {
            leveled_up: false,
            new_level: MAX_LEVEL,
            stat_increases: None,
        };
    }

    let mut experience = creature.experience as u64 + xp_gained as u64;
    let mut level = old_level;
    while experience >= xp_threshold(level) as u64 {
        experience -= xp_threshold(level) as u64;
        level += 1;
        if level >= MAX_LEVEL {
            level = MAX_LEVEL;
            experience = 0;
            break;
        }
    }

    creature.level = level;
    creature.experience = experience as u32;

    if level == old_level {
        return LevelUpOutcome {
            leveled_up: false,
            new_level: level,
            stat_increases: None,
        };
    }

    let increases = roll_stat_increases(level - old_level, rng);
    let stats = &mut creature.stats;
    stats.hp = stats.hp.saturating_add(increases.hp);
    stats.attack = stats.attack.saturating_add(increases.attack);
    stats.defense = stats.defense.saturating_add(increases.defense);
    stats.sp_attack = stats.sp_attack.saturating_add(increases.sp_attack);
    stats.sp_defense = stats.sp_defense.saturating_add(increases.sp_defense);
    stats.speed = stats.speed.saturating_add(increases.speed);
    creature.current_hp = creature
        .current_hp
        .saturating_add(increases.hp)
        .min(creature.stats.hp);

    debug!(
        "{} grew from level {} to {} with {:?}",
        creature.name, old_level, level, increases
    );

    LevelUpOutcome {
        leveled_up: true,
        new_level: level,
        stat_increases: Some(increases),
    }
}

/// One draw per stat, in order hp, attack, defense, sp_attack, sp_defense, speed.
fn roll_stat_increases(levels_gained: u8, rng: &mut BattleRng) -> StatIncreases {
    let levels = levels_gained as f64;
    let mut roll = |base: f64, reason: &str| {
        (levels * (base + rng.next_unit(reason) * GROWTH_SPREAD)).floor() as u16
    };

    StatIncreases {
        hp: roll(HP_GROWTH_BASE, "hp growth"),
        attack: roll(STAT_GROWTH_BASE, "attack growth"),
        defense: roll(STAT_GROWTH_BASE, "defense growth"),
        sp_attack: roll(STAT_GROWTH_BASE, "sp_attack growth"),
        sp_defense: roll(STAT_GROWTH_BASE, "sp_defense growth"),
        speed: roll(STAT_GROWTH_BASE, "speed growth"),
    }
}
