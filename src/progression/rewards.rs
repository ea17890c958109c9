use crate::creature::BattleCreature;
use schema::BaseStats;

const VICTORY_XP_FACTOR: f64 = 0.5;

/// Calculator for the rewards handed out when an opponent faints
pub struct RewardCalculator;

impl RewardCalculator {
    /// Experience for defeating `defeated`.
    /// Formula: floor((base HP + base Attack) × level × 0.5)
    pub fn victory_experience(&self, defeated: &BattleCreature) -> u32 {
        self.experience_for(&defeated.base_stats, defeated.level)
    }

    fn experience_for(&self, base_stats: &BaseStats, level: u8) -> u32 {
        let base = base_stats.hp as f64 + base_stats.attack as f64;
        (base * level as f64 * VICTORY_XP_FACTOR).floor() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::get_species_by_id;
    use rstest::rstest;

    #[rstest]
    // Glowkarp base 20 HP + 10 Attack
    #[case(129, 5, 75)]
    #[case(129, 3, 45)]
    // Soybone base 50 HP + 50 Attack
    #[case(104, 9, 450)]
    fn test_victory_experience(#[case] species_id: u16, #[case] level: u8, #[case] expected: u32) {
        let species = get_species_by_id(species_id).unwrap();
        let defeated = BattleCreature::wild(species, level);
        assert_eq!(RewardCalculator.victory_experience(&defeated), expected);
    }

    #[test]
    fn test_odd_totals_round_down() {
        let stats = BaseStats {
            hp: 45,
            attack: 50,
            defense: 1,
            sp_attack: 1,
            sp_defense: 1,
            speed: 1,
        };
        // 95 * 3 * 0.5 = 142.5
        assert_eq!(RewardCalculator.experience_for(&stats, 3), 142);
    }

    #[test]
    fn test_maximal_base_stats_do_not_wrap() {
        let stats = BaseStats {
            hp: u16::MAX,
            attack: u16::MAX,
            defense: 1,
            sp_attack: 1,
            sp_defense: 1,
            speed: 1,
        };
        // 131070 * 2 * 0.5
        assert_eq!(RewardCalculator.experience_for(&stats, 2), 131_070);
    }
}
