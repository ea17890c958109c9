use crate::battle::state::BattleRng;
use schema::EncounterEntry;
use tracing::{debug, warn};

/// The species and level chosen for a wild encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encounter {
    pub species_id: u16,
    pub level: u8,
}

/// Weighted pick from an encounter pool.
///
/// Draws an integer in `[1, total]` and walks the entries in order, subtracting
/// each weight; the entry that takes the remainder to zero or below wins. Then
/// draws the level uniformly from the entry's range. An empty pool yields
/// `None`. A zero-weight pool, or a walk that never hits, uses the first entry.
pub fn pick_encounter(pool: &[EncounterEntry], rng: &mut BattleRng) -> Option<Encounter> {
    let first = pool.first()?;
    let total: u64 = pool.iter().map(|entry| entry.rarity as u64).sum();
    if total == 0 {
        warn!("Encounter pool has zero total weight, using its first entry");
        return Some(roll_level(first, rng));
    }

    let mut remainder = rng.range_inclusive(1, total, "encounter weight");
    let chosen = pool
        .iter()
        .find(|entry| {
            let weight = entry.rarity as u64;
            if remainder <= weight {
                return true;
            }
            remainder -= weight;
            false
        })
        .unwrap_or(first);

    let encounter = roll_level(chosen, rng);
    debug!(
        "Encounter picked species #{:03} at level {}",
        encounter.species_id, encounter.level
    );
    Some(encounter)
}

fn roll_level(entry: &EncounterEntry, rng: &mut BattleRng) -> Encounter {
    let low = entry.min_level.min(entry.max_level);
    let high = entry.min_level.max(entry.max_level);
    let level = rng.range_inclusive(low as u64, high as u64, "encounter level") as u8;
    Encounter {
        species_id: entry.species_id,
        level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::encounter_pool;
    use rstest::rstest;
    use std::collections::HashMap;

    fn entry(species_id: u16, min_level: u8, max_level: u8, rarity: u32) -> EncounterEntry {
        EncounterEntry {
            species_id,
            min_level,
            max_level,
            rarity,
        }
    }

    fn three_way_pool() -> Vec<EncounterEntry> {
        vec![entry(1, 2, 5, 20), entry(4, 3, 3, 30), entry(7, 10, 12, 50)]
    }

    // With total weight 100, a unit draw u maps to the integer 1 + floor(u * 100).
    #[rstest]
    #[case(0.0, 1)]
    #[case(0.19, 1)]
    #[case(0.20, 4)]
    #[case(0.49, 4)]
    #[case(0.50, 7)]
    #[case(0.999, 7)]
    fn test_weight_boundaries(#[case] draw: f64, #[case] expected_species: u16) {
        let mut rng = BattleRng::new_for_test(vec![draw, 0.0]);
        let encounter = pick_encounter(&three_way_pool(), &mut rng).unwrap();
        assert_eq!(encounter.species_id, expected_species);
    }

    #[test]
    fn test_level_is_drawn_from_range() {
        let pool = three_way_pool();

        let mut low = BattleRng::new_for_test(vec![0.0, 0.0]);
        assert_eq!(pick_encounter(&pool, &mut low).unwrap().level, 2);

        let mut high = BattleRng::new_for_test(vec![0.0, 0.999]);
        assert_eq!(pick_encounter(&pool, &mut high).unwrap().level, 5);
    }

    #[test]
    fn test_empty_pool_yields_nothing() {
        let mut rng = BattleRng::new_for_test(vec![]);
        assert_eq!(pick_encounter(&[], &mut rng), None);
    }

    #[test]
    fn test_zero_weight_pool_uses_first_entry() {
        let pool = vec![entry(10, 3, 3, 0), entry(11, 4, 4, 0)];
        let mut rng = BattleRng::new_for_test(vec![0.5]);
        assert_eq!(
            pick_encounter(&pool, &mut rng),
            Some(Encounter {
                species_id: 10,
                level: 3
            })
        );
    }

    #[test]
    fn test_weights_past_u32_range_are_summed_safely() {
        let pool = vec![entry(10, 3, 3, u32::MAX), entry(11, 4, 4, 1)];

        let mut low = BattleRng::new_for_test(vec![0.0]);
        assert_eq!(pick_encounter(&pool, &mut low).unwrap().species_id, 10);

        let mut high = BattleRng::new_for_test(vec![0.9999999999999999]);
        assert_eq!(pick_encounter(&pool, &mut high).unwrap().species_id, 11);

        let mut seeded = BattleRng::seeded(7);
        for _ in 0..100 {
            let encounter = pick_encounter(&pool, &mut seeded).unwrap();
            assert!(encounter.species_id == 10 || encounter.species_id == 11);
        }
    }

    #[test]
    fn test_frequencies_follow_weights() {
        let pool = encounter_pool("solana_caves").unwrap();
        let total = pool.total_weight() as f64;
        let mut rng = BattleRng::seeded(42);
        let runs = 20_000;

        let mut counts: HashMap<u16, u32> = HashMap::new();
        for _ in 0..runs {
            let encounter = pick_encounter(&pool.entries, &mut rng).unwrap();
            let entry = pool
                .entries
                .iter()
                .find(|e| e.species_id == encounter.species_id)
                .expect("picked species must come from the pool");
            assert!((entry.min_level..=entry.max_level).contains(&encounter.level));
            *counts.entry(encounter.species_id).or_default() += 1;
        }

        for entry in &pool.entries {
            let observed = counts.get(&entry.species_id).copied().unwrap_or(0) as f64 / runs as f64;
            let expected = entry.rarity as f64 / total;
            assert!(
                (observed - expected).abs() < 0.02,
                "species #{} observed {:.3}, expected {:.3}",
                entry.species_id,
                observed,
                expected
            );
        }
    }
}
