use super::GameStore;
use crate::catalog::species_or_fallback;
use crate::config::GameConfig;
use crate::creature::CreatureRecord;
use crate::errors::{BattleResult, StoreResult};
use tracing::info;

/// Seed a new guest player: one starter in party slot 0, its dex entry and the starting items.
pub fn create_guest_profile(
    store: &mut dyn GameStore,
    player_id: &str,
    starter_species: u16,
    config: &GameConfig,
) -> BattleResult<CreatureRecord> {
    let species = species_or_fallback(starter_species, config.fallback_species)?;
    let starter = CreatureRecord::new(player_id, species, config.starter_level, Some(0));

    store.append_creature(starter.clone())?;
    store.mark_completion(player_id, species.id, true, true)?;
    for stack in &config.starting_items {
        store.adjust_inventory(player_id, stack.item, stack.quantity as i64)?;
    }

    info!(
        "Created guest profile {} with {} at level {}",
        player_id, species.name, starter.level
    );
    Ok(starter)
}

/// Restore every party member to full HP. Returns how many records changed.
pub fn heal_party(store: &mut dyn GameStore, player_id: &str) -> StoreResult<usize> {
    let mut healed = 0;
    for mut record in store.read_party(player_id)? {
        if record.current_hp < record.stats.hp {
            record.current_hp = record.stats.hp;
            store.write_creature(&record)?;
            healed += 1;
        }
    }
    Ok(healed)
}
