use super::{Completion, GameStore, Inventory, SaveData};
use crate::creature::CreatureRecord;
use crate::errors::{StoreError, StoreResult};
use crate::items::ItemId;
use uuid::Uuid;

/// In-process store. Also the working copy behind [`super::LocalStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: SaveData,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_save_data(data: SaveData) -> Self {
        Self { data }
    }

    pub fn save_data(&self) -> &SaveData {
        &self.data
    }

    /// Every record owned by `player_id`, party and storage alike.
    pub fn all_creatures<'a>(&'a self, player_id: &'a str) -> impl Iterator<Item = &'a CreatureRecord> {
        self.data
            .creatures
            .iter()
            .filter(move |record| record.player_id == player_id)
    }
}

impl GameStore for MemoryStore {
    fn read_party(&self, player_id: &str) -> StoreResult<Vec<CreatureRecord>> {
        let mut party: Vec<CreatureRecord> = self
            .all_creatures(player_id)
            .filter(|record| record.is_in_party())
            .cloned()
            .collect();
        party.sort_by_key(|record| record.party_slot);
        Ok(party)
    }

    fn read_creature(&self, id: Uuid) -> StoreResult<CreatureRecord> {
        self.data
            .creatures
            .iter()
            .find(|record| record.id == id)
            .cloned()
            .ok_or(StoreError::CreatureNotFound(id))
    }

    fn write_creature(&mut self, record: &CreatureRecord) -> StoreResult<()> {
        let stored = self
            .data
            .creatures
            .iter_mut()
            .find(|stored| stored.id == record.id)
            .ok_or(StoreError::CreatureNotFound(record.id))?;
        *stored = record.clone();
        Ok(())
    }

    fn append_creature(&mut self, record: CreatureRecord) -> StoreResult<()> {
        self.data.creatures.push(record);
        Ok(())
    }

    fn read_inventory(&self, player_id: &str) -> StoreResult<Inventory> {
        Ok(self
            .data
            .inventories
            .get(player_id)
            .cloned()
            .unwrap_or_default())
    }

    fn adjust_inventory(&mut self, player_id: &str, item: ItemId, delta: i64) -> StoreResult<u32> {
        let inventory = self.data.inventories.entry(player_id.to_string()).or_default();
        let held = inventory.get(&item).copied().unwrap_or(0);
        let updated = held as i64 + delta;

        if updated < 0 {
            return Err(StoreError::InsufficientQuantity {
                item,
                held,
                requested: delta.unsigned_abs() as u32,
            });
        }

        let updated = updated.min(u32::MAX as i64) as u32;
        if updated == 0 {
            inventory.remove(&item);
        } else {
            inventory.insert(item, updated);
        }
        Ok(updated)
    }

    fn read_completion(&self, player_id: &str) -> StoreResult<Completion> {
        Ok(self
            .data
            .completion
            .get(player_id)
            .cloned()
            .unwrap_or_default())
    }

    fn mark_completion(
        &mut self,
        player_id: &str,
        species_id: u16,
        seen: bool,
        caught: bool,
    ) -> StoreResult<()> {
        let entry = self
            .data
            .completion
            .entry(player_id.to_string())
            .or_default()
            .entry(species_id)
            .or_default();
        entry.seen |= seen;
        entry.caught |= caught;
        Ok(())
    }
}
