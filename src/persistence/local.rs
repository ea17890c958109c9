use super::{Completion, GameStore, Inventory, MemoryStore, SaveData};
use crate::creature::CreatureRecord;
use crate::errors::StoreResult;
use crate::items::ItemId;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

/// Offline store backed by a JSON save file.
///
/// Every mutation rewrites the whole file through a temporary sibling and a
/// rename, so a crash never leaves a half-written save behind. A mutation
/// whose write fails is not applied in memory either.
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl LocalStore {
    /// Open the save at `path`, starting empty if the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let data: SaveData = serde_json::from_str(&contents)?;
            info!(
                "Loaded save file {} ({} creatures)",
                path.display(),
                data.creatures.len()
            );
            data
        } else {
            info!("No save file at {}, starting fresh", path.display());
            SaveData::default()
        };

        Ok(Self {
            path,
            inner: MemoryStore::from_save_data(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` to a copy of the data, write it, and only then adopt it.
    fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut MemoryStore) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut staged = self.inner.clone();
        let value = change(&mut staged)?;
        self.flush(staged.save_data())?;
        self.inner = staged;
        Ok(value)
    }

    fn flush(&self, data: &SaveData) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(data)?;
        let mut temp_name = self.path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);

        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &self.path)?;
        debug!("Wrote save file {}", self.path.display());
        Ok(())
    }
}

impl GameStore for LocalStore {
    fn read_party(&self, player_id: &str) -> StoreResult<Vec<CreatureRecord>> {
        self.inner.read_party(player_id)
    }

    fn read_creature(&self, id: Uuid) -> StoreResult<CreatureRecord> {
        self.inner.read_creature(id)
    }

    fn write_creature(&mut self, record: &CreatureRecord) -> StoreResult<()> {
        self.commit(|store| store.write_creature(record))
    }

    fn append_creature(&mut self, record: CreatureRecord) -> StoreResult<()> {
        self.commit(|store| store.append_creature(record))
    }

    fn read_inventory(&self, player_id: &str) -> StoreResult<Inventory> {
        self.inner.read_inventory(player_id)
    }

    fn adjust_inventory(&mut self, player_id: &str, item: ItemId, delta: i64) -> StoreResult<u32> {
        self.commit(|store| store.adjust_inventory(player_id, item, delta))
    }

    fn read_completion(&self, player_id: &str) -> StoreResult<Completion> {
        self.inner.read_completion(player_id)
    }

    fn mark_completion(
        &mut self,
        player_id: &str,
        species_id: u16,
        seen: bool,
        caught: bool,
    ) -> StoreResult<()> {
        self.commit(|store| store.mark_completion(player_id, species_id, seen, caught))
    }
}
