//! Player data storage behind a single interface.
//!
//! The battle core only talks to [`GameStore`]. [`MemoryStore`] keeps
//! everything in process; [`LocalStore`] mirrors the same data into a JSON
//! save file for offline play.

pub mod local;
pub mod memory;
pub mod profile;
pub mod session;

use crate::creature::CreatureRecord;
use crate::errors::StoreResult;
use crate::items::ItemId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

pub use local::LocalStore;
pub use memory::MemoryStore;
pub use profile::{create_guest_profile, heal_party};
pub use session::{ActiveCreature, SessionContext};

/// Completion registry row for one species
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionEntry {
    pub seen: bool,
    pub caught: bool,
}

pub type Inventory = BTreeMap<ItemId, u32>;
pub type Completion = BTreeMap<u16, CompletionEntry>;

/// Everything the battle core reads from or writes to player storage.
pub trait GameStore {
    /// Party members of `player_id`, ordered by slot.
    fn read_party(&self, player_id: &str) -> StoreResult<Vec<CreatureRecord>>;

    fn read_creature(&self, id: Uuid) -> StoreResult<CreatureRecord>;

    /// Replace an existing record with the same id.
    fn write_creature(&mut self, record: &CreatureRecord) -> StoreResult<()>;

    /// Store a newly created record.
    fn append_creature(&mut self, record: CreatureRecord) -> StoreResult<()>;

    fn read_inventory(&self, player_id: &str) -> StoreResult<Inventory>;

    /// Add `delta` (negative to remove) and return the new quantity.
    ///
    /// Rows reaching 0 are removed; a quantity never goes below 0.
    fn adjust_inventory(&mut self, player_id: &str, item: ItemId, delta: i64) -> StoreResult<u32>;

    fn read_completion(&self, player_id: &str) -> StoreResult<Completion>;

    /// Set the seen and caught flags. Flags already set stay set.
    fn mark_completion(
        &mut self,
        player_id: &str,
        species_id: u16,
        seen: bool,
        caught: bool,
    ) -> StoreResult<()>;
}

/// Serialized form of all player data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveData {
    pub creatures: Vec<CreatureRecord>,
    pub inventories: BTreeMap<String, Inventory>,
    pub completion: BTreeMap<String, Completion>,
}
