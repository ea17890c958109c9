use serde::{Deserialize, Serialize};

/// One weighted candidate in an area's encounter pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterEntry {
    pub species_id: u16,
    pub min_level: u8,
    pub max_level: u8,
    pub rarity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterPool {
    pub area: String,
    pub entries: Vec<EncounterEntry>,
}

impl EncounterPool {
    pub fn total_weight(&self) -> u64 {
        self.entries.iter().map(|entry| entry.rarity as u64).sum()
    }
}
