//! Game configuration, loaded from RON.

use crate::errors::ConfigError;
use crate::items::ItemId;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A quantity of one item, as granted to a new profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item: ItemId,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Species used when a referenced species is missing or the party is empty
    pub fallback_species: u16,
    /// Level of a freshly created starter
    pub starter_level: u8,
    pub starting_items: Vec<ItemStack>,
    pub save_path: PathBuf,
    pub default_area: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fallback_species: 1,
            starter_level: 5,
            starting_items: vec![
                ItemStack {
                    item: ItemId::CryptoSphere,
                    quantity: 10,
                },
                ItemStack {
                    item: ItemId::Potion,
                    quantity: 5,
                },
            ],
            save_path: PathBuf::from("pokememe-save.json"),
            default_area: "satoshi_town".to_string(),
        }
    }
}

impl GameConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
