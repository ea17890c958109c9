use crate::errors::ActionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Items a player can carry. Serialized as their slug (`"cryptosphere"`, `"potion"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ItemId {
    CryptoSphere,
    GoldSphere,
    DiamondSphere,
    Potion,
    SuperPotion,
    HyperPotion,
    Revive,
}

/// What happens when an item is used in battle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    CaptureDevice,
    Healing(u16),
    Revive,
}

impl ItemId {
    pub const ALL: [ItemId; 7] = [
        ItemId::CryptoSphere,
        ItemId::GoldSphere,
        ItemId::DiamondSphere,
        ItemId::Potion,
        ItemId::SuperPotion,
        ItemId::HyperPotion,
        ItemId::Revive,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            ItemId::CryptoSphere => "cryptosphere",
            ItemId::GoldSphere => "gold_sphere",
            ItemId::DiamondSphere => "diamond_sphere",
            ItemId::Potion => "potion",
            ItemId::SuperPotion => "super_potion",
            ItemId::HyperPotion => "hyper_potion",
            ItemId::Revive => "revive",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ItemId::CryptoSphere => "CryptoSphere",
            ItemId::GoldSphere => "Gold Sphere",
            ItemId::DiamondSphere => "Diamond Sphere",
            ItemId::Potion => "Potion",
            ItemId::SuperPotion => "Super Potion",
            ItemId::HyperPotion => "Hyper Potion",
            ItemId::Revive => "Revive",
        }
    }

    pub fn kind(self) -> ItemKind {
        match self {
            ItemId::CryptoSphere | ItemId::GoldSphere | ItemId::DiamondSphere => {
                ItemKind::CaptureDevice
            }
            ItemId::Potion => ItemKind::Healing(20),
            ItemId::SuperPotion => ItemKind::Healing(50),
            ItemId::HyperPotion => ItemKind::Healing(200),
            ItemId::Revive => ItemKind::Revive,
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ItemId {
    type Err = ActionError;

    fn from_str(slug: &str) -> Result<Self, Self::Err> {
        ItemId::ALL
            .into_iter()
            .find(|item| item.slug() == slug)
            .ok_or_else(|| ActionError::UnknownItem(slug.to_string()))
    }
}

impl TryFrom<String> for ItemId {
    type Error = ActionError;

    fn try_from(slug: String) -> Result<Self, Self::Error> {
        slug.parse()
    }
}

impl From<ItemId> for String {
    fn from(item: ItemId) -> Self {
        item.slug().to_string()
    }
}
