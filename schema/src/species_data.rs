use crate::{MemeType, MoveData};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
    pub speed: u16,
}

impl BaseStats {
    pub fn as_array(&self) -> [u16; 6] {
        [
            self.hp,
            self.attack,
            self.defense,
            self.sp_attack,
            self.sp_defense,
            self.speed,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvolutionMethod {
    Level(u8),
    /// The content lists a target but no trigger level.
    Unspecified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evolution {
    pub into: u16,
    pub method: EvolutionMethod,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesData {
    pub id: u16,
    pub name: String,
    pub meme_token: String,
    pub types: Vec<MemeType>,
    pub base_stats: BaseStats,
    pub evolution: Option<Evolution>,
    pub signature_move: MoveData,
    pub learnable_moves: Vec<String>,
    pub description: String,
    pub sprite_key: String,
}

impl SpeciesData {
    /// The first listed type. Species always carry at least one.
    pub fn primary_type(&self) -> MemeType {
        self.types.first().copied().unwrap_or(MemeType::Normal)
    }
}
