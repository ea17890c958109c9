use crate::MemeType;
use serde::{Deserialize, Serialize};

pub const BASIC_ATTACK_POWER: u16 = 40;
pub const BASIC_ATTACK_ACCURACY: u8 = 100;
pub const BASIC_ATTACK_PP: u8 = 35;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveCategory {
    Physical,
    Special,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub name: String,
    pub move_type: MemeType,
    pub power: u16,
    pub accuracy: u8,
    /// Carried with the content but never spent in battle.
    pub pp: u8,
    pub description: String,
    pub is_signature: bool,
}

impl MoveData {
    /// A plain attack of the given type, named after the move slot it fills.
    pub fn basic_attack(name: &str, move_type: MemeType) -> Self {
        Self {
            name: name.to_string(),
            move_type,
            power: BASIC_ATTACK_POWER,
            accuracy: BASIC_ATTACK_ACCURACY,
            pp: BASIC_ATTACK_PP,
            description: "A basic attack".to_string(),
            is_signature: false,
        }
    }

    pub fn category(&self) -> MoveCategory {
        if self.move_type.is_special() {
            MoveCategory::Special
        } else {
            MoveCategory::Physical
        }
    }
}
