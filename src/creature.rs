use crate::moves::moves_for_slots;
use chrono::{DateTime, Utc};
use schema::{BaseStats, MemeType, MoveData, SpeciesData};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MAX_LEVEL: u8 = 100;
pub const PARTY_SIZE: usize = 6;
pub const MOVE_SLOTS: usize = 4;

/// The six persisted stats of an individual creature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
    pub speed: u16,
}

impl StatBlock {
    /// Stats for a creature of `level`: floor(base * (1 + (level - 1) * 0.1)).
    pub fn scaled(base: &BaseStats, level: u8) -> Self {
        let multiplier = 1.0 + (level.max(1) as f64 - 1.0) * 0.1;
        let scale = |stat: u16| (stat as f64 * multiplier).floor() as u16;
        Self {
            hp: scale(base.hp),
            attack: scale(base.attack),
            defense: scale(base.defense),
            sp_attack: scale(base.sp_attack),
            sp_defense: scale(base.sp_defense),
            speed: scale(base.speed),
        }
    }
}

/// One owned creature as it is stored between battles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureRecord {
    pub id: Uuid,
    pub player_id: String,
    pub species_id: u16,
    pub nickname: Option<String>,
    pub level: u8,
    pub experience: u32,
    pub stats: StatBlock,
    pub current_hp: u16,
    pub moves: [Option<String>; MOVE_SLOTS],
    /// `None` means the creature is in storage rather than the party.
    pub party_slot: Option<u8>,
    pub created_at: DateTime<Utc>,
}

impl CreatureRecord {
    /// A fresh record at `level` with scaled stats, full HP and the signature move in slot one.
    pub fn new(player_id: &str, species: &SpeciesData, level: u8, party_slot: Option<u8>) -> Self {
        let stats = StatBlock::scaled(&species.base_stats, level);
        Self {
            id: Uuid::new_v4(),
            player_id: player_id.to_string(),
            species_id: species.id,
            nickname: None,
            level,
            experience: 0,
            stats,
            current_hp: stats.hp,
            moves: [Some(species.signature_move.name.clone()), None, None, None],
            party_slot,
            created_at: Utc::now(),
        }
    }

    /// A record for a creature just captured in battle, keeping its battle stats and HP.
    pub fn from_capture(player_id: &str, captured: &BattleCreature, party_slot: Option<u8>) -> Self {
        let signature = captured
            .moves
            .iter()
            .find(|m| m.is_signature)
            .map(|m| m.name.clone());
        Self {
            id: Uuid::new_v4(),
            player_id: player_id.to_string(),
            species_id: captured.species_id,
            nickname: None,
            level: captured.level,
            experience: 0,
            stats: captured.stats,
            current_hp: captured.current_hp,
            moves: [signature, None, None, None],
            party_slot,
            created_at: Utc::now(),
        }
    }

    pub fn is_in_party(&self) -> bool {
        self.party_slot.is_some()
    }
}

/// A creature taking part in a battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleCreature {
    /// Persisted record this creature was loaded from, if any.
    pub record_id: Option<Uuid>,
    pub species_id: u16,
    pub name: String,
    pub types: Vec<MemeType>,
    pub base_stats: BaseStats,
    pub level: u8,
    pub experience: u32,
    pub stats: StatBlock,
    pub current_hp: u16,
    pub moves: Vec<MoveData>,
}

impl BattleCreature {
    /// A wild creature at `level`: scaled stats, full HP, signature move only.
    pub fn wild(species: &SpeciesData, level: u8) -> Self {
        let stats = StatBlock::scaled(&species.base_stats, level);
        Self {
            record_id: None,
            species_id: species.id,
            name: species.name.clone(),
            types: species.types.clone(),
            base_stats: species.base_stats,
            level,
            experience: 0,
            stats,
            current_hp: stats.hp,
            moves: vec![species.signature_move.clone()],
        }
    }

    pub fn from_record(record: &CreatureRecord, species: &SpeciesData) -> Self {
        Self {
            record_id: Some(record.id),
            species_id: species.id,
            name: record
                .nickname
                .clone()
                .unwrap_or_else(|| species.name.clone()),
            types: species.types.clone(),
            base_stats: species.base_stats,
            level: record.level,
            experience: record.experience,
            stats: record.stats,
            current_hp: record.current_hp.min(record.stats.hp),
            moves: moves_for_slots(species, &record.moves),
        }
    }

    pub fn max_hp(&self) -> u16 {
        self.stats.hp
    }

    pub fn current_hp(&self) -> u16 {
        self.current_hp
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    /// Current HP as a fraction of max HP.
    pub fn hp_fraction(&self) -> f64 {
        if self.stats.hp == 0 {
            return 0.0;
        }
        self.current_hp as f64 / self.stats.hp as f64
    }

    /// Apply damage, flooring HP at 0. Returns true if the creature fainted.
    pub fn take_damage(&mut self, damage: u16) -> bool {
        self.current_hp = self.current_hp.saturating_sub(damage);
        self.is_fainted()
    }

    /// Heal up to max HP. Returns the amount actually restored.
    pub fn heal(&mut self, amount: u16) -> u16 {
        let before = self.current_hp;
        self.current_hp = self.current_hp.saturating_add(amount).min(self.stats.hp);
        self.current_hp - before
    }

    /// Copy level, experience, stats and HP back onto the persisted record.
    pub fn write_back(&self, record: &mut CreatureRecord) {
        record.level = self.level;
        record.experience = self.experience;
        record.stats = self.stats;
        record.current_hp = self.current_hp.min(self.stats.hp);
    }
}
