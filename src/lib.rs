//! PokeMeme Battle Engine
//!
//! The rules core of a meme-themed catch-and-battle game: species catalog,
//! damage and type effectiveness, weighted wild encounters, experience and
//! level-ups, and a turn-based battle session that commits its result to a
//! pluggable store.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod catalog;
pub mod config;
pub mod creature;
pub mod encounters;
pub mod errors;
pub mod items;
pub mod moves;
pub mod persistence;
pub mod progression;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    BaseStats, EncounterEntry, EncounterPool, Evolution, EvolutionMethod, MemeType, MoveCategory,
    MoveData, SpeciesData,
};

// --- From this crate's modules (`src/`) ---

// Battle sessions and their events.
pub use battle::runner::{BattleOutcome, BattleRunner, OpponentSpec, PlayerAction};
pub use battle::state::{BattleEvent, BattleKind, BattlePhase, BattleRng, BattleState};

// Calculators usable outside a session.
pub use battle::calculators::{effectiveness_of, resolve_attack, AttackOutcome};
pub use battle::catch::calculate_catch_probability;
pub use battle::flee::calculate_flee_probability;
pub use encounters::{pick_encounter, Encounter};
pub use progression::{apply_experience, evolution_target, xp_threshold, RewardCalculator};

// Content, creatures and persistence.
pub use catalog::{encounter_pool, get_species_by_id, species_or_fallback};
pub use config::GameConfig;
pub use creature::{BattleCreature, CreatureRecord, StatBlock};
pub use items::{ItemId, ItemKind};
pub use persistence::{GameStore, LocalStore, MemoryStore, SessionContext};

// Crate-specific error and result types.
pub use errors::{
    ActionError, BattleEngineError, BattleResult, CatalogError, CatalogResult, ConfigError,
    StoreError, StoreResult,
};
