use crate::battle::state::BattlePhase;
use crate::items::ItemId;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// Main error type for the PokeMeme battle engine
#[derive(Debug, Error)]
pub enum BattleEngineError {
    /// Error related to species or encounter content lookup
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    /// Error related to invalid player actions
    #[error("{0}")]
    Action(#[from] ActionError),
    /// Error reported by the persistence layer
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    /// Error loading the game configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to the embedded species and encounter content
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The specified species was not found in the catalog
    #[error("Species not found: #{0:03}")]
    SpeciesNotFound(u16),
    /// No encounter pool is defined for the area
    #[error("No encounter pool for area '{0}'")]
    AreaNotFound(String),
    /// Embedded content could not be decoded
    #[error("Malformed catalog data: {0}")]
    MalformedData(String),
}

/// Errors related to player actions. The messages are shown to the player as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Move index is out of bounds for the active creature
    #[error("There is no move in slot {0}!")]
    InvalidMoveIndex(usize),
    /// The item slug does not name a known item
    #[error("There is no item called '{0}'!")]
    UnknownItem(String),
    /// Inventory has no row or a zero quantity for the item
    #[error("You don't have any!")]
    ItemUnavailable(ItemId),
    /// The item cannot be used in the current situation
    #[error("It won't have any effect.")]
    NoEffect(ItemId),
    /// The battle is not waiting for a player action
    #[error("The battle is not accepting actions while in {0:?}")]
    NotAcceptingActions(BattlePhase),
    /// Nothing is waiting for acknowledgment
    #[error("There is no level-up waiting to be acknowledged")]
    NoLevelUpPending,
}

/// Errors reported by a `GameStore` implementation
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not encode or decode save data: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("No creature record with id {0}")]
    CreatureNotFound(Uuid),
    #[error("Cannot remove {requested} {item}, only {held} held")]
    InsufficientQuantity {
        item: ItemId,
        held: u32,
        requested: u32,
    },
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Errors loading a `GameConfig`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results using CatalogError
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Type alias for Results using StoreError
pub type StoreResult<T> = Result<T, StoreError>;
