use super::GameStore;
use crate::catalog::{get_species_by_id, species_or_fallback};
use crate::config::GameConfig;
use crate::creature::{BattleCreature, CreatureRecord};
use crate::errors::BattleResult;
use tracing::warn;

/// Per-player context owned by the application loop and lent to each battle.
pub struct SessionContext {
    pub player_id: String,
    pub config: GameConfig,
    pub store: Box<dyn GameStore>,
}

/// The creature the player sends into battle, with the record it came from.
#[derive(Debug, Clone)]
pub struct ActiveCreature {
    /// `None` for the fallback starter, which is never persisted.
    pub record: Option<CreatureRecord>,
    pub creature: BattleCreature,
}

impl SessionContext {
    pub fn new(player_id: impl Into<String>, config: GameConfig, store: Box<dyn GameStore>) -> Self {
        Self {
            player_id: player_id.into(),
            config,
            store,
        }
    }

    /// Party slot 0 as a battle creature.
    ///
    /// An empty party gets a throwaway fallback starter instead, logged as a warning.
    pub fn active_creature(&self) -> BattleResult<ActiveCreature> {
        let party = self.store.read_party(&self.player_id)?;

        match party.into_iter().next() {
            Some(record) => {
                let species = species_or_fallback(record.species_id, self.config.fallback_species)?;
                let creature = BattleCreature::from_record(&record, species);
                Ok(ActiveCreature {
                    record: Some(record),
                    creature,
                })
            }
            None => {
                warn!(
                    "Player {} has no party, using fallback starter #{:03}",
                    self.player_id, self.config.fallback_species
                );
                let species = get_species_by_id(self.config.fallback_species)?;
                Ok(ActiveCreature {
                    record: None,
                    creature: BattleCreature::wild(species, self.config.starter_level),
                })
            }
        }
    }

    /// Number of creatures currently in the party.
    pub fn party_size(&self) -> BattleResult<usize> {
        Ok(self.store.read_party(&self.player_id)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{create_guest_profile, MemoryStore};
    use tracing_test::traced_test;

    #[test]
    fn test_active_creature_comes_from_slot_zero() {
        let config = GameConfig::default();
        let mut store = MemoryStore::new();
        let starter = create_guest_profile(&mut store, "ash", 4, &config).unwrap();
        let ctx = SessionContext::new("ash", config, Box::new(store));

        let active = ctx.active_creature().unwrap();

        assert_eq!(active.record.as_ref().map(|r| r.id), Some(starter.id));
        assert_eq!(active.creature.record_id, Some(starter.id));
        assert_eq!(active.creature.name, "Bonkander");
    }

    #[traced_test]
    #[test]
    fn test_empty_party_falls_back_with_warning() {
        let ctx = SessionContext::new("nobody", GameConfig::default(), Box::new(MemoryStore::new()));

        let active = ctx.active_creature().unwrap();

        assert!(active.record.is_none());
        assert_eq!(active.creature.species_id, 1);
        assert_eq!(active.creature.level, 5);
        assert!(logs_contain("has no party, using fallback starter #001"));
    }
}
