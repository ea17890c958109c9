use super::RewardCalculator;
use crate::catalog::get_species_by_id;
use crate::creature::BattleCreature;
use crate::errors::CatalogResult;
use schema::{EvolutionMethod, SpeciesData};

/// The species `species` evolves into once it has reached `level`, if any.
///
/// Only level triggers count; content without a trigger level never evolves.
pub fn evolution_target(species: &SpeciesData, level: u8) -> Option<u16> {
    let evolution = species.evolution?;
    match evolution.method {
        EvolutionMethod::Level(required) if required > 0 && level >= required => {
            Some(evolution.into)
        }
        _ => None,
    }
}

impl RewardCalculator {
    /// Check if a creature is ready to evolve at its current level.
    /// Returns the species it would evolve into, or None.
    pub fn should_evolve(&self, creature: &BattleCreature) -> CatalogResult<Option<u16>> {
        let species = get_species_by_id(creature.species_id)?;
        Ok(evolution_target(species, creature.level))
    }
}
