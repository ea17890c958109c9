//! Read-only species and encounter content, compiled in by the build script.
//!
//! The RON files under `data/` are validated and encoded with postcard at build
//! time. Lookups go through `phf` maps generated alongside the blobs.

use crate::errors::{CatalogError, CatalogResult};
use schema::{EncounterPool, SpeciesData};
use std::sync::LazyLock;
use tracing::{error, warn};

include!(concat!(env!("OUT_DIR"), "/catalog_index.rs"));

static SPECIES_BLOB: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/species.postcard"));
static ENCOUNTER_BLOB: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/encounters.postcard"));

static SPECIES: LazyLock<CatalogResult<Vec<SpeciesData>>> =
    LazyLock::new(|| decode_blob(SPECIES_BLOB, "species"));

static ENCOUNTERS: LazyLock<CatalogResult<Vec<EncounterPool>>> =
    LazyLock::new(|| decode_blob(ENCOUNTER_BLOB, "encounter pools"));

fn decode_blob<T: serde::de::DeserializeOwned>(bytes: &[u8], what: &str) -> CatalogResult<T> {
    postcard::from_bytes(bytes).map_err(|e| {
        error!("Embedded {} data is corrupt: {}", what, e);
        CatalogError::MalformedData(format!("{}: {}", what, e))
    })
}

/// Every species, ordered by id.
pub fn all_species() -> CatalogResult<&'static [SpeciesData]> {
    SPECIES.as_ref().map(Vec::as_slice).map_err(Clone::clone)
}

/// Look up a species by id. Unknown ids are reported, never substituted.
pub fn get_species_by_id(id: u16) -> CatalogResult<&'static SpeciesData> {
    let species = all_species()?;
    SPECIES_INDEX
        .get(&id)
        .and_then(|&index| species.get(index))
        .ok_or(CatalogError::SpeciesNotFound(id))
}

/// Look up `id`, substituting `fallback` when it is missing.
///
/// The substitution is logged. A missing fallback is still an error.
pub fn species_or_fallback(id: u16, fallback: u16) -> CatalogResult<&'static SpeciesData> {
    match get_species_by_id(id) {
        Ok(data) => Ok(data),
        Err(CatalogError::SpeciesNotFound(_)) => {
            warn!(
                "Species #{:03} is not in the catalog, substituting #{:03}",
                id, fallback
            );
            get_species_by_id(fallback)
        }
        Err(err) => Err(err),
    }
}

/// The encounter pool for a map area.
pub fn encounter_pool(area: &str) -> CatalogResult<&'static EncounterPool> {
    let pools = ENCOUNTERS.as_ref().map_err(Clone::clone)?;
    AREA_INDEX
        .get(area)
        .and_then(|&index| pools.get(index))
        .ok_or_else(|| CatalogError::AreaNotFound(area.to_string()))
}

/// Names of every area with an encounter pool, in content order.
pub fn area_names() -> CatalogResult<Vec<&'static str>> {
    let pools = ENCOUNTERS.as_ref().map_err(Clone::clone)?;
    Ok(pools.iter().map(|pool| pool.area.as_str()).collect())
}
