use schema::{EncounterPool, EvolutionMethod, SpeciesData};
use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::Path;

const MEMES_DIR: &str = "data/memes";
const ENCOUNTERS_FILE: &str = "data/encounters.ron";

fn main() {
    println!("cargo:rerun-if-changed={}", MEMES_DIR);
    println!("cargo:rerun-if-changed={}", ENCOUNTERS_FILE);

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let out_dir = Path::new(&out_dir);

    let species = load_species(Path::new(MEMES_DIR));
    let pools = load_pools(Path::new(ENCOUNTERS_FILE));

    validate_species(&species);
    validate_pools(&pools, &species);

    let species_bytes = postcard::to_allocvec(&species).expect("Failed to encode species");
    fs::write(out_dir.join("species.postcard"), species_bytes)
        .expect("Failed to write species blob");

    let pool_bytes = postcard::to_allocvec(&pools).expect("Failed to encode encounter pools");
    fs::write(out_dir.join("encounters.postcard"), pool_bytes)
        .expect("Failed to write encounter blob");

    fs::write(
        out_dir.join("catalog_index.rs"),
        generate_index_source(&species, &pools),
    )
    .expect("Failed to write catalog index");
}

fn load_species(dir: &Path) -> Vec<SpeciesData> {
    let mut paths: Vec<_> = fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", dir.display(), e))
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "ron"))
        .collect();
    paths.sort();

    let mut species: Vec<SpeciesData> = paths
        .iter()
        .map(|path| {
            println!("cargo:rerun-if-changed={}", path.display());
            let content = fs::read_to_string(path)
                .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
            ron::from_str(&content)
                .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e))
        })
        .collect();

    species.sort_by_key(|data| data.id);
    species
}

fn load_pools(path: &Path) -> Vec<EncounterPool> {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
    ron::from_str(&content).unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e))
}

fn validate_species(species: &[SpeciesData]) {
    let mut seen = HashSet::new();
    for data in species {
        assert!(data.id > 0, "Species {} has a non-positive id", data.name);
        assert!(seen.insert(data.id), "Duplicate species id {}", data.id);
        assert!(
            (1..=2).contains(&data.types.len()),
            "Species {} must have one or two types",
            data.id
        );
        assert!(
            data.base_stats.as_array().iter().all(|&stat| stat > 0),
            "Species {} has a zero base stat",
            data.id
        );
        assert!(
            data.signature_move.is_signature,
            "Species {} signature move is not flagged as a signature",
            data.id
        );
    }

    for data in species {
        if let Some(evolution) = &data.evolution {
            assert!(
                seen.contains(&evolution.into),
                "Species {} evolves into unknown species {}",
                data.id,
                evolution.into
            );
            if let EvolutionMethod::Level(level) = evolution.method {
                assert!(
                    (1..=100).contains(&level),
                    "Species {} has evolution level {} out of range",
                    data.id,
                    level
                );
            }
        }
    }
}

fn validate_pools(pools: &[EncounterPool], species: &[SpeciesData]) {
    let known: HashSet<u16> = species.iter().map(|data| data.id).collect();
    let mut areas = HashSet::new();

    for pool in pools {
        assert!(areas.insert(pool.area.as_str()), "Duplicate area {}", pool.area);
        assert!(!pool.entries.is_empty(), "Area {} has no entries", pool.area);
        assert!(pool.total_weight() > 0, "Area {} has zero total weight", pool.area);

        for entry in &pool.entries {
            assert!(
                known.contains(&entry.species_id),
                "Area {} references unknown species {}",
                pool.area,
                entry.species_id
            );
            assert!(
                entry.min_level >= 1 && entry.min_level <= entry.max_level,
                "Area {} has an invalid level range {}..={} for species {}",
                pool.area,
                entry.min_level,
                entry.max_level,
                entry.species_id
            );
            assert!(
                entry.max_level <= 100,
                "Area {} lets species {} appear above level 100",
                pool.area,
                entry.species_id
            );
        }
    }
}

fn generate_index_source(species: &[SpeciesData], pools: &[EncounterPool]) -> String {
    let mut species_map = phf_codegen::Map::new();
    for (index, data) in species.iter().enumerate() {
        species_map.entry(data.id, &index.to_string());
    }

    let mut area_map = phf_codegen::Map::new();
    for (index, pool) in pools.iter().enumerate() {
        area_map.entry(pool.area.as_str(), &index.to_string());
    }

    format!(
        "static SPECIES_INDEX: phf::Map<u16, usize> = {};\n\nstatic AREA_INDEX: phf::Map<&'static str, usize> = {};\n",
        species_map.build(),
        area_map.build()
    )
}
