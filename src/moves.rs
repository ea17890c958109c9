use crate::creature::MOVE_SLOTS;
use schema::{MoveData, SpeciesData};

/// Build the battle move list for a creature from its persisted move slots.
///
/// The species signature move always comes first. Every other filled slot
/// becomes a basic attack of the species' primary type, up to four moves total.
pub fn moves_for_slots(species: &SpeciesData, slots: &[Option<String>]) -> Vec<MoveData> {
    let signature = &species.signature_move;
    let basic_type = species.primary_type();

    std::iter::once(signature.clone())
        .chain(
            slots
                .iter()
                .flatten()
                .filter(|slug| slug.as_str() != signature.name)
                .map(|slug| MoveData::basic_attack(slug, basic_type)),
        )
        .take(MOVE_SLOTS)
        .collect()
}
