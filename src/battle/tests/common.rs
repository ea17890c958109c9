use crate::battle::runner::{BattleRunner, OpponentSpec};
use crate::battle::state::{BattleEvent, BattleKind, BattlePhase, BattleRng, BattleState, Side};
use crate::catalog::get_species_by_id;
use crate::config::GameConfig;
use crate::creature::{BattleCreature, CreatureRecord};
use crate::errors::{BattleResult, StoreError, StoreResult};
use crate::items::ItemId;
use crate::moves::moves_for_slots;
use crate::persistence::{Completion, GameStore, Inventory, MemoryStore, SessionContext};
use uuid::Uuid;

pub const PLAYER_ID: &str = "test-player";

/// A builder for creating test creatures with common defaults.
///
/// # Example
/// ```ignore
/// let creature = TestCreatureBuilder::new(7, 5)
///     .with_speed(200)
///     .with_hp(1)
///     .build();
/// ```
pub struct TestCreatureBuilder {
    species_id: u16,
    level: u8,
    current_hp: Option<u16>,
    max_hp: Option<u16>,
    speed: Option<u16>,
    experience: u32,
    move_slots: Option<Vec<Option<String>>>,
}

impl TestCreatureBuilder {
    /// Creates a new builder for a given species and level.
    pub fn new(species_id: u16, level: u8) -> Self {
        Self {
            species_id,
            level,
            current_hp: None,
            max_hp: None,
            speed: None,
            experience: 0,
            move_slots: None,
        }
    }

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    /// Overrides the max HP stat.
    pub fn with_max_hp(mut self, max_hp: u16) -> Self {
        self.max_hp = Some(max_hp);
        self
    }

    pub fn with_speed(mut self, speed: u16) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn with_experience(mut self, experience: u32) -> Self {
        self.experience = experience;
        self
    }

    /// Persisted move slugs; the signature move is always added first.
    pub fn with_moves(mut self, slugs: &[&str]) -> Self {
        self.move_slots = Some(slugs.iter().map(|slug| Some(slug.to_string())).collect());
        self
    }

    pub fn build(self) -> BattleCreature {
        let species = match get_species_by_id(self.species_id) {
            Ok(data) => data,
            Err(err) => panic!(
                "Failed to load species data for #{:03}: {}",
                self.species_id, err
            ),
        };

        let mut creature = BattleCreature::wild(species, self.level);
        if let Some(max_hp) = self.max_hp {
            creature.stats.hp = max_hp;
            creature.current_hp = max_hp;
        }
        if let Some(speed) = self.speed {
            creature.stats.speed = speed;
        }
        if let Some(slots) = self.move_slots {
            creature.moves = moves_for_slots(species, &slots);
        }
        if let Some(hp) = self.current_hp {
            creature.current_hp = hp.min(creature.stats.hp);
        }
        creature.experience = self.experience;
        creature
    }
}

/// Creates a wild battle already waiting for the player's first action.
pub fn create_test_battle(player: BattleCreature, enemy: BattleCreature) -> BattleState {
    let mut state = BattleState::new(BattleKind::Wild, player, enemy);
    state.phase = BattlePhase::Action;
    state
}

/// Same as [`create_test_battle`] against a trainer's creature.
pub fn create_trainer_battle(player: BattleCreature, enemy: BattleCreature) -> BattleState {
    let mut state = create_test_battle(player, enemy);
    state.kind = BattleKind::Trainer;
    state
}

/// Creates a `BattleRng` with a long list of middling draws.
/// Useful for tests where the specific outcome is not important, preventing panics from exhaustion.
/// A 0.5 draw never crits, never catches at full HP and gives a 0.925 damage factor.
pub fn predictable_rng() -> BattleRng {
    BattleRng::new_for_test(vec![0.5; 100])
}

/// Helper function to assert that a Result is Ok and return the value.
pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}

/// How many times `side` used a move in `events`.
pub fn count_moves_by(events: &[BattleEvent], side: Side) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, BattleEvent::MoveUsed { side: s, .. } if *s == side))
        .count()
}

/// Creates a session whose party holds one record per `(species, level)`, in slot order.
pub fn create_test_context(
    party: &[(u16, u8)],
    items: &[(ItemId, u32)],
) -> (SessionContext, Vec<CreatureRecord>) {
    let mut store = MemoryStore::new();
    let records = seed_store(&mut store, party, items);
    let ctx = SessionContext::new(PLAYER_ID, GameConfig::default(), Box::new(store));
    (ctx, records)
}

pub fn seed_store(
    store: &mut dyn GameStore,
    party: &[(u16, u8)],
    items: &[(ItemId, u32)],
) -> Vec<CreatureRecord> {
    let records: Vec<CreatureRecord> = party
        .iter()
        .enumerate()
        .map(|(slot, &(species_id, level))| {
            let species = get_species_by_id(species_id).unwrap();
            CreatureRecord::new(PLAYER_ID, species, level, Some(slot as u8))
        })
        .collect();

    for record in &records {
        store.append_creature(record.clone()).unwrap();
    }
    for &(item, quantity) in items {
        store.adjust_inventory(PLAYER_ID, item, quantity as i64).unwrap();
    }
    records
}

/// Starts a battle against `opponent` and plays the intro.
pub fn start_runner(
    ctx: &mut SessionContext,
    opponent: (u16, u8),
    kind: BattleKind,
    draws: Vec<f64>,
) -> BattleRunner {
    let (species_id, level) = opponent;
    let mut runner = assert_ok(BattleRunner::start(
        ctx,
        OpponentSpec { species_id, level },
        kind,
        BattleRng::new_for_test(draws),
    ));
    if let Err(err) = runner.advance_intro() {
        panic!("Intro failed: {}", err);
    }
    runner
}

/// Overwrites the stored HP of `record`.
pub fn set_stored_hp(ctx: &mut SessionContext, record: &CreatureRecord, hp: u16) {
    let mut updated = record.clone();
    updated.current_hp = hp;
    ctx.store.write_creature(&updated).unwrap();
}

pub fn held(ctx: &SessionContext, item: ItemId) -> u32 {
    ctx.store
        .read_inventory(PLAYER_ID)
        .unwrap()
        .get(&item)
        .copied()
        .unwrap_or(0)
}

/// A store whose creature writes fail, as if the backend went away mid-battle.
pub struct FailingStore {
    inner: MemoryStore,
}

impl FailingStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self { inner }
    }

    fn offline<T>() -> StoreResult<T> {
        Err(StoreError::Unavailable("backend offline".to_string()))
    }
}

impl GameStore for FailingStore {
    fn read_party(&self, player_id: &str) -> StoreResult<Vec<CreatureRecord>> {
        self.inner.read_party(player_id)
    }

    fn read_creature(&self, id: Uuid) -> StoreResult<CreatureRecord> {
        self.inner.read_creature(id)
    }

    fn write_creature(&mut self, _record: &CreatureRecord) -> StoreResult<()> {
        Self::offline()
    }

    fn append_creature(&mut self, _record: CreatureRecord) -> StoreResult<()> {
        Self::offline()
    }

    fn read_inventory(&self, player_id: &str) -> StoreResult<Inventory> {
        self.inner.read_inventory(player_id)
    }

    fn adjust_inventory(&mut self, player_id: &str, item: ItemId, delta: i64) -> StoreResult<u32> {
        self.inner.adjust_inventory(player_id, item, delta)
    }

    fn read_completion(&self, player_id: &str) -> StoreResult<Completion> {
        self.inner.read_completion(player_id)
    }

    fn mark_completion(
        &mut self,
        player_id: &str,
        species_id: u16,
        seen: bool,
        caught: bool,
    ) -> StoreResult<()> {
        self.inner.mark_completion(player_id, species_id, seen, caught)
    }
}
