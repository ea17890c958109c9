use crate::battle::ai::{Behavior, RandomAI};
use crate::battle::engine::{self, TurnAction};
use crate::battle::state::{BattleEvent, BattleKind, BattlePhase, BattleRng, BattleState};
use crate::catalog::species_or_fallback;
use crate::creature::{BattleCreature, CreatureRecord, MAX_LEVEL, PARTY_SIZE};
use crate::encounters::Encounter;
use crate::errors::{ActionError, BattleResult, StoreError};
use crate::items::{ItemId, ItemKind};
use crate::persistence::SessionContext;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{info, warn};
use uuid::Uuid;

/// What the player asks their creature to do on their turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    UseMove { index: usize },
    UseItem { item: String },
    Flee,
}

/// The opponent to generate for a new battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentSpec {
    pub species_id: u16,
    pub level: u8,
}

impl From<Encounter> for OpponentSpec {
    fn from(encounter: Encounter) -> Self {
        Self {
            species_id: encounter.species_id,
            level: encounter.level,
        }
    }
}

/// Result reported once a battle reaches a terminal phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleOutcome {
    pub won: bool,
    pub phase: BattlePhase,
    /// Record created for a caught opponent, if the store accepted it.
    pub caught_record: Option<Uuid>,
}

/// High-level driver for one battle session.
///
/// Owns the battle state and its randomness, validates player input, and
/// commits results to the session's store when the battle ends.
pub struct BattleRunner {
    state: BattleState,
    rng: BattleRng,
    enemy_ai: Box<dyn Behavior>,
    player_record: Option<CreatureRecord>,
    event_history: Vec<BattleEvent>,
    persistence_errors: Vec<StoreError>,
    outcome: Option<BattleOutcome>,
}

impl BattleRunner {
    /// Set up a battle between the session's active creature and a freshly generated opponent.
    ///
    /// The opponent's species is marked seen. The battle starts in `Intro`.
    pub fn start(
        ctx: &mut SessionContext,
        opponent: OpponentSpec,
        kind: BattleKind,
        rng: BattleRng,
    ) -> BattleResult<Self> {
        let active = ctx.active_creature()?;
        let species = species_or_fallback(opponent.species_id, ctx.config.fallback_species)?;
        let enemy = BattleCreature::wild(species, opponent.level.clamp(1, MAX_LEVEL));

        let mut runner = Self {
            state: BattleState::new(kind, active.creature, enemy),
            rng,
            enemy_ai: Box::new(RandomAI::new()),
            player_record: active.record,
            event_history: Vec::new(),
            persistence_errors: Vec::new(),
            outcome: None,
        };

        if let Err(e) = ctx
            .store
            .mark_completion(&ctx.player_id, species.id, true, false)
        {
            runner.record_store_failure("mark species seen", e);
        }

        info!(
            "Battle {} started: {} (Lv{}) vs {:?} {} (Lv{})",
            runner.state.battle_id,
            runner.state.player.name,
            runner.state.player.level,
            kind,
            runner.state.enemy.name,
            runner.state.enemy.level
        );

        Ok(runner)
    }

    /// Replace the enemy's move selection strategy.
    pub fn with_enemy_ai(mut self, enemy_ai: Box<dyn Behavior>) -> Self {
        self.enemy_ai = enemy_ai;
        self
    }

    /// Play the reveal sequence and open the action menu.
    pub fn advance_intro(&mut self) -> Result<Vec<BattleEvent>, ActionError> {
        if self.state.phase != BattlePhase::Intro {
            return Err(ActionError::NotAcceptingActions(self.state.phase));
        }
        let bus = engine::run_intro(&mut self.state);
        Ok(self.record_events(bus.into_events()))
    }

    /// Validate and resolve one player action.
    ///
    /// Invalid input is rejected without touching the battle or the store.
    pub fn submit_action(
        &mut self,
        ctx: &mut SessionContext,
        action: PlayerAction,
    ) -> BattleResult<Vec<BattleEvent>> {
        if self.state.phase != BattlePhase::Action {
            return Err(ActionError::NotAcceptingActions(self.state.phase).into());
        }

        let turn_action = match action {
            PlayerAction::UseMove { index } => {
                if index >= self.state.player.moves.len() {
                    return Err(ActionError::InvalidMoveIndex(index).into());
                }
                TurnAction::Attack { move_index: index }
            }
            PlayerAction::UseItem { item } => self.prepare_item(ctx, &item)?,
            PlayerAction::Flee => TurnAction::Flee,
        };

        let bus = engine::resolve_turn(
            &mut self.state,
            turn_action,
            self.enemy_ai.as_ref(),
            &mut self.rng,
        );

        if self.state.phase.is_terminal() {
            self.finish(ctx);
        }

        Ok(self.record_events(bus.into_events()))
    }

    /// Finalize a victory that paused for a level-up.
    pub fn acknowledge_level_up(&mut self, ctx: &mut SessionContext) -> BattleResult<Vec<BattleEvent>> {
        if self.state.phase != BattlePhase::LevelUp {
            return Err(ActionError::NoLevelUpPending.into());
        }
        let bus = engine::acknowledge_level_up(&mut self.state);
        self.finish(ctx);
        Ok(self.record_events(bus.into_events()))
    }

    /// Check the inventory and consume the item where the rules say so.
    fn prepare_item(&mut self, ctx: &mut SessionContext, slug: &str) -> BattleResult<TurnAction> {
        let item = ItemId::from_str(slug)?;

        let held = ctx
            .store
            .read_inventory(&ctx.player_id)?
            .get(&item)
            .copied()
            .unwrap_or(0);
        if held == 0 {
            return Err(ActionError::ItemUnavailable(item).into());
        }

        match item.kind() {
            ItemKind::CaptureDevice => {
                // A refused throw in a trainer battle costs nothing.
                if self.state.kind == BattleKind::Wild {
                    ctx.store.adjust_inventory(&ctx.player_id, item, -1)?;
                }
                Ok(TurnAction::ThrowDevice { device: item })
            }
            ItemKind::Healing(amount) => {
                ctx.store.adjust_inventory(&ctx.player_id, item, -1)?;
                Ok(TurnAction::Heal { amount })
            }
            ItemKind::Revive => Err(ActionError::NoEffect(item).into()),
        }
    }

    /// Commit the terminal result. Store failures are kept, never undone.
    fn finish(&mut self, ctx: &mut SessionContext) {
        if self.outcome.is_some() {
            return;
        }

        if let Some(record) = self.player_record.as_mut() {
            self.state.player.write_back(record);
            if let Err(e) = ctx.store.write_creature(record) {
                self.record_store_failure("save player creature", e);
            }
        }

        let caught_record = if self.state.phase == BattlePhase::Caught {
            self.store_capture(ctx)
        } else {
            None
        };

        let won = matches!(self.state.phase, BattlePhase::Victory | BattlePhase::Caught);
        info!(
            "Battle {} ended in {:?} (won: {})",
            self.state.battle_id, self.state.phase, won
        );

        self.outcome = Some(BattleOutcome {
            won,
            phase: self.state.phase,
            caught_record,
        });
    }

    fn store_capture(&mut self, ctx: &mut SessionContext) -> Option<Uuid> {
        let party_size = match ctx.store.read_party(&ctx.player_id) {
            Ok(party) => party.len(),
            Err(e) => {
                self.record_store_failure("read party", e);
                PARTY_SIZE
            }
        };
        let party_slot = (party_size < PARTY_SIZE).then_some(party_size as u8);

        let record = CreatureRecord::from_capture(&ctx.player_id, &self.state.enemy, party_slot);
        let record_id = record.id;

        if let Err(e) = ctx.store.append_creature(record) {
            self.record_store_failure("store caught creature", e);
            return None;
        }
        if let Err(e) = ctx.store.mark_completion(
            &ctx.player_id,
            self.state.enemy.species_id,
            true,
            true,
        ) {
            self.record_store_failure("mark species caught", e);
        }

        Some(record_id)
    }

    fn record_store_failure(&mut self, operation: &str, error: StoreError) {
        warn!(
            "Battle {}: could not {}: {}",
            self.state.battle_id, operation, error
        );
        self.persistence_errors.push(error);
    }

    fn record_events(&mut self, events: Vec<BattleEvent>) -> Vec<BattleEvent> {
        self.event_history.extend(events.iter().cloned());
        events
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn phase(&self) -> BattlePhase {
        self.state.phase
    }

    pub fn outcome(&self) -> Option<&BattleOutcome> {
        self.outcome.as_ref()
    }

    /// True once the result has been committed and the session can be torn down.
    pub fn is_closed(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn pump_meter(&self) -> u8 {
        self.state.pump_meter
    }

    /// Every event produced so far, oldest first.
    pub fn events(&self) -> &[BattleEvent] {
        &self.event_history
    }

    pub fn persistence_errors(&self) -> &[StoreError] {
        &self.persistence_errors
    }
}
