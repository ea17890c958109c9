use crate::creature::BattleCreature;
use crate::items::ItemId;
use crate::progression::StatIncreases;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    Intro,
    Action,
    Executing,
    LevelUp, // Victory reached, waiting for the player to acknowledge the level-up
    Victory,
    Defeat,
    Caught,
    Escaped,
}

impl BattlePhase {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            BattlePhase::Victory | BattlePhase::Defeat | BattlePhase::Caught | BattlePhase::Escaped
        )
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleKind {
    Wild,
    Trainer,
}

/// Which side of the field an effect applies to
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Intro
    OpponentAppeared {
        name: String,
        kind: BattleKind,
    },
    PlayerSentOut {
        name: String,
    },
    AwaitingAction,

    // Attacks
    MoveUsed {
        side: Side,
        pokememe: String,
        move_name: String,
    },
    CriticalHit {
        side: Side,
    },
    AttackTypeEffectiveness {
        multiplier: f64,
    },
    DamageDealt {
        target: Side,
        damage: u16,
        remaining_hp: u16,
        max_hp: u16,
    },
    PumpMeterChanged {
        value: u8,
    },
    PokememeFainted {
        side: Side,
        name: String,
    },

    // Progression
    ExperienceGained {
        name: String,
        amount: u32,
    },
    ExperienceChanged {
        current: u32,
        threshold: u32,
    },
    LeveledUp {
        name: String,
        new_level: u8,
        increases: StatIncreases,
    },
    EvolutionReady {
        name: String,
        into: String,
    },

    // Items and capture
    CaptureDeviceThrown {
        item: ItemId,
    },
    CatchAttempted {
        probability: f64,
    },
    CatchSucceeded {
        name: String,
    },
    CatchFailed {
        name: String,
    },
    CatchBlocked,
    PokememeHealed {
        side: Side,
        name: String,
        amount: u16,
        new_hp: u16,
        max_hp: u16,
    },

    // Fleeing
    FleeSucceeded,
    FleeFailed,
    FleeBlocked,

    BattleEnded {
        won: bool,
    },
}

impl BattleEvent {
    /// Formats the event into the text shown to the player.
    /// Returns None for events that only drive HP/XP bars or other signals.
    pub fn format(&self) -> Option<String> {
        match self {
            BattleEvent::OpponentAppeared { name, kind } => match kind {
                BattleKind::Wild => Some(format!("A wild {} appeared!", name)),
                BattleKind::Trainer => Some(format!("The trainer sent out {}!", name)),
            },
            BattleEvent::PlayerSentOut { name } => Some(format!("Go, {}!", name)),
            BattleEvent::AwaitingAction => Some("What will you do?".to_string()),

            BattleEvent::MoveUsed {
                pokememe,
                move_name,
                ..
            } => Some(format!("{} used {}!", pokememe, move_name)),
            BattleEvent::CriticalHit { .. } => Some("A critical hit!".to_string()),
            BattleEvent::AttackTypeEffectiveness { multiplier } => match *multiplier {
                m if m > 1.0 => Some("It's super effective!".to_string()),
                m if m < 1.0 && m > 0.0 => Some("It's not very effective...".to_string()),
                0.0 => Some("It had no effect!".to_string()),
                _ => None, // Normal effectiveness, no message
            },
            BattleEvent::DamageDealt { .. } => None,
            BattleEvent::PumpMeterChanged { .. } => None,
            BattleEvent::PokememeFainted { name, .. } => Some(format!("{} fainted!", name)),

            BattleEvent::ExperienceGained { name, amount } => {
                Some(format!("{} gained {} EXP!", name, amount))
            }
            BattleEvent::ExperienceChanged { .. } => None,
            BattleEvent::LeveledUp {
                name, new_level, ..
            } => Some(format!("{} grew to level {}!", name, new_level)),
            BattleEvent::EvolutionReady { name, into } => {
                Some(format!("{} is ready to evolve into {}!", name, into))
            }

            BattleEvent::CaptureDeviceThrown { item } => {
                Some(format!("You threw a {}!", item.display_name()))
            }
            BattleEvent::CatchAttempted { .. } => None,
            BattleEvent::CatchSucceeded { name } => {
                Some(format!("{} was added to your team!", name))
            }
            BattleEvent::CatchFailed { name } => Some(format!("{} broke free!", name)),
            BattleEvent::CatchBlocked => Some("You can't catch a trainer's PokeMeme!".to_string()),
            BattleEvent::PokememeHealed { name, amount, .. } => {
                Some(format!("{} recovered {} HP!", name, amount))
            }

            BattleEvent::FleeSucceeded => Some("Got away safely!".to_string()),
            BattleEvent::FleeFailed => Some("Couldn't get away!".to_string()),
            BattleEvent::FleeBlocked => Some("Can't run from a trainer battle!".to_string()),

            BattleEvent::BattleEnded { .. } => None,
        }
    }
}

/// Ordered log of the events produced while resolving one step of a battle.
///
/// ```ignore
/// let mut event_bus = EventBus::new();
/// event_bus.push(BattleEvent::AwaitingAction);
/// event_bus.print_formatted();
/// println!("{}", event_bus); // Debug view of every event
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<BattleEvent> {
        self.events
    }

    /// The player-facing lines, skipping silent events.
    pub fn messages(&self) -> Vec<String> {
        self.events.iter().filter_map(BattleEvent::format).collect()
    }

    /// Print all events in debug format with indentation.
    pub fn print_debug(&self) {
        for event in &self.events {
            println!("  {:?}", event);
        }
    }

    /// Print all events using their formatted text, falling back to debug format for silent events.
    pub fn print_formatted(&self) {
        for event in &self.events {
            match event.format() {
                Some(formatted) => println!("  {}", formatted),
                None => println!("  {:?} (silent)", event),
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl std::fmt::Display for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

/// Source of every random draw in a battle.
///
/// Seeded for real play; scripted with unit draws in `[0, 1)` for tests.
#[derive(Debug, Clone)]
pub enum BattleRng {
    Seeded(StdRng),
    Scripted { draws: Vec<f64>, index: usize },
}

impl BattleRng {
    pub fn seeded(seed: u64) -> Self {
        BattleRng::Seeded(StdRng::seed_from_u64(seed))
    }

    pub fn new_random() -> Self {
        BattleRng::Seeded(StdRng::from_os_rng())
    }

    pub fn new_for_test(draws: Vec<f64>) -> Self {
        BattleRng::Scripted { draws, index: 0 }
    }

    /// A uniform draw in `[0, 1)`.
    pub fn next_unit(&mut self, reason: &str) -> f64 {
        match self {
            BattleRng::Seeded(rng) => rng.random::<f64>(),
            BattleRng::Scripted { draws, index } => {
                if *index >= draws.len() {
                    panic!(
                        "BattleRng exhausted! Tried to get a value for: '{}'. Need more scripted draws.",
                        reason
                    );
                }
                let draw = draws[*index];

                #[cfg(test)]
                println!("[RNG] Consumed {} for: {}", draw, reason);

                *index += 1;
                draw
            }
        }
    }

    /// A uniform integer in `[low, high]`, built from one unit draw.
    pub fn range_inclusive(&mut self, low: u64, high: u64, reason: &str) -> u64 {
        if high <= low {
            return low;
        }
        let span = (high - low) as f64 + 1.0;
        let offset = (self.next_unit(reason) * span).floor() as u64;
        low + offset.min(high - low)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BattleState {
    pub battle_id: Uuid,
    pub kind: BattleKind,
    pub phase: BattlePhase,
    pub player: BattleCreature,
    pub enemy: BattleCreature,
    pub pump_meter: u8,
    pub turn_number: u32,
}

impl BattleState {
    pub fn new(kind: BattleKind, player: BattleCreature, enemy: BattleCreature) -> Self {
        Self {
            battle_id: Uuid::new_v4(),
            kind,
            phase: BattlePhase::Intro,
            player,
            enemy,
            pump_meter: 0,
            turn_number: 1,
        }
    }

    pub fn creature(&self, side: Side) -> &BattleCreature {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    pub fn creature_mut(&mut self, side: Side) -> &mut BattleCreature {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }
}
