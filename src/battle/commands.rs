use crate::battle::state::{BattleEvent, BattlePhase, BattleState, EventBus, Side};

pub const PUMP_METER_MAX: u8 = 100;

/// Atomic commands representing final state changes
#[derive(Debug, Clone, PartialEq)]
pub enum BattleCommand {
    // Direct state changes
    SetPhase(BattlePhase),
    IncrementTurnNumber,

    // Creature modifications
    DealDamage { target: Side, amount: u16 },
    HealCreature { target: Side, amount: u16 },

    // Player-side meters
    RaisePumpMeter { amount: u8 },

    // Battle flow
    EmitEvent(BattleEvent),
}

/// Execute a batch of commands in order
pub fn execute_command_batch(commands: Vec<BattleCommand>, state: &mut BattleState, bus: &mut EventBus) {
    for command in commands {
        execute_command(command, state, bus);
    }
}

fn execute_deal_damage_command(target: Side, amount: u16, state: &mut BattleState, bus: &mut EventBus) {
    let creature = state.creature_mut(target);
    let did_faint = creature.take_damage(amount);

    bus.push(BattleEvent::DamageDealt {
        target,
        damage: amount,
        remaining_hp: creature.current_hp(),
        max_hp: creature.max_hp(),
    });

    if did_faint {
        bus.push(BattleEvent::PokememeFainted {
            side: target,
            name: creature.name.clone(),
        });
    }
}

fn execute_command(command: BattleCommand, state: &mut BattleState, bus: &mut EventBus) {
    match command {
        BattleCommand::EmitEvent(event) => bus.push(event),
        BattleCommand::SetPhase(phase) => state.phase = phase,
        BattleCommand::IncrementTurnNumber => state.turn_number += 1,
        BattleCommand::DealDamage { target, amount } => {
            execute_deal_damage_command(target, amount, state, bus)
        }
        BattleCommand::HealCreature { target, amount } => {
            let creature = state.creature_mut(target);
            let healed = creature.heal(amount);
            bus.push(BattleEvent::PokememeHealed {
                side: target,
                name: creature.name.clone(),
                amount: healed,
                new_hp: creature.current_hp(),
                max_hp: creature.max_hp(),
            });
        }
        BattleCommand::RaisePumpMeter { amount } => {
            state.pump_meter = state.pump_meter.saturating_add(amount).min(PUMP_METER_MAX);
            bus.push(BattleEvent::PumpMeterChanged {
                value: state.pump_meter,
            });
        }
    }
}
