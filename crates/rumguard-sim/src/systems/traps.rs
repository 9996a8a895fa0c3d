//! Trap system: armed traps fire once when an enemy steps in range; a
//! triggered fire barrel keeps burning for a while.

use hecs::{Entity, World};
use log::debug;

use rumguard_core::components::{Burning, Immobilized, Trap};
use rumguard_core::constants::*;
use rumguard_core::enums::TrapType;
use rumguard_core::events::GameEvent;
use rumguard_core::types::Position;

use crate::collaborators::SpatialQuery;
use crate::scheduler::{DeferredAction, Scheduler};
use crate::systems::effects;

const PULSE_EPSILON: f64 = 1e-9;

pub fn run(
    world: &mut World,
    scheduler: &mut Scheduler,
    spatial: &dyn SpatialQuery,
    events: &mut Vec<GameEvent>,
    now: f64,
    dt: f64,
) {
    trigger_armed(world, scheduler, spatial, events, now);
    burn(world, spatial, dt);
}

fn trigger_armed(
    world: &mut World,
    scheduler: &mut Scheduler,
    spatial: &dyn SpatialQuery,
    events: &mut Vec<GameEvent>,
    now: f64,
) {
    let mut armed: Vec<(Entity, TrapType, f64, Position)> = world
        .query::<(&Trap, &Position)>()
        .iter()
        .filter(|(_, (trap, _))| !trap.triggered)
        .map(|(entity, (trap, position))| (entity, trap.trap_type, trap.trigger_radius, *position))
        .collect();
    armed.sort_by_key(|(entity, ..)| entity.id());

    for (trap_entity, trap_type, radius, at) in armed {
        let caught = effects::live_enemies_within(world, spatial, at, radius);
        if caught.is_empty() {
            continue;
        }

        if let Ok(mut trap) = world.get::<&mut Trap>(trap_entity) {
            trap.triggered = true;
        }
        debug!("{:?} sprung on {} enemies", trap_type, caught.len());
        events.push(GameEvent::TrapTriggered { trap_type, at });

        match trap_type {
            TrapType::RumPuddle => {
                for &(enemy, _) in &caught {
                    effects::intoxicate(world, enemy, TRAP_INTOXICATION, events);
                }
            }
            TrapType::BarrelBomb | TrapType::SpikeTrap => {
                for &(enemy, _) in &caught {
                    effects::damage(world, enemy, TRAP_DAMAGE);
                }
            }
            TrapType::NetTrap => {
                for &(enemy, _) in &caught {
                    let _ = world.insert_one(enemy, Immobilized);
                    scheduler.cancel(enemy, DeferredAction::ReleaseNet);
                    scheduler.schedule(enemy, now + NET_IMMOBILIZE_SECS, DeferredAction::ReleaseNet);
                }
            }
            TrapType::FireBarrel => {
                let _ = world.insert_one(trap_entity, Burning::default());
            }
        }
    }
}

/// Pulse every burning fire barrel. First pulse lands on the trigger tick.
fn burn(world: &mut World, spatial: &dyn SpatialQuery, dt: f64) {
    let mut pulses: Vec<(Position, f64)> = Vec::new();
    let mut burnt_out: Vec<Entity> = Vec::new();

    for (entity, (burning, trap, position)) in
        world.query_mut::<(&mut Burning, &Trap, &Position)>()
    {
        if burning.next_pulse_in <= PULSE_EPSILON {
            pulses.push((*position, trap.trigger_radius));
            burning.next_pulse_in += FIRE_PULSE_SECS;
        }
        burning.next_pulse_in -= dt;
        burning.remaining_secs -= dt;
        if burning.remaining_secs <= PULSE_EPSILON {
            burnt_out.push(entity);
        }
    }

    for (center, radius) in pulses {
        for (enemy, _) in effects::live_enemies_within(world, spatial, center, radius) {
            effects::damage(world, enemy, TRAP_DAMAGE * FIRE_PULSE_SECS);
        }
    }

    for entity in burnt_out {
        let _ = world.remove_one::<Burning>(entity);
    }
}
