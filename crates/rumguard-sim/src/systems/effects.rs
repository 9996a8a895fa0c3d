//! Damage and intoxication application shared by every source of harm.

use hecs::{Entity, World};
use log::debug;

use rumguard_core::components::{Corpse, Enemy};
use rumguard_core::events::GameEvent;
use rumguard_core::health::{DamageOutcome, Health};
use rumguard_core::status::Intoxication;
use rumguard_core::types::Position;

use crate::collaborators::SpatialQuery;
use crate::components::{actor_ref, Stimulated};

/// Apply damage to `target`. `None` if it has no health or is already dead.
pub fn damage(world: &World, target: Entity, amount: f64) -> Option<DamageOutcome> {
    let mut health = world.get::<&mut Health>(target).ok()?;
    let role = health.role();
    match health.apply_damage_notify(amount, || debug!("{:?} ({:?}) down", target, role)) {
        Ok(outcome) => Some(outcome),
        Err(signal) => {
            debug!("damage to {:?} absorbed: {signal}", target);
            None
        }
    }
}

/// Add intoxication to `target`, reporting a bracket change. The target
/// skips this tick's decay.
pub fn intoxicate(world: &mut World, target: Entity, amount: f64, events: &mut Vec<GameEvent>) {
    let change = {
        let Ok(mut intox) = world.get::<&mut Intoxication>(target) else {
            return;
        };
        intox.add_effect(amount)
    };
    let _ = world.insert_one(target, Stimulated);

    if let Some(change) = change {
        debug!("{:?} {:?} -> {:?}", target, change.from, change.to);
        events.push(GameEvent::StateChanged {
            actor: actor_ref(target),
            from: change.from,
            to: change.to,
        });
    }
}

pub fn is_alive(world: &World, entity: Entity) -> bool {
    world
        .get::<&Health>(entity)
        .map(|health| !health.is_dead())
        .unwrap_or(false)
}

pub fn is_live_enemy(world: &World, entity: Entity) -> bool {
    world.satisfies::<&Enemy>(entity).unwrap_or(false)
        && !world.satisfies::<&Corpse>(entity).unwrap_or(false)
        && is_alive(world, entity)
}

/// Live enemies within `radius` of `center`, with their distance.
pub fn live_enemies_within(
    world: &World,
    spatial: &dyn SpatialQuery,
    center: Position,
    radius: f64,
) -> Vec<(Entity, f64)> {
    spatial
        .entities_within_radius(world, center, radius)
        .into_iter()
        .filter(|&entity| is_live_enemy(world, entity))
        .filter_map(|entity| {
            let position = world.get::<&Position>(entity).ok()?;
            Some((entity, position.range_to(&center)))
        })
        .collect()
}
