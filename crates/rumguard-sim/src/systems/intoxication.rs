//! Sobering up: continuous intoxication decay.

use hecs::{Entity, World};
use log::debug;

use rumguard_core::components::Corpse;
use rumguard_core::events::GameEvent;
use rumguard_core::status::Intoxication;

use crate::components::{actor_ref, Stimulated};

/// Decay every living drinker except those stimulated earlier this tick.
pub fn run(world: &mut World, dt: f64, events: &mut Vec<GameEvent>) {
    for (entity, intox) in world
        .query_mut::<&mut Intoxication>()
        .without::<&Corpse>()
        .without::<&Stimulated>()
    {
        if let Some(change) = intox.tick(dt) {
            debug!("{:?} sobered {:?} -> {:?}", entity, change.from, change.to);
            events.push(GameEvent::StateChanged {
                actor: actor_ref(entity),
                from: change.from,
                to: change.to,
            });
        }
    }
}

/// End of tick: stimulated drinkers decay again from the next tick.
pub fn settle(world: &mut World) {
    let stimulated: Vec<Entity> = world
        .query::<&Stimulated>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();
    for entity in stimulated {
        let _ = world.remove_one::<Stimulated>(entity);
    }
}
