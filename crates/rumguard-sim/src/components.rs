//! Simulation-side components that refer to other entities.

use hecs::Entity;

use rumguard_ai::attack::Cooldown;
use rumguard_core::types::ActorRef;

/// An enemy's current intent.
#[derive(Debug, Clone, Copy, Default)]
pub struct Brain {
    /// Re-validated every decision tick.
    pub target: Option<Entity>,
    /// Seconds spent at a barrel without interruption.
    pub steal_progress: f64,
}

/// Intoxication rose this tick; decay waits until the next one.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stimulated;

/// Gate on a sea creature's area ability.
#[derive(Debug, Clone, Copy)]
pub struct AbilityGate(pub Cooldown);

pub fn actor_ref(entity: Entity) -> ActorRef {
    ActorRef(entity.to_bits().get())
}

/// Resolve a host-supplied handle. `None` for malformed bits; the entity
/// may still have been despawned.
pub fn entity_of(actor: ActorRef) -> Option<Entity> {
    Entity::from_bits(actor.0)
}
