//! Narrow interfaces to the things the simulation does not own: spatial
//! queries, locomotion, and whoever keeps score.
//!
//! Each trait comes with the default the headless engine uses.

use hecs::{Entity, World};

use rumguard_core::enums::EnemyKind;
use rumguard_core::types::{ActorRef, Position, Velocity};

/// "Which actors are within R of this point."
pub trait SpatialQuery: Send {
    fn entities_within_radius(&self, world: &World, center: Position, radius: f64) -> Vec<Entity>;
}

/// Linear scan over every positioned entity.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinearScan;

impl SpatialQuery for LinearScan {
    fn entities_within_radius(&self, world: &World, center: Position, radius: f64) -> Vec<Entity> {
        let mut query = world.query::<&Position>();
        query
            .iter()
            .filter(|(_, position)| position.range_to(&center) <= radius)
            .map(|(entity, _)| entity)
            .collect()
    }
}

/// "Move towards P at speed S" and "stop". Pathing is the driver's business.
pub trait MovementDriver: Send {
    fn move_towards(&mut self, world: &mut World, actor: Entity, point: Position, speed: f64);
    fn stop(&mut self, world: &mut World, actor: Entity);
}

/// Straight-line steering: writes the actor's `Velocity` and lets the
/// movement system integrate it.
#[derive(Debug, Default, Clone, Copy)]
pub struct KinematicDriver;

impl MovementDriver for KinematicDriver {
    fn move_towards(&mut self, world: &mut World, actor: Entity, point: Position, speed: f64) {
        let direction = match world.get::<&Position>(actor) {
            Ok(position) => position.direction_to(&point),
            Err(_) => return,
        };
        if let Ok(mut velocity) = world.get::<&mut Velocity>(actor) {
            *velocity = Velocity::along(direction, speed.max(0.0));
        }
    }

    fn stop(&mut self, world: &mut World, actor: Entity) {
        if let Ok(mut velocity) = world.get::<&mut Velocity>(actor) {
            *velocity = Velocity::default();
        }
    }
}

/// Session notifications. All methods default to no-ops.
pub trait SessionObserver: Send {
    fn on_objective_destroyed(&mut self, _barrel: ActorRef) {}

    fn on_enemy_killed(&mut self, _actor: ActorRef, _kind: EnemyKind) {}

    fn on_wave_completed(&mut self, _index: u32) {}

    fn on_all_waves_cleared(&mut self) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl SessionObserver for NullObserver {}
