//! Kinematic integration system.
//!
//! Updates Position from Velocity each tick: position += velocity * dt.
//! Held or stumbling actors do not move regardless of velocity.

use hecs::World;

use rumguard_core::components::{Corpse, Immobilized, Stumbling};
use rumguard_core::types::{Facing, Position, Velocity};

pub fn run(world: &mut World, dt: f64) {
    for (_entity, (pos, vel)) in world
        .query_mut::<(&mut Position, &Velocity)>()
        .without::<&Immobilized>()
        .without::<&Stumbling>()
        .without::<&Corpse>()
    {
        pos.x += vel.x * dt;
        pos.y += vel.y * dt;
        pos.z += vel.z * dt;
    }
}

/// Turn moving actors to face along their velocity.
pub fn update_facing(world: &mut World) {
    for (_entity, (facing, vel)) in world.query_mut::<(&mut Facing, &Velocity)>() {
        if !vel.is_zero() {
            facing.yaw = vel.x.atan2(vel.y).rem_euclid(std::f64::consts::TAU);
        }
    }
}
