//! Player actions: movement, shooting, reloading, grenades, trap placement,
//! the deck cannon, and the deferred respawn/reload/stun bookkeeping.
//!
//! These run while commands are processed, so their damage and
//! intoxication land before the tick's re-evaluation.

use hecs::{Entity, World};
use log::{debug, info};

use rumguard_core::components::*;
use rumguard_core::constants::*;
use rumguard_core::enums::{CombatRole, TrapType};
use rumguard_core::events::GameEvent;
use rumguard_core::health::{falloff, Health};
use rumguard_core::types::{Position, Velocity};

use crate::collaborators::SpatialQuery;
use crate::components::actor_ref;
use crate::scheduler::{DeferredAction, Scheduler};
use crate::systems::effects;
use crate::world_setup;

/// A dead or stunned player cannot act.
pub fn can_act(world: &World, player: Entity) -> bool {
    effects::is_alive(world, player) && !world.satisfies::<&Stunned>(player).unwrap_or(true)
}

pub fn move_to(world: &mut World, player: Entity, position: Position) {
    if !can_act(world, player) {
        return;
    }
    if let Ok(mut current) = world.get::<&mut Position>(player) {
        *current = position;
    }
}

/// Pull the trigger. `hit` is whatever the host's raycast struck.
pub fn fire_weapon(
    world: &mut World,
    player: Entity,
    hit: Option<Entity>,
    scheduler: &mut Scheduler,
    events: &mut Vec<GameEvent>,
    now: f64,
) {
    if !can_act(world, player) {
        return;
    }

    let (fired, damage, ammo_left) = {
        let Ok(mut weapon) = world.get::<&mut Weapon>(player) else {
            return;
        };
        if weapon.reloading || weapon.ammo == 0 {
            (false, 0.0, weapon.ammo)
        } else if weapon
            .last_shot
            .is_some_and(|last| now - last < weapon.fire_interval)
        {
            return;
        } else {
            weapon.ammo -= 1;
            weapon.last_shot = Some(now);
            (true, weapon.damage, weapon.ammo)
        }
    };

    if !fired {
        reload(world, player, scheduler, events, now);
        return;
    }

    events.push(GameEvent::WeaponFired { ammo_left });

    if let Some(target) = hit.filter(|&target| target != player) {
        if effects::damage(world, target, damage).is_some() {
            events.push(GameEvent::AttackHit {
                attacker: actor_ref(player),
                target: actor_ref(target),
                damage,
            });
        }
    }

    if ammo_left == 0 {
        reload(world, player, scheduler, events, now);
    }
}

pub fn reload(
    world: &mut World,
    player: Entity,
    scheduler: &mut Scheduler,
    events: &mut Vec<GameEvent>,
    now: f64,
) {
    let Ok(mut weapon) = world.get::<&mut Weapon>(player) else {
        return;
    };
    if weapon.reloading || weapon.ammo >= weapon.magazine {
        return;
    }
    weapon.reloading = true;
    scheduler.schedule(player, now + weapon.reload_secs, DeferredAction::FinishReload);
    events.push(GameEvent::ReloadStarted);
}

pub fn finish_reload(world: &mut World, player: Entity, events: &mut Vec<GameEvent>) {
    let Ok(mut weapon) = world.get::<&mut Weapon>(player) else {
        return;
    };
    if !weapon.reloading {
        return;
    }
    weapon.ammo = weapon.magazine;
    weapon.reloading = false;
    events.push(GameEvent::ReloadFinished);
}

/// A rum bottle bursts at `at`: falloff-scaled damage and intoxication to
/// every live enemy in range.
pub fn throw_grenade(
    world: &mut World,
    player: Entity,
    at: Position,
    spatial: &dyn SpatialQuery,
    events: &mut Vec<GameEvent>,
) {
    if !can_act(world, player) {
        return;
    }
    {
        let Ok(mut inventory) = world.get::<&mut Inventory>(player) else {
            return;
        };
        if inventory.grenades == 0 {
            return;
        }
        inventory.grenades -= 1;
    }

    let caught = effects::live_enemies_within(world, spatial, at, GRENADE_RADIUS);
    for &(enemy, distance) in &caught {
        let scale = falloff(distance, GRENADE_RADIUS);
        effects::damage(world, enemy, GRENADE_DAMAGE * scale);
        effects::intoxicate(world, enemy, GRENADE_INTOXICATION * scale, events);
    }

    debug!("grenade at {:?} caught {} enemies", at, caught.len());
    events.push(GameEvent::GrenadeExploded {
        at,
        affected: caught.len() as u32,
    });
}

pub fn place_trap(
    world: &mut World,
    player: Entity,
    trap_type: TrapType,
    at: Position,
    events: &mut Vec<GameEvent>,
) {
    if !can_act(world, player) {
        return;
    }
    let taken = world
        .get::<&mut Inventory>(player)
        .map(|mut inventory| inventory.take_trap(trap_type))
        .unwrap_or(false);
    if !taken {
        debug!("no {:?} left", trap_type);
        return;
    }
    world_setup::spawn_trap(world, trap_type, at);
    events.push(GameEvent::TrapPlaced { trap_type, at });
}

/// Fire a manned cannon; the host's ballistics put the impact at `at`.
/// The player must stand by a loaded cannon and `at` must be within range.
#[allow(clippy::too_many_arguments)]
pub fn fire_cannon(
    world: &mut World,
    player: Entity,
    cannon: Entity,
    at: Position,
    spatial: &dyn SpatialQuery,
    scheduler: &mut Scheduler,
    events: &mut Vec<GameEvent>,
    now: f64,
) {
    if !can_act(world, player) {
        return;
    }
    let Ok(player_at) = world.get::<&Position>(player).map(|position| *position) else {
        return;
    };
    let Ok(muzzle) = world.get::<&Position>(cannon).map(|position| *position) else {
        return;
    };
    {
        let Ok(mut gun) = world.get::<&mut Cannon>(cannon) else {
            return;
        };
        if !gun.loaded
            || muzzle.range_to(&player_at) > CANNON_INTERACTION_RANGE
            || muzzle.range_to(&at) > CANNON_RANGE
        {
            debug!("cannon {:?} cannot fire", cannon);
            return;
        }
        gun.loaded = false;
    }

    let caught = effects::live_enemies_within(world, spatial, at, CANNON_EXPLOSION_RADIUS);
    for &(enemy, distance) in &caught {
        effects::damage(world, enemy, CANNON_DAMAGE * falloff(distance, CANNON_EXPLOSION_RADIUS));
    }
    scheduler.schedule(cannon, now + CANNON_RELOAD_SECS, DeferredAction::ReloadCannon);

    info!("cannon {:?} fired at {:?}, {} caught", cannon, at, caught.len());
    events.push(GameEvent::CannonFired {
        cannon: actor_ref(cannon),
        at,
        affected: caught.len() as u32,
    });
}

pub fn reload_cannon(world: &mut World, cannon: Entity, events: &mut Vec<GameEvent>) {
    let Ok(mut gun) = world.get::<&mut Cannon>(cannon) else {
        return;
    };
    gun.loaded = true;
    events.push(GameEvent::CannonReloaded {
        cannon: actor_ref(cannon),
    });
}

/// Death handling for the player: freeze and schedule a fresh life.
pub fn on_player_died(
    world: &mut World,
    player: Entity,
    scheduler: &mut Scheduler,
    events: &mut Vec<GameEvent>,
    now: f64,
) {
    let _ = world.insert_one(player, Corpse);
    if let Ok(mut velocity) = world.get::<&mut Velocity>(player) {
        *velocity = Velocity::default();
    }
    scheduler.cancel(player, DeferredAction::FinishReload);
    if let Ok(mut weapon) = world.get::<&mut Weapon>(player) {
        weapon.reloading = false;
    }
    scheduler.schedule(
        player,
        now + PLAYER_RESPAWN_DELAY_SECS,
        DeferredAction::RespawnPlayer,
    );
    info!("player died, respawning in {PLAYER_RESPAWN_DELAY_SECS}s");
    events.push(GameEvent::PlayerDied);
}

/// New life at the start position: a fresh health pool and a full magazine.
pub fn respawn(world: &mut World, player: Entity, start: Position, events: &mut Vec<GameEvent>) {
    let _ = world.remove_one::<Corpse>(player);
    let _ = world.remove_one::<Stunned>(player);
    let _ = world.insert_one(player, Health::new(CombatRole::Player, PLAYER_MAX_HEALTH));
    if let Ok(mut position) = world.get::<&mut Position>(player) {
        *position = start;
    }
    if let Ok(mut weapon) = world.get::<&mut Weapon>(player) {
        weapon.ammo = weapon.magazine;
        weapon.reloading = false;
        weapon.last_shot = None;
    }
    events.push(GameEvent::PlayerRespawned);
}

pub fn release_stun(world: &mut World, player: Entity) {
    let _ = world.remove_one::<Stunned>(player);
}
