//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use rumguard_core::components::*;
use rumguard_core::enums::*;
use rumguard_core::events::GameEvent;
use rumguard_core::health::Health;
use rumguard_core::state::*;
use rumguard_core::status::Intoxication;
use rumguard_core::types::{Position, SimTime};

use crate::components::{actor_ref, Brain};
use crate::score::ScoreKeeper;
use crate::waves::WaveDirector;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    director: &WaveDirector,
    score: &ScoreKeeper,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        wave: build_wave(director),
        player: build_player(world),
        barrels: build_barrels(world),
        enemies: build_enemies(world),
        traps: build_traps(world),
        cannons: build_cannons(world),
        score: score.view(),
        events,
    }
}

fn build_wave(director: &WaveDirector) -> WaveView {
    WaveView {
        phase: director.phase(),
        index: director.index(),
        name: director.current_name().to_string(),
        remaining: director.remaining(),
        countdown_secs: if director.phase() == WavePhase::Preparing {
            director.countdown()
        } else {
            0.0
        },
    }
}

fn build_player(world: &World) -> Option<PlayerView> {
    world
        .query::<(&Player, &Position, &Health, &Weapon, &Inventory)>()
        .iter()
        .next()
        .map(|(entity, (_, position, health, weapon, inventory))| PlayerView {
            actor: actor_ref(entity),
            position: *position,
            health: health.current(),
            health_fraction: health.health_fraction(),
            dead: health.is_dead(),
            stunned: world.satisfies::<&Stunned>(entity).unwrap_or(false),
            ammo: weapon.ammo,
            reloading: weapon.reloading,
            grenades: inventory.grenades,
            traps: inventory.traps,
        })
}

fn build_barrels(world: &World) -> Vec<BarrelView> {
    let mut barrels: Vec<(u32, BarrelView)> = world
        .query::<(&Barrel, &Position, &Health)>()
        .iter()
        .map(|(entity, (_, position, health))| {
            (
                entity.id(),
                BarrelView {
                    actor: actor_ref(entity),
                    position: *position,
                    health_fraction: health.health_fraction(),
                    destroyed: health.is_dead(),
                },
            )
        })
        .collect();

    barrels.sort_by_key(|(id, _)| *id);
    barrels.into_iter().map(|(_, view)| view).collect()
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<(u32, EnemyView)> = world
        .query::<(&Enemy, &Position, &Health, &Intoxication, &Brain)>()
        .iter()
        .map(|(entity, (enemy, position, health, intox, brain))| {
            (
                entity.id(),
                EnemyView {
                    actor: actor_ref(entity),
                    kind: enemy.kind,
                    position: *position,
                    health_fraction: health.health_fraction(),
                    dead: health.is_dead(),
                    drunken_state: intox.state(),
                    intoxication: intox.level(),
                    stumbling: world.satisfies::<&Stumbling>(entity).unwrap_or(false),
                    immobilized: world.satisfies::<&Immobilized>(entity).unwrap_or(false),
                    target: brain.target.map(actor_ref),
                },
            )
        })
        .collect();

    enemies.sort_by_key(|(id, _)| *id);
    enemies.into_iter().map(|(_, view)| view).collect()
}

fn build_traps(world: &World) -> Vec<TrapView> {
    let mut traps: Vec<(u32, TrapView)> = world
        .query::<(&Trap, &Position)>()
        .iter()
        .map(|(entity, (trap, position))| {
            (
                entity.id(),
                TrapView {
                    actor: actor_ref(entity),
                    trap_type: trap.trap_type,
                    position: *position,
                    triggered: trap.triggered,
                },
            )
        })
        .collect();

    traps.sort_by_key(|(id, _)| *id);
    traps.into_iter().map(|(_, view)| view).collect()
}

fn build_cannons(world: &World) -> Vec<CannonView> {
    let mut cannons: Vec<(u32, CannonView)> = world
        .query::<(&Cannon, &Position)>()
        .iter()
        .map(|(entity, (cannon, position))| {
            (
                entity.id(),
                CannonView {
                    actor: actor_ref(entity),
                    position: *position,
                    loaded: cannon.loaded,
                },
            )
        })
        .collect();

    cannons.sort_by_key(|(id, _)| *id);
    cannons.into_iter().map(|(_, view)| view).collect()
}
