//! Death handling and entity removal.
//!
//! Newly dead enemies become corpses (scored, reported to the wave director,
//! despawned later). Newly destroyed barrels spill rum on whoever stands
//! nearby and stay in the world as wrecks. Spent traps and expired corpses
//! are despawned, and their pending deferred actions purged.

use hecs::{Entity, World};
use log::info;

use rumguard_core::components::{Barrel, Burning, Corpse, Enemy, Player, Trap};
use rumguard_core::constants::*;
use rumguard_core::enums::EnemyKind;
use rumguard_core::events::GameEvent;
use rumguard_core::health::Health;
use rumguard_core::types::{Position, Velocity};

use crate::collaborators::{SessionObserver, SpatialQuery};
use crate::components::actor_ref;
use crate::scheduler::{DeferredAction, Scheduler};
use crate::score::ScoreKeeper;
use crate::systems::{effects, player};
use crate::waves::WaveDirector;

/// Process every death that happened this tick.
#[allow(clippy::too_many_arguments)]
pub fn handle_deaths(
    world: &mut World,
    scheduler: &mut Scheduler,
    director: &mut WaveDirector,
    spatial: &dyn SpatialQuery,
    score: &mut ScoreKeeper,
    observer: &mut dyn SessionObserver,
    events: &mut Vec<GameEvent>,
    now: f64,
) {
    let mut dead_enemies: Vec<(Entity, EnemyKind)> = world
        .query::<(&Enemy, &Health)>()
        .without::<&Corpse>()
        .iter()
        .filter(|(_, (_, health))| health.is_dead())
        .map(|(entity, (enemy, _))| (entity, enemy.kind))
        .collect();
    dead_enemies.sort_by_key(|(entity, _)| entity.id());

    for (entity, kind) in dead_enemies {
        let _ = world.insert_one(entity, Corpse);
        if let Ok(mut velocity) = world.get::<&mut Velocity>(entity) {
            *velocity = Velocity::default();
        }
        // Pending recoveries and net releases are moot now.
        scheduler.cancel_owner(entity);
        scheduler.schedule(entity, now + ENEMY_DEATH_DELAY_SECS, DeferredAction::DespawnCorpse);

        director.on_enemy_killed();
        score.on_enemy_killed(actor_ref(entity), kind);
        observer.on_enemy_killed(actor_ref(entity), kind);
        events.push(GameEvent::EnemyKilled {
            actor: actor_ref(entity),
            kind,
        });
    }

    let mut wrecked: Vec<(Entity, Position)> = world
        .query::<(&Barrel, &Health, &Position)>()
        .without::<&Corpse>()
        .iter()
        .filter(|(_, (_, health, _))| health.is_dead())
        .map(|(entity, (_, _, position))| (entity, *position))
        .collect();
    wrecked.sort_by_key(|(entity, _)| entity.id());

    for (barrel, at) in wrecked {
        let _ = world.insert_one(barrel, Corpse);
        info!("barrel {:?} destroyed", barrel);
        events.push(GameEvent::BarrelDestroyed {
            barrel: actor_ref(barrel),
        });
        score.on_objective_destroyed(actor_ref(barrel));
        observer.on_objective_destroyed(actor_ref(barrel));

        let splashed = effects::live_enemies_within(world, spatial, at, RUM_SPILL_RADIUS);
        for &(enemy, _) in &splashed {
            effects::intoxicate(world, enemy, RUM_SPILL_INTOXICATION, events);
        }
        events.push(GameEvent::RumSpilled {
            at,
            affected: splashed.len() as u32,
        });
    }

    let fallen_player = world
        .query::<(&Player, &Health)>()
        .without::<&Corpse>()
        .iter()
        .find(|(_, (_, health))| health.is_dead())
        .map(|(entity, _)| entity);
    if let Some(entity) = fallen_player {
        player::on_player_died(world, entity, scheduler, events, now);
    }
}

/// Despawn spent traps plus everything queued in `despawn_buffer`.
pub fn run(world: &mut World, scheduler: &mut Scheduler, despawn_buffer: &mut Vec<Entity>) {
    for (entity, trap) in world.query_mut::<&Trap>().without::<&Burning>() {
        if trap.triggered {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        scheduler.cancel_owner(entity);
        let _ = world.despawn(entity);
    }
}
