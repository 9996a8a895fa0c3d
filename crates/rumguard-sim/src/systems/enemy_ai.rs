//! Enemy AI system: target upkeep, the per-kind decision, and carrying it out.
//!
//! Each enemy's target is re-validated every tick; a dead, destroyed or
//! despawned target triggers immediate re-selection. One stumble roll is
//! drawn per enemy per tick so RNG consumption does not depend on state.

use hecs::{Entity, World};
use log::debug;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use rumguard_ai::attack::{perturb_aim, AttackOutcome, AttackProfile};
use rumguard_ai::decision::{decide, AgentAction, AgentContext, TargetInfo};
use rumguard_ai::policy::{policy_for, EnemyPolicy};
use rumguard_ai::targeting::TargetCandidate;
use rumguard_core::components::*;
use rumguard_core::constants::*;
use rumguard_core::enums::{EnemyKind, SpecialAbility, TargetKind};
use rumguard_core::error::ControlSignal;
use rumguard_core::events::GameEvent;
use rumguard_core::health::{DamageOutcome, Health};
use rumguard_core::status::Intoxication;
use rumguard_core::types::Position;

use crate::collaborators::{MovementDriver, SpatialQuery};
use crate::components::{actor_ref, entity_of, AbilityGate, Brain};
use crate::scheduler::{DeferredAction, Scheduler};
use crate::systems::effects;

#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    scheduler: &mut Scheduler,
    spatial: &dyn SpatialQuery,
    movement: &mut dyn MovementDriver,
    events: &mut Vec<GameEvent>,
    now: f64,
    dt: f64,
) {
    let player = player_candidate(world);
    let objectives = objective_candidates(world);

    let mut enemies: Vec<(Entity, EnemyKind)> = world
        .query::<&Enemy>()
        .without::<&Corpse>()
        .iter()
        .filter(|(entity, _)| effects::is_alive(world, *entity))
        .map(|(entity, enemy)| (entity, enemy.kind))
        .collect();
    enemies.sort_by_key(|(entity, _)| entity.id());

    for (entity, kind) in enemies {
        // Earlier enemies this tick may have killed the player or a barrel.
        let player = player.filter(|candidate| {
            entity_of(candidate.actor).is_some_and(|e| effects::is_alive(world, e))
        });
        let objectives: Vec<TargetCandidate> = objectives
            .iter()
            .filter(|candidate| {
                entity_of(candidate.actor).is_some_and(|e| effects::is_alive(world, e))
            })
            .copied()
            .collect();

        let policy = policy_for(kind);
        let target = match refresh_target(world, entity, policy, player.as_ref(), &objectives, rng)
        {
            Ok(target) => Some(target),
            Err(signal) => {
                debug!("{:?} has no target: {signal}", entity);
                None
            }
        };

        let context = build_context(world, entity, kind, target, now, rng);
        let decision = decide(&context);

        if let (Some(ability), Some((target_entity, _))) = (decision.special, target) {
            use_special(world, entity, policy, ability, target_entity, scheduler, spatial, events, now);
        }

        if decision.action != AgentAction::Steal {
            if let Ok(mut brain) = world.get::<&mut Brain>(entity) {
                brain.steal_progress = 0.0;
            }
        }

        match decision.action {
            AgentAction::Idle => movement.stop(world, entity),
            AgentAction::Stumble => {
                movement.stop(world, entity);
                let _ = world.insert_one(entity, Stumbling);
                let recover_in = rng.gen_range(STUMBLE_RECOVERY_MIN_SECS..STUMBLE_RECOVERY_MAX_SECS);
                scheduler.schedule(entity, now + recover_in, DeferredAction::RecoverFromStumble);
                debug!("{:?} stumbled for {:.2}s", entity, recover_in);
                events.push(GameEvent::Stumbled {
                    actor: actor_ref(entity),
                });
            }
            AgentAction::Advance { towards, speed } => {
                movement.move_towards(world, entity, towards, speed);
            }
            AgentAction::MeleeAttack => {
                movement.stop(world, entity);
                if let Some((target_entity, _)) = target {
                    melee(world, entity, target_entity, context.position, rng, events, now);
                }
            }
            AgentAction::RangedAttack => {
                movement.stop(world, entity);
                if let Some((_, info)) = target {
                    fire(world, entity, policy, context.position, info.position, rng, events, now);
                }
            }
            AgentAction::Steal => {
                movement.stop(world, entity);
                if let Some((target_entity, _)) = target {
                    steal(world, entity, policy, target_entity, events, dt);
                }
            }
        }
    }
}

fn player_candidate(world: &World) -> Option<TargetCandidate> {
    let mut query = world.query::<(&Player, &Position, &Health)>();
    query
        .iter()
        .find(|(_, (_, _, health))| !health.is_dead())
        .map(|(entity, (_, position, _))| TargetCandidate {
            actor: actor_ref(entity),
            position: *position,
            kind: TargetKind::Player,
        })
}

fn objective_candidates(world: &World) -> Vec<TargetCandidate> {
    let mut query = world.query::<(&Barrel, &Position, &Health)>();
    let mut barrels: Vec<(Entity, TargetCandidate)> = query
        .iter()
        .filter(|(_, (_, _, health))| !health.is_dead())
        .map(|(entity, (_, position, _))| {
            (
                entity,
                TargetCandidate {
                    actor: actor_ref(entity),
                    position: *position,
                    kind: TargetKind::Objective,
                },
            )
        })
        .collect();
    // Spawn order, so nearest-barrel ties resolve the same way every run.
    barrels.sort_by_key(|(entity, _)| entity.id());
    barrels.into_iter().map(|(_, candidate)| candidate).collect()
}

/// Keep the current target if it is still alive, otherwise pick a new one.
fn refresh_target(
    world: &mut World,
    entity: Entity,
    policy: &dyn EnemyPolicy,
    player: Option<&TargetCandidate>,
    objectives: &[TargetCandidate],
    rng: &mut ChaCha8Rng,
) -> Result<(Entity, TargetInfo), ControlSignal> {
    let current = world
        .get::<&Brain>(entity)
        .ok()
        .and_then(|brain| brain.target);

    if let Some(current) = current {
        match validate(world, current) {
            Ok(info) => return Ok((current, info)),
            Err(signal) => debug!("{:?} drops target {:?}: {signal}", entity, current),
        }
    }

    let position = *world
        .get::<&Position>(entity)
        .map_err(|_| ControlSignal::InvalidTargetReference)?;
    let selected = policy.select_target(position, player, objectives, rng);

    let new_target = selected.ok().and_then(|candidate| entity_of(candidate.actor));
    if let Ok(mut brain) = world.get::<&mut Brain>(entity) {
        brain.target = new_target;
        brain.steal_progress = 0.0;
    }

    let target = selected?;
    let target_entity = new_target.ok_or(ControlSignal::InvalidTargetReference)?;
    Ok((
        target_entity,
        TargetInfo {
            kind: target.kind,
            position: target.position,
        },
    ))
}

fn validate(world: &World, target: Entity) -> Result<TargetInfo, ControlSignal> {
    let health = world
        .get::<&Health>(target)
        .map_err(|_| ControlSignal::InvalidTargetReference)?;
    if health.is_dead() {
        return Err(ControlSignal::InvalidTargetReference);
    }
    let position = *world
        .get::<&Position>(target)
        .map_err(|_| ControlSignal::InvalidTargetReference)?;
    let kind = if world.satisfies::<&Barrel>(target).unwrap_or(false) {
        TargetKind::Objective
    } else {
        TargetKind::Player
    };
    Ok(TargetInfo { kind, position })
}

fn build_context(
    world: &World,
    entity: Entity,
    kind: EnemyKind,
    target: Option<(Entity, TargetInfo)>,
    now: f64,
    rng: &mut ChaCha8Rng,
) -> AgentContext {
    let position = world
        .get::<&Position>(entity)
        .map(|position| *position)
        .unwrap_or_default();
    let (speed_multiplier, stumble_probability) = world
        .get::<&Intoxication>(entity)
        .map(|intox| (intox.speed_multiplier(), intox.stumble_probability()))
        .unwrap_or((1.0, 0.0));
    let special_ready = world
        .get::<&AbilityGate>(entity)
        .map(|gate| gate.0.ready(now))
        .unwrap_or(false);

    AgentContext {
        kind,
        position,
        target: target.map(|(_, info)| info),
        speed_multiplier,
        stumble_probability,
        stumble_roll: rng.gen(),
        stumbling: world.satisfies::<&Stumbling>(entity).unwrap_or(false),
        immobilized: world.satisfies::<&Immobilized>(entity).unwrap_or(false),
        special_ready,
    }
}

fn accuracy_of(world: &World, entity: Entity) -> f64 {
    world
        .get::<&Intoxication>(entity)
        .map(|intox| intox.accuracy_multiplier())
        .unwrap_or(1.0)
}

fn melee(
    world: &mut World,
    attacker: Entity,
    target: Entity,
    origin: Position,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
    now: f64,
) {
    let accuracy = accuracy_of(world, attacker);
    let (outcome, dealt) = {
        let Ok(mut attack) = world.get::<&mut AttackProfile>(attacker) else {
            return;
        };
        let Ok(mut health) = world.get::<&mut Health>(target) else {
            return;
        };
        attack.resolve_against(now, accuracy, rng, &mut health)
    };

    match outcome {
        AttackOutcome::OnCooldown => {}
        AttackOutcome::Missed => {
            debug!("{:?} missed at {:.1}m", attacker, target_range(world, origin, target));
            events.push(GameEvent::AttackMissed {
                attacker: actor_ref(attacker),
            });
        }
        AttackOutcome::Hit { damage } => {
            if dealt.is_some() {
                events.push(GameEvent::AttackHit {
                    attacker: actor_ref(attacker),
                    target: actor_ref(target),
                    damage,
                });
            }
        }
    }
}

fn target_range(world: &World, origin: Position, target: Entity) -> f64 {
    world
        .get::<&Position>(target)
        .map(|position| origin.range_to(&position))
        .unwrap_or(0.0)
}

#[allow(clippy::too_many_arguments)]
fn fire(
    world: &mut World,
    attacker: Entity,
    policy: &dyn EnemyPolicy,
    origin: Position,
    aim_point: Position,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
    now: f64,
) {
    let Some(ranged) = policy.ranged() else {
        return;
    };
    let ready = match world.get::<&mut AttackProfile>(attacker) {
        Ok(mut attack) => attack.try_fire(now).is_ok(),
        Err(_) => false,
    };
    if !ready {
        return;
    }

    let accuracy = accuracy_of(world, attacker);
    let direction = perturb_aim(origin.direction_to(&aim_point), accuracy, rng);
    events.push(GameEvent::ProjectileFired {
        attacker: actor_ref(attacker),
        origin,
        direction,
        speed: ranged.projectile_speed,
    });
}

fn steal(
    world: &mut World,
    thief: Entity,
    policy: &dyn EnemyPolicy,
    barrel: Entity,
    events: &mut Vec<GameEvent>,
    dt: f64,
) {
    let Some(profile) = policy.steal() else {
        return;
    };

    let progress = match world.get::<&mut Brain>(thief) {
        Ok(mut brain) => {
            if brain.steal_progress == 0.0 {
                events.push(GameEvent::StealStarted {
                    actor: actor_ref(thief),
                    barrel: actor_ref(barrel),
                });
            }
            brain.steal_progress += dt;
            brain.steal_progress
        }
        Err(_) => return,
    };

    if progress + 1e-9 < profile.steal_time {
        return;
    }

    let whole = world
        .get::<&Health>(barrel)
        .map(|health| health.max())
        .unwrap_or(0.0);
    if effects::damage(world, barrel, whole) == Some(DamageOutcome::Killed) {
        debug!("{:?} made off with {:?}", thief, barrel);
        events.push(GameEvent::BarrelStolen {
            actor: actor_ref(thief),
            barrel: actor_ref(barrel),
        });
    }
    if let Ok(mut brain) = world.get::<&mut Brain>(thief) {
        brain.steal_progress = 0.0;
        brain.target = None;
    }
}

#[allow(clippy::too_many_arguments)]
fn use_special(
    world: &mut World,
    user: Entity,
    policy: &dyn EnemyPolicy,
    ability: SpecialAbility,
    target: Entity,
    scheduler: &mut Scheduler,
    spatial: &dyn SpatialQuery,
    events: &mut Vec<GameEvent>,
    now: f64,
) {
    let Some(profile) = policy.special() else {
        return;
    };
    let triggered = match world.get::<&mut AbilityGate>(user) {
        Ok(mut gate) => gate.0.trigger(now).is_ok(),
        Err(_) => false,
    };
    if !triggered {
        return;
    }

    debug!("{:?} uses {:?} on {:?}", user, ability, target);
    events.push(GameEvent::SpecialAbilityUsed {
        actor: actor_ref(user),
        ability,
    });

    let Ok(center) = world.get::<&Position>(user).map(|position| *position) else {
        return;
    };
    let effect = policy.on_special_ability();

    for entity in spatial.entities_within_radius(world, center, profile.radius) {
        if !effects::is_alive(world, entity) {
            continue;
        }
        if world.satisfies::<&Player>(entity).unwrap_or(false) {
            if effect.player_damage > 0.0 {
                effects::damage(world, entity, effect.player_damage);
            }
            if effect.stun_secs > 0.0 {
                let _ = world.insert_one(entity, Stunned);
                scheduler.cancel(entity, DeferredAction::ReleaseStun);
                scheduler.schedule(entity, now + effect.stun_secs, DeferredAction::ReleaseStun);
                events.push(GameEvent::PlayerStunned {
                    duration_secs: effect.stun_secs,
                });
            }
        } else if world.satisfies::<&Barrel>(entity).unwrap_or(false)
            && effect.objective_damage > 0.0
        {
            effects::damage(world, entity, effect.objective_damage);
        }
    }
}
