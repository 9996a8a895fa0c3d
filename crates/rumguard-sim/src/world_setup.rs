//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the player, barrels, enemies and traps with their component
//! bundles.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use rumguard_ai::policy::policy_for;
use rumguard_core::components::*;
use rumguard_core::constants::*;
use rumguard_core::enums::*;
use rumguard_core::health::Health;
use rumguard_core::status::{Intoxication, IntoxicationTuning};
use rumguard_core::types::{Facing, Position, Velocity};

use crate::components::{AbilityGate, Brain};

/// Where enemies enter the arena.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub position: Position,
    pub facing: Facing,
}

/// Static arena geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaLayout {
    pub player_start: Position,
    pub barrels: Vec<Position>,
    pub spawn_points: Vec<SpawnPoint>,
    pub cannons: Vec<Position>,
}

impl Default for ArenaLayout {
    /// Five barrels in a ring around the player, four landing points 30 m out
    /// and one cannon within reach of the player's start.
    fn default() -> Self {
        let barrels = (0..5)
            .map(|i| {
                let bearing = i as f64 * std::f64::consts::TAU / 5.0;
                Position::new(4.0 * bearing.sin(), 4.0 * bearing.cos(), 0.0)
            })
            .collect();

        let spawn_points = (0..4)
            .map(|i| {
                let bearing = i as f64 * std::f64::consts::FRAC_PI_2;
                SpawnPoint {
                    position: Position::new(30.0 * bearing.sin(), 30.0 * bearing.cos(), 0.0),
                    facing: Facing {
                        yaw: (bearing + std::f64::consts::PI) % std::f64::consts::TAU,
                    },
                }
            })
            .collect();

        Self {
            player_start: Position::new(0.0, 0.0, 0.0),
            barrels,
            spawn_points,
            cannons: vec![Position::new(0.0, -2.5, 0.0)],
        }
    }
}

/// Build the arena: the player, every barrel and every cannon. Returns the
/// player entity.
pub fn setup_arena(world: &mut World, layout: &ArenaLayout) -> Entity {
    for &position in &layout.barrels {
        spawn_barrel(world, position);
    }
    for &position in &layout.cannons {
        world.spawn((Cannon::default(), position));
    }
    spawn_player(world, layout.player_start)
}

pub fn spawn_player(world: &mut World, position: Position) -> Entity {
    world.spawn((
        Player,
        position,
        Velocity::default(),
        Facing::default(),
        Health::new(CombatRole::Player, PLAYER_MAX_HEALTH),
        Weapon::default(),
        Inventory::default(),
    ))
}

pub fn spawn_barrel(world: &mut World, position: Position) -> Entity {
    world.spawn((
        Barrel,
        position,
        Health::new(CombatRole::Objective, BARREL_MAX_HEALTH),
    ))
}

/// Spawn an enemy with its kind's stats, sober and without a target.
pub fn spawn_enemy(
    world: &mut World,
    kind: EnemyKind,
    position: Position,
    facing: Facing,
    tuning: IntoxicationTuning,
    wave_index: u32,
) -> Entity {
    let policy = policy_for(kind);
    let stats = policy.stats();

    let entity = world.spawn((
        Enemy { kind, wave_index },
        position,
        Velocity::default(),
        facing,
        Health::new(CombatRole::Enemy, stats.max_health),
        Intoxication::new(tuning),
        stats.attack_profile(),
        Brain::default(),
    ));

    if let Some(special) = policy.special() {
        let _ = world.insert_one(entity, AbilityGate(special.gate()));
    }

    entity
}

/// Spawn at a random landing point, jittered so arrivals do not stack.
pub fn spawn_enemy_at_random_point(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    layout: &ArenaLayout,
    kind: EnemyKind,
    tuning: IntoxicationTuning,
    wave_index: u32,
) -> Entity {
    let point = if layout.spawn_points.is_empty() {
        SpawnPoint {
            position: Position::new(0.0, 30.0, 0.0),
            facing: Facing {
                yaw: std::f64::consts::PI,
            },
        }
    } else {
        layout.spawn_points[rng.gen_range(0..layout.spawn_points.len())]
    };

    let jitter_x: f64 = rng.gen_range(-1.0..1.0);
    let jitter_y: f64 = rng.gen_range(-1.0..1.0);
    let position = Position::new(
        point.position.x + jitter_x,
        point.position.y + jitter_y,
        point.position.z,
    );

    spawn_enemy(world, kind, position, point.facing, tuning, wave_index)
}

pub fn spawn_trap(world: &mut World, trap_type: TrapType, position: Position) -> Entity {
    world.spawn((Trap::new(trap_type), position))
}
