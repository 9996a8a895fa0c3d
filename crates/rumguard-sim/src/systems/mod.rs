//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components, the scheduler, or
//! the wave director passed in by the engine.

pub mod cleanup;
pub mod effects;
pub mod enemy_ai;
pub mod intoxication;
pub mod movement;
pub mod player;
pub mod snapshot;
pub mod traps;
pub mod wave_spawner;
