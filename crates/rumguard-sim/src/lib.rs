//! Simulation engine for RUMGUARD.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for the host.

pub mod collaborators;
pub mod components;
pub mod engine;
pub mod scenario;
pub mod scheduler;
pub mod score;
pub mod systems;
pub mod waves;
pub mod world_setup;

pub use rumguard_core as core;
pub use engine::{SimConfig, SimulationEngine};
