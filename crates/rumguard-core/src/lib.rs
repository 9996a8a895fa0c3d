//! Core types and definitions for the RUMGUARD simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, state snapshots, events, and constants, plus the
//! two leaf state objects every actor is built from (`Intoxication` and
//! `Health`). It has no dependency on an ECS, an RNG, or any host engine.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod health;
pub mod state;
pub mod status;
pub mod types;
