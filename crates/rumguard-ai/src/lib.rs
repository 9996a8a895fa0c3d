//! Enemy AI for RUMGUARD.
//!
//! Per-kind behaviour policies, target selection, cooldown-gated attacks
//! with intoxication-driven misses, and the per-tick agent decision.
//! Everything here is plain data and pure functions; randomness is always
//! passed in by the caller.

pub mod attack;
pub mod decision;
pub mod policy;
pub mod targeting;

pub use rumguard_core as core;

#[cfg(test)]
mod tests;
