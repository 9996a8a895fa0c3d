//! Control-flow signals raised inside the simulation.
//!
//! None of these is fatal. Each is absorbed by the caller and turns into a
//! retry or an idle transition on the next decision tick.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ControlSignal {
    /// An action was attempted before its cooldown elapsed.
    #[error("action is still on cooldown")]
    OnCooldown,
    /// Target selection found no candidate.
    #[error("no target available")]
    NoTarget,
    /// The chosen target was destroyed or died after selection.
    #[error("target reference is no longer valid")]
    InvalidTargetReference,
    /// Damage was applied to a dead actor.
    #[error("actor is already dead")]
    AlreadyDead,
    /// Damage was applied to a destroyed objective.
    #[error("objective is already destroyed")]
    AlreadyDestroyed,
}
