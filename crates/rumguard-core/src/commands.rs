//! Commands sent from the host to the simulation.
//!
//! Commands are queued and processed at the next tick boundary, before any
//! system runs, so their effects land ahead of that tick's re-evaluation.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{ActorRef, Position};

/// All possible host/player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Session control ---
    /// Build the arena and start the wave director.
    StartSession,
    /// Return to the menu after a finished session.
    ReturnToMenu,
    Pause,
    Resume,
    /// Set time scale (1.0 = normal), clamped to 0.0..=4.0.
    SetTimeScale { scale: f64 },

    // --- Player ---
    /// Host-driven player movement (input handling lives in the host).
    MovePlayer { position: Position },
    /// Pull the trigger. `hit` is whatever the host's raycast struck.
    FireWeapon { hit: Option<ActorRef> },
    Reload,
    /// Rum bottle landed and burst at `at`.
    ThrowGrenade { at: Position },
    PlaceTrap { trap_type: TrapType, at: Position },
    /// Fire the deck cannon `cannon`; the shot lands at `at`.
    FireCannon { cannon: ActorRef, at: Position },

    // --- Host-resolved collisions ---
    /// Damage resolved by host physics (e.g. a musket ball hitting the player).
    ApplyDamage { target: ActorRef, amount: f64 },
    /// Intoxication from a host-side source.
    AddIntoxication { target: ActorRef, amount: f64 },
}
