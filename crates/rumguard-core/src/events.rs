//! Events emitted by the simulation for audio, UI, and host feedback.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{ActorRef, Position};

/// Gameplay feedback collected during one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    // --- Waves ---
    WaveStarted { index: u32, name: String },
    EnemySpawned { actor: ActorRef, kind: EnemyKind },
    WaveCompleted { index: u32 },
    AllWavesCleared,

    // --- Enemy behaviour ---
    /// Intoxication crossed a bracket.
    StateChanged {
        actor: ActorRef,
        from: DrunkenState,
        to: DrunkenState,
    },
    Stumbled { actor: ActorRef },
    AttackHit {
        attacker: ActorRef,
        target: ActorRef,
        damage: f64,
    },
    AttackMissed { attacker: ActorRef },
    /// A ranged shot left the muzzle. Collision is up to the host.
    ProjectileFired {
        attacker: ActorRef,
        origin: Position,
        direction: DVec3,
        speed: f64,
    },
    SpecialAbilityUsed {
        actor: ActorRef,
        ability: SpecialAbility,
    },
    StealStarted { actor: ActorRef, barrel: ActorRef },
    BarrelStolen { actor: ActorRef, barrel: ActorRef },

    // --- Deaths and objectives ---
    EnemyKilled { actor: ActorRef, kind: EnemyKind },
    BarrelDestroyed { barrel: ActorRef },
    RumSpilled { at: Position, affected: u32 },
    PlayerDied,
    PlayerRespawned,
    PlayerStunned { duration_secs: f64 },

    // --- Player actions ---
    WeaponFired { ammo_left: u32 },
    ReloadStarted,
    ReloadFinished,
    GrenadeExploded { at: Position, affected: u32 },
    TrapPlaced { trap_type: TrapType, at: Position },
    TrapTriggered { trap_type: TrapType, at: Position },
    CannonFired { cannon: ActorRef, at: Position, affected: u32 },
    CannonReloaded { cannon: ActorRef },

    SessionEnded { phase: GamePhase },
}
