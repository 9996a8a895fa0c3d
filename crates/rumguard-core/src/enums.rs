//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Discrete intoxication bracket. Ordered by severity.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum DrunkenState {
    /// Normal behavior.
    #[default]
    Sober,
    /// Slightly impaired.
    Tipsy,
    /// Significantly impaired, stumbles now and then.
    Drunk,
    /// Nearly incapacitated.
    Wasted,
}

/// Enemy kind. Each kind maps to a behaviour policy in `rumguard-ai`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Fast melee raider that steals barrels.
    Pirate,
    /// Disciplined soldier with a musket, hunts the player.
    EmpireSoldier,
    /// Slow sea creature with an area tentacle slam.
    Kraken,
    /// Quick sea creature whose scream stuns the player.
    Merfolk,
    /// Undead sailor that calls for reinforcements.
    CursedSailor,
}

/// What an actor's health pool represents. Decides which terminal
/// signal a post-mortem damage call reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatRole {
    Player,
    Objective,
    Enemy,
}

/// Tag classifying a target candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    Player,
    Objective,
}

/// Sea-creature special abilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialAbility {
    /// Area slam hitting the player and barrels in radius.
    TentacleSlam,
    /// Area scream that damages and stuns the player.
    SonicScream,
    /// Calls for minions. Announced only; spawning stays with the wave director.
    SummonMinions,
}

/// Placeable trap types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrapType {
    /// Intoxicates enemies in radius.
    RumPuddle,
    /// One-off explosion.
    BarrelBomb,
    /// One-off spike damage.
    SpikeTrap,
    /// Immobilises enemies for a few seconds.
    NetTrap,
    /// Burns enemies in radius for a while.
    FireBarrel,
}

impl TrapType {
    pub const ALL: [TrapType; 5] = [
        TrapType::RumPuddle,
        TrapType::BarrelBomb,
        TrapType::SpikeTrap,
        TrapType::NetTrap,
        TrapType::FireBarrel,
    ];
}

/// Wave director phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    /// Not started.
    #[default]
    Idle,
    /// Counting down before the next wave.
    Preparing,
    /// Emitting enemies at a fixed interval.
    Spawning,
    /// All enemies spawned, waiting for them to die.
    Active,
    /// Wave just cleared; next tick starts preparing.
    Completing,
    /// Finite wave list exhausted with dynamic waves disabled.
    Finished,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    Active,
    Paused,
    Victory,
    Defeat,
}

impl GamePhase {
    pub fn is_over(self) -> bool {
        matches!(self, GamePhase::Victory | GamePhase::Defeat)
    }
}
