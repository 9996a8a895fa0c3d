//! Game state snapshot: the complete visible state handed to the host each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{ActorRef, Position, SimTime};

/// Complete session state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub wave: WaveView,
    pub player: Option<PlayerView>,
    pub barrels: Vec<BarrelView>,
    pub enemies: Vec<EnemyView>,
    pub traps: Vec<TrapView>,
    pub cannons: Vec<CannonView>,
    pub score: ScoreView,
    pub events: Vec<GameEvent>,
}

/// Wave director status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub phase: WavePhase,
    /// Zero-based index of the current (or next) wave.
    pub index: u32,
    pub name: String,
    /// Enemies from the current wave still alive or not yet spawned.
    pub remaining: u32,
    /// Seconds until spawning begins (only meaningful while Preparing).
    pub countdown_secs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub actor: ActorRef,
    pub position: Position,
    pub health: f64,
    pub health_fraction: f64,
    pub dead: bool,
    pub stunned: bool,
    pub ammo: u32,
    pub reloading: bool,
    pub grenades: u32,
    pub traps: [u32; 5],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarrelView {
    pub actor: ActorRef,
    pub position: Position,
    pub health_fraction: f64,
    pub destroyed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub actor: ActorRef,
    pub kind: EnemyKind,
    pub position: Position,
    pub health_fraction: f64,
    pub dead: bool,
    pub drunken_state: DrunkenState,
    pub intoxication: f64,
    pub stumbling: bool,
    pub immobilized: bool,
    pub target: Option<ActorRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrapView {
    pub actor: ActorRef,
    pub trap_type: TrapType,
    pub position: Position,
    pub triggered: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CannonView {
    pub actor: ActorRef,
    pub position: Position,
    pub loaded: bool,
}

/// Running score for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreView {
    pub score: u32,
    pub enemies_killed: u32,
    pub enemies_spawned: u32,
    pub waves_completed: u32,
    pub barrels_total: u32,
    pub barrels_destroyed: u32,
    /// Fraction of barrels still standing.
    pub barrel_survival: f64,
}
