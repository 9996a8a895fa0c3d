//! ECS components for hecs entities.
//!
//! Components here are plain data. `Health` and `Intoxication` live in their
//! own modules because they carry small state machines of their own.
//! Components that point at other entities live in `rumguard-sim`.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::*;

/// Marks the player actor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// Marks a rum barrel objective.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Barrel;

/// Marks an enemy and records its kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// Index of the wave that spawned it.
    pub wave_index: u32,
}

/// Forced idle after a stumble. Removed by a scheduled recovery.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Stumbling;

/// Held in place by a net trap. Removed by a scheduled release.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Immobilized;

/// Player controls disabled by a sonic scream.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Stunned;

/// Death already handled: enemies wait for their corpse timer, barrels stay as wrecks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Corpse;

/// The player's firearm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    pub damage: f64,
    /// Minimum seconds between shots.
    pub fire_interval: f64,
    pub magazine: u32,
    pub ammo: u32,
    pub reload_secs: f64,
    pub reloading: bool,
    /// Time of the last shot, if any.
    pub last_shot: Option<f64>,
}

impl Default for Weapon {
    fn default() -> Self {
        Self {
            damage: WEAPON_DAMAGE,
            fire_interval: WEAPON_FIRE_INTERVAL,
            magazine: WEAPON_MAGAZINE,
            ammo: WEAPON_MAGAZINE,
            reload_secs: WEAPON_RELOAD_SECS,
            reloading: false,
            last_shot: None,
        }
    }
}

/// Consumables carried by the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    pub grenades: u32,
    /// Remaining traps, indexed like `TrapType::ALL`.
    pub traps: [u32; 5],
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            grenades: GRENADE_COUNT,
            traps: TRAP_INVENTORY,
        }
    }
}

impl Inventory {
    pub fn traps_left(&self, trap_type: TrapType) -> u32 {
        self.traps[trap_slot(trap_type)]
    }

    /// Take one trap out of the inventory. False when none are left.
    pub fn take_trap(&mut self, trap_type: TrapType) -> bool {
        let slot = &mut self.traps[trap_slot(trap_type)];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }
}

fn trap_slot(trap_type: TrapType) -> usize {
    match trap_type {
        TrapType::RumPuddle => 0,
        TrapType::BarrelBomb => 1,
        TrapType::SpikeTrap => 2,
        TrapType::NetTrap => 3,
        TrapType::FireBarrel => 4,
    }
}

/// A placed trap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trap {
    pub trap_type: TrapType,
    pub trigger_radius: f64,
    /// Armed traps wait for an enemy; a triggered trap never re-arms.
    pub triggered: bool,
}

impl Trap {
    pub fn new(trap_type: TrapType) -> Self {
        Self {
            trap_type,
            trigger_radius: TRAP_TRIGGER_RADIUS,
            triggered: false,
        }
    }
}

/// Lingering fire zone left by a triggered fire barrel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Burning {
    pub remaining_secs: f64,
    /// Seconds until the next damage pulse.
    pub next_pulse_in: f64,
}

impl Default for Burning {
    fn default() -> Self {
        Self {
            remaining_secs: FIRE_DURATION_SECS,
            next_pulse_in: 0.0,
        }
    }
}

/// A deck cannon the player can man.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cannon {
    pub loaded: bool,
}

impl Default for Cannon {
    fn default() -> Self {
        Self { loaded: true }
    }
}
