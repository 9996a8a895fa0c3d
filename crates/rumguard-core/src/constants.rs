//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Intoxication ---

/// Upper bound of the intoxication level.
pub const INTOXICATION_MAX: f64 = 100.0;

/// Level at which an actor becomes Tipsy.
pub const TIPSY_THRESHOLD: f64 = 25.0;

/// Level at which an actor becomes Drunk.
pub const DRUNK_THRESHOLD: f64 = 50.0;

/// Level at which an actor becomes Wasted.
pub const WASTED_THRESHOLD: f64 = 75.0;

/// Sobering rate (level points per second).
pub const SOBER_UP_RATE: f64 = 2.0;

// --- Enemy AI ---

/// Melee reach shared by every enemy kind (meters).
pub const MELEE_RANGE: f64 = 2.0;

/// Default probability of preferring a barrel over the player.
pub const DEFAULT_OBJECTIVE_PREFERENCE: f64 = 0.6;

/// Empire soldiers roll this first to go after the player.
pub const SOLDIER_PLAYER_PREFERENCE: f64 = 0.7;

/// Musket reach (meters).
pub const SOLDIER_RANGED_RANGE: f64 = 15.0;

/// Musket ball speed (m/s).
pub const PROJECTILE_SPEED: f64 = 20.0;

/// Per-axis aim spread at zero accuracy.
pub const AIM_SPREAD: f64 = 10.0;

/// Time a pirate needs next to a barrel to carry it off (seconds).
pub const PIRATE_STEAL_TIME: f64 = 3.0;

/// Sea-creature special ability radius (meters).
pub const SPECIAL_ABILITY_RADIUS: f64 = 8.0;

/// Sea-creature special ability cooldown (seconds).
pub const SPECIAL_ABILITY_COOLDOWN: f64 = 10.0;

/// Tentacle slam damage multiplier against the player.
pub const TENTACLE_SLAM_PLAYER_FACTOR: f64 = 1.5;

/// Sonic scream damage multiplier against the player.
pub const SONIC_SCREAM_PLAYER_FACTOR: f64 = 0.5;

/// Player stun duration after a sonic scream (seconds).
pub const SONIC_SCREAM_STUN_SECS: f64 = 2.0;

/// Stumble recovery window (seconds, uniform).
pub const STUMBLE_RECOVERY_MIN_SECS: f64 = 0.5;
pub const STUMBLE_RECOVERY_MAX_SECS: f64 = 2.0;

/// Enemy starting health.
pub const ENEMY_MAX_HEALTH: f64 = 50.0;

/// Corpse lifetime before despawn (seconds).
pub const ENEMY_DEATH_DELAY_SECS: f64 = 3.0;

// --- Player ---

pub const PLAYER_MAX_HEALTH: f64 = 100.0;

/// Delay before a dead player respawns (seconds).
pub const PLAYER_RESPAWN_DELAY_SECS: f64 = 3.0;

pub const WEAPON_DAMAGE: f64 = 25.0;

/// Minimum time between shots (seconds).
pub const WEAPON_FIRE_INTERVAL: f64 = 0.5;

pub const WEAPON_MAGAZINE: u32 = 12;

pub const WEAPON_RELOAD_SECS: f64 = 2.0;

// --- Rum bottle grenade ---

pub const GRENADE_COUNT: u32 = 5;
pub const GRENADE_RADIUS: f64 = 6.0;
pub const GRENADE_DAMAGE: f64 = 30.0;
pub const GRENADE_INTOXICATION: f64 = 50.0;

// --- Deck cannon ---

pub const CANNON_DAMAGE: f64 = 100.0;
pub const CANNON_EXPLOSION_RADIUS: f64 = 5.0;

/// Farthest impact point from the muzzle (meters).
pub const CANNON_RANGE: f64 = 50.0;
pub const CANNON_RELOAD_SECS: f64 = 3.0;

/// The player must stand this close to man a cannon (meters).
pub const CANNON_INTERACTION_RANGE: f64 = 3.0;

// --- Traps ---

pub const TRAP_TRIGGER_RADIUS: f64 = 2.0;
pub const TRAP_DAMAGE: f64 = 50.0;
pub const TRAP_INTOXICATION: f64 = 40.0;

/// Net trap hold time (seconds).
pub const NET_IMMOBILIZE_SECS: f64 = 3.0;

/// Fire barrel burn time (seconds).
pub const FIRE_DURATION_SECS: f64 = 10.0;

/// Fire barrel pulse interval (seconds). Each pulse deals `TRAP_DAMAGE * FIRE_PULSE_SECS`.
pub const FIRE_PULSE_SECS: f64 = 0.5;

/// Starting trap inventory, indexed like `TrapType::ALL`.
pub const TRAP_INVENTORY: [u32; 5] = [5, 3, 4, 3, 2];

// --- Barrels ---

pub const BARREL_MAX_HEALTH: f64 = 100.0;

/// Radius of the rum spill when a barrel breaks (meters).
pub const RUM_SPILL_RADIUS: f64 = 5.0;

/// Intoxication applied by a rum spill.
pub const RUM_SPILL_INTOXICATION: f64 = 30.0;

/// Barrels lost before the session is a defeat.
pub const MAX_BARRELS_LOST: u32 = 3;

// --- Waves ---

/// Delay before the very first wave (seconds).
pub const WAVE_INITIAL_DELAY_SECS: f64 = 5.0;

pub const WAVE_DEFAULT_SPAWN_INTERVAL: f64 = 1.0;
pub const WAVE_DEFAULT_PREPARATION_SECS: f64 = 10.0;

/// Count multiplier applied when synthesising a wave.
pub const DYNAMIC_WAVE_MULTIPLIER: f64 = 1.1;
pub const DYNAMIC_WAVE_SPAWN_INTERVAL: f64 = 0.8;
pub const DYNAMIC_WAVE_PREPARATION_SECS: f64 = 10.0;

// --- Score ---

pub const SCORE_PER_KILL: u32 = 100;
pub const SCORE_PER_WAVE: u32 = 500;
