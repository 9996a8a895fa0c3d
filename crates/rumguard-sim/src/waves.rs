//! Wave director: turns a designer wave list into timed spawn requests.
//!
//! Phases run `Idle -> Preparing -> Spawning -> Active -> Completing ->
//! Preparing` for every wave. When the list runs out the director either
//! synthesises a harder copy of the last wave or finishes. All waits are
//! elapsed-time comparisons advanced by `tick(dt)`.

use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use rumguard_core::constants::*;
use rumguard_core::enums::{EnemyKind, WavePhase};

/// Absorbs float accumulation error in elapsed-time comparisons.
const TIME_EPSILON: f64 = 1e-9;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read wave file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse wave file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid wave configuration: {0}")]
    Invalid(String),
}

/// `count` enemies of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnGroup {
    pub kind: EnemyKind,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveDefinition {
    pub name: String,
    /// Spawned group by group in listed order.
    pub enemies: Vec<SpawnGroup>,
    #[serde(default = "default_spawn_interval")]
    pub time_between_spawns: f64,
    /// Pause after this wave completes before the next one starts.
    #[serde(default = "default_preparation")]
    pub preparation_time: f64,
}

fn default_spawn_interval() -> f64 {
    WAVE_DEFAULT_SPAWN_INTERVAL
}

fn default_preparation() -> f64 {
    WAVE_DEFAULT_PREPARATION_SECS
}

impl WaveDefinition {
    pub fn new(name: impl Into<String>, enemies: Vec<SpawnGroup>) -> Self {
        Self {
            name: name.into(),
            enemies,
            time_between_spawns: WAVE_DEFAULT_SPAWN_INTERVAL,
            preparation_time: WAVE_DEFAULT_PREPARATION_SECS,
        }
    }

    /// Saturates; `WaveConfig::validate` rejects waves that would overflow.
    pub fn total(&self) -> u32 {
        self.enemies
            .iter()
            .fold(0u32, |total, group| total.saturating_add(group.count))
    }

    /// Kinds in spawn order, one entry per enemy.
    fn spawn_order(&self) -> Vec<EnemyKind> {
        self.enemies
            .iter()
            .flat_map(|group| std::iter::repeat(group.kind).take(group.count as usize))
            .collect()
    }
}

/// How waves are synthesised once the designer list is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicWaves {
    pub enabled: bool,
    /// Per-group count growth; counts round up.
    pub multiplier: f64,
    pub time_between_spawns: f64,
    pub preparation_time: f64,
}

impl Default for DynamicWaves {
    fn default() -> Self {
        Self {
            enabled: true,
            multiplier: DYNAMIC_WAVE_MULTIPLIER,
            time_between_spawns: DYNAMIC_WAVE_SPAWN_INTERVAL,
            preparation_time: DYNAMIC_WAVE_PREPARATION_SECS,
        }
    }
}

/// Designer wave data. Read-only once a session starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    pub initial_delay: f64,
    pub waves: Vec<WaveDefinition>,
    pub dynamic: DynamicWaves,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            initial_delay: WAVE_INITIAL_DELAY_SECS,
            waves: crate::scenario::default_waves(),
            dynamic: DynamicWaves::default(),
        }
    }
}

impl WaveConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: WaveConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !non_negative(self.initial_delay) {
            return Err(ConfigError::Invalid(format!(
                "initial_delay must be >= 0, got {}",
                self.initial_delay
            )));
        }
        for wave in &self.waves {
            let counted = wave
                .enemies
                .iter()
                .try_fold(0u32, |total, group| total.checked_add(group.count));
            if counted.is_none() {
                return Err(ConfigError::Invalid(format!(
                    "{}: enemy count overflows",
                    wave.name
                )));
            }
            if !positive(wave.time_between_spawns) {
                return Err(ConfigError::Invalid(format!(
                    "{}: time_between_spawns must be > 0",
                    wave.name
                )));
            }
            if !non_negative(wave.preparation_time) {
                return Err(ConfigError::Invalid(format!(
                    "{}: preparation_time must be >= 0",
                    wave.name
                )));
            }
        }
        let dynamic = &self.dynamic;
        if dynamic.enabled {
            if !(dynamic.multiplier.is_finite() && dynamic.multiplier >= 1.0) {
                return Err(ConfigError::Invalid(format!(
                    "dynamic multiplier must be >= 1, got {}",
                    dynamic.multiplier
                )));
            }
            if !positive(dynamic.time_between_spawns) || !non_negative(dynamic.preparation_time) {
                return Err(ConfigError::Invalid(
                    "dynamic wave timings must be positive".to_string(),
                ));
            }
        }
        Ok(())
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// What the director asks of the world this tick.
#[derive(Debug, Clone, PartialEq)]
pub enum WaveEvent {
    WaveStarted { index: u32, name: String },
    Spawn { kind: EnemyKind },
    WaveCompleted { index: u32 },
    AllWavesCleared,
}

#[derive(Debug, Clone)]
pub struct WaveDirector {
    initial_delay: f64,
    /// Grows as dynamic waves are synthesised.
    waves: Vec<WaveDefinition>,
    dynamic: DynamicWaves,
    phase: WavePhase,
    index: u32,
    countdown: f64,
    /// Seconds since entering Spawning.
    spawn_elapsed: f64,
    spawn_queue: Vec<EnemyKind>,
    spawned: usize,
    remaining: u32,
    next_preparation: f64,
}

impl WaveDirector {
    pub fn new(config: WaveConfig) -> Self {
        Self {
            initial_delay: config.initial_delay,
            waves: config.waves,
            dynamic: config.dynamic,
            phase: WavePhase::Idle,
            index: 0,
            countdown: 0.0,
            spawn_elapsed: 0.0,
            spawn_queue: Vec::new(),
            spawned: 0,
            remaining: 0,
            next_preparation: 0.0,
        }
    }

    pub fn phase(&self) -> WavePhase {
        self.phase
    }

    /// Index of the wave being fought, or the next one while preparing.
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn countdown(&self) -> f64 {
        self.countdown
    }

    pub fn current_name(&self) -> &str {
        self.waves
            .get(self.index as usize)
            .map(|wave| wave.name.as_str())
            .unwrap_or("")
    }

    pub fn waves(&self) -> &[WaveDefinition] {
        &self.waves
    }

    /// Begin the first preparation countdown. Only valid from Idle.
    pub fn start(&mut self) {
        if self.phase != WavePhase::Idle {
            return;
        }
        self.phase = WavePhase::Preparing;
        self.countdown = self.initial_delay;
        debug!("first wave in {:.1}s", self.countdown);
    }

    pub fn on_enemy_killed(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn tick(&mut self, dt: f64) -> Vec<WaveEvent> {
        let mut events = Vec::new();

        match self.phase {
            WavePhase::Idle | WavePhase::Finished => {}
            WavePhase::Preparing => {
                self.countdown = (self.countdown - dt).max(0.0);
                if self.countdown <= TIME_EPSILON {
                    self.begin_spawning(&mut events);
                }
            }
            WavePhase::Spawning => {
                self.spawn_elapsed += dt;
                self.spawn_due(&mut events);
            }
            WavePhase::Active => {
                if self.remaining == 0 {
                    self.complete_wave(&mut events);
                }
            }
            WavePhase::Completing => self.advance_after_completion(&mut events),
        }

        events
    }

    fn begin_spawning(&mut self, events: &mut Vec<WaveEvent>) {
        let Some(wave) = self.waves.get(self.index as usize) else {
            // Only reachable with an empty list and dynamic waves disabled.
            self.finish(events);
            return;
        };

        self.spawn_queue = wave.spawn_order();
        self.remaining = wave.total();
        self.spawned = 0;
        self.spawn_elapsed = 0.0;
        self.phase = WavePhase::Spawning;

        info!("{} started: {} enemies", wave.name, self.remaining);
        events.push(WaveEvent::WaveStarted {
            index: self.index,
            name: wave.name.clone(),
        });
        self.spawn_due(events);
    }

    fn spawn_due(&mut self, events: &mut Vec<WaveEvent>) {
        let interval = self
            .waves
            .get(self.index as usize)
            .map(|wave| wave.time_between_spawns)
            .unwrap_or(WAVE_DEFAULT_SPAWN_INTERVAL);

        while self.spawned < self.spawn_queue.len()
            && self.spawn_elapsed + TIME_EPSILON >= self.spawned as f64 * interval
        {
            events.push(WaveEvent::Spawn {
                kind: self.spawn_queue[self.spawned],
            });
            self.spawned += 1;
        }

        if self.spawned >= self.spawn_queue.len() {
            self.phase = WavePhase::Active;
        }
    }

    fn complete_wave(&mut self, events: &mut Vec<WaveEvent>) {
        let preparation = self
            .waves
            .get(self.index as usize)
            .map(|wave| wave.preparation_time)
            .unwrap_or(WAVE_DEFAULT_PREPARATION_SECS);

        info!("wave {} completed", self.index + 1);
        events.push(WaveEvent::WaveCompleted { index: self.index });
        self.index += 1;
        self.next_preparation = preparation;
        self.phase = WavePhase::Completing;
    }

    fn advance_after_completion(&mut self, events: &mut Vec<WaveEvent>) {
        if (self.index as usize) < self.waves.len() {
            self.prepare(self.next_preparation);
        } else if self.dynamic.enabled {
            match self.synthesise_wave() {
                Some(wave) => {
                    debug!("synthesised {} with {} enemies", wave.name, wave.total());
                    self.waves.push(wave);
                    self.prepare(self.dynamic.preparation_time);
                }
                None => self.finish(events),
            }
        } else {
            self.finish(events);
        }
    }

    fn prepare(&mut self, countdown: f64) {
        self.countdown = countdown;
        self.phase = WavePhase::Preparing;
    }

    fn finish(&mut self, events: &mut Vec<WaveEvent>) {
        if self.phase == WavePhase::Finished {
            return;
        }
        info!("all waves cleared");
        self.phase = WavePhase::Finished;
        events.push(WaveEvent::AllWavesCleared);
    }

    /// Harder copy of the last wave in the list.
    fn synthesise_wave(&self) -> Option<WaveDefinition> {
        let last = self.waves.last()?;
        let enemies = last
            .enemies
            .iter()
            .map(|group| SpawnGroup {
                kind: group.kind,
                count: scaled_count(group.count, self.dynamic.multiplier),
            })
            .collect();
        Some(WaveDefinition {
            name: format!("Wave {}", self.index + 1),
            enemies,
            time_between_spawns: self.dynamic.time_between_spawns,
            preparation_time: self.dynamic.preparation_time,
        })
    }
}

/// Slack for products such as `50.0 * 1.1` that land just above a whole number.
const SCALE_EPSILON: f64 = 1e-9;

/// `count * multiplier`, rounded up.
pub fn scaled_count(count: u32, multiplier: f64) -> u32 {
    (count as f64 * multiplier - SCALE_EPSILON).ceil().max(0.0) as u32
}
