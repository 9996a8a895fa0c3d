//! Intoxication: a per-actor decaying level with a derived discrete state.
//!
//! The level lives in `[0, INTOXICATION_MAX]`. The discrete `DrunkenState`
//! is always the threshold bracket containing the level; it is recomputed
//! after every mutation and never written directly. The same thresholds
//! apply while rising and falling.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::DrunkenState;

/// Behaviour modifiers attached to one drunken state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectProfile {
    /// Multiplier on movement speed.
    pub speed_multiplier: f64,
    /// Probability of an attack landing (1.0 = never misses).
    pub accuracy_multiplier: f64,
    /// Chance per decision tick of stumbling.
    pub stumble_probability: f64,
}

impl EffectProfile {
    pub const fn new(speed: f64, accuracy: f64, stumble: f64) -> Self {
        Self {
            speed_multiplier: speed,
            accuracy_multiplier: accuracy,
            stumble_probability: stumble,
        }
    }
}

/// Thresholds, decay and per-state effects. Configuration, not computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntoxicationTuning {
    pub tipsy_threshold: f64,
    pub drunk_threshold: f64,
    pub wasted_threshold: f64,
    /// Level points lost per second.
    pub decay_rate: f64,
    pub sober: EffectProfile,
    pub tipsy: EffectProfile,
    pub drunk: EffectProfile,
    pub wasted: EffectProfile,
}

impl Default for IntoxicationTuning {
    fn default() -> Self {
        Self {
            tipsy_threshold: TIPSY_THRESHOLD,
            drunk_threshold: DRUNK_THRESHOLD,
            wasted_threshold: WASTED_THRESHOLD,
            decay_rate: SOBER_UP_RATE,
            sober: EffectProfile::new(1.0, 1.0, 0.0),
            tipsy: EffectProfile::new(0.9, 0.8, 0.0),
            drunk: EffectProfile::new(0.7, 0.5, 0.1),
            wasted: EffectProfile::new(0.4, 0.2, 0.3),
        }
    }
}

impl IntoxicationTuning {
    /// Effect triple for a state.
    pub fn effects(&self, state: DrunkenState) -> EffectProfile {
        match state {
            DrunkenState::Sober => self.sober,
            DrunkenState::Tipsy => self.tipsy,
            DrunkenState::Drunk => self.drunk,
            DrunkenState::Wasted => self.wasted,
        }
    }
}

/// Bracket containing `level`. Checked from the highest threshold down with
/// `>=`, so a level sitting exactly on a threshold belongs to the higher state.
pub fn state_for(level: f64, tuning: &IntoxicationTuning) -> DrunkenState {
    if level >= tuning.wasted_threshold {
        DrunkenState::Wasted
    } else if level >= tuning.drunk_threshold {
        DrunkenState::Drunk
    } else if level >= tuning.tipsy_threshold {
        DrunkenState::Tipsy
    } else {
        DrunkenState::Sober
    }
}

/// A bracket crossing observed by one mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    pub from: DrunkenState,
    pub to: DrunkenState,
}

/// Intoxication component. Created at level 0 when the actor spawns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intoxication {
    level: f64,
    state: DrunkenState,
    tuning: IntoxicationTuning,
}

impl Default for Intoxication {
    fn default() -> Self {
        Self::new(IntoxicationTuning::default())
    }
}

impl Intoxication {
    pub fn new(tuning: IntoxicationTuning) -> Self {
        Self {
            level: 0.0,
            state: DrunkenState::Sober,
            tuning,
        }
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn state(&self) -> DrunkenState {
        self.state
    }

    pub fn tuning(&self) -> &IntoxicationTuning {
        &self.tuning
    }

    /// Apply an external stimulus. Takes effect immediately; decay resumes
    /// on the next `tick`.
    pub fn add_effect(&mut self, amount: f64) -> Option<StateChange> {
        let amount = sanitize(amount);
        self.level = (self.level + amount).clamp(0.0, INTOXICATION_MAX);
        self.reevaluate()
    }

    /// Sober up by `decay_rate * dt`, never below zero.
    pub fn tick(&mut self, dt: f64) -> Option<StateChange> {
        let dt = sanitize(dt);
        if self.level > 0.0 {
            self.level = (self.level - self.tuning.decay_rate * dt).max(0.0);
        }
        self.reevaluate()
    }

    pub fn effects(&self) -> EffectProfile {
        self.tuning.effects(self.state)
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.effects().speed_multiplier
    }

    pub fn accuracy_multiplier(&self) -> f64 {
        self.effects().accuracy_multiplier
    }

    pub fn stumble_probability(&self) -> f64 {
        self.effects().stumble_probability
    }

    fn reevaluate(&mut self) -> Option<StateChange> {
        let previous = self.state;
        self.state = state_for(self.level, &self.tuning);
        (previous != self.state).then_some(StateChange {
            from: previous,
            to: self.state,
        })
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}
