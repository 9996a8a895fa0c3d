//! Cooldown-gated attacks with accuracy-based misses.

use glam::DVec3;
use log::debug;
use rand::Rng;

use rumguard_core::constants::AIM_SPREAD;
use rumguard_core::error::ControlSignal;
use rumguard_core::health::{DamageOutcome, Health};

/// Result of one attack attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackOutcome {
    /// Blocked by the cooldown gate. Nothing changed.
    OnCooldown,
    /// Passed the gate but whiffed. The cooldown is still spent.
    Missed,
    /// Landed for `damage`.
    Hit { damage: f64 },
}

/// Elapsed-time gate: ready when `now - last >= duration`, or if it never fired.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cooldown {
    pub duration: f64,
    last: Option<f64>,
}

impl Cooldown {
    pub fn new(duration: f64) -> Self {
        Self {
            duration: duration.max(0.0),
            last: None,
        }
    }

    pub fn last(&self) -> Option<f64> {
        self.last
    }

    pub fn ready(&self, now: f64) -> bool {
        match self.last {
            Some(last) => now - last >= self.duration,
            None => true,
        }
    }

    /// Seconds until ready; zero when ready.
    pub fn remaining(&self, now: f64) -> f64 {
        match self.last {
            Some(last) => (self.duration - (now - last)).max(0.0),
            None => 0.0,
        }
    }

    /// Consume the gate at `now`.
    pub fn trigger(&mut self, now: f64) -> Result<(), ControlSignal> {
        if !self.ready(now) {
            return Err(ControlSignal::OnCooldown);
        }
        self.last = Some(now);
        Ok(())
    }
}

/// An enemy's basic attack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackProfile {
    pub damage: f64,
    pub range: f64,
    cooldown: Cooldown,
}

impl AttackProfile {
    pub fn new(damage: f64, cooldown: f64, range: f64) -> Self {
        Self {
            damage,
            range,
            cooldown: Cooldown::new(cooldown),
        }
    }

    pub fn cooldown(&self) -> f64 {
        self.cooldown.duration
    }

    pub fn last_fired(&self) -> Option<f64> {
        self.cooldown.last()
    }

    /// Gate, then roll against `accuracy` (1.0 for actors without intoxication).
    /// A roll above accuracy misses. `last_fired` moves on hit and miss alike.
    pub fn try_attack<R: Rng + ?Sized>(&mut self, now: f64, accuracy: f64, rng: &mut R) -> AttackOutcome {
        if self.cooldown.trigger(now).is_err() {
            return AttackOutcome::OnCooldown;
        }

        let roll: f64 = rng.gen();
        if roll > accuracy.clamp(0.0, 1.0) {
            AttackOutcome::Missed
        } else {
            AttackOutcome::Hit {
                damage: self.damage,
            }
        }
    }

    /// Cooldown gate alone, for shots whose accuracy shows up as aim error.
    pub fn try_fire(&mut self, now: f64) -> Result<(), ControlSignal> {
        self.cooldown.trigger(now)
    }

    /// `try_attack`, applying a hit to `target`. The second element is the
    /// target's damage result when a hit landed on a live pool.
    pub fn resolve_against<R: Rng + ?Sized>(
        &mut self,
        now: f64,
        accuracy: f64,
        rng: &mut R,
        target: &mut Health,
    ) -> (AttackOutcome, Option<DamageOutcome>) {
        let outcome = self.try_attack(now, accuracy, rng);
        let damage = match outcome {
            AttackOutcome::Hit { damage } => match target.apply_damage(damage) {
                Ok(result) => Some(result),
                Err(signal) => {
                    debug!("hit absorbed: {signal}");
                    None
                }
            },
            AttackOutcome::OnCooldown | AttackOutcome::Missed => None,
        };
        (outcome, damage)
    }
}

/// Shake an aim direction by up to `(1 - accuracy) * AIM_SPREAD` per axis
/// and renormalise. Whether the shot connects is decided by the host.
pub fn perturb_aim<R: Rng + ?Sized>(direction: DVec3, accuracy: f64, rng: &mut R) -> DVec3 {
    let base = direction.normalize_or_zero();
    let inaccuracy = (1.0 - accuracy.clamp(0.0, 1.0)) * AIM_SPREAD;
    if inaccuracy <= 0.0 || base == DVec3::ZERO {
        return base;
    }

    let jitter = DVec3::new(
        rng.gen_range(-inaccuracy..inaccuracy),
        rng.gen_range(-inaccuracy..inaccuracy),
        rng.gen_range(-inaccuracy..inaccuracy),
    );
    let shaken = (base + jitter).normalize_or_zero();
    if shaken == DVec3::ZERO {
        base
    } else {
        shaken
    }
}
