//! Health pool shared by the player, barrels, and enemies.

use serde::{Deserialize, Serialize};

use crate::enums::CombatRole;
use crate::error::ControlSignal;

/// Result of a damage call on a live actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// Still standing with this much health.
    Wounded { remaining: f64 },
    /// This call was the killing blow. Reported exactly once per pool.
    Killed,
}

/// Health component. Death is terminal: a dead pool ignores every later
/// damage call. A respawning player receives a fresh `Health` instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    role: CombatRole,
    current: f64,
    max: f64,
    dead: bool,
}

impl Health {
    pub fn new(role: CombatRole, max: f64) -> Self {
        let max = max.max(0.0);
        Self {
            role,
            current: max,
            max,
            dead: false,
        }
    }

    pub fn role(&self) -> CombatRole {
        self.role
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// `current / max`. Zero for a zero-sized pool.
    pub fn health_fraction(&self) -> f64 {
        if self.max > 0.0 {
            self.current / self.max
        } else {
            0.0
        }
    }

    /// Subtract `amount` and clamp to `[0, max]`.
    pub fn apply_damage(&mut self, amount: f64) -> Result<DamageOutcome, ControlSignal> {
        if self.dead {
            return Err(self.terminal_signal());
        }

        let amount = if amount.is_finite() { amount.max(0.0) } else { 0.0 };
        self.current = (self.current - amount).clamp(0.0, self.max);

        if self.current <= 0.0 {
            self.dead = true;
            Ok(DamageOutcome::Killed)
        } else {
            Ok(DamageOutcome::Wounded {
                remaining: self.current,
            })
        }
    }

    /// `apply_damage`, running `on_death` only on the killing blow.
    pub fn apply_damage_notify(
        &mut self,
        amount: f64,
        on_death: impl FnOnce(),
    ) -> Result<DamageOutcome, ControlSignal> {
        let outcome = self.apply_damage(amount)?;
        if outcome == DamageOutcome::Killed {
            on_death();
        }
        Ok(outcome)
    }

    fn terminal_signal(&self) -> ControlSignal {
        match self.role {
            CombatRole::Objective => ControlSignal::AlreadyDestroyed,
            CombatRole::Player | CombatRole::Enemy => ControlSignal::AlreadyDead,
        }
    }
}

/// Linear area falloff `max(0, 1 - distance / radius)`.
/// Area sources scale their amount by this before touching `Health`.
pub fn falloff(distance: f64, radius: f64) -> f64 {
    if radius <= 0.0 {
        return 0.0;
    }
    (1.0 - distance / radius).max(0.0)
}
