//! Per-kind enemy behaviour.
//!
//! Each enemy kind is a policy object carrying its stats and the optional
//! capabilities it adds on top of the shared advance-and-melee behaviour:
//! barrel stealing, ranged fire, or an area ability.

use rand::RngCore;

use rumguard_core::constants::*;
use rumguard_core::enums::{EnemyKind, SpecialAbility};
use rumguard_core::error::ControlSignal;
use rumguard_core::types::Position;

use crate::attack::{AttackProfile, Cooldown};
use crate::targeting::{TargetBias, TargetCandidate, TargetSelector};

/// Base numbers shared by every kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    /// Sober movement speed (m/s).
    pub base_speed: f64,
    pub damage: f64,
    /// Seconds between basic attacks.
    pub attack_cooldown: f64,
    /// Melee reach (m).
    pub attack_range: f64,
    pub max_health: f64,
}

impl EnemyStats {
    const fn melee(base_speed: f64, damage: f64, attack_cooldown: f64) -> Self {
        Self {
            base_speed,
            damage,
            attack_cooldown,
            attack_range: MELEE_RANGE,
            max_health: ENEMY_MAX_HEALTH,
        }
    }

    pub fn attack_profile(&self) -> AttackProfile {
        AttackProfile::new(self.damage, self.attack_cooldown, self.attack_range)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StealProfile {
    /// Seconds a pirate must stay at a barrel to make off with it.
    pub steal_time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangedProfile {
    /// Fire instead of closing in when the target is within this range.
    pub range: f64,
    pub projectile_speed: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecialProfile {
    pub ability: SpecialAbility,
    pub radius: f64,
    pub cooldown: f64,
}

impl SpecialProfile {
    pub fn gate(&self) -> Cooldown {
        Cooldown::new(self.cooldown)
    }
}

/// What an area ability does to everything within its radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbilityEffect {
    pub player_damage: f64,
    pub objective_damage: f64,
    /// Player stun duration; zero for none.
    pub stun_secs: f64,
}

impl AbilityEffect {
    pub const NONE: AbilityEffect = AbilityEffect {
        player_damage: 0.0,
        objective_damage: 0.0,
        stun_secs: 0.0,
    };
}

pub trait EnemyPolicy: Send + Sync {
    fn kind(&self) -> EnemyKind;

    fn stats(&self) -> EnemyStats;

    fn target_bias(&self) -> TargetBias {
        TargetBias::default()
    }

    fn steal(&self) -> Option<StealProfile> {
        None
    }

    fn ranged(&self) -> Option<RangedProfile> {
        None
    }

    fn special(&self) -> Option<SpecialProfile> {
        None
    }

    /// Resolve this kind's area ability into concrete effects.
    fn on_special_ability(&self) -> AbilityEffect {
        AbilityEffect::NONE
    }

    fn select_target(
        &self,
        agent: Position,
        player: Option<&TargetCandidate>,
        objectives: &[TargetCandidate],
        rng: &mut dyn RngCore,
    ) -> Result<TargetCandidate, ControlSignal> {
        TargetSelector::new(self.target_bias()).select(agent, player, objectives, rng)
    }
}

pub struct PiratePolicy;

impl EnemyPolicy for PiratePolicy {
    fn kind(&self) -> EnemyKind {
        EnemyKind::Pirate
    }

    fn stats(&self) -> EnemyStats {
        EnemyStats::melee(4.0, 15.0, 1.2)
    }

    fn steal(&self) -> Option<StealProfile> {
        Some(StealProfile {
            steal_time: PIRATE_STEAL_TIME,
        })
    }
}

pub struct SoldierPolicy;

impl EnemyPolicy for SoldierPolicy {
    fn kind(&self) -> EnemyKind {
        EnemyKind::EmpireSoldier
    }

    fn stats(&self) -> EnemyStats {
        EnemyStats::melee(3.0, 12.0, 2.0)
    }

    fn target_bias(&self) -> TargetBias {
        TargetBias::player_hunter()
    }

    fn ranged(&self) -> Option<RangedProfile> {
        Some(RangedProfile {
            range: SOLDIER_RANGED_RANGE,
            projectile_speed: PROJECTILE_SPEED,
        })
    }
}

/// Kraken, merfolk and cursed sailor share one shape: melee plus an area ability.
pub struct SeaCreaturePolicy {
    kind: EnemyKind,
    stats: EnemyStats,
    ability: SpecialAbility,
}

impl EnemyPolicy for SeaCreaturePolicy {
    fn kind(&self) -> EnemyKind {
        self.kind
    }

    fn stats(&self) -> EnemyStats {
        self.stats
    }

    fn special(&self) -> Option<SpecialProfile> {
        Some(SpecialProfile {
            ability: self.ability,
            radius: SPECIAL_ABILITY_RADIUS,
            cooldown: SPECIAL_ABILITY_COOLDOWN,
        })
    }

    fn on_special_ability(&self) -> AbilityEffect {
        let damage = self.stats.damage;
        match self.ability {
            SpecialAbility::TentacleSlam => AbilityEffect {
                player_damage: damage * TENTACLE_SLAM_PLAYER_FACTOR,
                objective_damage: damage,
                stun_secs: 0.0,
            },
            SpecialAbility::SonicScream => AbilityEffect {
                player_damage: damage * SONIC_SCREAM_PLAYER_FACTOR,
                objective_damage: 0.0,
                stun_secs: SONIC_SCREAM_STUN_SECS,
            },
            // Minions are announced only; nothing is spawned.
            SpecialAbility::SummonMinions => AbilityEffect::NONE,
        }
    }
}

static PIRATE: PiratePolicy = PiratePolicy;
static SOLDIER: SoldierPolicy = SoldierPolicy;
static KRAKEN: SeaCreaturePolicy = SeaCreaturePolicy {
    kind: EnemyKind::Kraken,
    stats: EnemyStats::melee(2.0, 25.0, 2.5),
    ability: SpecialAbility::TentacleSlam,
};
static MERFOLK: SeaCreaturePolicy = SeaCreaturePolicy {
    kind: EnemyKind::Merfolk,
    stats: EnemyStats::melee(4.5, 15.0, 1.0),
    ability: SpecialAbility::SonicScream,
};
static CURSED_SAILOR: SeaCreaturePolicy = SeaCreaturePolicy {
    kind: EnemyKind::CursedSailor,
    stats: EnemyStats::melee(3.0, 20.0, 1.5),
    ability: SpecialAbility::SummonMinions,
};

/// Get the behaviour policy for an enemy kind.
pub fn policy_for(kind: EnemyKind) -> &'static dyn EnemyPolicy {
    match kind {
        EnemyKind::Pirate => &PIRATE,
        EnemyKind::EmpireSoldier => &SOLDIER,
        EnemyKind::Kraken => &KRAKEN,
        EnemyKind::Merfolk => &MERFOLK,
        EnemyKind::CursedSailor => &CURSED_SAILOR,
    }
}
