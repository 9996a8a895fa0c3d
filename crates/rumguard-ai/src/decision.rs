//! Per-tick enemy decision.
//!
//! Pure function from a snapshot of one enemy's situation to what it should
//! do this tick. No ECS dependency; the host gathers the context, draws any
//! random rolls up front, and carries out the result.

use rumguard_core::enums::{EnemyKind, SpecialAbility, TargetKind};
use rumguard_core::types::Position;

use crate::policy::policy_for;

/// The target an enemy is currently pursuing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetInfo {
    pub kind: TargetKind,
    pub position: Position,
}

/// Input to the decision for a single enemy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentContext {
    pub kind: EnemyKind,
    pub position: Position,
    pub target: Option<TargetInfo>,
    /// From the enemy's intoxication state.
    pub speed_multiplier: f64,
    pub stumble_probability: f64,
    /// Uniform roll in `[0, 1)` drawn by the host for this tick.
    pub stumble_roll: f64,
    pub stumbling: bool,
    /// Held by a net: may still attack but not move.
    pub immobilized: bool,
    /// Area ability off cooldown.
    pub special_ready: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AgentAction {
    /// Stand still.
    Idle,
    /// Lose footing: stand still until a scheduled recovery.
    Stumble,
    Advance { towards: Position, speed: f64 },
    MeleeAttack,
    RangedAttack,
    /// Stay at the barrel and keep the steal timer running.
    Steal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentDecision {
    pub action: AgentAction,
    /// Area ability to fire this tick, independent of `action`.
    pub special: Option<SpecialAbility>,
}

impl AgentDecision {
    fn act(action: AgentAction) -> Self {
        Self {
            action,
            special: None,
        }
    }
}

/// Decide what one enemy does this tick.
pub fn decide(ctx: &AgentContext) -> AgentDecision {
    let policy = policy_for(ctx.kind);
    let stats = policy.stats();

    let Some(target) = ctx.target else {
        return AgentDecision::act(AgentAction::Idle);
    };
    let distance = ctx.position.range_to(&target.position);

    let special = policy
        .special()
        .filter(|profile| ctx.special_ready && distance <= profile.radius)
        .map(|profile| profile.ability);

    // Pirates at a barrel keep stealing regardless of footing.
    if policy.steal().is_some()
        && target.kind == TargetKind::Objective
        && distance <= stats.attack_range
    {
        return AgentDecision {
            action: AgentAction::Steal,
            special,
        };
    }

    if let Some(ranged) = policy.ranged() {
        if distance <= ranged.range && distance > stats.attack_range {
            return AgentDecision {
                action: AgentAction::RangedAttack,
                special,
            };
        }
    }

    let action = if ctx.stumbling {
        AgentAction::Idle
    } else if ctx.stumble_roll < ctx.stumble_probability {
        AgentAction::Stumble
    } else if distance > stats.attack_range {
        if ctx.immobilized {
            AgentAction::Idle
        } else {
            AgentAction::Advance {
                towards: target.position,
                speed: stats.base_speed * ctx.speed_multiplier,
            }
        }
    } else {
        AgentAction::MeleeAttack
    };

    AgentDecision { action, special }
}
