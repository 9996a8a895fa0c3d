//! Target selection: which actor an enemy pursues.
//!
//! One weighted roll decides the preferred category (nearest barrel or the
//! player); an empty category falls back to the other one. Callers re-run
//! selection whenever their current target becomes invalid.

use log::debug;
use rand::Rng;

use rumguard_core::constants::{DEFAULT_OBJECTIVE_PREFERENCE, SOLDIER_PLAYER_PREFERENCE};
use rumguard_core::enums::TargetKind;
use rumguard_core::error::ControlSignal;
use rumguard_core::types::{ActorRef, Position};

/// Something an enemy can go after.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetCandidate {
    pub actor: ActorRef,
    pub position: Position,
    pub kind: TargetKind,
}

/// Per-kind weighting of the selection roll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetBias {
    /// Roll below `p_objective` goes for the nearest barrel, otherwise the player.
    PreferObjective { p_objective: f64 },
    /// Roll below `p_player` goes for the player; otherwise a second,
    /// objective-preferring roll decides.
    PreferPlayer { p_player: f64, p_objective: f64 },
}

impl Default for TargetBias {
    fn default() -> Self {
        TargetBias::PreferObjective {
            p_objective: DEFAULT_OBJECTIVE_PREFERENCE,
        }
    }
}

impl TargetBias {
    /// The empire soldier weighting.
    pub fn player_hunter() -> Self {
        TargetBias::PreferPlayer {
            p_player: SOLDIER_PLAYER_PREFERENCE,
            p_objective: DEFAULT_OBJECTIVE_PREFERENCE,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TargetSelector {
    bias: TargetBias,
}

impl TargetSelector {
    pub fn new(bias: TargetBias) -> Self {
        Self { bias }
    }

    pub fn bias(&self) -> TargetBias {
        self.bias
    }

    /// Pick one target. `objectives` should only contain live barrels.
    pub fn select<R: Rng + ?Sized>(
        &self,
        agent: Position,
        player: Option<&TargetCandidate>,
        objectives: &[TargetCandidate],
        rng: &mut R,
    ) -> Result<TargetCandidate, ControlSignal> {
        let chosen = match self.bias {
            TargetBias::PreferObjective { p_objective } => {
                choose_by_objective_roll(agent, player, objectives, p_objective, rng)
            }
            TargetBias::PreferPlayer {
                p_player,
                p_objective,
            } => {
                let roll: f64 = rng.gen();
                match player {
                    Some(p) if roll < p_player => Some(*p),
                    _ => choose_by_objective_roll(agent, player, objectives, p_objective, rng),
                }
            }
        };

        match chosen {
            Some(target) => {
                debug!("selected {:?} {:?}", target.kind, target.actor);
                Ok(target)
            }
            None => Err(ControlSignal::NoTarget),
        }
    }
}

fn choose_by_objective_roll<R: Rng + ?Sized>(
    agent: Position,
    player: Option<&TargetCandidate>,
    objectives: &[TargetCandidate],
    p_objective: f64,
    rng: &mut R,
) -> Option<TargetCandidate> {
    let roll: f64 = rng.gen();
    let nearest_objective = nearest(agent, objectives).copied();
    let player = player.copied();

    if roll < p_objective {
        nearest_objective.or(player)
    } else {
        player.or(nearest_objective)
    }
}

/// Closest candidate by straight-line distance. Ties keep the first one seen.
pub fn nearest(agent: Position, candidates: &[TargetCandidate]) -> Option<&TargetCandidate> {
    let mut best: Option<(&TargetCandidate, f64)> = None;
    for candidate in candidates {
        let distance = agent.range_to(&candidate.position);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((candidate, distance)),
        }
    }
    best.map(|(candidate, _)| candidate)
}
