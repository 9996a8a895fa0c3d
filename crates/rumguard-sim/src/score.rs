//! Score and objective keeping.

use log::info;

use rumguard_core::constants::{MAX_BARRELS_LOST, SCORE_PER_KILL, SCORE_PER_WAVE};
use rumguard_core::enums::{EnemyKind, GamePhase};
use rumguard_core::state::ScoreView;
use rumguard_core::types::ActorRef;

use crate::collaborators::SessionObserver;

#[derive(Debug, Clone)]
pub struct ScoreKeeper {
    score: u32,
    enemies_killed: u32,
    enemies_spawned: u32,
    waves_completed: u32,
    barrels_total: u32,
    barrels_destroyed: u32,
    max_barrels_lost: u32,
    all_waves_cleared: bool,
}

impl Default for ScoreKeeper {
    fn default() -> Self {
        Self::new(0, MAX_BARRELS_LOST)
    }
}

impl ScoreKeeper {
    pub fn new(barrels_total: u32, max_barrels_lost: u32) -> Self {
        Self {
            score: 0,
            enemies_killed: 0,
            enemies_spawned: 0,
            waves_completed: 0,
            barrels_total,
            barrels_destroyed: 0,
            max_barrels_lost,
            all_waves_cleared: false,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn on_enemy_spawned(&mut self) {
        self.enemies_spawned += 1;
    }

    /// Share of barrels still standing; zero with no barrels at all.
    pub fn barrel_survival(&self) -> f64 {
        if self.barrels_total == 0 {
            return 0.0;
        }
        (self.barrels_total - self.barrels_destroyed.min(self.barrels_total)) as f64
            / self.barrels_total as f64
    }

    /// Terminal session phase, if one has been reached. Defeat wins a tie.
    ///
    /// The loss limit is capped at the number of barrels in the arena, so
    /// an arena with fewer barrels than `max_barrels_lost` still ends in
    /// defeat once every barrel is gone instead of never.
    pub fn outcome(&self) -> Option<GamePhase> {
        let loss_limit = if self.barrels_total > 0 {
            self.max_barrels_lost.min(self.barrels_total)
        } else {
            self.max_barrels_lost
        };
        if self.barrels_destroyed >= loss_limit.max(1) {
            Some(GamePhase::Defeat)
        } else if self.all_waves_cleared {
            Some(GamePhase::Victory)
        } else {
            None
        }
    }

    pub fn view(&self) -> ScoreView {
        ScoreView {
            score: self.score,
            enemies_killed: self.enemies_killed,
            enemies_spawned: self.enemies_spawned,
            waves_completed: self.waves_completed,
            barrels_total: self.barrels_total,
            barrels_destroyed: self.barrels_destroyed,
            barrel_survival: self.barrel_survival(),
        }
    }
}

impl SessionObserver for ScoreKeeper {
    fn on_objective_destroyed(&mut self, _barrel: ActorRef) {
        self.barrels_destroyed += 1;
        info!(
            "barrel destroyed ({}/{})",
            self.barrels_destroyed, self.barrels_total
        );
    }

    fn on_enemy_killed(&mut self, _actor: ActorRef, _kind: EnemyKind) {
        self.enemies_killed += 1;
        self.score += SCORE_PER_KILL;
    }

    fn on_wave_completed(&mut self, _index: u32) {
        self.waves_completed += 1;
        self.score += SCORE_PER_WAVE;
    }

    fn on_all_waves_cleared(&mut self) {
        self.all_waves_cleared = true;
    }
}
