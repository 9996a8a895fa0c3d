//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless
//! (no engine or UI dependency), enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use rumguard_core::commands::PlayerCommand;
use rumguard_core::components::{Barrel, Immobilized, Stumbling};
use rumguard_core::constants::{DT, MAX_BARRELS_LOST};
use rumguard_core::enums::GamePhase;
use rumguard_core::events::GameEvent;
use rumguard_core::state::{GameStateSnapshot, ScoreView};
use rumguard_core::status::IntoxicationTuning;
use rumguard_core::types::SimTime;

use crate::collaborators::{
    KinematicDriver, LinearScan, MovementDriver, NullObserver, SessionObserver, SpatialQuery,
};
use crate::components::entity_of;
use crate::scheduler::{DeferredAction, Scheduler};
use crate::score::ScoreKeeper;
use crate::systems;
use crate::waves::{WaveConfig, WaveDirector};
use crate::world_setup::{self, ArenaLayout};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal). Hosts use it to decide how many
    /// ticks to run per frame; each tick is always `DT` long.
    pub time_scale: f64,
    pub waves: WaveConfig,
    pub intoxication: IntoxicationTuning,
    pub arena: ArenaLayout,
    /// Barrels that may be lost before the session is a defeat.
    pub max_barrels_lost: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            waves: WaveConfig::default(),
            intoxication: IntoxicationTuning::default(),
            arena: ArenaLayout::default(),
            max_barrels_lost: MAX_BARRELS_LOST,
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    config: SimConfig,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<GameEvent>,
    director: WaveDirector,
    scheduler: Scheduler,
    score: ScoreKeeper,
    player: Option<Entity>,
    spatial: Box<dyn SpatialQuery>,
    movement: Box<dyn MovementDriver>,
    observer: Box<dyn SessionObserver>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            time_scale: config.time_scale,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            director: WaveDirector::new(config.waves.clone()),
            config,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            scheduler: Scheduler::new(),
            score: ScoreKeeper::default(),
            player: None,
            spatial: Box::new(LinearScan),
            movement: Box::new(KinematicDriver),
            observer: Box::new(NullObserver),
        }
    }

    /// Replace the spatial query used for area effects.
    pub fn with_spatial_query(mut self, spatial: Box<dyn SpatialQuery>) -> Self {
        self.spatial = spatial;
        self
    }

    /// Replace the locomotion driver.
    pub fn with_movement_driver(mut self, movement: Box<dyn MovementDriver>) -> Self {
        self.movement = movement;
        self
    }

    /// Receive session notifications alongside the built-in score keeper.
    pub fn with_observer(mut self, observer: Box<dyn SessionObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.director,
            &self.score,
            events,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn director(&self) -> &WaveDirector {
        &self.director
    }

    pub fn score(&self) -> ScoreView {
        self.score.view()
    }

    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    /// Mutable world access for tests that stage a situation directly.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Spawn an enemy outside the wave director (for tests).
    #[cfg(test)]
    pub fn spawn_test_enemy(
        &mut self,
        kind: rumguard_core::enums::EnemyKind,
        position: rumguard_core::types::Position,
    ) -> Entity {
        world_setup::spawn_enemy(
            &mut self.world,
            kind,
            position,
            Default::default(),
            self.config.intoxication,
            self.director.index(),
        )
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        let now = self.time.elapsed_secs;

        match command {
            PlayerCommand::StartSession => {
                if self.phase == GamePhase::MainMenu {
                    self.start_session();
                }
            }
            PlayerCommand::ReturnToMenu => {
                if self.phase.is_over() || self.phase == GamePhase::Paused {
                    self.world.clear();
                    self.scheduler.clear();
                    self.player = None;
                    self.phase = GamePhase::MainMenu;
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = scale.clamp(0.0, 4.0);
            }
            PlayerCommand::ApplyDamage { target, amount } => {
                if self.phase != GamePhase::Active {
                    return;
                }
                if let Some(target) = entity_of(target) {
                    systems::effects::damage(&self.world, target, amount);
                }
            }
            PlayerCommand::AddIntoxication { target, amount } => {
                if self.phase != GamePhase::Active {
                    return;
                }
                if let Some(target) = entity_of(target) {
                    systems::effects::intoxicate(&mut self.world, target, amount, &mut self.events);
                }
            }
            player_action => {
                if self.phase != GamePhase::Active {
                    return;
                }
                let Some(player) = self.player else {
                    return;
                };
                self.handle_player_action(player, player_action, now);
            }
        }
    }

    fn handle_player_action(&mut self, player: Entity, command: PlayerCommand, now: f64) {
        use systems::player as act;

        match command {
            PlayerCommand::MovePlayer { position } => act::move_to(&mut self.world, player, position),
            PlayerCommand::FireWeapon { hit } => act::fire_weapon(
                &mut self.world,
                player,
                hit.and_then(entity_of),
                &mut self.scheduler,
                &mut self.events,
                now,
            ),
            PlayerCommand::Reload => {
                if act::can_act(&self.world, player) {
                    act::reload(&mut self.world, player, &mut self.scheduler, &mut self.events, now);
                }
            }
            PlayerCommand::ThrowGrenade { at } => act::throw_grenade(
                &mut self.world,
                player,
                at,
                self.spatial.as_ref(),
                &mut self.events,
            ),
            PlayerCommand::PlaceTrap { trap_type, at } => {
                act::place_trap(&mut self.world, player, trap_type, at, &mut self.events)
            }
            PlayerCommand::FireCannon { cannon, at } => {
                if let Some(cannon) = entity_of(cannon) {
                    act::fire_cannon(
                        &mut self.world,
                        player,
                        cannon,
                        at,
                        self.spatial.as_ref(),
                        &mut self.scheduler,
                        &mut self.events,
                        now,
                    );
                }
            }
            _ => {}
        }
    }

    fn start_session(&mut self) {
        self.world.clear();
        self.scheduler.clear();
        self.despawn_buffer.clear();

        let player = world_setup::setup_arena(&mut self.world, &self.config.arena);
        let barrels = self.world.query::<&Barrel>().iter().count() as u32;

        self.player = Some(player);
        self.score = ScoreKeeper::new(barrels, self.config.max_barrels_lost);
        self.director = WaveDirector::new(self.config.waves.clone());
        self.director.start();
        self.time = SimTime::default();
        self.phase = GamePhase::Active;
        info!("session started with {barrels} barrels");
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let now = self.time.elapsed_secs;
        let dt = DT;

        // 1. Deferred actions that have come due
        self.run_deferred(now);
        // 2. Wave director and spawning
        systems::wave_spawner::run(
            &mut self.world,
            &mut self.rng,
            &mut self.director,
            &self.config.arena,
            self.config.intoxication,
            &mut self.score,
            self.observer.as_mut(),
            &mut self.events,
            dt,
        );
        // 3. Sobering up
        systems::intoxication::run(&mut self.world, dt, &mut self.events);
        // 4. Enemy decisions
        systems::enemy_ai::run(
            &mut self.world,
            &mut self.rng,
            &mut self.scheduler,
            self.spatial.as_ref(),
            self.movement.as_mut(),
            &mut self.events,
            now,
            dt,
        );
        // 5. Movement integration
        systems::movement::run(&mut self.world, dt);
        systems::movement::update_facing(&mut self.world);
        // 6. Traps
        systems::traps::run(
            &mut self.world,
            &mut self.scheduler,
            self.spatial.as_ref(),
            &mut self.events,
            now,
            dt,
        );
        // 7. Deaths
        systems::cleanup::handle_deaths(
            &mut self.world,
            &mut self.scheduler,
            &mut self.director,
            self.spatial.as_ref(),
            &mut self.score,
            self.observer.as_mut(),
            &mut self.events,
            now,
        );
        // 8. Cleanup (spent traps, expired corpses)
        systems::cleanup::run(&mut self.world, &mut self.scheduler, &mut self.despawn_buffer);
        // 9. Session outcome
        self.check_outcome();
        systems::intoxication::settle(&mut self.world);
    }

    fn run_deferred(&mut self, now: f64) {
        for (entity, action) in self.scheduler.drain_due(now, &self.world) {
            match action {
                DeferredAction::RecoverFromStumble => {
                    let _ = self.world.remove_one::<Stumbling>(entity);
                }
                DeferredAction::ReleaseNet => {
                    let _ = self.world.remove_one::<Immobilized>(entity);
                }
                DeferredAction::FinishReload => {
                    systems::player::finish_reload(&mut self.world, entity, &mut self.events);
                }
                DeferredAction::RespawnPlayer => systems::player::respawn(
                    &mut self.world,
                    entity,
                    self.config.arena.player_start,
                    &mut self.events,
                ),
                DeferredAction::ReleaseStun => systems::player::release_stun(&mut self.world, entity),
                DeferredAction::DespawnCorpse => self.despawn_buffer.push(entity),
                DeferredAction::ReloadCannon => {
                    systems::player::reload_cannon(&mut self.world, entity, &mut self.events)
                }
            }
        }
    }

    fn check_outcome(&mut self) {
        if let Some(outcome) = self.score.outcome() {
            info!(
                "session over: {:?}, score {}",
                outcome,
                self.score.score()
            );
            self.phase = outcome;
            self.events.push(GameEvent::SessionEnded { phase: outcome });
        }
    }
}
