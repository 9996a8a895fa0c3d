//! Wave spawning system: advances the wave director and carries out its
//! spawn requests.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use rumguard_core::events::GameEvent;
use rumguard_core::status::IntoxicationTuning;

use crate::collaborators::SessionObserver;
use crate::components::actor_ref;
use crate::score::ScoreKeeper;
use crate::waves::{WaveDirector, WaveEvent};
use crate::world_setup::{self, ArenaLayout};

#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    director: &mut WaveDirector,
    layout: &ArenaLayout,
    tuning: IntoxicationTuning,
    score: &mut ScoreKeeper,
    observer: &mut dyn SessionObserver,
    events: &mut Vec<GameEvent>,
    dt: f64,
) {
    for wave_event in director.tick(dt) {
        match wave_event {
            WaveEvent::WaveStarted { index, name } => {
                events.push(GameEvent::WaveStarted { index, name });
            }
            WaveEvent::Spawn { kind } => {
                let entity = world_setup::spawn_enemy_at_random_point(
                    world,
                    rng,
                    layout,
                    kind,
                    tuning,
                    director.index(),
                );
                score.on_enemy_spawned();
                events.push(GameEvent::EnemySpawned {
                    actor: actor_ref(entity),
                    kind,
                });
            }
            WaveEvent::WaveCompleted { index } => {
                score.on_wave_completed(index);
                observer.on_wave_completed(index);
                events.push(GameEvent::WaveCompleted { index });
            }
            WaveEvent::AllWavesCleared => {
                score.on_all_waves_cleared();
                observer.on_all_waves_cleared();
                events.push(GameEvent::AllWavesCleared);
            }
        }
    }
}
