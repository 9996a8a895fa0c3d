//! rumguard-headless: run or check a RUMGUARD session without a host.
//!
//! Usage:
//!   rumguard-headless run --seed 7 --secs 300 --waves waves.json
//!   rumguard-headless validate --waves waves.json

use std::path::PathBuf;
use std::process;

use log::info;
use serde_json::json;

use rumguard_core::commands::PlayerCommand;
use rumguard_core::constants::{CANNON_INTERACTION_RANGE, CANNON_RANGE, TICK_RATE};
use rumguard_core::enums::TrapType;
use rumguard_core::state::GameStateSnapshot;
use rumguard_core::types::Position;

use rumguard_sim::waves::WaveConfig;
use rumguard_sim::{SimConfig, SimulationEngine};

/// Reach of the scripted defender's musket (meters).
const DEFENDER_RANGE: f64 = 20.0;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "validate" => cmd_validate(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "rumguard-headless: RUMGUARD session runner\n\
         \n\
         Commands:\n\
         \n\
         run       Play a session with a scripted defender and print a JSON summary\n\
         \n\
           --seed <N>         RNG seed (default: 42)\n\
           --secs <S>         Session length cap in seconds (default: 600)\n\
           --waves <path>     Wave file (optional, default: built-in waves)\n\
         \n\
         validate  Parse and check a wave file\n\
         \n\
           --waves <path>     Wave file to check\n\
         \n\
         Examples:\n\
         \n\
           rumguard-headless run --seed 7 --secs 300\n\
           rumguard-headless validate --waves data/waves.json\n"
    );
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

fn load_waves(args: &[String]) -> Option<WaveConfig> {
    let path: PathBuf = parse_flag(args, "--waves")?;
    match WaveConfig::load(&path) {
        Ok(config) => Some(config),
        Err(e) => {
            eprintln!("Error: {}: {e}", path.display());
            process::exit(1);
        }
    }
}

// --- Run command ---

fn cmd_run(args: &[String]) {
    let seed = parse_flag(args, "--seed").unwrap_or(42);
    let secs: f64 = parse_flag(args, "--secs").unwrap_or(600.0);
    let waves = load_waves(args).unwrap_or_default();

    let mut engine = SimulationEngine::new(SimConfig {
        seed,
        waves,
        ..Default::default()
    });
    engine.queue_command(PlayerCommand::StartSession);
    let mut snap = engine.tick();
    lay_traps(&mut engine);

    let max_ticks = (secs.max(0.0) * TICK_RATE as f64) as u64;
    while !snap.phase.is_over() && snap.time.tick < max_ticks {
        engine.queue_commands(defend(&snap));
        snap = engine.tick();
    }

    info!(
        "finished at tick {} in {:?}",
        snap.time.tick, snap.phase
    );

    let summary = json!({
        "seed": seed,
        "phase": snap.phase,
        "elapsed_secs": snap.time.elapsed_secs,
        "wave": snap.wave,
        "score": snap.score,
    });
    match serde_json::to_string_pretty(&summary) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Error: could not encode summary: {e}");
            process::exit(1);
        }
    }
}

/// One trap of each kind on the approach lanes.
fn lay_traps(engine: &mut SimulationEngine) {
    let lanes = [(0.0, 10.0), (10.0, 0.0), (0.0, -10.0), (-10.0, 0.0), (0.0, 14.0)];
    for (trap_type, (x, y)) in TrapType::ALL.into_iter().zip(lanes) {
        engine.queue_command(PlayerCommand::PlaceTrap {
            trap_type,
            at: Position::new(x, y, 0.0),
        });
    }
}

/// Shoot the closest enemy in range; lob a bottle into a crowd; fire a
/// manned cannon at anything within its reach.
fn defend(snap: &GameStateSnapshot) -> Vec<PlayerCommand> {
    let Some(player) = snap.player.as_ref() else {
        return Vec::new();
    };
    if player.dead || player.stunned {
        return Vec::new();
    }

    let live: Vec<_> = snap.enemies.iter().filter(|enemy| !enemy.dead).collect();
    let Some(closest) = live.iter().min_by(|a, b| {
        let da = a.position.range_to(&player.position);
        let db = b.position.range_to(&player.position);
        da.total_cmp(&db)
    }) else {
        return Vec::new();
    };

    let mut commands = Vec::new();
    if closest.position.range_to(&player.position) <= DEFENDER_RANGE {
        commands.push(PlayerCommand::FireWeapon {
            hit: Some(closest.actor),
        });
    }

    let crowd = live
        .iter()
        .filter(|enemy| enemy.position.range_to(&closest.position) <= 4.0)
        .count();
    if crowd >= 3 && player.grenades > 0 {
        commands.push(PlayerCommand::ThrowGrenade {
            at: closest.position,
        });
    }

    let manned = snap.cannons.iter().find(|cannon| {
        cannon.loaded && cannon.position.range_to(&player.position) <= CANNON_INTERACTION_RANGE
    });
    if let Some(cannon) = manned {
        if cannon.position.range_to(&closest.position) <= CANNON_RANGE {
            commands.push(PlayerCommand::FireCannon {
                cannon: cannon.actor,
                at: closest.position,
            });
        }
    }

    commands
}

// --- Validate command ---

fn cmd_validate(args: &[String]) {
    let Some(config) = load_waves(args) else {
        eprintln!("Error: --waves <path> is required");
        process::exit(1);
    };

    println!(
        "initial delay {:.1}s, dynamic waves {}",
        config.initial_delay,
        if config.dynamic.enabled { "on" } else { "off" }
    );
    for (i, wave) in config.waves.iter().enumerate() {
        println!(
            "  {:>2}. {:<16} {:>3} enemies, every {:.2}s, then {:.1}s rest",
            i + 1,
            wave.name,
            wave.total(),
            wave.time_between_spawns,
            wave.preparation_time
        );
    }
}
