//! Built-in wave list used when no wave file is supplied.
//!
//! Three hand-made waves introduce each enemy family in turn; after that the
//! director's dynamic waves take over.

use rumguard_core::enums::EnemyKind;

use crate::waves::{SpawnGroup, WaveDefinition};

fn group(kind: EnemyKind, count: u32) -> SpawnGroup {
    SpawnGroup { kind, count }
}

pub fn default_waves() -> Vec<WaveDefinition> {
    vec![
        // Wave 1: a boarding party of pirates
        WaveDefinition::new("Wave 1", vec![group(EnemyKind::Pirate, 4)]),
        // Wave 2: the Empire lands, pirates still about
        WaveDefinition::new(
            "Wave 2",
            vec![
                group(EnemyKind::Pirate, 3),
                group(EnemyKind::EmpireSoldier, 3),
            ],
        ),
        // Wave 3: something comes up from the deep
        WaveDefinition {
            time_between_spawns: 1.5,
            preparation_time: 15.0,
            ..WaveDefinition::new(
                "Wave 3",
                vec![
                    group(EnemyKind::EmpireSoldier, 2),
                    group(EnemyKind::Merfolk, 2),
                    group(EnemyKind::CursedSailor, 2),
                    group(EnemyKind::Kraken, 1),
                ],
            )
        },
    ]
}
