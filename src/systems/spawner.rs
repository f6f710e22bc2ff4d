//! Wave-driven enemy spawning.
//!
//! [`WaveState`] decides when to spawn; this system picks what and where:
//! a weighted roll over the enemy type table and a random position just
//! outside a random world edge. Spawns go through `Commands`, so new
//! enemies join the world at the end of the frame and enter the grid on the
//! next rebuild.

use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::enemy::{Enemy, EnemyKind};
use crate::components::mapposition::MapPosition;
use crate::resources::gameconfig::GameConfig;
use crate::resources::simrng::SimRng;
use crate::resources::simtuning::{EnemyTypeRow, SimTuning};
use crate::resources::wavestate::WaveState;
use crate::resources::worldtime::WorldTime;

fn pick_kind(tuning: &SimTuning, rng: &mut SimRng) -> (EnemyKind, EnemyTypeRow) {
    let rows = [
        (EnemyKind::Small, tuning.enemies.small),
        (EnemyKind::Normal, tuning.enemies.normal),
        (EnemyKind::Large, tuning.enemies.large),
        (EnemyKind::Tank, tuning.enemies.tank),
    ];
    let total: u32 = rows.iter().map(|(_, row)| row.weight).sum();
    if total == 0 {
        return rows[1];
    }
    let mut roll = rng.0.u32(0..total);
    for (kind, row) in rows {
        if roll < row.weight {
            return (kind, row);
        }
        roll -= row.weight;
    }
    rows[1]
}

pub fn wave_spawn(
    time: Res<WorldTime>,
    config: Res<GameConfig>,
    tuning: Res<SimTuning>,
    mut wave: ResMut<WaveState>,
    mut rng: ResMut<SimRng>,
    enemies: Query<&Enemy>,
    mut commands: Commands,
) {
    let live = enemies.iter().filter(|e| e.alive).count();
    if !wave.update(time.delta, live, &tuning.waves) {
        return;
    }

    let (kind, row) = pick_kind(&tuning, &mut rng);
    let (world_w, world_h) = config.world_size();
    let margin = tuning.waves.edge_margin;

    let (x, y) = match rng.0.u32(0..4) {
        0 => (rng.f32_range(0.0, world_w), -margin),
        1 => (rng.f32_range(0.0, world_w), world_h + margin),
        2 => (-margin, rng.f32_range(0.0, world_h)),
        _ => (world_w + margin, rng.f32_range(0.0, world_h)),
    };

    let speed = row.speed * wave.speed_multiplier(&tuning.waves);
    commands.spawn((
        MapPosition::new(x, y),
        BoxCollider::new(row.size, row.size),
        Enemy::new(
            kind,
            row.health,
            speed,
            row.damage,
            row.score,
            row.radius,
            tuning.ai.attack_delay,
        ),
    ));
}
