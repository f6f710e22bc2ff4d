//! End-of-frame enemy reaping.
//!
//! Enemies killed earlier in the frame kept their slot (alive = false) so
//! no collection was mutated mid-iteration. This pass awards score, bursts
//! gore, boosts the camera shake, and despawns them through `Commands`;
//! the deferred despawn lands before the next frame's grid rebuild.

use bevy_ecs::prelude::*;

use crate::components::enemy::Enemy;
use crate::components::mapposition::MapPosition;
use crate::events::shake::ShakeCmd;
use crate::gore;
use crate::resources::particlepool::ParticlePool;
use crate::resources::simrng::SimRng;
use crate::resources::simtuning::SimTuning;
use crate::resources::stats::SimStats;

pub fn reap_enemies(
    tuning: Res<SimTuning>,
    mut stats: ResMut<SimStats>,
    mut particles: ResMut<ParticlePool>,
    mut rng: ResMut<SimRng>,
    mut shake: MessageWriter<ShakeCmd>,
    enemies: Query<(Entity, &MapPosition, &Enemy)>,
    mut commands: Commands,
) {
    for (entity, position, enemy) in enemies.iter() {
        if enemy.alive {
            continue;
        }
        stats.score += enemy.score_value as u64;
        stats.kills += 1;
        gore::viscera_explosion(&mut particles, &mut rng, position.pos.x, position.pos.y);
        shake.write(ShakeCmd {
            intensity: tuning.camera.death_shake,
        });
        commands.entity(entity).try_despawn();
    }
}
