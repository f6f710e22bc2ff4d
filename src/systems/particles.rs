//! Particle pool advance.

use bevy_ecs::prelude::*;

use crate::resources::particlepool::ParticlePool;
use crate::resources::worldtime::WorldTime;

/// Advances every live particle; settled puddles past the bake threshold
/// are stamped into the pool's bake queue and retired. Runs before the
/// render pass so the frame draws post-update state.
pub fn update_particles(time: Res<WorldTime>, mut pool: ResMut<ParticlePool>) {
    pool.update_all(time.delta);
}
