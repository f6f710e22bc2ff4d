//! Debug counter refresh.

use bevy_ecs::prelude::*;

use crate::components::enemy::Enemy;
use crate::resources::particlepool::ParticlePool;
use crate::resources::projectilepool::ProjectilePool;
use crate::resources::stats::DebugCounters;
use crate::resources::wavestate::WaveState;

/// Snapshots live counts for the debug overlay and external diagnostics.
/// `enemies_rendered` is written later by the render pass; everything else
/// is refreshed here at the end of the update schedule.
pub fn refresh_counters(
    mut counters: ResMut<DebugCounters>,
    projectiles: Res<ProjectilePool>,
    particles: Res<ParticlePool>,
    wave: Res<WaveState>,
    enemies: Query<&Enemy>,
) {
    counters.enemies_live = enemies.iter().filter(|e| e.alive).count();
    counters.projectiles_active = projectiles.active_count();
    counters.particles_live = particles.live_count();
    counters.wave = wave.current_wave;
}
