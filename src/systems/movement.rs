//! Velocity integration for free-moving bodies.
//!
//! Enemies are excluded: their integration folds in knockback and happens in
//! the enemy pass. Pooled projectiles and particles advance inside their
//! pools. What remains is the player (and anything else given a plain
//! RigidBody).

use bevy_ecs::prelude::*;

use crate::components::enemy::Enemy;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::rigidbody::RigidBody;
use crate::resources::gameconfig::GameConfig;
use crate::resources::simtuning::SimTuning;
use crate::resources::worldtime::WorldTime;

pub fn movement(
    time: Res<WorldTime>,
    config: Res<GameConfig>,
    tuning: Res<SimTuning>,
    mut query: Query<(&mut MapPosition, &mut RigidBody, Option<&Player>), Without<Enemy>>,
) {
    let dt = time.delta;
    let (world_w, world_h) = config.world_size();
    for (mut position, mut rb, player) in query.iter_mut() {
        position.pos.x += rb.velocity.x * dt;
        position.pos.y += rb.velocity.y * dt;
        rb.damp(dt);

        // The player never leaves the world.
        if player.is_some() {
            let half = tuning.player.size * 0.5;
            position.pos.x = position.pos.x.clamp(half, world_w - half);
            position.pos.y = position.pos.y.clamp(half, world_h - half);
        }
    }
}
