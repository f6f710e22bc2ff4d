//! Enemy AI batching, physics integration, and contact attacks.
//!
//! Split into two systems running back to back:
//!
//! - [`enemy_ai`] is the *expensive* step (seek direction + grid-backed
//!   separation). Only the batch whose index matches `frame % K` recomputes
//!   it; everyone else keeps moving along their last result. `K` adapts to
//!   the live enemy count through the tuning ladder, trading AI freshness
//!   for frame-time stability as the swarm grows.
//! - [`enemy_update`] runs for *every* enemy, every frame: velocity +
//!   knockback integration, exponential knockback decay with a snap to
//!   zero, cooldown/flash decay, and the squared-distance attack check.
//!
//! Dead enemies stay in place (skipped by the alive flag) until the reap
//! pass despawns them after this frame's processing: no list mutation
//! mid-iteration.

use arrayvec::ArrayVec;
use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;
use rustc_hash::FxHashMap;

use crate::components::boxcollider::BoxCollider;
use crate::components::enemy::Enemy;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::gore;
use crate::resources::camera::FollowCamera;
use crate::resources::particlepool::ParticlePool;
use crate::resources::simrng::SimRng;
use crate::resources::simtuning::SimTuning;
use crate::resources::spatialgrid::SpatialGrid;
use crate::resources::worldtime::WorldTime;

/// Hard upper bound on separation neighbors examined per enemy; the tuning
/// value is clamped to this scratch capacity.
const MAX_SEPARATION_NEIGHBORS: usize = 16;

pub fn enemy_ai(
    time: Res<WorldTime>,
    tuning: Res<SimTuning>,
    grid: Res<SpatialGrid>,
    camera: Res<FollowCamera>,
    players: Query<(&MapPosition, &Player), Without<Enemy>>,
    mut enemies: Query<(Entity, &MapPosition, &mut Enemy), Without<Player>>,
) {
    let Some((player_pos, _)) = players.iter().next() else {
        return;
    };
    let target = player_pos.pos;

    let live = enemies.iter().filter(|(_, _, e)| e.alive).count();
    let k = tuning.ai_batches(live) as u64;
    let scheduled = time.frame_count % k;

    // Positions and radii captured before anything moves this frame, so
    // separation reads the same state the grid was built from.
    let snapshot: FxHashMap<Entity, (Vector2, f32)> = enemies
        .iter()
        .filter(|(_, _, e)| e.alive)
        .map(|(id, pos, e)| (id, (pos.pos, e.radius)))
        .collect();

    let neighbor_cap = tuning.ai.max_neighbors.min(MAX_SEPARATION_NEIGHBORS);

    for (entity, position, mut enemy) in enemies.iter_mut() {
        if !enemy.alive {
            continue;
        }
        // Batch selection by entity index: stable for an entity across its
        // whole life, uniform across the swarm.
        if entity.index() as u64 % k != scheduled {
            continue;
        }

        let pos = position.pos;

        // Seek: straight at the player, epsilon-guarded normalization.
        let dx = target.x - pos.x;
        let dy = target.y - pos.y;
        let dist_sq = dx * dx + dy * dy;
        let mut velocity = if dist_sq > 1e-6 {
            let inv = enemy.speed / dist_sq.sqrt();
            Vector2 {
                x: dx * inv,
                y: dy * inv,
            }
        } else {
            Vector2 { x: 0.0, y: 0.0 }
        };

        // Logic culling: far off-screen enemies seek but skip the neighbor
        // query, which is the expensive part of the AI step.
        if !camera.in_logic_range(pos) {
            enemy.seek_velocity = velocity;
            continue;
        }

        // Separation: push out of overlapping neighbors, force proportional
        // to overlap depth and weaker than seek so the swarm still closes
        // in instead of locking into a rigid wall.
        let mut pushes: ArrayVec<Vector2, MAX_SEPARATION_NEIGHBORS> = ArrayVec::new();
        for other in grid.get_nearby(pos.x, pos.y, 1) {
            if other == entity {
                continue;
            }
            let Some(&(other_pos, other_radius)) = snapshot.get(&other) else {
                continue;
            };
            let sx = pos.x - other_pos.x;
            let sy = pos.y - other_pos.y;
            let sep_sq = sx * sx + sy * sy;
            let combined = enemy.radius + other_radius;
            if sep_sq >= combined * combined || sep_sq < 1e-6 {
                continue;
            }
            let dist = sep_sq.sqrt();
            let overlap = combined - dist;
            let strength = overlap * tuning.ai.separation_force / dist;
            pushes.push(Vector2 {
                x: sx * strength,
                y: sy * strength,
            });
            if pushes.len() >= neighbor_cap {
                break;
            }
        }
        for push in &pushes {
            velocity.x += push.x;
            velocity.y += push.y;
        }

        enemy.seek_velocity = velocity;
    }
}

#[allow(clippy::too_many_arguments)]
pub fn enemy_update(
    time: Res<WorldTime>,
    tuning: Res<SimTuning>,
    camera: Res<FollowCamera>,
    mut particles: ResMut<ParticlePool>,
    mut rng: ResMut<SimRng>,
    mut players: Query<(&MapPosition, &mut Player, &BoxCollider), Without<Enemy>>,
    mut enemies: Query<(&mut MapPosition, &mut Enemy, &BoxCollider), Without<Player>>,
) {
    let dt = time.delta;
    let knockback_decay = tuning.ai.knockback_decay.powf(dt);
    let knockback_eps_sq = tuning.ai.knockback_epsilon * tuning.ai.knockback_epsilon;
    let mut player = players.iter_mut().next();

    for (mut position, mut enemy, collider) in enemies.iter_mut() {
        if !enemy.alive {
            continue;
        }

        // Integrate the AI velocity plus knockback impulse.
        position.pos.x += (enemy.seek_velocity.x + enemy.knockback.x) * dt;
        position.pos.y += (enemy.seek_velocity.y + enemy.knockback.y) * dt;

        // Knockback decays exponentially; tiny residues snap to exact zero
        // so stationary enemies stop jittering on sub-pixel leftovers.
        enemy.knockback.x *= knockback_decay;
        enemy.knockback.y *= knockback_decay;
        let kb_sq =
            enemy.knockback.x * enemy.knockback.x + enemy.knockback.y * enemy.knockback.y;
        if kb_sq < knockback_eps_sq {
            enemy.knockback = Vector2 { x: 0.0, y: 0.0 };
        }

        // Lightweight state step.
        if enemy.attack_cooldown > 0.0 {
            enemy.attack_cooldown -= dt;
        }
        if enemy.flash > 0.0 {
            enemy.flash = (enemy.flash - dt).max(0.0);
        }

        // Attack and gore only matter near the action.
        if !camera.in_logic_range(position.pos) {
            continue;
        }

        if let Some((player_pos, player_state, player_box)) = player.as_mut() {
            if player_state.alive && enemy.can_attack() {
                let dx = player_pos.pos.x - position.pos.x;
                let dy = player_pos.pos.y - position.pos.y;
                let reach = collider.size.x.max(collider.size.y)
                    + player_box.size.x.max(player_box.size.y);
                // Squared-distance gate before the exact box test.
                if dx * dx + dy * dy <= reach * reach
                    && collider.overlaps(position.pos, player_box, player_pos.pos)
                {
                    player_state.take_damage(enemy.contact_damage);
                    enemy.attack_cooldown = enemy.attack_delay;
                }
            }
        }

        // Badly wounded enemies leave a trail.
        if enemy.health < enemy.max_health * 0.4 && rng.0.f32() < 0.05 * dt {
            gore::blood_drip(&mut particles, &mut rng, position.pos.x, position.pos.y);
        }
    }
}
