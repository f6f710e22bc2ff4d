//! Projectile advance and broad-phase collision resolution.
//!
//! The pool moves every active projectile first (expiring lifetimes and
//! out-of-bounds strays), then each survivor queries the grid around its new
//! position. Grid cells are wider than any hitbox, so a radius-1 block
//! cannot miss a touching enemy. Penetration is spent once per distinct
//! enemy through the projectile's hit set; the projectile deactivates on
//! its last point and the slot is swept back to the free list on the next
//! pool update.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::boxcollider::BoxCollider;
use crate::components::enemy::Enemy;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::events::shake::ShakeCmd;
use crate::gore;
use crate::resources::gameconfig::GameConfig;
use crate::resources::particlepool::ParticlePool;
use crate::resources::projectilepool::ProjectilePool;
use crate::resources::simrng::SimRng;
use crate::resources::simtuning::SimTuning;
use crate::resources::spatialgrid::SpatialGrid;
use crate::resources::worldtime::WorldTime;

#[allow(clippy::too_many_arguments)]
pub fn update_projectiles(
    time: Res<WorldTime>,
    config: Res<GameConfig>,
    tuning: Res<SimTuning>,
    grid: Res<SpatialGrid>,
    mut pool: ResMut<ProjectilePool>,
    mut particles: ResMut<ParticlePool>,
    mut rng: ResMut<SimRng>,
    mut shake: MessageWriter<ShakeCmd>,
    mut enemies: Query<(&MapPosition, &mut Enemy, &BoxCollider), Without<Player>>,
) {
    let dt = time.delta;
    let (world_w, world_h) = config.world_size();
    pool.update_all(dt, world_w, world_h);

    for (_, projectile) in pool.iter_active_mut() {
        let hitbox = BoxCollider::new(projectile.hitbox, projectile.hitbox);

        for id in grid.get_nearby(projectile.pos.x, projectile.pos.y, 1) {
            let Ok((pos, mut enemy, collider)) = enemies.get_mut(id) else {
                continue;
            };
            if !enemy.alive {
                continue;
            }
            if !hitbox.overlaps(projectile.pos, collider, pos.pos) {
                continue;
            }
            if !projectile.register_hit(id) {
                continue;
            }

            enemy.apply_knockback(pos.pos, projectile.pos, tuning.weapons.knockback_force);

            // Blood flies along the projectile's travel direction; a
            // near-stationary projectile sprays radially instead of
            // dividing by a zero-length vector.
            let speed_sq =
                projectile.vel.x * projectile.vel.x + projectile.vel.y * projectile.vel.y;
            let direction = if speed_sq > 0.01 {
                let inv = 1.0 / speed_sq.sqrt();
                Some(Vector2 {
                    x: projectile.vel.x * inv,
                    y: projectile.vel.y * inv,
                })
            } else {
                None
            };
            gore::blood_splatter(
                &mut particles,
                &mut rng,
                pos.pos.x,
                pos.pos.y,
                direction,
                1.5,
                10,
            );

            enemy.take_damage(projectile.damage);
            shake.write(ShakeCmd {
                intensity: tuning.camera.hit_shake,
            });

            if !projectile.alive {
                break;
            }
        }
    }
}
