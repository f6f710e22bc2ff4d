//! Weapon update: cooldowns, projectile emission, beam hitscan, orbital
//! contact damage.
//!
//! Weapons only *read* the grid and call `ProjectilePool::acquire`; damage
//! flows through `Enemy::take_damage` and dead enemies are left for the
//! reap pass. Dispatch is a `match` over the closed [`WeaponKind`] set.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::boxcollider::BoxCollider;
use crate::components::enemy::Enemy;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::weapon::{Weapon, WeaponKind};
use crate::events::shake::ShakeCmd;
use crate::gore;
use crate::resources::input::InputState;
use crate::resources::particlepool::ParticlePool;
use crate::resources::projectilepool::{ProjectilePool, ProjectileSpawn};
use crate::resources::simrng::SimRng;
use crate::resources::simtuning::SimTuning;
use crate::resources::spatialgrid::SpatialGrid;
use crate::resources::worldtime::WorldTime;

#[allow(clippy::too_many_arguments)]
pub fn weapon_system(
    time: Res<WorldTime>,
    input: Res<InputState>,
    tuning: Res<SimTuning>,
    grid: Res<SpatialGrid>,
    mut projectiles: ResMut<ProjectilePool>,
    mut particles: ResMut<ParticlePool>,
    mut rng: ResMut<SimRng>,
    mut shake: MessageWriter<ShakeCmd>,
    mut weapons: Query<&mut Weapon>,
    players: Query<(&MapPosition, &Player)>,
    mut enemies: Query<(Entity, &MapPosition, &mut Enemy, &BoxCollider), Without<Player>>,
) {
    let dt = time.delta;

    for mut weapon in weapons.iter_mut() {
        let Ok((owner_pos, owner)) = players.get(weapon.owner) else {
            continue;
        };
        if !owner.alive {
            continue;
        }
        let origin = owner_pos.pos;
        // Split the Mut<Weapon> once so the kind borrow and the cooldown
        // fields do not fight.
        let weapon = &mut *weapon;
        weapon.cool(dt);

        let damage = weapon.damage;
        match &mut weapon.kind {
            WeaponKind::Emitter(spec) => {
                if weapon.current_cooldown > 0.0 {
                    continue;
                }
                // Auto-aim emitters fire whenever a target exists; manual
                // ones wait for the trigger.
                let angle = if spec.auto_aim {
                    let mut best: Option<(f32, Vector2)> = None;
                    for (_, pos, enemy, _) in enemies.iter() {
                        if !enemy.alive {
                            continue;
                        }
                        let dx = pos.pos.x - origin.x;
                        let dy = pos.pos.y - origin.y;
                        let dist_sq = dx * dx + dy * dy;
                        if best.map_or(true, |(d, _)| dist_sq < d) {
                            best = Some((dist_sq, pos.pos));
                        }
                    }
                    match best {
                        Some((_, target)) => (target.y - origin.y).atan2(target.x - origin.x),
                        None => continue,
                    }
                } else {
                    if !input.fire {
                        continue;
                    }
                    owner.angle
                };

                let pellets = spec.pellets.max(1);
                for i in 0..pellets {
                    let offset = (i as f32 - (pellets / 2) as f32)
                        * (spec.spread / pellets as f32);
                    projectiles.acquire(ProjectileSpawn {
                        x: origin.x,
                        y: origin.y,
                        angle: angle + offset,
                        speed: spec.projectile_speed,
                        damage,
                        penetration: spec.penetration,
                        lifetime: spec.projectile_lifetime,
                        hitbox: tuning.weapons.projectile_hitbox,
                        visual_radius: tuning.weapons.projectile_radius,
                    });
                }
                weapon.current_cooldown = weapon.cooldown;
                shake.write(ShakeCmd {
                    intensity: tuning.camera.fire_shake,
                });
            }

            WeaponKind::Beam(spec) => {
                // Per-enemy re-hit timers tick down whether or not the
                // trigger is held.
                spec.hit_timers.retain(|_, t| {
                    *t -= dt;
                    *t > 0.0
                });
                spec.firing = input.fire;
                if !spec.firing {
                    continue;
                }

                let dir = Vector2 {
                    x: owner.angle.cos(),
                    y: owner.angle.sin(),
                };
                let end = Vector2 {
                    x: origin.x + dir.x * spec.max_range,
                    y: origin.y + dir.y * spec.max_range,
                };

                // Broad phase: every cell the beam's bounding band touches,
                // padded by one cell so fat hitboxes on the band edge are
                // not missed. query_rect dedups by identity.
                let pad = grid.cell_size();
                let candidates = grid.query_rect(
                    origin.x.min(end.x) - pad,
                    origin.y.min(end.y) - pad,
                    origin.x.max(end.x) + pad,
                    origin.y.max(end.y) + pad,
                );

                let range_sq = spec.max_range * spec.max_range;
                for id in candidates {
                    let Ok((entity, pos, mut enemy, collider)) = enemies.get_mut(id) else {
                        continue;
                    };
                    if !enemy.alive {
                        continue;
                    }
                    let dx = pos.pos.x - origin.x;
                    let dy = pos.pos.y - origin.y;
                    if dx * dx + dy * dy > range_sq {
                        continue;
                    }
                    let Some(clip) = collider.clip_segment(pos.pos, origin, end) else {
                        continue;
                    };
                    if spec.hit_timers.contains_key(&entity) {
                        continue;
                    }
                    spec.hit_timers.insert(entity, spec.hit_interval);
                    enemy.take_damage(damage);
                    gore::blood_splatter(
                        &mut particles,
                        &mut rng,
                        clip.x,
                        clip.y,
                        Some(dir),
                        1.0,
                        3,
                    );
                }
            }

            WeaponKind::Orbiting(spec) => {
                spec.orbit_angle += spec.angular_speed * dt;
                let orb = Vector2 {
                    x: origin.x + spec.orbit_angle.cos() * spec.radius,
                    y: origin.y + spec.orbit_angle.sin() * spec.radius,
                };
                let orb_box = BoxCollider::new(spec.size, spec.size);

                for id in grid.get_nearby(orb.x, orb.y, 1) {
                    let Ok((_, pos, mut enemy, collider)) = enemies.get_mut(id) else {
                        continue;
                    };
                    if !enemy.alive {
                        continue;
                    }
                    if !orb_box.overlaps(orb, collider, pos.pos) {
                        continue;
                    }
                    // Contact grind scales with dt so the orb's damage per
                    // second is frame-rate independent.
                    enemy.take_damage(damage * dt);
                    if rng.0.f32() < 0.2 * dt {
                        let to_enemy = Vector2 {
                            x: pos.pos.x - origin.x,
                            y: pos.pos.y - origin.y,
                        };
                        gore::blood_splatter(
                            &mut particles,
                            &mut rng,
                            pos.pos.x,
                            pos.pos.y,
                            Some(to_enemy),
                            1.0,
                            4,
                        );
                    }
                }
            }
        }
    }
}
