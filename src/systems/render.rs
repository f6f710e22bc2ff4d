//! World rendering.
//!
//! Runs outside the update schedule: the binary calls these passes with a
//! raylib draw handle after `Simulation::step`, so the simulation itself
//! stays headless. Everything draws through the [`FollowCamera`]'s rendered
//! scroll, and every entity is culled against the margin-inflated viewport
//! before any per-entity work: for particles, before the sprite-cache
//! lookup, which is the expensive part.

use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::enemy::{Enemy, EnemyKind};
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::weapon::{Weapon, WeaponKind};
use crate::resources::bloodlayer::BloodLayer;
use crate::resources::camera::FollowCamera;
use crate::resources::gameconfig::GameConfig;
use crate::resources::particlepool::{ParticlePool, ParticleShape};
use crate::resources::projectilepool::ProjectilePool;
use crate::resources::simtuning::SimTuning;
use crate::resources::spritecache::ParticleSpriteCache;
use crate::resources::stats::{DebugCounters, SimStats};
use crate::resources::wavestate::WaveState;
use crate::resources::worldtime::WorldTime;

const BACKGROUND_GRID_STEP: i32 = 100;
const BACKGROUND_GRID_COLOR: Color = Color::new(30, 30, 30, 255);
const WORLD_BORDER_COLOR: Color = Color::new(100, 0, 0, 255);

/// Drain pending bake stamps onto the blood layer. Must run while no draw
/// handle is open; stamps are drawn exactly once and then gone.
pub fn bake_blood_stamps(world: &mut World, rl: &mut RaylibHandle, thread: &RaylibThread) {
    let stamps = world.resource_mut::<ParticlePool>().drain_bake_queue();
    if stamps.is_empty() {
        return;
    }
    let mut layer = world
        .remove_non_send_resource::<BloodLayer>()
        .expect("BloodLayer resource missing");
    {
        let mut d = rl.begin_texture_mode(thread, &mut layer.target);
        for stamp in &stamps {
            let color = Color::new(stamp.color[0], stamp.color[1], stamp.color[2], stamp.alpha);
            d.draw_circle(stamp.x as i32, stamp.y as i32, stamp.size, color);
        }
    }
    world.insert_non_send_resource(layer);
}

fn draw_background(d: &mut RaylibDrawHandle, camera: &FollowCamera, config: &GameConfig) {
    let (win_w, win_h) = (config.window_width as i32, config.window_height as i32);
    let (scroll_x, scroll_y) = camera.rendered;

    let mut x = -(scroll_x.rem_euclid(BACKGROUND_GRID_STEP));
    while x < win_w {
        d.draw_line(x, 0, x, win_h, BACKGROUND_GRID_COLOR);
        x += BACKGROUND_GRID_STEP;
    }
    let mut y = -(scroll_y.rem_euclid(BACKGROUND_GRID_STEP));
    while y < win_h {
        d.draw_line(0, y, win_w, y, BACKGROUND_GRID_COLOR);
        y += BACKGROUND_GRID_STEP;
    }

    // World border.
    let (world_w, world_h) = config.world_size();
    let left = -scroll_x;
    let top = -scroll_y;
    let right = world_w as i32 - scroll_x;
    let bottom = world_h as i32 - scroll_y;
    if (0..win_w).contains(&left) {
        d.draw_line_ex(
            Vector2::new(left as f32, 0.0),
            Vector2::new(left as f32, win_h as f32),
            2.0,
            WORLD_BORDER_COLOR,
        );
    }
    if (0..win_w).contains(&right) {
        d.draw_line_ex(
            Vector2::new(right as f32, 0.0),
            Vector2::new(right as f32, win_h as f32),
            2.0,
            WORLD_BORDER_COLOR,
        );
    }
    if (0..win_h).contains(&top) {
        d.draw_line_ex(
            Vector2::new(0.0, top as f32),
            Vector2::new(win_w as f32, top as f32),
            2.0,
            WORLD_BORDER_COLOR,
        );
    }
    if (0..win_h).contains(&bottom) {
        d.draw_line_ex(
            Vector2::new(0.0, bottom as f32),
            Vector2::new(win_w as f32, bottom as f32),
            2.0,
            WORLD_BORDER_COLOR,
        );
    }
}

fn enemy_body_color(kind: EnemyKind) -> Color {
    match kind {
        EnemyKind::Small => Color::new(220, 60, 60, 255),
        EnemyKind::Normal => Color::new(200, 0, 0, 255),
        EnemyKind::Large => Color::new(150, 0, 30, 255),
        EnemyKind::Tank => Color::new(90, 0, 50, 255),
    }
}

/// Culled draw passes for the whole world, back to front: backdrop, blood
/// layer, particles, projectiles, enemies, player, weapon overlays.
pub fn render_world(world: &mut World, d: &mut RaylibDrawHandle) {
    let camera = world.resource::<FollowCamera>().clone();
    let config = world.resource::<GameConfig>().clone();

    draw_background(d, &camera, &config);

    // Accumulated blood backdrop. Render textures are stored flipped, so
    // the source rectangle uses a negative height.
    if let Some(layer) = world.get_non_send_resource::<BloodLayer>() {
        let src = Rectangle {
            x: 0.0,
            y: 0.0,
            width: layer.width as f32,
            height: -(layer.height as f32),
        };
        let dest = camera.apply(Vector2 { x: 0.0, y: 0.0 });
        d.draw_texture_rec(&layer.target, src, dest, Color::WHITE);
    }

    // Particles: cull first, then snap to the cached sprite.
    {
        let has_cache = world.get_non_send_resource::<ParticleSpriteCache>().is_some();
        let pool = world.resource::<ParticlePool>();
        let mut draws: Vec<(ParticleShape, [u8; 3], f32, u8, Vector2)> = Vec::new();
        for particle in pool.iter_live() {
            if !camera.is_on_screen(particle.pos, particle.size, particle.size) {
                continue;
            }
            let (size, alpha) = particle.render_size_alpha();
            if alpha < 5 {
                continue;
            }
            let shape = if particle.is_chunk {
                ParticleShape::Chunk
            } else {
                ParticleShape::Dot
            };
            draws.push((shape, particle.color, size, alpha, camera.apply(particle.pos)));
        }
        if has_cache {
            let cache = world.non_send_resource::<ParticleSpriteCache>();
            for (shape, color, size, alpha, screen) in &draws {
                match cache.get(*shape, *color, *size, *alpha) {
                    Some(texture) => {
                        d.draw_texture(
                            texture,
                            (screen.x - texture.width as f32 * 0.5) as i32,
                            (screen.y - texture.height as f32 * 0.5) as i32,
                            Color::WHITE,
                        );
                    }
                    None => {
                        let c = Color::new(color[0], color[1], color[2], *alpha);
                        d.draw_circle(screen.x as i32, screen.y as i32, *size, c);
                    }
                }
            }
        } else {
            for (_, color, size, alpha, screen) in &draws {
                let c = Color::new(color[0], color[1], color[2], *alpha);
                d.draw_circle(screen.x as i32, screen.y as i32, *size, c);
            }
        }
    }

    // Projectiles.
    {
        let pool = world.resource::<ProjectilePool>();
        for (_, projectile) in pool.iter_active() {
            if !camera.is_on_screen(
                projectile.pos,
                projectile.visual_radius,
                projectile.visual_radius,
            ) {
                continue;
            }
            let screen = camera.apply(projectile.pos);
            d.draw_circle(
                screen.x as i32,
                screen.y as i32,
                projectile.visual_radius,
                Color::YELLOW,
            );
            d.draw_circle(
                screen.x as i32,
                screen.y as i32,
                projectile.visual_radius * 0.5,
                Color::new(255, 255, 200, 255),
            );
        }
    }

    // Enemies.
    let mut enemies_rendered = 0usize;
    {
        let mut query = world.query::<(&MapPosition, &Enemy, &BoxCollider)>();
        for (position, enemy, collider) in query.iter(world) {
            if !enemy.alive {
                continue;
            }
            let half_w = collider.size.x * 0.5;
            let half_h = collider.size.y * 0.5;
            if !camera.is_on_screen(position.pos, half_w, half_h) {
                continue;
            }
            enemies_rendered += 1;
            let screen = camera.apply(position.pos);
            let x = (screen.x - half_w) as i32;
            let y = (screen.y - half_h) as i32;
            let w = collider.size.x as i32;
            let h = collider.size.y as i32;

            let body = if enemy.flash > 0.0 {
                Color::new(255, 220, 220, 255)
            } else {
                enemy_body_color(enemy.kind)
            };
            d.draw_rectangle(x, y, w, h, body);
            d.draw_rectangle_lines(x, y, w, h, Color::new(150, 0, 0, 255));

            if enemy.health < enemy.max_health {
                let bar_w = collider.size.x;
                let fill = bar_w * (enemy.health / enemy.max_health);
                d.draw_rectangle(x, y - 5, bar_w as i32, 3, Color::new(100, 0, 0, 255));
                d.draw_rectangle(x, y - 5, fill as i32, 3, Color::RED);
            }
        }
    }
    world.resource_mut::<DebugCounters>().enemies_rendered = enemies_rendered;

    // Player.
    let mut player_pose: Option<(Vector2, f32)> = None;
    {
        let tuning = world.resource::<SimTuning>().clone();
        let mut query = world.query::<(&MapPosition, &Player)>();
        if let Some((position, player)) = query.iter(world).next() {
            player_pose = Some((position.pos, player.angle));
            if player.alive {
                let half = tuning.player.size * 0.5;
                let screen = camera.apply(position.pos);
                d.draw_rectangle(
                    (screen.x - half) as i32,
                    (screen.y - half) as i32,
                    tuning.player.size as i32,
                    tuning.player.size as i32,
                    Color::WHITE,
                );
                let tip = Vector2 {
                    x: screen.x + player.angle.cos() * tuning.player.size * 0.8,
                    y: screen.y + player.angle.sin() * tuning.player.size * 0.8,
                };
                d.draw_line_ex(screen, tip, 3.0, Color::WHITE);
            }
        }
    }

    // Weapon overlays: the beam while firing, the orbital orb always.
    if let Some((owner_pos, owner_angle)) = player_pose {
        let beam_width = world.resource::<SimTuning>().weapons.beam_width;
        let mut query = world.query::<&Weapon>();
        let weapons: Vec<Weapon> = query.iter(world).cloned().collect();
        for weapon in &weapons {
            match &weapon.kind {
                WeaponKind::Beam(spec) if spec.firing => {
                    let start = camera.apply(owner_pos);
                    let end = Vector2 {
                        x: start.x + owner_angle.cos() * spec.max_range,
                        y: start.y + owner_angle.sin() * spec.max_range,
                    };
                    d.draw_line_ex(start, end, beam_width, Color::new(0, 100, 100, 255));
                    d.draw_line_ex(start, end, beam_width * 0.5, Color::new(0, 255, 255, 255));
                    d.draw_line_ex(start, end, beam_width * 0.2, Color::WHITE);
                }
                WeaponKind::Orbiting(spec) => {
                    let orb = Vector2 {
                        x: owner_pos.x + spec.orbit_angle.cos() * spec.radius,
                        y: owner_pos.y + spec.orbit_angle.sin() * spec.radius,
                    };
                    let orb_screen = camera.apply(orb);
                    let owner_screen = camera.apply(owner_pos);
                    d.draw_line_ex(
                        owner_screen,
                        orb_screen,
                        2.0,
                        Color::new(50, 50, 150, 255),
                    );
                    d.draw_circle(
                        orb_screen.x as i32,
                        orb_screen.y as i32,
                        spec.size * 0.5,
                        Color::new(100, 100, 255, 255),
                    );
                }
                _ => {}
            }
        }
    }
}

/// F3 overlay: frame timing and live/rendered counts.
pub fn render_debug_ui(world: &mut World, d: &mut RaylibDrawHandle) {
    let counters = *world.resource::<DebugCounters>();
    let stats = *world.resource::<SimStats>();
    let time = *world.resource::<WorldTime>();
    let wave = world.resource::<WaveState>().current_wave;

    let fps = d.get_fps();
    let lines = [
        format!("FPS: {} | dt: {:.2} frames", fps, time.delta),
        format!(
            "Enemies: {} (rendered: {})",
            counters.enemies_live, counters.enemies_rendered
        ),
        format!("Projectiles: {}", counters.projectiles_active),
        format!("Particles: {}", counters.particles_live),
        format!("Score: {} | Kills: {}", stats.score, stats.kills),
        format!("Wave: {}", wave),
        "F3: toggle debug".to_string(),
    ];
    let mut y = 10;
    for line in &lines {
        d.draw_text(line, 11, y + 1, 20, Color::BLACK);
        d.draw_text(line, 10, y, 20, Color::GREEN);
        y += 25;
    }
}
