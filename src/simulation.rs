//! Simulation facade.
//!
//! Owns the ECS [`World`] and the per-frame update [`Schedule`]. The binary
//! and the integration tests drive the exact same pipeline; rendering stays
//! outside (see [`crate::systems::render`]), so a `Simulation` runs headless.
//!
//! Frame ordering is explicit and load-bearing:
//! grid rebuild completes before any collision query; pool updates complete
//! before the render pass reads them; enemy despawns are deferred commands
//! that land before the next frame's grid rebuild.

use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::rigidbody::RigidBody;
use crate::components::weapon::{BeamSpec, EmitterSpec, OrbitSpec, Weapon, WeaponKind};
use crate::events::shake::ShakeCmd;
use crate::resources::camera::FollowCamera;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::particlepool::ParticlePool;
use crate::resources::projectilepool::ProjectilePool;
use crate::resources::simrng::SimRng;
use crate::resources::simtuning::SimTuning;
use crate::resources::spatialgrid::SpatialGrid;
use crate::resources::stats::{DebugCounters, SimStats};
use crate::resources::wavestate::WaveState;
use crate::resources::worldtime::WorldTime;
use crate::systems::camera::{camera_follow, pump_shake_messages};
use crate::systems::counters::refresh_counters;
use crate::systems::enemies::{enemy_ai, enemy_update};
use crate::systems::grid::rebuild_spatial_grid;
use crate::systems::movement::movement;
use crate::systems::particles::update_particles;
use crate::systems::player::player_control;
use crate::systems::projectiles::update_projectiles;
use crate::systems::reap::reap_enemies;
use crate::systems::spawner::wave_spawn;
use crate::systems::time::update_world_time;
use crate::systems::weapons::weapon_system;

pub struct Simulation {
    pub world: World,
    schedule: Schedule,
}

impl Simulation {
    /// Build the world: pools, grid, camera, wave state, the player and
    /// their arsenal. `seed` fixes the RNG stream: equal seeds and inputs
    /// produce bit-identical runs.
    pub fn new(config: GameConfig, tuning: SimTuning, seed: u64) -> Self {
        let mut world = World::new();

        let (world_w, world_h) = config.world_size();
        world.insert_resource(WorldTime::default());
        world.insert_resource(InputState::default());
        world.insert_resource(SimRng::seeded(seed));
        world.insert_resource(SimStats::default());
        world.insert_resource(DebugCounters::default());
        world.insert_resource(SpatialGrid::new(tuning.grid.cell_size));
        world.insert_resource(ProjectilePool::new(tuning.pools.projectile_initial));
        world.insert_resource(ParticlePool::new(
            tuning.pools.particle_capacity,
            tuning.pools.bake_threshold,
        ));
        world.insert_resource(FollowCamera::new(
            config.window_width as f32,
            config.window_height as f32,
            world_w,
            world_h,
            tuning.camera.smoothing,
            tuning.camera.lookahead,
            tuning.camera.shake_decay,
            tuning.camera.shake_max,
            tuning.camera.render_margin,
            tuning.camera.logic_margin,
        ));
        let mut wave = WaveState::default();
        wave.start_wave(&tuning.waves);
        world.insert_resource(wave);
        world.init_resource::<Messages<ShakeCmd>>();

        let player = world
            .spawn((
                MapPosition::new(world_w * 0.5, world_h * 0.5),
                RigidBody::with_physics(tuning.player.friction, Some(tuning.player.speed)),
                BoxCollider::new(tuning.player.size, tuning.player.size),
                Player::new(
                    tuning.player.max_health,
                    tuning.player.speed,
                    tuning.player.accel,
                ),
            ))
            .id();

        spawn_arsenal(&mut world, player, &tuning);

        world.insert_resource(config);
        world.insert_resource(tuning);

        // One fully ordered chain. Partial ordering would be enough for
        // correctness, but several systems share the seeded RNG, and any
        // ambiguity in their relative order would change the draw sequence
        // between runs and break reproducibility.
        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                player_control,
                movement,
                rebuild_spatial_grid,
                weapon_system,
                update_projectiles,
                wave_spawn,
                enemy_ai,
                enemy_update,
                reap_enemies,
                update_particles,
                pump_shake_messages,
                camera_follow,
                refresh_counters,
            )
                .chain(),
        );

        Self { world, schedule }
    }

    /// Advance one frame. `raw_dt` is wall-clock seconds since the last
    /// step; it is converted to clamped frame units internally.
    pub fn step(&mut self, raw_dt: f32, input: InputState) {
        self.world.insert_resource(input);
        update_world_time(&mut self.world, raw_dt);
        self.schedule.run(&mut self.world);
        self.world.clear_trackers();
    }

    pub fn debug_counters(&self) -> DebugCounters {
        *self.world.resource::<DebugCounters>()
    }

    pub fn stats(&self) -> SimStats {
        *self.world.resource::<SimStats>()
    }
}

/// The default loadout: auto-aiming wand, trigger shotgun, trigger beam,
/// always-on orbital. Balance numbers all come from the tuning table.
fn spawn_arsenal(world: &mut World, owner: Entity, tuning: &SimTuning) {
    world.spawn((Weapon::new(
        owner,
        WeaponKind::Emitter(EmitterSpec {
            auto_aim: true,
            pellets: 1,
            spread: 0.0,
            projectile_speed: tuning.weapons.wand_speed,
            penetration: 1,
            projectile_lifetime: tuning.weapons.wand_lifetime,
        }),
        tuning.weapons.wand_damage,
        tuning.weapons.wand_cooldown,
    ),));

    world.spawn((Weapon::new(
        owner,
        WeaponKind::Emitter(EmitterSpec {
            auto_aim: false,
            pellets: tuning.weapons.shotgun_pellets,
            spread: tuning.weapons.shotgun_spread,
            projectile_speed: tuning.weapons.shotgun_speed,
            penetration: tuning.weapons.shotgun_penetration,
            projectile_lifetime: tuning.weapons.shotgun_lifetime,
        }),
        tuning.weapons.shotgun_damage,
        tuning.weapons.shotgun_cooldown,
    ),));

    world.spawn((Weapon::new(
        owner,
        WeaponKind::Beam(BeamSpec {
            max_range: tuning.weapons.beam_range,
            hit_interval: tuning.weapons.beam_hit_interval,
            ..BeamSpec::default()
        }),
        tuning.weapons.beam_damage,
        0.0,
    ),));

    world.spawn((Weapon::new(
        owner,
        WeaponKind::Orbiting(OrbitSpec {
            orbit_angle: 0.0,
            radius: tuning.weapons.orbital_radius,
            angular_speed: tuning.weapons.orbital_speed,
            size: tuning.weapons.orbital_size,
        }),
        tuning.weapons.orbital_damage,
        0.0,
    ),));
}
