//! System-level integration tests for the per-frame pipeline: grid rebuild,
//! projectile collision, enemy AI batching and separation, attacks, and the
//! reap pass.

use bevy_ecs::prelude::*;

use hordecore::components::boxcollider::BoxCollider;
use hordecore::components::enemy::{Enemy, EnemyKind};
use hordecore::components::mapposition::MapPosition;
use hordecore::components::player::Player;
use hordecore::components::rigidbody::RigidBody;
use hordecore::events::shake::ShakeCmd;
use hordecore::resources::camera::FollowCamera;
use hordecore::resources::gameconfig::GameConfig;
use hordecore::resources::input::InputState;
use hordecore::resources::particlepool::ParticlePool;
use hordecore::resources::projectilepool::{ProjectilePool, ProjectileSpawn};
use hordecore::resources::simrng::SimRng;
use hordecore::resources::simtuning::SimTuning;
use hordecore::resources::spatialgrid::SpatialGrid;
use hordecore::resources::stats::{DebugCounters, SimStats};
use hordecore::resources::wavestate::WaveState;
use hordecore::resources::worldtime::WorldTime;
use hordecore::systems::enemies::{enemy_ai, enemy_update};
use hordecore::systems::grid::rebuild_spatial_grid;
use hordecore::systems::projectiles::update_projectiles;
use hordecore::systems::reap::reap_enemies;
use hordecore::systems::spawner::wave_spawn;

fn make_world(delta: f32) -> World {
    let tuning = SimTuning::default();
    let mut world = World::new();
    world.insert_resource(WorldTime {
        elapsed: 0.0,
        delta,
        time_scale: 1.0,
        frame_count: 0,
    });
    world.insert_resource(GameConfig::default());
    world.insert_resource(InputState::default());
    world.insert_resource(SpatialGrid::new(tuning.grid.cell_size));
    world.insert_resource(ProjectilePool::new(16));
    world.insert_resource(ParticlePool::new(256, tuning.pools.bake_threshold));
    world.insert_resource(SimRng::seeded(7));
    world.insert_resource(SimStats::default());
    world.insert_resource(DebugCounters::default());
    world.insert_resource(FollowCamera::new(
        1280.0, 720.0, 2400.0, 1800.0, 0.12, 0.15, 0.85, 24.0, 50.0, 300.0,
    ));
    world.insert_resource(WaveState::default());
    world.init_resource::<Messages<ShakeCmd>>();
    world.insert_resource(tuning);
    world
}

fn spawn_enemy(world: &mut World, x: f32, y: f32, size: f32, radius: f32, speed: f32) -> Entity {
    world
        .spawn((
            MapPosition::new(x, y),
            BoxCollider::new(size, size),
            Enemy::new(EnemyKind::Normal, 50.0, speed, 10.0, 10, radius, 60.0),
        ))
        .id()
}

fn spawn_player(world: &mut World, x: f32, y: f32) -> Entity {
    world
        .spawn((
            MapPosition::new(x, y),
            RigidBody::with_physics(0.85, Some(6.0)),
            BoxCollider::new(20.0, 20.0),
            Player::new(100.0, 6.0, 1.0),
        ))
        .id()
}

fn tick(world: &mut World, systems: impl FnOnce(&mut Schedule)) {
    let mut schedule = Schedule::default();
    systems(&mut schedule);
    schedule.run(world);
}

fn advance_frame(world: &mut World) {
    let mut wt = world.resource_mut::<WorldTime>();
    wt.frame_count += 1;
}

// =============================================================================
// Projectile collision
// =============================================================================

#[test]
fn projectile_hits_enemy_and_expires_on_penetration() {
    // Spec scenario: projectile at (0,0), angle 0, speed 10, penetration 1,
    // lifetime 120; enemy at (50,0) with a 20x20 hitbox. After 5 steps at
    // dt=1 the projectile has crossed the enemy and must be inactive.
    let mut world = make_world(1.0);
    let enemy = spawn_enemy(&mut world, 50.0, 0.0, 20.0, 8.0, 0.0);

    let handle = {
        let mut pool = world.resource_mut::<ProjectilePool>();
        pool.acquire(ProjectileSpawn {
            x: 0.0,
            y: 0.0,
            angle: 0.0,
            speed: 10.0,
            damage: 25.0,
            penetration: 1,
            lifetime: 120.0,
            hitbox: 1.0,
            visual_radius: 5.0,
        })
    };

    for _ in 0..5 {
        tick(&mut world, |s| {
            s.add_systems(rebuild_spatial_grid);
            s.add_systems(update_projectiles.after(rebuild_spatial_grid));
        });
        advance_frame(&mut world);
    }

    assert!(
        world.resource::<ProjectilePool>().get(handle).is_none(),
        "projectile must deactivate on its only hit"
    );
    let enemy_state = world.get::<Enemy>(enemy).unwrap();
    assert_eq!(enemy_state.health, 25.0);
    // The hit also spawned blood.
    assert!(world.resource::<ParticlePool>().live_count() > 0);
}

#[test]
fn projectile_never_hits_same_enemy_twice() {
    // Penetration 3, but a single enemy: exactly one hit is consumed and
    // the projectile keeps flying with the rest of its budget.
    let mut world = make_world(1.0);
    let enemy = spawn_enemy(&mut world, 30.0, 0.0, 20.0, 8.0, 0.0);

    let handle = {
        let mut pool = world.resource_mut::<ProjectilePool>();
        pool.acquire(ProjectileSpawn {
            x: 0.0,
            y: 0.0,
            angle: 0.0,
            speed: 5.0,
            damage: 10.0,
            penetration: 3,
            lifetime: 120.0,
            hitbox: 12.0,
            visual_radius: 5.0,
        })
    };

    for _ in 0..10 {
        tick(&mut world, |s| {
            s.add_systems(rebuild_spatial_grid);
            s.add_systems(update_projectiles.after(rebuild_spatial_grid));
        });
        advance_frame(&mut world);
    }

    let enemy_state = world.get::<Enemy>(enemy).unwrap();
    assert_eq!(enemy_state.health, 40.0, "exactly one hit despite overlap");
    let pool = world.resource::<ProjectilePool>();
    let projectile = pool.get(handle).expect("projectile still alive");
    assert_eq!(projectile.penetration, 2);
}

#[test]
fn projectile_knockback_decays_to_exact_zero() {
    let mut world = make_world(1.0);
    let enemy = spawn_enemy(&mut world, 40.0, 0.0, 20.0, 8.0, 0.0);
    spawn_player(&mut world, 600.0, 600.0);

    {
        let mut pool = world.resource_mut::<ProjectilePool>();
        pool.acquire(ProjectileSpawn {
            x: 0.0,
            y: 0.0,
            angle: 0.0,
            speed: 10.0,
            damage: 1.0,
            penetration: 1,
            lifetime: 120.0,
            hitbox: 12.0,
            visual_radius: 5.0,
        });
    }

    // Let the projectile connect.
    for _ in 0..5 {
        tick(&mut world, |s| {
            s.add_systems(rebuild_spatial_grid);
            s.add_systems(update_projectiles.after(rebuild_spatial_grid));
        });
        advance_frame(&mut world);
    }
    let kb = world.get::<Enemy>(enemy).unwrap().knockback;
    assert!(kb.x != 0.0 || kb.y != 0.0, "hit must impart knockback");

    // Physics decays it and snaps the residue to zero.
    for _ in 0..120 {
        tick(&mut world, |s| {
            s.add_systems(enemy_update);
        });
        advance_frame(&mut world);
    }
    let kb = world.get::<Enemy>(enemy).unwrap().knockback;
    assert_eq!(kb.x, 0.0);
    assert_eq!(kb.y, 0.0);
}

// =============================================================================
// Enemy separation
// =============================================================================

#[test]
fn overlapping_enemies_separate_monotonically() {
    // Two radius-10 enemies 5 units apart with zero seek speed: repeated
    // AI + physics steps must push them apart monotonically toward >= 20
    // without oscillating.
    let mut world = make_world(1.0);
    spawn_player(&mut world, 600.0, 600.0);
    let a = spawn_enemy(&mut world, 100.0, 100.0, 25.0, 10.0, 0.0);
    let b = spawn_enemy(&mut world, 105.0, 100.0, 25.0, 10.0, 0.0);

    let distance = |world: &World| {
        let pa = world.get::<MapPosition>(a).unwrap().pos;
        let pb = world.get::<MapPosition>(b).unwrap().pos;
        ((pa.x - pb.x).powi(2) + (pa.y - pb.y).powi(2)).sqrt()
    };

    let mut last = distance(&world);
    assert!(last < 20.0);
    for _ in 0..200 {
        tick(&mut world, |s| {
            s.add_systems(rebuild_spatial_grid);
            s.add_systems(enemy_ai.after(rebuild_spatial_grid));
            s.add_systems(enemy_update.after(enemy_ai));
        });
        advance_frame(&mut world);
        let now = distance(&world);
        assert!(
            now >= last - 1e-4,
            "separation must not oscillate: {} -> {}",
            last,
            now
        );
        last = now;
    }
    // The push is proportional to the remaining overlap, so the distance
    // converges geometrically onto the combined radius.
    assert!(last >= 19.99, "enemies still overlap after 200 steps: {}", last);
}

#[test]
fn distant_enemies_are_not_pushed() {
    let mut world = make_world(1.0);
    spawn_player(&mut world, 600.0, 600.0);
    let a = spawn_enemy(&mut world, 100.0, 100.0, 25.0, 10.0, 0.0);
    let b = spawn_enemy(&mut world, 160.0, 100.0, 25.0, 10.0, 0.0);

    tick(&mut world, |s| {
        s.add_systems(rebuild_spatial_grid);
        s.add_systems(enemy_ai.after(rebuild_spatial_grid));
        s.add_systems(enemy_update.after(enemy_ai));
    });

    assert_eq!(world.get::<MapPosition>(a).unwrap().pos.x, 100.0);
    assert_eq!(world.get::<MapPosition>(b).unwrap().pos.x, 160.0);
}

// =============================================================================
// AI batching
// =============================================================================

#[test]
fn ai_batching_updates_subset_per_frame() {
    let mut world = make_world(1.0);
    // Force two batches regardless of enemy count.
    {
        let mut tuning = world.resource_mut::<SimTuning>();
        tuning.ai.batch_thresholds.clear();
        tuning
            .ai
            .batch_thresholds
            .push(hordecore::resources::simtuning::BatchThreshold {
                enemies: 0,
                batches: 2,
            });
    }
    spawn_player(&mut world, 600.0, 600.0);
    // Spaced apart (no separation contact) but all inside the logic margin.
    let enemies: Vec<Entity> = (0..8)
        .map(|i| spawn_enemy(&mut world, 100.0 + i as f32 * 150.0, 100.0, 25.0, 10.0, 2.0))
        .collect();

    tick(&mut world, |s| {
        s.add_systems(rebuild_spatial_grid);
        s.add_systems(enemy_ai.after(rebuild_spatial_grid));
    });

    // With K=2 on frame 0, exactly the even-index entities computed AI.
    let mut fresh = 0;
    let mut stale = 0;
    for &e in &enemies {
        let enemy = world.get::<Enemy>(e).unwrap();
        let moved = enemy.seek_velocity.x != 0.0 || enemy.seek_velocity.y != 0.0;
        if e.index() % 2 == 0 {
            assert!(moved, "scheduled batch must get fresh AI");
            fresh += 1;
        } else {
            assert!(!moved, "unscheduled batch keeps its last velocity");
            stale += 1;
        }
    }
    assert!(fresh > 0 && stale > 0);

    // Next frame the other batch catches up.
    advance_frame(&mut world);
    tick(&mut world, |s| {
        s.add_systems(rebuild_spatial_grid);
        s.add_systems(enemy_ai.after(rebuild_spatial_grid));
    });
    for &e in &enemies {
        let enemy = world.get::<Enemy>(e).unwrap();
        assert!(enemy.seek_velocity.x != 0.0 || enemy.seek_velocity.y != 0.0);
    }
}

#[test]
fn logic_culling_skips_separation_but_not_seek() {
    let mut world = make_world(1.0);
    spawn_player(&mut world, 100.0, 100.0);
    // Overlapping pairs: one well past the 300-unit logic margin around
    // the 1280x720 view at scroll (0,0), one inside it. Zero seek speed
    // isolates the separation component.
    let far_a = spawn_enemy(&mut world, 2200.0, 1700.0, 25.0, 10.0, 0.0);
    let far_b = spawn_enemy(&mut world, 2205.0, 1700.0, 25.0, 10.0, 0.0);
    let near_a = spawn_enemy(&mut world, 300.0, 300.0, 25.0, 10.0, 0.0);
    let near_b = spawn_enemy(&mut world, 305.0, 300.0, 25.0, 10.0, 0.0);

    tick(&mut world, |s| {
        s.add_systems(rebuild_spatial_grid);
        s.add_systems(enemy_ai.after(rebuild_spatial_grid));
    });

    for e in [far_a, far_b] {
        let enemy = world.get::<Enemy>(e).unwrap();
        assert_eq!(enemy.seek_velocity.x, 0.0, "no neighbor query off screen");
    }
    let near = world.get::<Enemy>(near_a).unwrap();
    assert!(near.seek_velocity.x != 0.0, "on-screen pair separates");
    let near = world.get::<Enemy>(near_b).unwrap();
    assert!(near.seek_velocity.x != 0.0);
}

#[test]
fn far_offscreen_enemy_still_seeks_the_player() {
    let mut world = make_world(1.0);
    spawn_player(&mut world, 100.0, 100.0);
    let far = spawn_enemy(&mut world, 2200.0, 1700.0, 25.0, 10.0, 2.0);

    tick(&mut world, |s| {
        s.add_systems(rebuild_spatial_grid);
        s.add_systems(enemy_ai.after(rebuild_spatial_grid));
        s.add_systems(enemy_update.after(enemy_ai));
    });

    let pos = world.get::<MapPosition>(far).unwrap().pos;
    assert!(pos.x < 2200.0 && pos.y < 1700.0, "moving toward the player");
}

// =============================================================================
// Contact attacks
// =============================================================================

#[test]
fn enemy_attacks_player_on_contact_with_cooldown() {
    let mut world = make_world(1.0);
    let player = spawn_player(&mut world, 100.0, 100.0);
    spawn_enemy(&mut world, 110.0, 100.0, 25.0, 10.0, 0.0);

    tick(&mut world, |s| {
        s.add_systems(enemy_update);
    });
    assert_eq!(world.get::<Player>(player).unwrap().health, 90.0);

    // Cooldown holds the next bite back.
    tick(&mut world, |s| {
        s.add_systems(enemy_update);
    });
    assert_eq!(world.get::<Player>(player).unwrap().health, 90.0);
}

#[test]
fn distant_enemy_cannot_attack() {
    let mut world = make_world(1.0);
    let player = spawn_player(&mut world, 100.0, 100.0);
    spawn_enemy(&mut world, 400.0, 100.0, 25.0, 10.0, 0.0);

    tick(&mut world, |s| {
        s.add_systems(enemy_update);
    });
    assert_eq!(world.get::<Player>(player).unwrap().health, 100.0);
}

// =============================================================================
// Reap pass
// =============================================================================

#[test]
fn dead_enemy_is_reaped_with_score_and_gore() {
    let mut world = make_world(1.0);
    let enemy = spawn_enemy(&mut world, 100.0, 100.0, 25.0, 10.0, 0.0);
    world.get_mut::<Enemy>(enemy).unwrap().take_damage(1000.0);

    tick(&mut world, |s| {
        s.add_systems(reap_enemies);
    });

    assert!(world.get_entity(enemy).is_err(), "dead enemy despawned");
    assert_eq!(world.resource::<SimStats>().score, 10);
    assert_eq!(world.resource::<SimStats>().kills, 1);
    assert!(
        world.resource::<ParticlePool>().live_count() > 10,
        "viscera burst spawned"
    );
}

#[test]
fn live_enemies_survive_the_reap() {
    let mut world = make_world(1.0);
    let enemy = spawn_enemy(&mut world, 100.0, 100.0, 25.0, 10.0, 0.0);

    tick(&mut world, |s| {
        s.add_systems(reap_enemies);
    });

    assert!(world.get_entity(enemy).is_ok());
    assert_eq!(world.resource::<SimStats>().kills, 0);
}

// =============================================================================
// Wave spawning
// =============================================================================

#[test]
fn wave_spawner_creates_enemies_outside_the_world() {
    let mut world = make_world(1.0);
    {
        let tuning = world.resource::<SimTuning>().clone();
        world.resource_mut::<WaveState>().start_wave(&tuning.waves);
    }

    // Wave 1 delay is 57 frames; run enough ticks for several spawns.
    for _ in 0..(57 * 3) {
        tick(&mut world, |s| {
            s.add_systems(wave_spawn);
        });
    }

    let mut query = world.query::<(&MapPosition, &Enemy)>();
    let spawned: Vec<_> = query.iter(&world).collect();
    assert_eq!(spawned.len(), 3);
    for (pos, _) in spawned {
        let inside =
            pos.pos.x >= 0.0 && pos.pos.x <= 2400.0 && pos.pos.y >= 0.0 && pos.pos.y <= 1800.0;
        assert!(!inside, "spawn must sit on the outside rim: {:?}", pos.pos);
    }
}
