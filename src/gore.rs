//! Gore particle recipes.
//!
//! Each recipe feeds the ring-buffer pool directly; the pool reference is a
//! plain argument, so there is no "not yet wired" state to check at runtime.
//! All randomness comes from the shared seeded [`SimRng`].

use crate::resources::particlepool::{
    BLOOD_RED, BRIGHT_RED, DARK_BLOOD, GUTS_PINK, ParticlePool, ParticleSpawn,
};
use crate::resources::simrng::SimRng;
use raylib::prelude::Vector2;
use std::f32::consts::TAU;

/// Directional spray when an enemy takes a hit. `direction` is the impact
/// travel direction; `None` sprays radially.
pub fn blood_splatter(
    pool: &mut ParticlePool,
    rng: &mut SimRng,
    x: f32,
    y: f32,
    direction: Option<Vector2>,
    force: f32,
    count: u32,
) {
    for _ in 0..count {
        let (angle, speed) = match direction {
            Some(dir) => {
                let base = dir.y.atan2(dir.x);
                (
                    base + rng.f32_range(-0.6, 0.6),
                    rng.f32_range(3.0, 9.0) * force,
                )
            }
            None => (rng.f32_range(0.0, TAU), rng.f32_range(2.0, 6.0)),
        };
        let color = match rng.0.u32(0..3) {
            0 => BLOOD_RED,
            1 => BRIGHT_RED,
            _ => DARK_BLOOD,
        };
        pool.acquire(ParticleSpawn {
            x,
            y,
            color,
            size: rng.f32_range(2.0, 5.0),
            lifetime: rng.f32_range(30.0, 60.0),
            vel: Vector2 {
                x: angle.cos() * speed,
                y: angle.sin() * speed,
            },
            gravity: 0.0,
            friction: 0.85,
            is_chunk: false,
            is_liquid: true,
        });
    }
}

/// Single long-lived drip under a wounded, walking enemy.
pub fn blood_drip(pool: &mut ParticlePool, rng: &mut SimRng, x: f32, y: f32) {
    pool.acquire(ParticleSpawn {
        x: x + rng.f32_range(-3.0, 3.0),
        y: y + rng.f32_range(-3.0, 3.0),
        color: DARK_BLOOD,
        size: rng.f32_range(3.0, 5.0),
        lifetime: rng.f32_range(200.0, 400.0),
        vel: Vector2 { x: 0.0, y: 0.0 },
        gravity: 0.0,
        friction: 1.0,
        is_chunk: false,
        is_liquid: true,
    });
}

/// Large static puddle: several overlapping blobs for an irregular outline.
pub fn blood_pool(pool: &mut ParticlePool, rng: &mut SimRng, x: f32, y: f32) {
    let blobs = rng.0.u32(3..8);
    for _ in 0..blobs {
        let dist = rng.f32_range(0.0, 10.0);
        let angle = rng.f32_range(0.0, TAU);
        pool.acquire(ParticleSpawn {
            x: x + angle.cos() * dist,
            y: y + angle.sin() * dist,
            color: DARK_BLOOD,
            size: rng.f32_range(8.0, 16.0),
            lifetime: rng.f32_range(600.0, 900.0),
            vel: Vector2 { x: 0.0, y: 0.0 },
            gravity: 0.0,
            friction: 1.0,
            is_chunk: false,
            is_liquid: true,
        });
    }
}

/// Death burst: puddle base, fast red mist, and chunks that slide out under
/// ground friction.
pub fn viscera_explosion(pool: &mut ParticlePool, rng: &mut SimRng, x: f32, y: f32) {
    blood_pool(pool, rng, x, y);

    for _ in 0..25 {
        let angle = rng.f32_range(0.0, TAU);
        let speed = rng.f32_range(1.0, 5.0);
        pool.acquire(ParticleSpawn {
            x,
            y,
            color: BLOOD_RED,
            size: rng.f32_range(2.0, 4.0),
            lifetime: 40.0,
            vel: Vector2 {
                x: angle.cos() * speed,
                y: angle.sin() * speed,
            },
            gravity: 0.0,
            friction: 0.9,
            is_chunk: false,
            is_liquid: true,
        });
    }

    let chunks = rng.0.u32(8..15);
    for _ in 0..chunks {
        let angle = rng.f32_range(0.0, TAU);
        let speed = rng.f32_range(3.0, 8.0);
        let color = if rng.0.bool() { DARK_BLOOD } else { GUTS_PINK };
        pool.acquire(ParticleSpawn {
            x,
            y,
            color,
            size: rng.f32_range(4.0, 7.0),
            lifetime: rng.f32_range(60.0, 120.0),
            vel: Vector2 {
                x: angle.cos() * speed,
                y: angle.sin() * speed,
            },
            gravity: 0.0,
            friction: 0.88,
            is_chunk: true,
            is_liquid: false,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splatter_spawns_requested_count() {
        let mut pool = ParticlePool::new(64, 0.25);
        let mut rng = SimRng::seeded(1);
        blood_splatter(&mut pool, &mut rng, 0.0, 0.0, None, 1.0, 10);
        assert_eq!(pool.live_count(), 10);
    }

    #[test]
    fn test_directional_splatter_biases_velocity() {
        let mut pool = ParticlePool::new(64, 0.25);
        let mut rng = SimRng::seeded(2);
        let dir = Vector2 { x: 1.0, y: 0.0 };
        blood_splatter(&mut pool, &mut rng, 0.0, 0.0, Some(dir), 1.0, 20);
        // Spread is ±0.6 rad around +X, so every particle moves rightward.
        assert!(pool.iter_live().all(|p| p.vel.x > 0.0));
    }

    #[test]
    fn test_viscera_mixes_chunks_and_liquid() {
        let mut pool = ParticlePool::new(128, 0.25);
        let mut rng = SimRng::seeded(3);
        viscera_explosion(&mut pool, &mut rng, 10.0, 10.0);
        assert!(pool.iter_live().any(|p| p.is_chunk));
        assert!(pool.iter_live().any(|p| p.is_liquid && !p.is_chunk));
    }

    #[test]
    fn test_same_seed_same_spray() {
        let mut a = ParticlePool::new(64, 0.25);
        let mut b = ParticlePool::new(64, 0.25);
        let mut rng_a = SimRng::seeded(42);
        let mut rng_b = SimRng::seeded(42);
        blood_splatter(&mut a, &mut rng_a, 0.0, 0.0, None, 1.5, 10);
        blood_splatter(&mut b, &mut rng_b, 0.0, 0.0, None, 1.5, 10);
        for (pa, pb) in a.iter_live().zip(b.iter_live()) {
            assert_eq!(pa.vel.x, pb.vel.x);
            assert_eq!(pa.vel.y, pb.vel.y);
            assert_eq!(pa.color, pb.color);
        }
    }
}
