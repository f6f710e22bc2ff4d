//! Ring-buffer particle pool.
//!
//! Fixed capacity, no free list, no failure mode: `acquire` always succeeds
//! by overwriting the slot at a monotonically advancing circular index,
//! evicting whatever lives there. Under overload the oldest live particles
//! are silently truncated instead of the frame rate degrading: particle
//! demand scales with swarm size and fire rate, both unbounded from the
//! simulation's point of view, so the pool is the hard ceiling.
//!
//! The eviction is strictly by circular order, not by importance: a
//! long-lived blood puddle can be evicted by an unrelated splatter particle.
//! That is the original behavior, kept as a documented trade-off; the bake
//! path below stamps eligible puddles onto the persistent blood layer before
//! their slot is reused, so the visible cost is a one-frame pop at worst.
//!
//! Render-side, particles share a small cache of pre-rendered sprites: each
//! live particle's continuous (color, size, alpha) is snapped to the nearest
//! bucket of a fixed (shape × color × size × alpha) cross-product. The
//! snapping functions live here (pure, testable); texture creation and
//! blitting live in the render layer, which owns the GPU resources.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Vector2;

/// Gore palette. Every cached particle sprite uses one of these colors.
pub const BLOOD_RED: [u8; 3] = [160, 0, 0];
pub const DARK_BLOOD: [u8; 3] = [80, 0, 0];
pub const GUTS_PINK: [u8; 3] = [180, 90, 100];
pub const BRIGHT_RED: [u8; 3] = [200, 20, 20];

pub const PALETTE: [[u8; 3]; 4] = [BLOOD_RED, DARK_BLOOD, GUTS_PINK, BRIGHT_RED];
pub const SIZE_BUCKETS: [u8; 9] = [2, 3, 4, 5, 6, 8, 10, 12, 16];
pub const ALPHA_BUCKETS: [u8; 5] = [50, 100, 150, 200, 255];

/// Below this speed a liquid particle settles into a static puddle.
const SETTLE_SPEED: f32 = 0.1;
/// Lifetime drain per frame for settled puddles (slow fade).
const PUDDLE_DECAY: f32 = 0.3;

/// Shape of a cached particle sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleShape {
    Dot,
    Chunk,
}

/// Key into the pre-rendered sprite cache.
pub type SpriteKey = (ParticleShape, [u8; 3], u8, u8);

/// Snap a continuous color to the nearest palette entry by squared
/// channel difference.
pub fn nearest_color(color: [u8; 3]) -> [u8; 3] {
    let mut best = PALETTE[0];
    let mut best_d = u32::MAX;
    for candidate in PALETTE {
        let d: u32 = candidate
            .iter()
            .zip(color.iter())
            .map(|(&a, &b)| {
                let diff = a as i32 - b as i32;
                (diff * diff) as u32
            })
            .sum();
        if d < best_d {
            best_d = d;
            best = candidate;
        }
    }
    best
}

/// Snap a size to the nearest bucket by absolute difference.
pub fn nearest_size(size: f32) -> u8 {
    let mut best = SIZE_BUCKETS[0];
    let mut best_d = f32::MAX;
    for candidate in SIZE_BUCKETS {
        let d = (candidate as f32 - size).abs();
        if d < best_d {
            best_d = d;
            best = candidate;
        }
    }
    best
}

/// Snap an alpha to the nearest bucket by absolute difference.
pub fn nearest_alpha(alpha: u8) -> u8 {
    let mut best = ALPHA_BUCKETS[0];
    let mut best_d = i32::MAX;
    for candidate in ALPHA_BUCKETS {
        let d = (candidate as i32 - alpha as i32).abs();
        if d < best_d {
            best_d = d;
            best = candidate;
        }
    }
    best
}

/// A pooled particle. Identity is the slot; the struct is overwritten in
/// place on every reuse.
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vector2,
    pub vel: Vector2,
    pub color: [u8; 3],
    pub size: f32,
    /// Size at spawn; flying particles shrink toward zero with life ratio.
    pub original_size: f32,
    pub lifetime: f32,
    pub max_lifetime: f32,
    pub gravity: f32,
    /// Per-frame velocity retention factor.
    pub friction: f32,
    /// Debris: slides under friction, never settles into a puddle.
    pub is_chunk: bool,
    /// Settles into a static puddle once slow, then only fades.
    pub is_liquid: bool,
    pub alive: bool,
    /// Set once this particle has been stamped onto the blood layer.
    /// Baking twice would double-draw the stamp.
    pub baked: bool,
}

impl Particle {
    fn inert() -> Self {
        Self {
            pos: Vector2 { x: 0.0, y: 0.0 },
            vel: Vector2 { x: 0.0, y: 0.0 },
            color: BLOOD_RED,
            size: 0.0,
            original_size: 0.0,
            lifetime: 0.0,
            max_lifetime: 1.0,
            gravity: 0.0,
            friction: 1.0,
            is_chunk: false,
            is_liquid: false,
            alive: false,
            baked: false,
        }
    }

    pub fn life_ratio(&self) -> f32 {
        if self.max_lifetime <= 0.0 {
            return 0.0;
        }
        (self.lifetime / self.max_lifetime).max(0.0)
    }

    /// A static puddle: liquid, not debris, velocity fully damped.
    pub fn is_settled(&self) -> bool {
        self.is_liquid && !self.is_chunk && self.vel.x == 0.0 && self.vel.y == 0.0
    }

    /// Current render size and alpha. Settled puddles keep their size and
    /// only fade; flying particles shrink with remaining life.
    pub fn render_size_alpha(&self) -> (f32, u8) {
        let ratio = self.life_ratio();
        let alpha = (255.0 * ratio) as u8;
        let size = if self.is_settled() {
            self.size
        } else {
            (self.original_size * ratio).max(1.0)
        };
        (size, alpha)
    }

    pub fn update(&mut self, dt: f32) {
        if !self.alive {
            return;
        }
        self.vel.y += self.gravity * dt;
        if self.friction < 1.0 {
            let f = self.friction.powf(dt);
            self.vel.x *= f;
            self.vel.y *= f;
        }
        self.pos.x += self.vel.x * dt;
        self.pos.y += self.vel.y * dt;

        let speed_sq = self.vel.x * self.vel.x + self.vel.y * self.vel.y;
        if self.is_liquid && !self.is_chunk && speed_sq < SETTLE_SPEED * SETTLE_SPEED {
            // Settle into a puddle: stop moving, fade slowly.
            self.gravity = 0.0;
            self.vel.x = 0.0;
            self.vel.y = 0.0;
            self.lifetime -= PUDDLE_DECAY * dt;
        } else {
            self.lifetime -= dt;
        }

        if self.lifetime <= 0.0 {
            self.alive = false;
        }
    }
}

/// Spawn parameters for [`ParticlePool::acquire`].
#[derive(Debug, Clone, Copy)]
pub struct ParticleSpawn {
    pub x: f32,
    pub y: f32,
    pub color: [u8; 3],
    pub size: f32,
    pub lifetime: f32,
    pub vel: Vector2,
    pub gravity: f32,
    pub friction: f32,
    pub is_chunk: bool,
    pub is_liquid: bool,
}

/// A pending stamp for the persistent blood layer.
#[derive(Debug, Clone, Copy)]
pub struct BakeStamp {
    pub x: f32,
    pub y: f32,
    pub color: [u8; 3],
    pub size: f32,
    pub alpha: u8,
}

#[derive(Resource)]
pub struct ParticlePool {
    slots: Vec<Particle>,
    next: usize,
    /// Life ratio at or below which a settled puddle is baked and retired.
    bake_threshold: f32,
    bake_queue: Vec<BakeStamp>,
}

impl ParticlePool {
    pub fn new(capacity: usize, bake_threshold: f32) -> Self {
        assert!(capacity > 0, "particle pool capacity must be non-zero");
        Self {
            slots: vec![Particle::inert(); capacity],
            next: 0,
            bake_threshold,
            bake_queue: Vec::new(),
        }
    }

    /// Take the next circular slot, unconditionally overwriting its
    /// occupant. Never fails, never allocates. A live settled puddle being
    /// evicted is stamped onto the bake queue first so it survives as part
    /// of the blood layer.
    pub fn acquire(&mut self, spawn: ParticleSpawn) -> usize {
        let idx = self.next;
        self.next = (self.next + 1) % self.slots.len();

        self.bake_if_eligible(idx, true);

        let p = &mut self.slots[idx];
        p.pos = Vector2 {
            x: spawn.x,
            y: spawn.y,
        };
        p.vel = spawn.vel;
        p.color = spawn.color;
        p.size = spawn.size;
        p.original_size = spawn.size;
        p.lifetime = spawn.lifetime;
        p.max_lifetime = spawn.lifetime;
        p.gravity = spawn.gravity;
        p.friction = spawn.friction;
        p.is_chunk = spawn.is_chunk;
        p.is_liquid = spawn.is_liquid;
        p.alive = true;
        p.baked = false;
        idx
    }

    /// Stamp slot `idx` onto the bake queue if it holds a live, unbaked,
    /// settled puddle. `evicting` ignores the decay threshold: an evicted
    /// puddle is baked regardless, since its slot is gone either way.
    fn bake_if_eligible(&mut self, idx: usize, evicting: bool) {
        let p = &mut self.slots[idx];
        if !p.alive || p.baked || !p.is_settled() {
            return;
        }
        if !evicting && p.life_ratio() > self.bake_threshold {
            return;
        }
        let (size, alpha) = p.render_size_alpha();
        if alpha < 5 {
            return;
        }
        p.baked = true;
        self.bake_queue.push(BakeStamp {
            x: p.pos.x,
            y: p.pos.y,
            color: p.color,
            size,
            alpha,
        });
    }

    /// Advance every live particle. Settled puddles that decay past the
    /// bake threshold are stamped once and retired, converting pooled state
    /// into the fixed backdrop.
    pub fn update_all(&mut self, dt: f32) {
        for idx in 0..self.slots.len() {
            if !self.slots[idx].alive {
                continue;
            }
            self.slots[idx].update(dt);
            let p = &self.slots[idx];
            if p.alive && p.is_settled() && !p.baked && p.life_ratio() <= self.bake_threshold {
                self.bake_if_eligible(idx, false);
                self.slots[idx].alive = false;
            }
        }
    }

    /// Pending blood-layer stamps, handed to the render layer. Draining
    /// transfers ownership so each stamp is drawn exactly once.
    pub fn drain_bake_queue(&mut self) -> Vec<BakeStamp> {
        std::mem::take(&mut self.bake_queue)
    }

    pub fn iter_live(&self) -> impl Iterator<Item = &Particle> {
        self.slots.iter().filter(|p| p.alive)
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|p| p.alive).count()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[cfg(test)]
    pub fn slot(&self, idx: usize) -> &Particle {
        &self.slots[idx]
    }

    pub fn clear(&mut self) {
        for p in &mut self.slots {
            p.alive = false;
        }
        self.next = 0;
        self.bake_queue.clear();
    }
}
