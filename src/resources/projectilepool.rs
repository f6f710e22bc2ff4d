//! Free-list projectile pool.
//!
//! Projectiles are owned by pool slots, not by the ECS: identity is the slot
//! index, "destroying" a projectile flips its `alive` flag and pushes the
//! slot back on the free list, and the next acquire re-initializes every
//! field so no state leaks between reuses. The pool grows on demand when the
//! free list runs dry: projectile counts are bounded by weapon fire rate,
//! so the occasional growth allocation is rare and cheap.

use bevy_ecs::prelude::{Entity, Resource};
use raylib::prelude::Vector2;
use smallvec::SmallVec;

/// Distance past the world edge at which a live projectile is reclaimed.
const OUT_OF_BOUNDS_MARGIN: f32 = 50.0;

#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vector2,
    pub angle: f32,
    pub vel: Vector2,
    pub damage: f32,
    /// Remaining distinct enemies this projectile may still damage.
    pub penetration: u32,
    /// Remaining lifetime in frames.
    pub lifetime: f32,
    /// Collision box edge length. Deliberately larger than `visual_radius`
    /// for forgiving hit detection.
    pub hitbox: f32,
    pub visual_radius: f32,
    /// Enemies already damaged by this projectile; prevents multi-hits on
    /// the same target while penetration remains.
    pub hit_enemies: SmallVec<[Entity; 8]>,
    pub alive: bool,
    /// Whether this slot currently sits on the free list. Guards against a
    /// double release pushing the same index twice.
    pooled: bool,
}

impl Projectile {
    fn inert() -> Self {
        Self {
            pos: Vector2 { x: 0.0, y: 0.0 },
            angle: 0.0,
            vel: Vector2 { x: 0.0, y: 0.0 },
            damage: 0.0,
            penetration: 0,
            lifetime: 0.0,
            hitbox: 0.0,
            visual_radius: 0.0,
            hit_enemies: SmallVec::new(),
            alive: false,
            pooled: true,
        }
    }

    /// Record a hit on `enemy`. Returns true when the enemy was not already
    /// in the hit set; in that case one point of penetration is consumed and
    /// the projectile deactivates when the budget reaches zero.
    pub fn register_hit(&mut self, enemy: Entity) -> bool {
        if self.hit_enemies.contains(&enemy) {
            return false;
        }
        self.hit_enemies.push(enemy);
        self.penetration = self.penetration.saturating_sub(1);
        if self.penetration == 0 {
            self.alive = false;
        }
        true
    }

    pub fn update(&mut self, dt: f32) {
        self.pos.x += self.vel.x * dt;
        self.pos.y += self.vel.y * dt;
        self.lifetime -= dt;
        if self.lifetime <= 0.0 {
            self.alive = false;
        }
    }
}

/// Spawn parameters for [`ProjectilePool::acquire`].
#[derive(Debug, Clone, Copy)]
pub struct ProjectileSpawn {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    pub speed: f32,
    pub damage: f32,
    pub penetration: u32,
    pub lifetime: f32,
    pub hitbox: f32,
    pub visual_radius: f32,
}

#[derive(Resource)]
pub struct ProjectilePool {
    slots: Vec<Projectile>,
    free: Vec<usize>,
}

impl ProjectilePool {
    pub fn new(initial_size: usize) -> Self {
        let slots = vec![Projectile::inert(); initial_size];
        let free = (0..initial_size).rev().collect();
        Self { slots, free }
    }

    /// Pop a slot from the free list (or grow) and re-initialize every
    /// field. The hit set is cleared here, never lazily.
    pub fn acquire(&mut self, spawn: ProjectileSpawn) -> usize {
        let idx = match self.free.pop() {
            Some(idx) => idx,
            None => {
                self.slots.push(Projectile::inert());
                self.slots.len() - 1
            }
        };
        let p = &mut self.slots[idx];
        p.pos = Vector2 {
            x: spawn.x,
            y: spawn.y,
        };
        p.angle = spawn.angle;
        p.vel = Vector2 {
            x: spawn.angle.cos() * spawn.speed,
            y: spawn.angle.sin() * spawn.speed,
        };
        p.damage = spawn.damage;
        p.penetration = spawn.penetration.max(1);
        p.lifetime = spawn.lifetime;
        p.hitbox = spawn.hitbox;
        p.visual_radius = spawn.visual_radius;
        p.hit_enemies.clear();
        p.alive = true;
        p.pooled = false;
        idx
    }

    /// Return a slot to the free list. Releasing an already-released slot is
    /// a no-op; the `pooled` flag keeps a double release from pushing the
    /// same index twice and corrupting the free list.
    pub fn release(&mut self, handle: usize) {
        if let Some(p) = self.slots.get_mut(handle) {
            p.alive = false;
            if !p.pooled {
                p.pooled = true;
                self.free.push(handle);
            }
        }
    }

    /// Advance every active projectile, deactivate the ones whose lifetime
    /// expired or which drifted past the world bounds, and sweep every
    /// deactivated slot (including ones spent mid-frame by collision
    /// resolution) back onto the free list.
    pub fn update_all(&mut self, dt: f32, world_w: f32, world_h: f32) {
        for idx in 0..self.slots.len() {
            let p = &mut self.slots[idx];
            if p.alive {
                p.update(dt);
                let out = p.pos.x < -OUT_OF_BOUNDS_MARGIN
                    || p.pos.x > world_w + OUT_OF_BOUNDS_MARGIN
                    || p.pos.y < -OUT_OF_BOUNDS_MARGIN
                    || p.pos.y > world_h + OUT_OF_BOUNDS_MARGIN;
                if out {
                    p.alive = false;
                }
            }
            if !p.alive && !p.pooled {
                p.pooled = true;
                self.free.push(idx);
            }
        }
    }

    pub fn get(&self, handle: usize) -> Option<&Projectile> {
        self.slots.get(handle).filter(|p| p.alive)
    }

    pub fn get_mut(&mut self, handle: usize) -> Option<&mut Projectile> {
        self.slots.get_mut(handle).filter(|p| p.alive)
    }

    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &Projectile)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, p)| p.alive)
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (usize, &mut Projectile)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, p)| p.alive)
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|p| p.alive).count()
    }

    /// Total instances ever allocated (live + free). Bounded by
    /// max(initial capacity, peak concurrent active).
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn clear(&mut self) {
        self.free.clear();
        for (idx, p) in self.slots.iter_mut().enumerate().rev() {
            p.alive = false;
            p.pooled = true;
            self.free.push(idx);
        }
    }
}
