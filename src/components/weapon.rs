//! Weapon component.
//!
//! Weapons are entities that reference their owner entity and carry a
//! closed [`WeaponKind`] variant. All dispatch is a `match` on the kind;
//! there is no capability probing. Every weapon has the same update surface
//! and the render pass draws only the kinds that have a world-space body
//! (beam, orbital).

use bevy_ecs::prelude::{Component, Entity};
use rustc_hash::FxHashMap;

/// Projectile-emitter parameters: covers both the auto-aiming single-shot
/// wand and the fan-spread shotgun via `pellets`/`spread`.
#[derive(Debug, Clone)]
pub struct EmitterSpec {
    /// When true, aims at the nearest live enemy instead of the player angle.
    pub auto_aim: bool,
    pub pellets: u32,
    /// Full fan width in radians, centered on the firing angle.
    pub spread: f32,
    pub projectile_speed: f32,
    pub penetration: u32,
    /// Projectile lifetime in frames.
    pub projectile_lifetime: f32,
}

/// Hitscan beam parameters. `hit_timers` throttles re-hits per enemy while
/// the beam stays on them.
#[derive(Debug, Clone, Default)]
pub struct BeamSpec {
    pub max_range: f32,
    /// Frames between hits on the same enemy.
    pub hit_interval: f32,
    pub hit_timers: FxHashMap<Entity, f32>,
    /// Set while the trigger is held; the render pass draws the beam from it.
    pub firing: bool,
}

/// Orbiting melee orb parameters.
#[derive(Debug, Clone)]
pub struct OrbitSpec {
    pub orbit_angle: f32,
    pub radius: f32,
    /// Radians per nominal frame.
    pub angular_speed: f32,
    /// Orb hitbox edge length.
    pub size: f32,
}

/// Closed set of weapon behaviors.
#[derive(Debug, Clone)]
pub enum WeaponKind {
    Emitter(EmitterSpec),
    Beam(BeamSpec),
    Orbiting(OrbitSpec),
}

#[derive(Component, Debug, Clone)]
pub struct Weapon {
    pub owner: Entity,
    pub kind: WeaponKind,
    pub damage: f32,
    /// Frames between activations. Zero for always-on kinds.
    pub cooldown: f32,
    pub current_cooldown: f32,
}

impl Weapon {
    pub fn new(owner: Entity, kind: WeaponKind, damage: f32, cooldown: f32) -> Self {
        Self {
            owner,
            kind,
            damage,
            cooldown,
            current_cooldown: 0.0,
        }
    }

    pub fn ready(&self) -> bool {
        self.current_cooldown <= 0.0
    }

    /// Advance the cooldown timer by a frame delta.
    pub fn cool(&mut self, dt: f32) {
        if self.current_cooldown > 0.0 {
            self.current_cooldown -= dt;
        }
    }
}
