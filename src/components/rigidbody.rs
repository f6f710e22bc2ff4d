//! Kinematic body component.
//!
//! The [`RigidBody`] component stores velocity and per-frame damping for an
//! entity. Movement systems integrate velocity into
//! [`MapPosition`](super::mapposition::MapPosition); friction is applied as a
//! multiplicative factor per nominal frame, so `friction = 0.85` removes 15%
//! of the velocity each 60 Hz frame regardless of the real frame rate.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Kinematic body storing velocity and damping.
///
/// # Fields
/// - `velocity` - Current velocity in world units per nominal frame
/// - `friction` - Per-frame velocity retention factor (1.0 = no damping)
/// - `max_speed` - Optional velocity magnitude clamp
#[derive(Component, Clone, Debug)]
pub struct RigidBody {
    pub velocity: Vector2,
    pub friction: f32,
    pub max_speed: Option<f32>,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Create a RigidBody with zero velocity and no damping.
    pub fn new() -> Self {
        Self {
            velocity: Vector2 { x: 0.0, y: 0.0 },
            friction: 1.0,
            max_speed: None,
        }
    }

    /// Create a RigidBody with damping parameters configured.
    pub fn with_physics(friction: f32, max_speed: Option<f32>) -> Self {
        Self {
            velocity: Vector2 { x: 0.0, y: 0.0 },
            friction,
            max_speed,
        }
    }

    pub fn set_velocity(&mut self, velocity: Vector2) {
        self.velocity = velocity;
    }

    /// Apply friction and the max-speed clamp for a frame-unit delta.
    pub fn damp(&mut self, dt: f32) {
        if self.friction < 1.0 {
            let factor = self.friction.powf(dt);
            self.velocity.x *= factor;
            self.velocity.y *= factor;
        }
        if let Some(max) = self.max_speed {
            let speed_sq = self.velocity.x * self.velocity.x + self.velocity.y * self.velocity.y;
            if speed_sq > max * max {
                let inv = max / speed_sq.sqrt();
                self.velocity.x *= inv;
                self.velocity.y *= inv;
            }
        }
    }
}
