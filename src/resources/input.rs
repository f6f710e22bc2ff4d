//! Per-frame input snapshot.
//!
//! The windowing layer (or a test) fills this resource before each step;
//! systems only ever read it. Keeping input as plain data makes the
//! simulation headless: no device handle is required to drive a frame.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Vector2;

/// Movement axes, aim point, and fire state for one frame.
#[derive(Resource, Debug, Clone, Copy)]
pub struct InputState {
    /// Horizontal movement axis in [-1, 1].
    pub move_x: f32,
    /// Vertical movement axis in [-1, 1]; Y+ is down.
    pub move_y: f32,
    /// Aim point in screen coordinates (the crosshair).
    pub aim: Vector2,
    /// Fire trigger held this frame.
    pub fire: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            move_x: 0.0,
            move_y: 0.0,
            aim: Vector2 { x: 0.0, y: 0.0 },
            fire: false,
        }
    }
}
