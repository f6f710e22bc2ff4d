use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// World-space position of an entity. The origin is the top-left corner of
/// the world; Y+ points down (screen coordinates).
#[derive(Component, Clone, Copy, Debug)]
pub struct MapPosition {
    pub pos: Vector2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vector2 { x, y },
        }
    }

    /// Squared distance to another point. No square root.
    pub fn distance_sq(&self, other: Vector2) -> f32 {
        let dx = other.x - self.pos.x;
        let dy = other.y - self.pos.y;
        dx * dx + dy * dy
    }
}
