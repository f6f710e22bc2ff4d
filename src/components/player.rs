use bevy_ecs::prelude::Component;

/// Player state. Movement happens through the shared
/// [`RigidBody`](super::rigidbody::RigidBody)/[`MapPosition`](super::mapposition::MapPosition)
/// pair; this component adds aim and health.
#[derive(Component, Clone, Copy, Debug)]
pub struct Player {
    /// Aim angle in radians, toward the current aim point.
    pub angle: f32,
    pub health: f32,
    pub max_health: f32,
    /// Top speed in world units per nominal frame.
    pub speed: f32,
    /// Acceleration per nominal frame while an input axis is held.
    pub accel: f32,
    pub alive: bool,
}

impl Player {
    pub fn new(max_health: f32, speed: f32, accel: f32) -> Self {
        Self {
            angle: 0.0,
            health: max_health,
            max_health,
            speed,
            accel,
            alive: true,
        }
    }

    pub fn take_damage(&mut self, amount: f32) {
        if !self.alive {
            return;
        }
        self.health -= amount;
        if self.health <= 0.0 {
            self.health = 0.0;
            self.alive = false;
        }
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_and_death() {
        let mut p = Player::new(100.0, 6.0, 1.0);
        p.take_damage(40.0);
        assert!(p.alive);
        assert_eq!(p.health, 60.0);
        p.take_damage(60.0);
        assert!(!p.alive);
        p.take_damage(10.0); // no-op when dead
        assert_eq!(p.health, 0.0);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut p = Player::new(100.0, 6.0, 1.0);
        p.take_damage(30.0);
        p.heal(50.0);
        assert_eq!(p.health, 100.0);
    }
}
