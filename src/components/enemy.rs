//! Enemy state component.
//!
//! Enemies are regular ECS entities (spawned by the wave spawner, despawned
//! by the reap system) rather than pooled objects: their churn rate is tied
//! to wave pacing, not to per-frame effect bursts, so entity allocation is
//! cheap relative to projectile/particle turnover.
//!
//! The expensive part of an enemy's update (seek direction + neighbor
//! separation) is time-sliced: [`seek_velocity`](Enemy::seek_velocity) holds
//! the last AI result and is replayed on frames where this enemy's batch is
//! not scheduled.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Closed set of enemy archetypes. Stats for each kind come from the
/// tuning table row of the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Small,
    Normal,
    Large,
    Tank,
}

/// Per-enemy simulation state.
#[derive(Component, Clone, Debug)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub health: f32,
    pub max_health: f32,
    /// Seek speed in world units per nominal frame, wave multiplier applied.
    pub speed: f32,
    pub contact_damage: f32,
    pub score_value: u32,
    /// Soft-body separation radius. Smaller than the hitbox so sprites may
    /// overlap slightly before being pushed apart.
    pub radius: f32,
    /// Frames until the next contact attack is allowed.
    pub attack_cooldown: f32,
    /// Cooldown restart value in frames.
    pub attack_delay: f32,
    /// Impulse from projectile hits, decays exponentially.
    pub knockback: Vector2,
    /// Damage flash timer in frames; render tints while > 0.
    pub flash: f32,
    /// Last AI-computed velocity (seek + separation), replayed on frames
    /// where this enemy's batch is skipped.
    pub seek_velocity: Vector2,
    /// Dead enemies stay in the world until the end-of-frame reap pass but
    /// are skipped by every query that checks this flag.
    pub alive: bool,
}

impl Enemy {
    pub fn new(
        kind: EnemyKind,
        health: f32,
        speed: f32,
        contact_damage: f32,
        score_value: u32,
        radius: f32,
        attack_delay: f32,
    ) -> Self {
        Self {
            kind,
            health,
            max_health: health,
            speed,
            contact_damage,
            score_value,
            radius,
            attack_cooldown: 0.0,
            attack_delay,
            knockback: Vector2 { x: 0.0, y: 0.0 },
            flash: 0.0,
            seek_velocity: Vector2 { x: 0.0, y: 0.0 },
            alive: true,
        }
    }

    /// Apply damage; returns true when this hit killed the enemy.
    /// Hits on an already-dead enemy are ignored.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if !self.alive {
            return false;
        }
        self.health -= amount;
        self.flash = 6.0;
        if self.health <= 0.0 {
            self.health = 0.0;
            self.alive = false;
            return true;
        }
        false
    }

    pub fn can_attack(&self) -> bool {
        self.alive && self.attack_cooldown <= 0.0
    }

    /// Push the enemy away from an impact point. A zero-length offset (the
    /// impact exactly on the enemy center) leaves the knockback unchanged to
    /// keep NaNs out of the velocity.
    pub fn apply_knockback(&mut self, own_pos: Vector2, impact: Vector2, force: f32) {
        let dx = own_pos.x - impact.x;
        let dy = own_pos.y - impact.y;
        let dist_sq = dx * dx + dy * dy;
        if dist_sq < 1e-6 {
            return;
        }
        let inv = force / dist_sq.sqrt();
        self.knockback.x += dx * inv;
        self.knockback.y += dy * inv;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_damage_kills_at_zero() {
        let mut e = Enemy::new(EnemyKind::Normal, 50.0, 2.0, 10.0, 10, 10.0, 60.0);
        assert!(!e.take_damage(25.0));
        assert!(e.alive);
        assert!(e.take_damage(25.0));
        assert!(!e.alive);
        assert_eq!(e.health, 0.0);
    }

    #[test]
    fn test_dead_enemy_ignores_further_damage() {
        let mut e = Enemy::new(EnemyKind::Small, 10.0, 3.0, 5.0, 5, 8.0, 60.0);
        assert!(e.take_damage(10.0));
        assert!(!e.take_damage(10.0));
    }

    #[test]
    fn test_damage_starts_flash() {
        let mut e = Enemy::new(EnemyKind::Normal, 50.0, 2.0, 10.0, 10, 10.0, 60.0);
        e.take_damage(1.0);
        assert!(e.flash > 0.0);
    }

    #[test]
    fn test_knockback_points_away_from_impact() {
        let mut e = Enemy::new(EnemyKind::Normal, 50.0, 2.0, 10.0, 10, 10.0, 60.0);
        let own = Vector2 { x: 10.0, y: 0.0 };
        let impact = Vector2 { x: 0.0, y: 0.0 };
        e.apply_knockback(own, impact, 8.0);
        assert!(e.knockback.x > 0.0);
        assert_eq!(e.knockback.y, 0.0);
    }

    #[test]
    fn test_knockback_coincident_points_is_noop() {
        let mut e = Enemy::new(EnemyKind::Normal, 50.0, 2.0, 10.0, 10, 10.0, 60.0);
        let p = Vector2 { x: 5.0, y: 5.0 };
        e.apply_knockback(p, p, 8.0);
        assert_eq!(e.knockback.x, 0.0);
        assert_eq!(e.knockback.y, 0.0);
    }

    #[test]
    fn test_cannot_attack_while_cooling_down() {
        let mut e = Enemy::new(EnemyKind::Tank, 200.0, 1.0, 30.0, 50, 16.0, 90.0);
        assert!(e.can_attack());
        e.attack_cooldown = e.attack_delay;
        assert!(!e.can_attack());
    }
}
