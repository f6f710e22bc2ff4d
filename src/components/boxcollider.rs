use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Axis-aligned hitbox centered on the owning entity's position.
///
/// The collision box is intentionally decoupled from the visual size: a
/// projectile may carry a hitbox larger than its sprite for forgiving hit
/// detection, and an enemy's separation radius is smaller than this box.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vector2,
}

impl BoxCollider {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vector2::new(width, height),
        }
    }

    /// Returns (min, max) of the collider AABB for a given center position.
    pub fn aabb(&self, center: Vector2) -> (Vector2, Vector2) {
        let half = Vector2 {
            x: self.size.x * 0.5,
            y: self.size.y * 0.5,
        };
        (
            Vector2 {
                x: center.x - half.x,
                y: center.y - half.y,
            },
            Vector2 {
                x: center.x + half.x,
                y: center.y + half.y,
            },
        )
    }

    /// AABB vs AABB overlap test against another BoxCollider at a different center.
    pub fn overlaps(&self, center: Vector2, other: &Self, other_center: Vector2) -> bool {
        let (min_a, max_a) = self.aabb(center);
        let (min_b, max_b) = other.aabb(other_center);
        min_a.x < max_b.x && max_a.x > min_b.x && min_a.y < max_b.y && max_a.y > min_b.y
    }

    /// Point containment in world space.
    pub fn contains_point(&self, center: Vector2, point: Vector2) -> bool {
        let (min, max) = self.aabb(center);
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// Segment vs AABB test (slab method). Returns the entry point of the
    /// segment into the box, or `None` if the segment misses it entirely.
    /// Used by the hitscan beam.
    pub fn clip_segment(
        &self,
        center: Vector2,
        seg_start: Vector2,
        seg_end: Vector2,
    ) -> Option<Vector2> {
        let (min, max) = self.aabb(center);
        let dir = Vector2 {
            x: seg_end.x - seg_start.x,
            y: seg_end.y - seg_start.y,
        };

        let mut t_min = 0.0f32;
        let mut t_max = 1.0f32;

        for axis in 0..2 {
            let (start, d, lo, hi) = if axis == 0 {
                (seg_start.x, dir.x, min.x, max.x)
            } else {
                (seg_start.y, dir.y, min.y, max.y)
            };
            if d.abs() < f32::EPSILON {
                // Parallel to this slab: miss unless already inside it.
                if start < lo || start > hi {
                    return None;
                }
            } else {
                let inv = 1.0 / d;
                let mut t0 = (lo - start) * inv;
                let mut t1 = (hi - start) * inv;
                if t0 > t1 {
                    std::mem::swap(&mut t0, &mut t1);
                }
                t_min = t_min.max(t0);
                t_max = t_max.min(t1);
                if t_min > t_max {
                    return None;
                }
            }
        }

        Some(Vector2 {
            x: seg_start.x + dir.x * t_min,
            y: seg_start.y + dir.y * t_min,
        })
    }
}
