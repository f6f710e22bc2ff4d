//! Follow camera resource.
//!
//! A continuous controller, no state machine: every frame the camera blends
//! its float scroll toward a target that centers the player (offset toward
//! the aim point for anticipatory framing), clamps the result to the world,
//! and adds screen shake on top. The float accumulator is reset whenever
//! clamping engages: without that, the camera "rubber-bands" when the
//! target moves back off a world edge, because the accumulator would have
//! kept drifting past the boundary.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Vector2;

#[derive(Resource, Debug, Clone)]
pub struct FollowCamera {
    /// Float scroll (world position of the viewport's top-left corner).
    scroll: Vector2,
    /// Integer scroll actually used for rendering, shake included.
    pub rendered: (i32, i32),
    pub shake: f32,
    viewport_w: f32,
    viewport_h: f32,
    world_w: f32,
    world_h: f32,
    /// Blend factor per nominal frame; the same factor on both axes.
    smoothing: f32,
    /// Fraction of the aim offset mixed into the target scroll.
    lookahead: f32,
    /// Multiplicative shake decay per nominal frame.
    shake_decay: f32,
    shake_max: f32,
    render_margin: f32,
    logic_margin: f32,
}

impl FollowCamera {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        viewport_w: f32,
        viewport_h: f32,
        world_w: f32,
        world_h: f32,
        smoothing: f32,
        lookahead: f32,
        shake_decay: f32,
        shake_max: f32,
        render_margin: f32,
        logic_margin: f32,
    ) -> Self {
        Self {
            scroll: Vector2 { x: 0.0, y: 0.0 },
            rendered: (0, 0),
            shake: 0.0,
            viewport_w,
            viewport_h,
            world_w,
            world_h,
            smoothing,
            lookahead,
            shake_decay,
            shake_max,
            render_margin,
            logic_margin,
        }
    }

    /// Float scroll after the last update, clamp applied, shake excluded.
    pub fn scroll(&self) -> Vector2 {
        self.scroll
    }

    pub fn add_shake(&mut self, amount: f32) {
        self.shake = (self.shake + amount).min(self.shake_max);
    }

    /// Advance the camera one frame. `jitter` supplies two values in
    /// [-1, 1] for the shake offset so the caller controls the RNG.
    pub fn update(&mut self, target: Vector2, aim_screen: Vector2, dt: f32, jitter: (f32, f32)) {
        let center = Vector2 {
            x: self.viewport_w * 0.5,
            y: self.viewport_h * 0.5,
        };
        let target_scroll = Vector2 {
            x: target.x - center.x + (aim_screen.x - center.x) * self.lookahead,
            y: target.y - center.y + (aim_screen.y - center.y) * self.lookahead,
        };

        // Exponential catch-up, frame-rate independent within the dt clamp.
        let blend = 1.0 - (1.0 - self.smoothing).powf(dt);
        self.scroll.x += (target_scroll.x - self.scroll.x) * blend;
        self.scroll.y += (target_scroll.y - self.scroll.y) * blend;

        // Clamp to world bounds and reset the accumulator on contact.
        let max_x = (self.world_w - self.viewport_w).max(0.0);
        let max_y = (self.world_h - self.viewport_h).max(0.0);
        self.scroll.x = self.scroll.x.clamp(0.0, max_x);
        self.scroll.y = self.scroll.y.clamp(0.0, max_y);

        // Shake decays multiplicatively and is applied after clamping, so a
        // hard hit may momentarily show past the world edge.
        self.shake *= self.shake_decay.powf(dt);
        if self.shake < 0.1 {
            self.shake = 0.0;
        }
        let shake_offset = Vector2 {
            x: jitter.0 * self.shake,
            y: jitter.1 * self.shake,
        };

        self.rendered = (
            (self.scroll.x + shake_offset.x) as i32,
            (self.scroll.y + shake_offset.y) as i32,
        );
    }

    /// World position to screen position under the rendered scroll.
    pub fn apply(&self, world: Vector2) -> Vector2 {
        Vector2 {
            x: world.x - self.rendered.0 as f32,
            y: world.y - self.rendered.1 as f32,
        }
    }

    fn in_view(&self, center: Vector2, half_w: f32, half_h: f32, margin: f32) -> bool {
        let sx = center.x - self.rendered.0 as f32;
        let sy = center.y - self.rendered.1 as f32;
        sx + half_w > -margin
            && sx - half_w < self.viewport_w + margin
            && sy + half_h > -margin
            && sy - half_h < self.viewport_h + margin
    }

    /// Render culling: rectangle overlap against the viewport inflated by
    /// the render margin.
    pub fn is_on_screen(&self, center: Vector2, half_w: f32, half_h: f32) -> bool {
        self.in_view(center, half_w, half_h, self.render_margin)
    }

    /// Logic culling: a larger margin than rendering, used to skip expensive
    /// per-enemy AI far outside the view.
    pub fn in_logic_range(&self, center: Vector2) -> bool {
        self.in_view(center, 0.0, 0.0, self.logic_margin)
    }
}
