//! Time update system.
//!
//! Converts the wall-clock frame delta into nominal 60 Hz frame units and
//! clamps it, then writes the shared [`WorldTime`] resource. The clamp keeps
//! a single stalled frame (debugger pause, window drag) from teleporting
//! every entity through several world-seconds in one step.

use bevy_ecs::prelude::*;

use crate::resources::gameconfig::GameConfig;
use crate::resources::worldtime::WorldTime;

/// Upper bound on the per-frame delta, in frame units.
pub const MAX_FRAME_DELTA: f32 = 3.0;

/// Update elapsed/delta frame units on the `WorldTime` resource.
///
/// `raw_dt` is the unscaled wall-clock delta in seconds. It is converted to
/// frame units against the configured target FPS, clamped, and scaled by
/// `time_scale`.
pub fn update_world_time(world: &mut World, raw_dt: f32) {
    let target_fps = world.resource::<GameConfig>().target_fps.max(1) as f32;
    let mut wt = world.resource_mut::<WorldTime>();
    let frames = (raw_dt * target_fps).min(MAX_FRAME_DELTA);
    let scaled = frames * wt.time_scale;
    wt.elapsed += scaled;
    wt.delta = scaled;
    wt.frame_count += 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_with_clock() -> World {
        let mut world = World::new();
        world.insert_resource(GameConfig::default());
        world.insert_resource(WorldTime::default());
        world
    }

    #[test]
    fn test_one_target_frame_is_unit_delta() {
        let mut world = world_with_clock();
        update_world_time(&mut world, 1.0 / 60.0);
        let wt = world.resource::<WorldTime>();
        assert!((wt.delta - 1.0).abs() < 1e-4);
        assert_eq!(wt.frame_count, 1);
    }

    #[test]
    fn test_spike_is_clamped() {
        let mut world = world_with_clock();
        update_world_time(&mut world, 10.0); // 600 nominal frames
        let wt = world.resource::<WorldTime>();
        assert_eq!(wt.delta, MAX_FRAME_DELTA);
    }

    #[test]
    fn test_time_scale_multiplies_delta() {
        let mut world = world_with_clock();
        world.insert_resource(WorldTime::default().with_time_scale(0.5));
        update_world_time(&mut world, 1.0 / 60.0);
        assert!((world.resource::<WorldTime>().delta - 0.5).abs() < 1e-4);
    }
}
