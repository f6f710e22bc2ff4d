use bevy_ecs::prelude::Resource;

/// Frame clock. `delta` is expressed in nominal 60 Hz frame units: a value
/// of 1.0 means exactly one target frame elapsed: so all per-frame tuning
/// constants multiply by it directly. `frame_count` drives AI batch
/// selection.
#[derive(Resource, Clone, Copy)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }
}
