use bevy_ecs::prelude::Resource;

/// Score and kill tally for the current run.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct SimStats {
    pub score: u64,
    pub kills: u32,
}

/// Live/rendered entity counts, refreshed every frame. Diagnostics only;
/// the debug overlay and tests read it, nothing in the simulation does.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct DebugCounters {
    pub enemies_live: usize,
    pub enemies_rendered: usize,
    pub projectiles_active: usize,
    pub particles_live: usize,
    pub wave: u32,
}
