use bevy_ecs::prelude::Resource;

/// Seeded RNG shared by every system that needs randomness (gore spread,
/// spawn edges, shake jitter). Routing all draws through one seeded stream
/// keeps two runs with equal seeds and inputs bit-identical: physics never
/// touches an unseeded source.
#[derive(Resource)]
pub struct SimRng(pub fastrand::Rng);

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }

    /// Uniform f32 in [min, max).
    pub fn f32_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.0.f32() * (max - min)
    }

    /// Uniform value in [-1, 1).
    pub fn signed_unit(&mut self) -> f32 {
        self.0.f32() * 2.0 - 1.0
    }
}
