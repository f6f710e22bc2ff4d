//! Wave progression state.
//!
//! Pure pacing logic: decides *when* an enemy should spawn; the spawner
//! system decides *what* and *where*. Waves grow in enemy count and spawn
//! rate, and completed waves bump the global speed multiplier.

use crate::resources::simtuning::WaveTuning;
use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Clone)]
pub struct WaveState {
    pub current_wave: u32,
    enemies_in_wave: u32,
    enemies_spawned: u32,
    spawn_timer: f32,
    spawn_delay: f32,
    pub wave_active: bool,
    pub wave_completed: bool,
}

impl Default for WaveState {
    fn default() -> Self {
        Self {
            current_wave: 1,
            enemies_in_wave: 0,
            enemies_spawned: 0,
            spawn_timer: 0.0,
            spawn_delay: 0.0,
            wave_active: false,
            wave_completed: false,
        }
    }
}

impl WaveState {
    pub fn start_wave(&mut self, tuning: &WaveTuning) {
        self.wave_active = true;
        self.wave_completed = false;
        self.enemies_spawned = 0;
        self.enemies_in_wave =
            tuning.base_enemies + (self.current_wave - 1) * tuning.enemies_growth;
        self.spawn_timer = 0.0;
        self.spawn_delay = (tuning.spawn_delay
            - self.current_wave as f32 * tuning.spawn_delay_step)
            .max(tuning.spawn_delay_min);
    }

    /// Advance pacing by one frame. Returns true when one enemy should be
    /// spawned this frame. When the wave's budget is exhausted and the field
    /// is clear, the next wave starts automatically.
    pub fn update(&mut self, dt: f32, live_enemies: usize, tuning: &WaveTuning) -> bool {
        if !self.wave_active {
            return false;
        }

        if self.enemies_spawned < self.enemies_in_wave {
            self.spawn_timer += dt;
            if self.spawn_timer >= self.spawn_delay {
                self.spawn_timer = 0.0;
                self.enemies_spawned += 1;
                return true;
            }
        } else if live_enemies == 0 {
            self.wave_active = false;
            self.wave_completed = true;
            self.current_wave += 1;
            self.start_wave(tuning);
        }
        false
    }

    /// Seek-speed multiplier applied to enemies spawned during this wave.
    pub fn speed_multiplier(&self, tuning: &WaveTuning) -> f32 {
        1.0 + (self.current_wave.saturating_sub(1)) as f32 * tuning.speed_growth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wave_budget_grows() {
        let tuning = WaveTuning::default();
        let mut w = WaveState::default();
        w.start_wave(&tuning);
        assert_eq!(w.enemies_in_wave, 5);
        w.current_wave = 4;
        w.start_wave(&tuning);
        assert_eq!(w.enemies_in_wave, 5 + 3 * 3);
    }

    #[test]
    fn test_spawns_paced_by_delay() {
        let tuning = WaveTuning::default();
        let mut w = WaveState::default();
        w.start_wave(&tuning);
        let mut spawned = 0;
        for _ in 0..(57 * 5) {
            if w.update(1.0, 1, &tuning) {
                spawned += 1;
            }
        }
        // Wave 1 delay is 60 - 3 = 57 frames.
        assert_eq!(spawned, 5);
    }

    #[test]
    fn test_next_wave_starts_when_field_clears() {
        let tuning = WaveTuning::default();
        let mut w = WaveState::default();
        w.start_wave(&tuning);
        for _ in 0..10_000 {
            w.update(1.0, 1, &tuning);
        }
        assert_eq!(w.current_wave, 1);
        // Budget exhausted and no enemies alive: next wave begins.
        w.update(1.0, 0, &tuning);
        assert_eq!(w.current_wave, 2);
        assert!(w.wave_active);
    }

    #[test]
    fn test_spawn_delay_floors_at_min() {
        let tuning = WaveTuning::default();
        let mut w = WaveState {
            current_wave: 50,
            ..Default::default()
        };
        w.start_wave(&tuning);
        assert_eq!(w.spawn_delay, tuning.spawn_delay_min);
    }

    #[test]
    fn test_speed_multiplier_grows_per_wave() {
        let tuning = WaveTuning::default();
        let w = WaveState {
            current_wave: 3,
            ..Default::default()
        };
        assert!((w.speed_multiplier(&tuning) - 1.2).abs() < 1e-6);
    }
}
