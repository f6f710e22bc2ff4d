//! Simulation tuning resource.
//!
//! Every tuning constant of the simulation: grid cell size, pool
//! capacities, AI batching thresholds, camera feel, the enemy type table,
//! wave pacing, weapon rows: lives here as data, loaded from a JSON file
//! at startup. Nothing in the systems hardcodes these numbers; tests and
//! the binary construct the same `SimTuning` and get the same behavior.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridTuning {
    /// Cell edge in world units. Must exceed the largest entity hitbox so a
    /// 3×3 query cannot miss a true collision candidate.
    pub cell_size: f32,
}

impl Default for GridTuning {
    fn default() -> Self {
        Self { cell_size: 100.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolTuning {
    pub projectile_initial: usize,
    pub particle_capacity: usize,
    /// Life ratio at or below which a settled puddle is baked onto the
    /// blood layer and retired from the pool.
    pub bake_threshold: f32,
}

impl Default for PoolTuning {
    fn default() -> Self {
        Self {
            projectile_initial: 500,
            particle_capacity: 1500,
            bake_threshold: 0.25,
        }
    }
}

/// One step of the adaptive batching ladder: at or above `enemies` live
/// enemies, spread AI across `batches` frames.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BatchThreshold {
    pub enemies: u32,
    pub batches: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiTuning {
    /// Sorted ascending by `enemies`; the last row whose threshold is met
    /// decides the batch count.
    pub batch_thresholds: Vec<BatchThreshold>,
    /// Separation push strength per unit of overlap, per nominal frame.
    /// Deliberately weaker than seek so swarms still converge on the player.
    pub separation_force: f32,
    /// Hard cap on neighbors examined per enemy per AI step.
    pub max_neighbors: usize,
    /// Knockback retention per nominal frame.
    pub knockback_decay: f32,
    /// Below this magnitude knockback snaps to exactly zero.
    pub knockback_epsilon: f32,
    pub attack_delay: f32,
}

impl Default for AiTuning {
    fn default() -> Self {
        Self {
            batch_thresholds: vec![
                BatchThreshold {
                    enemies: 0,
                    batches: 1,
                },
                BatchThreshold {
                    enemies: 150,
                    batches: 2,
                },
                BatchThreshold {
                    enemies: 400,
                    batches: 3,
                },
                BatchThreshold {
                    enemies: 800,
                    batches: 4,
                },
            ],
            separation_force: 0.25,
            max_neighbors: 12,
            knockback_decay: 0.85,
            knockback_epsilon: 0.05,
            attack_delay: 60.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    pub smoothing: f32,
    pub lookahead: f32,
    pub shake_decay: f32,
    pub shake_max: f32,
    pub render_margin: f32,
    pub logic_margin: f32,
    pub fire_shake: f32,
    pub hit_shake: f32,
    pub death_shake: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            smoothing: 0.12,
            lookahead: 0.15,
            shake_decay: 0.85,
            shake_max: 24.0,
            render_margin: 50.0,
            logic_margin: 300.0,
            fire_shake: 1.5,
            hit_shake: 2.0,
            death_shake: 5.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub max_health: f32,
    pub speed: f32,
    pub accel: f32,
    pub friction: f32,
    pub size: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            speed: 6.0,
            accel: 1.0,
            friction: 0.85,
            size: 20.0,
        }
    }
}

/// One row of the enemy type table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyTypeRow {
    /// Base seek speed per nominal frame, before the wave multiplier.
    pub speed: f32,
    pub health: f32,
    /// Hitbox edge length.
    pub size: f32,
    /// Separation radius; smaller than `size / 2` so sprites overlap a
    /// little before being pushed apart.
    pub radius: f32,
    pub damage: f32,
    pub score: u32,
    /// Spawn weight within a wave.
    pub weight: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTable {
    pub small: EnemyTypeRow,
    pub normal: EnemyTypeRow,
    pub large: EnemyTypeRow,
    pub tank: EnemyTypeRow,
}

impl Default for EnemyTable {
    fn default() -> Self {
        Self {
            small: EnemyTypeRow {
                speed: 2.8,
                health: 20.0,
                size: 18.0,
                radius: 7.0,
                damage: 5.0,
                score: 5,
                weight: 30,
            },
            normal: EnemyTypeRow {
                speed: 2.0,
                health: 50.0,
                size: 25.0,
                radius: 10.0,
                damage: 10.0,
                score: 10,
                weight: 50,
            },
            large: EnemyTypeRow {
                speed: 1.4,
                health: 120.0,
                size: 34.0,
                radius: 14.0,
                damage: 15.0,
                score: 20,
                weight: 15,
            },
            tank: EnemyTypeRow {
                speed: 0.9,
                health: 300.0,
                size: 44.0,
                radius: 18.0,
                damage: 25.0,
                score: 50,
                weight: 5,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveTuning {
    pub base_enemies: u32,
    /// Extra enemies per completed wave.
    pub enemies_growth: u32,
    /// Frames between spawns on wave 1.
    pub spawn_delay: f32,
    pub spawn_delay_min: f32,
    /// Frames shaved off the delay per wave.
    pub spawn_delay_step: f32,
    /// Additional speed multiplier per completed wave.
    pub speed_growth: f32,
    /// Distance outside the world edge at which enemies appear.
    pub edge_margin: f32,
}

impl Default for WaveTuning {
    fn default() -> Self {
        Self {
            base_enemies: 5,
            enemies_growth: 3,
            spawn_delay: 60.0,
            spawn_delay_min: 20.0,
            spawn_delay_step: 3.0,
            speed_growth: 0.1,
            edge_margin: 40.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTable {
    pub wand_damage: f32,
    pub wand_cooldown: f32,
    pub wand_speed: f32,
    pub wand_lifetime: f32,
    pub shotgun_damage: f32,
    pub shotgun_cooldown: f32,
    pub shotgun_pellets: u32,
    pub shotgun_spread: f32,
    pub shotgun_speed: f32,
    pub shotgun_penetration: u32,
    pub shotgun_lifetime: f32,
    pub projectile_hitbox: f32,
    pub projectile_radius: f32,
    pub beam_damage: f32,
    pub beam_range: f32,
    pub beam_hit_interval: f32,
    pub beam_width: f32,
    pub orbital_damage: f32,
    pub orbital_radius: f32,
    pub orbital_speed: f32,
    pub orbital_size: f32,
    pub knockback_force: f32,
}

impl Default for WeaponTable {
    fn default() -> Self {
        Self {
            wand_damage: 30.0,
            wand_cooldown: 35.0,
            wand_speed: 9.0,
            wand_lifetime: 120.0,
            shotgun_damage: 15.0,
            shotgun_cooldown: 90.0,
            shotgun_pellets: 5,
            shotgun_spread: 0.5,
            shotgun_speed: 12.0,
            shotgun_penetration: 2,
            shotgun_lifetime: 40.0,
            projectile_hitbox: 12.0,
            projectile_radius: 5.0,
            beam_damage: 4.0,
            beam_range: 800.0,
            beam_hit_interval: 1.0,
            beam_width: 15.0,
            orbital_damage: 1.0,
            orbital_radius: 70.0,
            orbital_speed: 0.05,
            orbital_size: 20.0,
            knockback_force: 8.0,
        }
    }
}

#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimTuning {
    pub grid: GridTuning,
    pub pools: PoolTuning,
    pub ai: AiTuning,
    pub camera: CameraTuning,
    pub player: PlayerTuning,
    pub enemies: EnemyTable,
    pub waves: WaveTuning,
    pub weapons: WeaponTable,
}

impl SimTuning {
    /// Load tuning from a JSON file. Missing keys fall back to their
    /// defaults per section.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read tuning file: {}", e))?;
        serde_json::from_str(&text).map_err(|e| format!("Failed to parse tuning file: {}", e))
    }

    /// Number of AI batches for a live enemy count: the last ladder row
    /// whose threshold is met wins. More enemies → more batches → each
    /// enemy recomputes AI less often.
    pub fn ai_batches(&self, live_enemies: usize) -> u32 {
        let mut batches = 1;
        for row in &self.ai.batch_thresholds {
            if live_enemies as u32 >= row.enemies {
                batches = row.batches.max(1);
            }
        }
        batches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_ladder_scales_with_swarm() {
        let tuning = SimTuning::default();
        assert_eq!(tuning.ai_batches(0), 1);
        assert_eq!(tuning.ai_batches(149), 1);
        assert_eq!(tuning.ai_batches(150), 2);
        assert_eq!(tuning.ai_batches(500), 3);
        assert_eq!(tuning.ai_batches(5000), 4);
    }

    #[test]
    fn test_empty_ladder_still_yields_one_batch() {
        let mut tuning = SimTuning::default();
        tuning.ai.batch_thresholds.clear();
        assert_eq!(tuning.ai_batches(10_000), 1);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let parsed: SimTuning =
            serde_json::from_str(r#"{ "grid": { "cell_size": 64.0 } }"#).unwrap();
        assert_eq!(parsed.grid.cell_size, 64.0);
        assert_eq!(parsed.pools.particle_capacity, 1500);
        assert_eq!(parsed.enemies.normal.score, 10);
    }

    #[test]
    fn test_round_trips_through_json() {
        let tuning = SimTuning::default();
        let text = serde_json::to_string(&tuning).unwrap();
        let back: SimTuning = serde_json::from_str(&text).unwrap();
        assert_eq!(back.waves.base_enemies, tuning.waves.base_enemies);
        assert_eq!(back.weapons.beam_range, tuning.weapons.beam_range);
    }
}
