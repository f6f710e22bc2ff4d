//! Game configuration resource.
//!
//! Manages window and world settings loaded from an INI configuration file.
//! Provides defaults for safe startup; missing keys keep their defaults.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 720
//! fullscreen = false
//! target_fps = 60
//!
//! [world]
//! width = 2400
//! height = 1800
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_WORLD_WIDTH: u32 = 2400;
const DEFAULT_WORLD_HEIGHT: u32 = 1800;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_FULLSCREEN: bool = false;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Window, display, and world-dimension settings.
///
/// Simulation tuning (cell sizes, pool capacities, AI thresholds) lives in
/// [`SimTuning`](crate::resources::simtuning::SimTuning), not here: this
/// resource is only what the windowing layer and world bounds need.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub world_width: u32,
    pub world_height: u32,
    pub target_fps: u32,
    pub fullscreen: bool,
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            world_width: DEFAULT_WORLD_WIDTH,
            world_height: DEFAULT_WORLD_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            fullscreen: DEFAULT_FULLSCREEN,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(fullscreen) = config.getbool("window", "fullscreen").ok().flatten() {
            self.fullscreen = fullscreen;
        }

        // [world] section
        if let Some(width) = config.getuint("world", "width").ok().flatten() {
            self.world_width = width as u32;
        }
        if let Some(height) = config.getuint("world", "height").ok().flatten() {
            self.world_height = height as u32;
        }

        info!(
            "Loaded config: {}x{} window, {}x{} world, fps={}, fullscreen={}",
            self.window_width,
            self.window_height,
            self.world_width,
            self.world_height,
            self.target_fps,
            self.fullscreen
        );

        Ok(())
    }

    pub fn world_size(&self) -> (f32, f32) {
        (self.world_width as f32, self.world_height as f32)
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}
