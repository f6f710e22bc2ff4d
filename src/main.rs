//! hordecore main entry point.
//!
//! A top-down survival shooter core written in Rust using:
//! - **raylib** for windowing, input polling, and drawing
//! - **bevy_ecs** for the frame-stepped simulation world
//!
//! # Main Loop
//!
//! 1. Load `config.ini` (window/world) and `tuning.json` (simulation data)
//! 2. Open the raylib window, build the [`Simulation`], create the particle
//!    sprite cache and the blood layer
//! 3. Each frame: poll input, step the simulation with the wall-clock
//!    delta, bake pending blood stamps, render the culled world
//!
//! # Running
//!
//! ```sh
//! cargo run --release
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod components;
mod events;
mod gore;
mod resources;
mod simulation;
mod systems;

use clap::Parser;
use raylib::prelude::*;
use std::path::PathBuf;

use crate::resources::bloodlayer::BloodLayer;
use crate::resources::debugmode::DebugMode;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::simtuning::SimTuning;
use crate::resources::spritecache::ParticleSpriteCache;
use crate::simulation::Simulation;
use crate::systems::render::{bake_blood_stamps, render_debug_ui, render_world};

/// hordecore: swarm survival sandbox
#[derive(Parser)]
#[command(version, about = "Top-down survival shooter simulation core")]
struct Cli {
    /// Path to the window/world configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Path to the simulation tuning file.
    #[arg(long, value_name = "PATH", default_value = "./tuning.json")]
    tuning: PathBuf,

    /// RNG seed for a reproducible run.
    #[arg(long, default_value_t = 0xC0FFEE)]
    seed: u64,

    /// Start with the debug overlay enabled.
    #[arg(long)]
    debug: bool,
}

fn gather_input(rl: &RaylibHandle) -> InputState {
    let mut move_x = 0.0;
    let mut move_y = 0.0;
    if rl.is_key_down(KeyboardKey::KEY_W) || rl.is_key_down(KeyboardKey::KEY_UP) {
        move_y -= 1.0;
    }
    if rl.is_key_down(KeyboardKey::KEY_S) || rl.is_key_down(KeyboardKey::KEY_DOWN) {
        move_y += 1.0;
    }
    if rl.is_key_down(KeyboardKey::KEY_A) || rl.is_key_down(KeyboardKey::KEY_LEFT) {
        move_x -= 1.0;
    }
    if rl.is_key_down(KeyboardKey::KEY_D) || rl.is_key_down(KeyboardKey::KEY_RIGHT) {
        move_x += 1.0;
    }
    InputState {
        move_x,
        move_y,
        aim: rl.get_mouse_position(),
        fire: rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_LEFT),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::warn!("Using default config: {}", e);
    }
    let tuning = match SimTuning::load_from_file(&cli.tuning) {
        Ok(tuning) => tuning,
        Err(e) => {
            log::warn!("Using default tuning: {}", e);
            SimTuning::default()
        }
    };

    let (mut rl, thread) = raylib::init()
        .size(config.window_width as i32, config.window_height as i32)
        .title("hordecore")
        .build();
    rl.set_target_fps(config.target_fps);
    rl.set_exit_key(Some(KeyboardKey::KEY_ESCAPE));
    if config.fullscreen {
        rl.toggle_fullscreen();
    }

    let cache = ParticleSpriteCache::build(&mut rl, &thread);
    let blood_layer = BloodLayer::new(&mut rl, &thread, config.world_width, config.world_height)
        .expect("Failed to create blood layer");

    let mut sim = Simulation::new(config, tuning, cli.seed);
    sim.world.insert_non_send_resource(cache);
    sim.world.insert_non_send_resource(blood_layer);
    if cli.debug {
        sim.world.insert_resource(DebugMode {});
    }

    log::info!("World ready, entering main loop");

    while !rl.window_should_close() {
        let raw_dt = rl.get_frame_time();
        let input = gather_input(&rl);

        if rl.is_key_pressed(KeyboardKey::KEY_F3) {
            if sim.world.contains_resource::<DebugMode>() {
                sim.world.remove_resource::<DebugMode>();
            } else {
                sim.world.insert_resource(DebugMode {});
            }
        }

        sim.step(raw_dt, input);

        bake_blood_stamps(&mut sim.world, &mut rl, &thread);

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        render_world(&mut sim.world, &mut d);
        if sim.world.contains_resource::<DebugMode>() {
            render_debug_ui(&mut sim.world, &mut d);
        }
    }
}
