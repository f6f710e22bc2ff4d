//! hordecore library.
//!
//! The real-time entity-simulation core of a top-down survival shooter:
//! spatial hash broad phase, pooled projectiles and particles, time-sliced
//! enemy AI, and a smoothed follow camera, composed into a per-frame
//! schedule by [`simulation::Simulation`]. This module exposes the ECS
//! components, resources, and systems for the binary and the integration
//! tests.

pub mod components;
pub mod events;
pub mod gore;
pub mod resources;
pub mod simulation;
pub mod systems;
