//! Persistent blood backdrop.
//!
//! A world-sized render texture that settled blood puddles are stamped onto
//! when they retire from the particle pool. Converting pooled particles to
//! pixels on this layer bounds long-term cost: the backdrop is one texture
//! draw per frame no matter how much blood has accumulated.

use raylib::prelude::*;

pub struct BloodLayer {
    pub target: RenderTexture2D,
    pub width: u32,
    pub height: u32,
}

impl BloodLayer {
    pub fn new(
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        width: u32,
        height: u32,
    ) -> Result<Self, String> {
        let target = rl
            .load_render_texture(thread, width, height)
            .map_err(|e| format!("Failed to create blood layer: {}", e))?;
        Ok(Self {
            target,
            width,
            height,
        })
    }
}
