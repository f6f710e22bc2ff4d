//! Pre-rendered particle sprite cache.
//!
//! Thousands of particles are visually near-identical, so the full
//! (shape × palette color × size bucket × alpha bucket) cross-product is
//! rendered once into textures at startup. At draw time a particle's
//! continuous visual state snaps to the nearest bucket and the cached
//! texture is blitted: N procedural draws become N cheap texture copies
//! over a handful of surfaces.
//!
//! The cache is an owned object created by the windowing layer and handed
//! to the world as a non-send resource (textures are GPU handles); nothing
//! is module-global, so two simulations never share hidden state.

use raylib::prelude::*;
use rustc_hash::FxHashMap;

use crate::resources::particlepool::{
    ALPHA_BUCKETS, PALETTE, ParticleShape, SIZE_BUCKETS, SpriteKey, nearest_alpha, nearest_color,
    nearest_size,
};

pub struct ParticleSpriteCache {
    map: FxHashMap<SpriteKey, Texture2D>,
}

impl ParticleSpriteCache {
    /// Render the full bucket cross-product. 2 shapes × 4 colors × 9 sizes
    /// × 5 alphas = 360 small textures, built once.
    pub fn build(rl: &mut RaylibHandle, thread: &RaylibThread) -> Self {
        let mut map = FxHashMap::default();
        for shape in [ParticleShape::Dot, ParticleShape::Chunk] {
            for color in PALETTE {
                for size in SIZE_BUCKETS {
                    for alpha in ALPHA_BUCKETS {
                        let edge = (size as i32) * 2;
                        let tint = Color::new(color[0], color[1], color[2], alpha);
                        let mut image = Image::gen_image_color(edge, edge, Color::BLANK);
                        match shape {
                            ParticleShape::Dot => {
                                image.draw_circle(size as i32, size as i32, size as i32, tint);
                            }
                            ParticleShape::Chunk => {
                                image.draw_rectangle(0, 0, edge, edge, tint);
                            }
                        }
                        if let Ok(texture) = rl.load_texture_from_image(thread, &image) {
                            map.insert((shape, color, size, alpha), texture);
                        }
                    }
                }
            }
        }
        Self { map }
    }

    /// Nearest-bucket lookup: squared-difference for color, absolute
    /// difference for size and alpha.
    pub fn get(
        &self,
        shape: ParticleShape,
        color: [u8; 3],
        size: f32,
        alpha: u8,
    ) -> Option<&Texture2D> {
        let key = (
            shape,
            nearest_color(color),
            nearest_size(size),
            nearest_alpha(alpha),
        );
        self.map.get(&key)
    }
}
