//! Sparse uniform spatial hash grid for broad-phase queries.
//!
//! Entities are inserted as points into the cell covering their position;
//! the grid is cleared and repopulated from the live enemy set every frame,
//! never updated incrementally: everything moves every frame, so a full
//! rebuild is linear in live entities, the same as the frame's entity walk.
//!
//! Cell size must exceed the largest hitbox so that a radius-1 (3×3 block)
//! query cannot miss a true collision candidate.

use bevy_ecs::prelude::{Entity, Resource};
use rustc_hash::{FxHashMap, FxHashSet};

#[derive(Resource)]
pub struct SpatialGrid {
    cell_size: f32,
    cells: FxHashMap<(i32, i32), Vec<Entity>>,
}

impl SpatialGrid {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            cells: FxHashMap::default(),
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    fn cell_key(&self, x: f32, y: f32) -> (i32, i32) {
        (
            (x / self.cell_size).floor() as i32,
            (y / self.cell_size).floor() as i32,
        )
    }

    /// Empty all cells. O(occupied cells).
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Place an entity into the cell covering (x, y).
    pub fn insert(&mut self, entity: Entity, x: f32, y: f32) {
        let key = self.cell_key(x, y);
        self.cells.entry(key).or_default().push(entity);
    }

    /// Union of the entities in the (2·radius+1)² cell block centered on the
    /// query point's cell. `radius` is in cells: 0 = the occupant cell only,
    /// 1 = the 3×3 block. No deduplication: entities are inserted as points
    /// and appear in exactly one cell per rebuild.
    pub fn get_nearby(&self, x: f32, y: f32, radius: i32) -> Vec<Entity> {
        let (cx, cy) = self.cell_key(x, y);
        let mut out = Vec::new();
        for ix in (cx - radius)..=(cx + radius) {
            for iy in (cy - radius)..=(cy + radius) {
                if let Some(ids) = self.cells.get(&(ix, iy)) {
                    out.extend_from_slice(ids);
                }
            }
        }
        out
    }

    /// All entities in cells touched by the axis-aligned rectangle
    /// [min, max]. Deduplicates by identity, so callers sweeping a wide band
    /// (beam hitscan) see each candidate once.
    pub fn query_rect(&self, min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Vec<Entity> {
        let (cx0, cy0) = self.cell_key(min_x, min_y);
        let (cx1, cy1) = self.cell_key(max_x, max_y);
        let mut seen = FxHashSet::default();
        let mut out = Vec::new();
        for ix in cx0..=cx1 {
            for iy in cy0..=cy1 {
                if let Some(ids) = self.cells.get(&(ix, iy)) {
                    for &id in ids {
                        if seen.insert(id) {
                            out.push(id);
                        }
                    }
                }
            }
        }
        out
    }

    #[cfg(test)]
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }
}
