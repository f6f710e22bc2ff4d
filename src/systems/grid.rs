//! Spatial grid rebuild.
//!
//! Runs before anything that queries the grid this frame. Full rebuild,
//! never incremental: every enemy moved last frame, so reinserting the live
//! set is linear and leaves no stale cells behind. Dead enemies are
//! skipped; they are despawned by the reap pass at the end of the previous
//! frame, but the alive check also covers same-frame kills.

use bevy_ecs::prelude::*;

use crate::components::enemy::Enemy;
use crate::components::mapposition::MapPosition;
use crate::resources::spatialgrid::SpatialGrid;

pub fn rebuild_spatial_grid(
    mut grid: ResMut<SpatialGrid>,
    query: Query<(Entity, &MapPosition, &Enemy)>,
) {
    grid.clear();
    for (entity, position, enemy) in query.iter() {
        if enemy.alive {
            grid.insert(entity, position.pos.x, position.pos.y);
        }
    }
}
