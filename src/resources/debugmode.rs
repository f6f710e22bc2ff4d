use bevy_ecs::prelude::Resource;

/// Marker resource: while present, the binary draws the F3 diagnostics
/// overlay. Toggled by inserting/removing the resource.
#[derive(Resource, Clone, Copy)]
pub struct DebugMode {}
