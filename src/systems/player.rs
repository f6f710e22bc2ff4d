//! Player input response: movement axes into velocity, aim point into the
//! facing angle.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::rigidbody::RigidBody;
use crate::resources::camera::FollowCamera;
use crate::resources::input::InputState;
use crate::resources::worldtime::WorldTime;

pub fn player_control(
    input: Res<InputState>,
    time: Res<WorldTime>,
    camera: Res<FollowCamera>,
    mut query: Query<(&mut Player, &MapPosition, &mut RigidBody)>,
) {
    let dt = time.delta;
    for (mut player, position, mut rb) in query.iter_mut() {
        if !player.alive {
            rb.velocity = Vector2 { x: 0.0, y: 0.0 };
            continue;
        }

        let mut ax = input.move_x.clamp(-1.0, 1.0);
        let mut ay = input.move_y.clamp(-1.0, 1.0);
        // Diagonals must not be faster than cardinal movement.
        let len_sq = ax * ax + ay * ay;
        if len_sq > 1.0 {
            let inv = 1.0 / len_sq.sqrt();
            ax *= inv;
            ay *= inv;
        }

        rb.velocity.x += ax * player.accel * dt;
        rb.velocity.y += ay * player.accel * dt;

        // Aim is given in screen coordinates; lift it into world space
        // through the rendered camera scroll.
        let aim_world = Vector2 {
            x: input.aim.x + camera.rendered.0 as f32,
            y: input.aim.y + camera.rendered.1 as f32,
        };
        let dx = aim_world.x - position.pos.x;
        let dy = aim_world.y - position.pos.y;
        if dx * dx + dy * dy > 1e-6 {
            player.angle = dy.atan2(dx);
        }
    }
}
