//! Camera follow system and shake message pump.

use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::events::shake::ShakeCmd;
use crate::resources::camera::FollowCamera;
use crate::resources::input::InputState;
use crate::resources::simrng::SimRng;
use crate::resources::worldtime::WorldTime;

/// Advance the ECS message queue for [`ShakeCmd`] so shake written earlier
/// this frame is readable by [`camera_follow`] in the same frame. Run it
/// after the last writer and before the camera.
pub fn pump_shake_messages(mut msgs: ResMut<Messages<ShakeCmd>>) {
    msgs.update();
}

/// Blend the camera toward the player, apply aim look-ahead, clamp to the
/// world, and jitter by the accumulated shake.
pub fn camera_follow(
    time: Res<WorldTime>,
    input: Res<InputState>,
    mut camera: ResMut<FollowCamera>,
    mut rng: ResMut<SimRng>,
    mut reader: MessageReader<ShakeCmd>,
    players: Query<(&MapPosition, &Player)>,
) {
    for cmd in reader.read() {
        camera.add_shake(cmd.intensity);
    }

    let Some((position, _)) = players.iter().next() else {
        return;
    };

    // Two draws every frame, shake or not, so the RNG stream does not
    // depend on transient shake state.
    let jitter = (rng.signed_unit(), rng.signed_unit());
    camera.update(position.pos, input.aim, time.delta, jitter);
}
