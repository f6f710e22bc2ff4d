use bevy_ecs::message::Message;

/// Gameplay events that feed the camera's screen shake. Written by the
/// weapon/projectile/reap systems, drained by the camera system in the same
/// frame (the message queue is pumped right before the camera runs).
#[derive(Message, Debug, Clone, Copy)]
pub struct ShakeCmd {
    pub intensity: f32,
}
