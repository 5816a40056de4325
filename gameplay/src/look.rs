//! Mouse look: body yaw plus clamped camera pitch.

use bevy::prelude::*;

/// Accumulated look angles in degrees.
///
/// `pitch` is positive when looking down and stays within `[-upper_limit, lower_limit]`.
/// `yaw` is positive when turned to the right.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LookAngles {
    pub yaw: f32,
    pub pitch: f32,
}

impl LookAngles {
    /// Apply one frame of look input (`delta.x` right, `delta.y` up).
    pub fn apply(
        &mut self,
        delta: Vec2,
        speed: Vec2,
        upper_limit: f32,
        lower_limit: f32,
    ) {
        self.pitch -= delta.y * speed.y;
        self.pitch = self.pitch.clamp(-upper_limit, lower_limit);
        self.yaw += delta.x * speed.x;
    }

    /// Camera rotation relative to the body (pitch only).
    pub fn camera_rotation(&self) -> Quat {
        // Bevy pitches up for positive X rotation
        Quat::from_rotation_x(-self.pitch.to_radians())
    }

    /// Body facing in world space (yaw only).
    pub fn body_rotation(&self) -> Quat {
        // Bevy turns left for positive Y rotation
        Quat::from_rotation_y(-self.yaw.to_radians())
    }

    /// Horizontal forward direction of the body. In Bevy -Z is forward.
    pub fn forward(&self) -> Vec3 {
        self.body_rotation() * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.body_rotation() * Vec3::X
    }
}
