//! First-person camera rig: the camera is a child of the player body at eye height.

use bevy::prelude::*;
use gameplay::CameraRig;

/// `CameraRig` over the camera's local transform and perspective projection.
pub struct CameraAdapter<'a> {
    pub transform: &'a mut Transform,
    pub global: &'a GlobalTransform,
    pub projection: &'a mut Projection,
}

impl CameraRig for CameraAdapter<'_> {
    fn local_position(&self) -> Vec3 {
        self.transform.translation
    }

    fn set_local_position(&mut self, position: Vec3) {
        self.transform.translation = position;
    }

    fn set_local_rotation(&mut self, rotation: Quat) {
        self.transform.rotation = rotation;
    }

    fn set_field_of_view(&mut self, degrees: f32) {
        // Orthographic cameras have no FOV to drive
        if let Projection::Perspective(ref mut persp) = *self.projection {
            persp.fov = degrees.to_radians();
        }
    }

    fn world_position(&self) -> Vec3 {
        self.global.translation()
    }
}
