//! Fake collaborators for unit tests.

use std::cell::RefCell;

use bevy::prelude::*;

use crate::rig::{CameraRig, CharacterMotor, SpatialQuery};

#[derive(Debug, Clone)]
pub struct FakeMotor {
    pub grounded: bool,
    pub height: f32,
    pub center: Vec3,
    pub position: Vec3,
    pub rotation: Quat,
    pub last_motion: Vec3,
}

impl FakeMotor {
    pub fn standing() -> Self {
        Self {
            grounded: true,
            height: 2.0,
            center: Vec3::ZERO,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            last_motion: Vec3::ZERO,
        }
    }
}

impl CharacterMotor for FakeMotor {
    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn set_height(&mut self, height: f32) {
        self.height = height;
    }

    fn center(&self) -> Vec3 {
        self.center
    }

    fn set_center(&mut self, center: Vec3) {
        self.center = center;
    }

    fn move_by(&mut self, motion: Vec3) {
        self.position += motion;
        self.last_motion = motion;
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }
}

#[derive(Debug, Clone)]
pub struct FakeCamera {
    pub local_position: Vec3,
    pub local_rotation: Quat,
    pub fov: f32,
    /// Where the rig's parent sits in the world
    pub world_offset: Vec3,
}

impl Default for FakeCamera {
    fn default() -> Self {
        Self {
            local_position: Vec3::new(0.0, 0.6, 0.0),
            local_rotation: Quat::IDENTITY,
            fov: 0.0,
            world_offset: Vec3::ZERO,
        }
    }
}

impl CameraRig for FakeCamera {
    fn local_position(&self) -> Vec3 {
        self.local_position
    }

    fn set_local_position(&mut self, position: Vec3) {
        self.local_position = position;
    }

    fn set_local_rotation(&mut self, rotation: Quat) {
        self.local_rotation = rotation;
    }

    fn set_field_of_view(&mut self, degrees: f32) {
        self.fov = degrees;
    }

    fn world_position(&self) -> Vec3 {
        self.world_offset + self.local_position
    }
}

/// World with an optional ceiling directly overhead. Remembers the last ray cast into it.
#[derive(Debug, Clone, Default)]
pub struct FakeWorld {
    pub ceiling: bool,
    pub last_ray: RefCell<Option<(Vec3, Dir3, f32)>>,
}

impl SpatialQuery for FakeWorld {
    fn raycast(&self, origin: Vec3, direction: Dir3, max_distance: f32) -> bool {
        *self.last_ray.borrow_mut() = Some((origin, direction, max_distance));
        self.ceiling
    }
}
