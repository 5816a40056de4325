//! Engine seam: the pieces of the host engine the controllers talk to.
//!
//! The client implements these over Bevy transforms and its kinematic capsule; tests implement
//! them with plain structs.

use bevy::prelude::*;

/// Capsule-style character body that the engine resolves collisions for.
pub trait CharacterMotor {
    /// Whether the last `move_by` ended touching the ground
    fn is_grounded(&self) -> bool;
    fn height(&self) -> f32;
    fn set_height(&mut self, height: f32);
    /// Capsule center relative to the body origin
    fn center(&self) -> Vec3;
    fn set_center(&mut self, center: Vec3);
    /// Displace the body by a world-space motion, resolving collisions
    fn move_by(&mut self, motion: Vec3);
    /// Set the body's world facing
    fn set_rotation(&mut self, rotation: Quat);
}

/// First-person camera attached to the body.
pub trait CameraRig {
    fn local_position(&self) -> Vec3;
    fn set_local_position(&mut self, position: Vec3);
    fn set_local_rotation(&mut self, rotation: Quat);
    /// Vertical field of view in degrees
    fn set_field_of_view(&mut self, degrees: f32);
    fn world_position(&self) -> Vec3;
}

/// Scene queries.
pub trait SpatialQuery {
    /// True when a ray from `origin` along `direction` hits anything within `max_distance`.
    fn raycast(&self, origin: Vec3, direction: Dir3, max_distance: f32) -> bool;
}
