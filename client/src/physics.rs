//! Lightweight kinematic character physics for the sandbox scene.
//!
//! The world is a flat floor plus a handful of static axis-aligned boxes. The player capsule is
//! approximated by its bounding box and moved one axis at a time:
//! - a horizontal move that would overlap a box is dropped for that axis
//! - a vertical move that overlaps is snapped to the surface it hit
//! - the body is grounded when a downward move ends resting on the floor or a box top

use bevy::prelude::*;
use gameplay::{CharacterMotor, SpatialQuery};

/// Overlaps shallower than this are treated as resting contact.
const SKIN: f32 = 1e-3;

/// How far below the capsule we still count support as "ground".
const GROUND_PROBE: f32 = 0.02;

/// Static axis-aligned box collider.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaticBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl StaticBox {
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Overlap deeper than `SKIN` on every axis.
    fn overlaps(&self, other: &StaticBox) -> bool {
        (0..3).all(|axis| {
            self.min[axis] < other.max[axis] - SKIN && self.max[axis] > other.min[axis] + SKIN
        })
    }

    fn overlaps_xz(&self, other: &StaticBox) -> bool {
        [0, 2].into_iter().all(|axis| {
            self.min[axis] < other.max[axis] - SKIN && self.max[axis] > other.min[axis] + SKIN
        })
    }
}

/// Static collision geometry of the sandbox.
#[derive(Resource, Clone, Debug, Default)]
pub struct StaticWorld {
    pub floor_height: f32,
    pub boxes: Vec<StaticBox>,
    /// Volumes that put the player into ladder-climbing mode
    pub ladders: Vec<StaticBox>,
}

/// Character capsule (collision proxy) attached to the player body.
#[derive(Component, Clone, Debug)]
pub struct KinematicCapsule {
    pub radius: f32,
    pub height: f32,
    /// Capsule center relative to the body origin
    pub center: Vec3,
    pub grounded: bool,
}

impl KinematicCapsule {
    pub fn bounds(&self, position: Vec3) -> StaticBox {
        StaticBox::from_center_size(
            position + self.center,
            Vec3::new(self.radius * 2.0, self.height, self.radius * 2.0),
        )
    }
}

impl StaticWorld {
    fn first_overlap(&self, bounds: &StaticBox) -> Option<&StaticBox> {
        self.boxes.iter().find(|b| bounds.overlaps(b))
    }

    pub fn in_ladder(&self, point: Vec3) -> bool {
        self.ladders.iter().any(|ladder| ladder.contains(point))
    }

    /// Distance from the capsule's bottom down to the nearest supporting surface.
    fn support_gap(&self, bounds: &StaticBox) -> f32 {
        let bottom = bounds.min.y;
        self.boxes
            .iter()
            .filter(|b| bounds.overlaps_xz(b) && b.max.y <= bottom + SKIN)
            .map(|b| bottom - b.max.y)
            .fold(bottom - self.floor_height, f32::min)
    }

    /// Move a capsule through the world, returning whether it ends up grounded.
    pub fn move_capsule(&self, position: &mut Vec3, capsule: &KinematicCapsule, motion: Vec3) -> bool {
        for axis in [Vec3::X, Vec3::Z] {
            let step = axis * motion.dot(axis);
            if step == Vec3::ZERO {
                continue;
            }
            let candidate = *position + step;
            if self.first_overlap(&capsule.bounds(candidate)).is_none() {
                *position = candidate;
            }
        }

        position.y += motion.y;
        let bounds = capsule.bounds(*position);
        if let Some(hit) = self.first_overlap(&bounds) {
            if motion.y <= 0.0 {
                position.y += hit.max.y - bounds.min.y;
            } else {
                position.y -= bounds.max.y - hit.min.y;
            }
        }

        let bounds = capsule.bounds(*position);
        if bounds.min.y < self.floor_height {
            position.y += self.floor_height - bounds.min.y;
        }

        motion.y <= 0.0 && self.support_gap(&capsule.bounds(*position)) <= GROUND_PROBE
    }
}

impl SpatialQuery for StaticWorld {
    fn raycast(&self, origin: Vec3, direction: Dir3, max_distance: f32) -> bool {
        let end = origin + *direction * max_distance;
        self.boxes
            .iter()
            .any(|b| segment_aabb_intersection(origin, end, b.min, b.max).is_some())
    }
}

/// Segment vs AABB intersection (slab test). Returns the hit fraction along the segment.
///
/// A segment that starts inside the box doesn't hit it, same as an engine raycast ignoring the
/// collider it starts in.
fn segment_aabb_intersection(start: Vec3, end: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> Option<f32> {
    if start.cmpgt(aabb_min).all() && start.cmplt(aabb_max).all() {
        return None;
    }

    let dir = end - start;
    let mut tmin = 0.0_f32;
    let mut tmax = 1.0_f32;

    for axis in 0..3 {
        let s = start[axis];
        let d = dir[axis];
        let min = aabb_min[axis];
        let max = aabb_max[axis];

        if d.abs() < 1e-6 {
            if s < min || s > max {
                return None;
            }
            continue;
        }

        let inv_d = 1.0 / d;
        let mut t1 = (min - s) * inv_d;
        let mut t2 = (max - s) * inv_d;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }

        tmin = tmin.max(t1);
        tmax = tmax.min(t2);
        if tmin > tmax {
            return None;
        }
    }

    Some(tmin)
}

/// `CharacterMotor` over the player's `Transform` and capsule.
pub struct CapsuleMotor<'a> {
    pub transform: &'a mut Transform,
    pub capsule: &'a mut KinematicCapsule,
    pub world: &'a StaticWorld,
}

impl CharacterMotor for CapsuleMotor<'_> {
    fn is_grounded(&self) -> bool {
        self.capsule.grounded
    }

    fn height(&self) -> f32 {
        self.capsule.height
    }

    fn set_height(&mut self, height: f32) {
        self.capsule.height = height;
    }

    fn center(&self) -> Vec3 {
        self.capsule.center
    }

    fn set_center(&mut self, center: Vec3) {
        self.capsule.center = center;
    }

    fn move_by(&mut self, motion: Vec3) {
        self.capsule.grounded =
            self.world
                .move_capsule(&mut self.transform.translation, self.capsule, motion);
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.transform.rotation = rotation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capsule() -> KinematicCapsule {
        KinematicCapsule {
            radius: 0.3,
            height: 2.0,
            center: Vec3::ZERO,
            grounded: false,
        }
    }

    fn world_with_crate() -> StaticWorld {
        StaticWorld {
            floor_height: 0.0,
            boxes: vec![StaticBox::from_center_size(
                Vec3::new(0.0, 0.5, -3.0),
                Vec3::ONE,
            )],
            ladders: Vec::new(),
        }
    }

    #[test]
    fn test_falls_onto_floor_and_grounds() {
        let world = StaticWorld::default();
        let capsule = capsule();
        let mut position = Vec3::new(0.0, 1.5, 0.0);

        assert!(!world.move_capsule(&mut position, &capsule, Vec3::new(0.0, -0.2, 0.0)));
        assert!((position.y - 1.3).abs() < 1e-5);

        assert!(world.move_capsule(&mut position, &capsule, Vec3::new(0.0, -1.0, 0.0)));
        assert!((position.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_moving_up_is_never_grounded() {
        let world = StaticWorld::default();
        let mut position = Vec3::new(0.0, 1.0, 0.0);
        assert!(!world.move_capsule(&mut position, &capsule(), Vec3::new(0.0, 0.1, 0.0)));
    }

    #[test]
    fn test_crate_blocks_horizontal_move() {
        let world = world_with_crate();
        let mut position = Vec3::new(0.0, 1.0, -2.0);
        world.move_capsule(&mut position, &capsule(), Vec3::new(0.0, 0.0, -0.5));
        assert_eq!(position.z, -2.0);

        // Sliding sideways along it still works
        world.move_capsule(&mut position, &capsule(), Vec3::new(0.5, 0.0, -0.5));
        assert_eq!(position.x, 0.5);
        assert_eq!(position.z, -2.0);
    }

    #[test]
    fn test_lands_on_crate_top() {
        let world = world_with_crate();
        let mut position = Vec3::new(0.0, 2.1, -3.0);
        let grounded = world.move_capsule(&mut position, &capsule(), Vec3::new(0.0, -0.2, 0.0));
        assert!(grounded);
        // crate top at 1.0, capsule half height 1.0
        assert!((position.y - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_raycast_hits_box_within_range() {
        let world = StaticWorld {
            boxes: vec![StaticBox::from_center_size(
                Vec3::new(0.0, 2.0, 0.0),
                Vec3::new(4.0, 0.2, 4.0),
            )],
            ..default()
        };
        assert!(world.raycast(Vec3::new(0.0, 1.2, 0.0), Dir3::Y, 1.0));
        assert!(!world.raycast(Vec3::new(0.0, 0.5, 0.0), Dir3::Y, 1.0));
        assert!(!world.raycast(Vec3::new(5.0, 1.2, 0.0), Dir3::Y, 1.0));
    }

    #[test]
    fn test_raycast_ignores_box_it_starts_in() {
        let world = StaticWorld {
            boxes: vec![
                StaticBox::from_center_size(Vec3::new(0.0, 1.0, 0.0), Vec3::splat(2.0)),
                StaticBox::from_center_size(Vec3::new(0.0, 3.0, 0.0), Vec3::new(2.0, 0.2, 2.0)),
            ],
            ..default()
        };
        // Inside the first box, ceiling out of reach
        assert!(!world.raycast(Vec3::new(0.0, 1.0, 0.0), Dir3::Y, 1.0));
        // Same start, long enough to reach the second box
        assert!(world.raycast(Vec3::new(0.0, 1.0, 0.0), Dir3::Y, 2.0));
        // Starting on the surface still counts as outside
        assert!(segment_aabb_intersection(
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::ZERO,
            Vec3::splat(2.0)
        )
        .is_some());
    }

    #[test]
    fn test_ladder_volume() {
        let world = StaticWorld {
            ladders: vec![StaticBox::from_center_size(Vec3::new(0.0, 2.0, 0.0), Vec3::new(1.0, 4.0, 1.0))],
            ..default()
        };
        assert!(world.in_ladder(Vec3::new(0.2, 1.0, 0.0)));
        assert!(!world.in_ladder(Vec3::new(0.2, 5.0, 0.0)));
    }

    #[test]
    fn test_motor_tracks_grounded_and_capsule_shape() {
        let world = StaticWorld::default();
        let mut transform = Transform::from_xyz(0.0, 1.0, 0.0);
        let mut capsule = capsule();
        let mut motor = CapsuleMotor {
            transform: &mut transform,
            capsule: &mut capsule,
            world: &world,
        };

        motor.move_by(Vec3::new(0.0, -0.1, 0.0));
        assert!(motor.is_grounded());

        motor.set_height(0.5);
        motor.set_center(Vec3::new(0.0, 0.5, 0.0));
        motor.move_by(Vec3::new(0.0, -0.1, 0.0));
        // Shrunk, raised capsule now hangs above the floor
        assert!(!motor.is_grounded());
        assert!((transform.translation.y - 0.9).abs() < 1e-5);
    }
}
