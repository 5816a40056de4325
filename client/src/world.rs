//! Test scene: floor, crates, a low overhang to crouch under and a climbable platform.

use bevy::prelude::*;

use crate::physics::{StaticBox, StaticWorld};

/// Half extent of the square floor
const FLOOR_HALF_SIZE: f32 = 30.0;

/// Solid boxes as (center, size, color)
const BLOCKS: &[(Vec3, Vec3, Color)] = &[
    // Crates
    (Vec3::new(-3.0, 0.5, 0.0), Vec3::new(1.0, 1.0, 1.0), Color::srgb(0.55, 0.4, 0.25)),
    (Vec3::new(-3.0, 1.4, 0.2), Vec3::new(0.8, 0.8, 0.8), Color::srgb(0.6, 0.45, 0.3)),
    (Vec3::new(2.5, 0.35, -2.0), Vec3::new(0.7, 0.7, 0.7), Color::srgb(0.5, 0.38, 0.22)),
    // Overhang: 1m of clearance, enough for a crouched player only
    (Vec3::new(5.0, 1.25, 0.0), Vec3::new(3.0, 0.5, 3.0), Color::srgb(0.4, 0.42, 0.45)),
    (Vec3::new(3.6, 0.5, -1.4), Vec3::new(0.2, 1.0, 0.2), Color::srgb(0.35, 0.35, 0.38)),
    (Vec3::new(6.4, 0.5, 1.4), Vec3::new(0.2, 1.0, 0.2), Color::srgb(0.35, 0.35, 0.38)),
    // Platform reached by the ladder
    (Vec3::new(-6.0, 1.5, -4.0), Vec3::new(3.0, 3.0, 3.0), Color::srgb(0.45, 0.47, 0.5)),
];

/// Ladder climb volume against the platform's front face
const LADDER: (Vec3, Vec3) = (Vec3::new(-6.0, 2.1, -2.2), Vec3::new(1.0, 4.2, 0.6));

/// Collision geometry matching the spawned scene
pub fn build_static_world() -> StaticWorld {
    StaticWorld {
        floor_height: 0.0,
        boxes: BLOCKS
            .iter()
            .map(|(center, size, _)| StaticBox::from_center_size(*center, *size))
            .collect(),
        ladders: vec![StaticBox::from_center_size(LADDER.0, LADDER.1)],
    }
}

/// Spawn lights, floor and blocks, and register their colliders
pub fn spawn_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut world: ResMut<StaticWorld>,
) {
    commands.spawn((
        DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.9, 0.4, 0.0)),
    ));
    commands.insert_resource(AmbientLight {
        brightness: 300.0,
        ..default()
    });

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(FLOOR_HALF_SIZE * 2.0, FLOOR_HALF_SIZE * 2.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.3, 0.32, 0.3),
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::default(),
    ));

    *world = build_static_world();
    for (collider, (_, _, color)) in world.boxes.iter().zip(BLOCKS) {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::from_size(collider.size()))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: *color,
                perceptual_roughness: 0.8,
                ..default()
            })),
            Transform::from_translation(collider.center()),
        ));
    }

    // Ladder visual: two rails and rungs, no collision
    let rail_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.5, 0.3, 0.1),
        ..default()
    });
    let (center, size) = LADDER;
    let face_z = center.z - size.z * 0.5 + 0.05;
    let rail = meshes.add(Cuboid::new(0.06, size.y, 0.06));
    for x in [-0.35, 0.35] {
        commands.spawn((
            Mesh3d(rail.clone()),
            MeshMaterial3d(rail_material.clone()),
            Transform::from_xyz(center.x + x, center.y, face_z),
        ));
    }
    let rung = meshes.add(Cuboid::new(0.7, 0.04, 0.04));
    let mut y = 0.3;
    while y < size.y {
        commands.spawn((
            Mesh3d(rung.clone()),
            MeshMaterial3d(rail_material.clone()),
            Transform::from_xyz(center.x, y, face_z),
        ));
        y += 0.35;
    }

    info!(
        "World spawned: {} colliders, {} ladders",
        world.boxes.len(),
        world.ladders.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use gameplay::SpatialQuery;

    #[test]
    fn test_overhang_blocks_standing_only() {
        let world = build_static_world();
        // Crouched camera under the overhang vs. out in the open
        assert!(world.raycast(Vec3::new(5.0, 0.35, 0.0), Dir3::Y, 1.0));
        assert!(!world.raycast(Vec3::new(0.0, 0.35, 6.0), Dir3::Y, 1.0));
    }

    #[test]
    fn test_ladder_reaches_above_platform() {
        let world = build_static_world();
        let ladder = world.ladders[0];
        let platform_top = world
            .boxes
            .iter()
            .map(|b| b.max.y)
            .fold(f32::MIN, f32::max);
        assert!(ladder.max.y > platform_top + 1.0);
        assert_eq!(ladder.min.y, 0.0);
    }

    #[test]
    fn test_spawn_point_is_clear() {
        let world = build_static_world();
        let capsule = crate::physics::KinematicCapsule {
            radius: 0.35,
            height: 2.0,
            center: Vec3::ZERO,
            grounded: false,
        };
        let mut position = Vec3::new(0.0, 1.0, 6.0);
        assert!(world.move_capsule(&mut position, &capsule, Vec3::ZERO));
        assert_eq!(position, Vec3::new(0.0, 1.0, 6.0));
    }
}
