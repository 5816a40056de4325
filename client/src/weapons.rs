//! First-person gun: view model, firing and reloading.

use bevy::prelude::*;
use gameplay::{GunAction, GunConfig, GunController};

use crate::input::FrameInput;

/// How long the muzzle flash stays lit after a shot
const MUZZLE_FLASH_SECS: f32 = 0.04;

/// Marker for the gun view model (child of the camera)
#[derive(Component)]
pub struct GunModel;

/// Flash quad at the barrel tip
#[derive(Component, Default)]
pub struct MuzzleFlash {
    remaining: f32,
}

/// Spawn the gun view model under the camera, carrying its controller.
pub fn spawn_gun_model(
    parent: &mut ChildSpawnerCommands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    config: GunConfig,
) {
    let metal_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.15, 0.15, 0.18),
        metallic: 0.9,
        perceptual_roughness: 0.3,
        ..default()
    });
    let grip_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.08, 0.06, 0.04),
        metallic: 0.1,
        perceptual_roughness: 0.8,
        ..default()
    });
    let flash_material = materials.add(StandardMaterial {
        base_color: Color::srgb(1.0, 0.8, 0.3),
        emissive: LinearRgba::rgb(8.0, 5.0, 1.5),
        unlit: true,
        ..default()
    });

    let offset = config.normal_local_pos();
    parent
        .spawn((
            GunModel,
            GunController::new(config),
            Transform::from_translation(offset),
            Visibility::default(),
        ))
        .with_children(|gun| {
            // Receiver
            gun.spawn((
                Mesh3d(meshes.add(Cuboid::new(0.06, 0.08, 0.35))),
                MeshMaterial3d(metal_material.clone()),
                Transform::default(),
            ));
            // Barrel
            gun.spawn((
                Mesh3d(meshes.add(Cuboid::new(0.025, 0.025, 0.25))),
                MeshMaterial3d(metal_material),
                Transform::from_xyz(0.0, 0.02, -0.3),
            ));
            // Grip
            gun.spawn((
                Mesh3d(meshes.add(Cuboid::new(0.045, 0.12, 0.05))),
                MeshMaterial3d(grip_material),
                Transform::from_xyz(0.0, -0.08, 0.08)
                    .with_rotation(Quat::from_rotation_x(-0.3)),
            ));
            gun.spawn((
                MuzzleFlash::default(),
                Mesh3d(meshes.add(Cuboid::new(0.06, 0.06, 0.02))),
                MeshMaterial3d(flash_material),
                Transform::from_xyz(0.0, 0.02, -0.44),
                Visibility::Hidden,
            ));
        });
}

/// Tick the gun controller and move the view model to its aim offset
pub fn drive_gun(
    time: Res<Time>,
    input: Res<FrameInput>,
    mut guns: Query<(&mut GunController, &mut Transform), With<GunModel>>,
    mut flashes: Query<&mut MuzzleFlash>,
) {
    let dt = time.delta_secs();
    for (mut gun, mut transform) in guns.iter_mut() {
        match gun.tick(&input.gun, dt) {
            GunAction::Fired { remaining } => {
                debug!("Fired, {} left in magazine", remaining);
                for mut flash in flashes.iter_mut() {
                    flash.remaining = MUZZLE_FLASH_SECS;
                }
            }
            GunAction::Reloaded { .. } | GunAction::Idle => {}
        }
        transform.translation = gun.offset();
    }
}

/// Show the flash for a few frames after each shot
pub fn update_muzzle_flash(
    time: Res<Time>,
    mut flashes: Query<(&mut MuzzleFlash, &mut Visibility)>,
) {
    let dt = time.delta_secs();
    for (mut flash, mut visibility) in flashes.iter_mut() {
        *visibility = if flash.remaining > 0.0 {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        flash.remaining = (flash.remaining - dt).max(0.0);
    }
}
