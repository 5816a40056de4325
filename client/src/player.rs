//! Local player: body with capsule, first-person camera and gun, plus the per-frame drivers.

use bevy::prelude::*;
use gameplay::{CharacterMotor, CrouchChange, GameplayConfig, PlayerController, PlayerInput};

use crate::camera::CameraAdapter;
use crate::input::FrameInput;
use crate::physics::{CapsuleMotor, KinematicCapsule, StaticWorld};
use crate::states::GameState;
use crate::weapons;

/// Capsule radius of the player body
const PLAYER_RADIUS: f32 = 0.35;

/// Camera height above the body origin
const EYE_HEIGHT: f32 = 0.6;

/// Vertical speed while on a ladder
pub const LADDER_CLIMB_SPEED: f32 = 2.0;

/// Where the player spawns (body origin = capsule center)
const SPAWN_POINT: Vec3 = Vec3::new(0.0, 1.0, 6.0);

/// Marker for the player body
#[derive(Component)]
pub struct PlayerBody;

/// Marker for the first-person camera
#[derive(Component)]
pub struct PlayerCamera;

/// Spawn the player body, its camera and the gun view model.
pub fn spawn_player(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<GameplayConfig>,
) {
    let movement = config.movement.clone();

    let mut camera_transform = Transform::from_xyz(0.0, EYE_HEIGHT, 0.0);
    let mut projection = Projection::Perspective(PerspectiveProjection::default());
    let controller = PlayerController::new(
        movement.clone(),
        &mut CameraAdapter {
            transform: &mut camera_transform,
            global: &GlobalTransform::default(),
            projection: &mut projection,
        },
    );

    let capsule = KinematicCapsule {
        radius: PLAYER_RADIUS,
        height: movement.standing_height,
        center: movement.standing_center(),
        grounded: false,
    };

    let gun_config = config.gun.clone();
    commands
        .spawn((
            PlayerBody,
            controller,
            capsule,
            Transform::from_translation(SPAWN_POINT),
            Visibility::default(),
        ))
        .with_children(|body| {
            body.spawn((
                PlayerCamera,
                Camera3d::default(),
                projection,
                camera_transform,
            ))
            .with_children(|camera| {
                weapons::spawn_gun_model(camera, &mut meshes, &mut materials, gun_config);
            });
        });

    info!("Player spawned at {:?}", SPAWN_POINT);
}

/// Put the player into climbing mode while inside a ladder volume, and climb it.
pub fn climb_ladders(
    time: Res<Time>,
    input: Res<FrameInput>,
    world: Res<StaticWorld>,
    state: Res<State<GameState>>,
    mut bodies: Query<(&mut PlayerController, &mut Transform, &mut KinematicCapsule), With<PlayerBody>>,
) {
    let dt = time.delta_secs();
    for (mut controller, mut transform, mut capsule) in bodies.iter_mut() {
        let on_ladder = world.in_ladder(transform.translation);
        controller.set_special_movement(on_ladder);
        if !on_ladder || *state.get() != GameState::Playing {
            continue;
        }

        let axes = input.player.move_axes;
        let climb = Vec3::Y * axes.y * LADDER_CLIMB_SPEED
            + controller.state().look.right() * axes.x * LADDER_CLIMB_SPEED;
        let mut motor = CapsuleMotor {
            transform: &mut transform,
            capsule: &mut capsule,
            world: &world,
        };
        motor.move_by(climb * dt);
    }
}

/// Tick the movement controller against the capsule, camera and static world
pub fn drive_player(
    time: Res<Time>,
    input: Res<FrameInput>,
    world: Res<StaticWorld>,
    state: Res<State<GameState>>,
    mut bodies: Query<
        (&mut PlayerController, &mut Transform, &mut KinematicCapsule),
        (With<PlayerBody>, Without<PlayerCamera>),
    >,
    mut cameras: Query<
        (&mut Transform, &GlobalTransform, &mut Projection),
        (With<PlayerCamera>, Without<PlayerBody>),
    >,
) {
    let Ok((mut camera_transform, camera_global, mut projection)) = cameras.single_mut() else {
        return;
    };

    // Paused: look is frozen too, so nothing leaks through a ladder's look-only mode
    let player_input = match state.get() {
        GameState::Playing => input.player,
        GameState::Paused => PlayerInput::default(),
    };

    let dt = time.delta_secs();
    for (mut controller, mut transform, mut capsule) in bodies.iter_mut() {
        let mut motor = CapsuleMotor {
            transform: &mut transform,
            capsule: &mut capsule,
            world: &world,
        };
        let mut camera = CameraAdapter {
            transform: &mut camera_transform,
            global: camera_global,
            projection: &mut projection,
        };

        let frame = controller.tick(&player_input, &mut motor, &mut camera, &*world, dt);

        if frame.jumped {
            debug!("Jump");
        }
        if frame.stamina_exhausted {
            info!("Out of stamina");
        }
        match frame.crouch {
            Some(CrouchChange::StandBlocked) => info!("Can't stand up here"),
            Some(change) => debug!("Stance: {:?}", change),
            None => {}
        }
    }
}
