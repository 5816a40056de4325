//! Player input handling
//!
//! Keyboard and mouse are polled once per frame into the gameplay input snapshots.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use gameplay::{GunInput, PlayerInput};

/// Key bindings and mouse scaling
#[derive(Resource, Clone, Debug)]
pub struct Controls {
    pub forward: KeyCode,
    pub backward: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub sprint: KeyCode,
    pub jump: KeyCode,
    pub crouch: KeyCode,
    pub reload: KeyCode,
    pub pause: KeyCode,
    pub fire: MouseButton,
    pub aim: MouseButton,
    /// Mouse pixels to look-axis units
    pub mouse_axis_scale: f32,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            backward: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            sprint: KeyCode::ShiftLeft,
            jump: KeyCode::Space,
            crouch: KeyCode::ControlLeft,
            reload: KeyCode::KeyR,
            pause: KeyCode::Escape,
            fire: MouseButton::Left,
            aim: MouseButton::Right,
            mouse_axis_scale: 0.1,
        }
    }
}

/// This frame's input snapshots
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct FrameInput {
    pub player: PlayerInput,
    pub gun: GunInput,
}

/// -1, 0 or 1 from a pair of opposing keys.
fn axis(keyboard: &ButtonInput<KeyCode>, negative: KeyCode, positive: KeyCode) -> f32 {
    let mut value = 0.0;
    if keyboard.pressed(positive) {
        value += 1.0;
    }
    if keyboard.pressed(negative) {
        value -= 1.0;
    }
    value
}

fn read_keyboard(keyboard: &ButtonInput<KeyCode>, controls: &Controls, input: &mut FrameInput) {
    input.player.move_axes = Vec2::new(
        axis(keyboard, controls.left, controls.right),
        axis(keyboard, controls.backward, controls.forward),
    );
    input.player.sprint_held = keyboard.pressed(controls.sprint);
    input.player.jump_pressed = keyboard.just_pressed(controls.jump);
    input.player.crouch_pressed = keyboard.just_pressed(controls.crouch);
    input.gun.reload_pressed = keyboard.just_pressed(controls.reload);
}

/// Handle keyboard input for movement, stance and reloading
pub fn poll_keyboard(
    keyboard: Res<ButtonInput<KeyCode>>,
    controls: Res<Controls>,
    mut input: ResMut<FrameInput>,
) {
    read_keyboard(&keyboard, &controls, &mut input);
}

/// Handle mouse input for looking around, firing and aiming
pub fn poll_mouse(
    mut mouse_motion: MessageReader<MouseMotion>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    controls: Res<Controls>,
    mut input: ResMut<FrameInput>,
) {
    let mut delta = Vec2::ZERO;
    for motion in mouse_motion.read() {
        delta += motion.delta;
    }

    // Screen Y grows downward; look_delta.y is "up"
    input.player.look_delta = Vec2::new(delta.x, -delta.y) * controls.mouse_axis_scale;
    input.gun.fire_held = mouse_button.pressed(controls.fire);
    input.gun.aim_held = mouse_button.pressed(controls.aim);
}
