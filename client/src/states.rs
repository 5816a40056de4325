//! Game state machine

use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};
use gameplay::PlayerController;

use crate::input::Controls;

/// Main game states
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    Playing,
    Paused,
}

/// Escape flips between playing and paused
pub fn toggle_pause(
    keyboard: Res<ButtonInput<KeyCode>>,
    controls: Res<Controls>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !keyboard.just_pressed(controls.pause) {
        return;
    }
    let next = match state.get() {
        GameState::Playing => GameState::Paused,
        GameState::Paused => GameState::Playing,
    };
    info!("Game state: {:?}", next);
    next_state.set(next);
}

fn set_cursor_locked(
    windows: &Query<Entity, With<PrimaryWindow>>,
    cursor_opts: &mut Query<&mut CursorOptions>,
    locked: bool,
) {
    let Ok(window_entity) = windows.single() else {
        return;
    };
    if let Ok(mut cursor) = cursor_opts.get_mut(window_entity) {
        cursor.grab_mode = if locked {
            CursorGrabMode::Locked
        } else {
            CursorGrabMode::None
        };
        cursor.visible = !locked;
    }
}

/// Grab cursor for FPS controls
pub fn grab_cursor(
    windows: Query<Entity, With<PrimaryWindow>>,
    mut cursor_opts: Query<&mut CursorOptions>,
    mouse_button: Res<ButtonInput<MouseButton>>,
) {
    if mouse_button.just_pressed(MouseButton::Left) {
        set_cursor_locked(&windows, &mut cursor_opts, true);
    }
}

/// Entering play: lock the cursor and hand control back to the player
pub fn enter_playing(
    windows: Query<Entity, With<PrimaryWindow>>,
    mut cursor_opts: Query<&mut CursorOptions>,
    mut players: Query<&mut PlayerController>,
) {
    set_cursor_locked(&windows, &mut cursor_opts, true);
    for mut controller in &mut players {
        controller.set_can_move(true);
    }
}

/// Pausing: free the cursor and freeze movement. Stamina keeps ticking.
pub fn enter_paused(
    windows: Query<Entity, With<PrimaryWindow>>,
    mut cursor_opts: Query<&mut CursorOptions>,
    mut players: Query<&mut PlayerController>,
) {
    set_cursor_locked(&windows, &mut cursor_opts, false);
    for mut controller in &mut players {
        controller.set_can_move(false);
    }
}
