//! First-person player controller: locomotion, look, jump, crouch, headbob and stamina.
//!
//! `PlayerController::tick` is called once per rendered frame with the frame's polled input and
//! the engine collaborators. Order within a tick:
//!
//! 1. movement input (FOV blend, speed selection, horizontal direction)
//! 2. look
//! 3. jump
//! 4. crouch toggle (first blend step runs immediately)
//! 5. headbob
//! 6. gravity + motor move
//! 7. stamina
//! 8. resume a crouch blend that was already running when the tick started
//!
//! While `special_movement` is set only the look step runs. While `can_move` is false nothing
//! but stamina and a running crouch blend advances.

use bevy::prelude::*;

use crate::config::MovementConfig;
use crate::headbob::{Gait, Headbob};
use crate::look::LookAngles;
use crate::rig::{CameraRig, CharacterMotor, SpatialQuery};
use crate::stamina::Stamina;
use crate::stance::{CrouchChange, Stance};

/// Input polled for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlayerInput {
    /// x = strafe (right positive), y = forward (forward positive), each in [-1, 1]
    pub move_axes: Vec2,
    /// x = turn right, y = look up
    pub look_delta: Vec2,
    pub sprint_held: bool,
    pub jump_pressed: bool,
    pub crouch_pressed: bool,
}

/// Mutable per-frame state of the controller.
#[derive(Clone, Debug, PartialEq)]
pub struct MovementState {
    /// World-space velocity; y carries jump/gravity between frames
    pub move_direction: Vec3,
    pub look: LookAngles,
    pub stance: Stance,
    pub stamina: Stamina,
    /// Current camera vertical FOV in degrees
    pub fov: f32,
    pub headbob: Headbob,
    /// Camera local Y the headbob oscillates around
    pub default_camera_y: f32,
}

/// What happened during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MovementFrame {
    pub sprinting: bool,
    pub jumped: bool,
    pub grounded: bool,
    pub crouch: Option<CrouchChange>,
    pub stamina_exhausted: bool,
}

#[derive(Component, Clone, Debug)]
pub struct PlayerController {
    config: MovementConfig,
    state: MovementState,
    can_move: bool,
    special_movement: bool,
}

impl PlayerController {
    /// Set up the controller against its camera: remembers the camera's resting height and
    /// resets the FOV.
    pub fn new(config: MovementConfig, camera: &mut impl CameraRig) -> Self {
        let state = MovementState {
            move_direction: Vec3::ZERO,
            look: LookAngles::default(),
            stance: Stance::Standing,
            stamina: Stamina::from_config(&config),
            fov: config.fov_default,
            headbob: Headbob::default(),
            default_camera_y: camera.local_position().y,
        };
        camera.set_field_of_view(state.fov);

        Self {
            config,
            state,
            can_move: true,
            special_movement: false,
        }
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn state(&self) -> &MovementState {
        &self.state
    }

    pub fn stance(&self) -> Stance {
        self.state.stance
    }

    pub fn stamina(&self) -> &Stamina {
        &self.state.stamina
    }

    pub fn can_move(&self) -> bool {
        self.can_move
    }

    pub fn set_can_move(&mut self, can_move: bool) {
        self.can_move = can_move;
    }

    pub fn special_movement(&self) -> bool {
        self.special_movement
    }

    /// Flag an externally driven movement mode (ladders etc.) that only allows looking around.
    pub fn set_special_movement(&mut self, active: bool) {
        if self.special_movement != active {
            debug!("Special movement {}", if active { "started" } else { "ended" });
        }
        self.special_movement = active;
    }

    /// Sprinting needs the toggle, the key, an upright posture and some stamina.
    pub fn is_sprinting(&self, input: &PlayerInput) -> bool {
        self.config.can_sprint
            && input.sprint_held
            && !self.state.stance.is_crouched()
            && !self.state.stamina.is_empty()
    }

    fn gait(&self, input: &PlayerInput) -> Gait {
        Gait::select(self.state.stance.is_crouched(), self.is_sprinting(input))
    }

    /// Advance the controller by one frame.
    pub fn tick(
        &mut self,
        input: &PlayerInput,
        motor: &mut impl CharacterMotor,
        camera: &mut impl CameraRig,
        world: &impl SpatialQuery,
        dt: f32,
    ) -> MovementFrame {
        let blend_running = self.state.stance.in_transition();
        let mut frame = MovementFrame {
            grounded: motor.is_grounded(),
            ..default()
        };

        if self.special_movement {
            self.handle_look(input, camera);
        } else if self.can_move {
            self.handle_movement_input(input, camera, dt);
            self.handle_look(input, camera);

            if self.config.can_jump {
                frame.jumped = self.handle_jump(input, &*motor);
            }
            if self.config.can_crouch {
                frame.crouch = self.handle_crouch(input, motor, &*camera, world, dt);
            }
            if self.config.can_headbob {
                self.handle_headbob(input, &*motor, camera, dt);
            }

            self.apply_final_movement(motor, dt);
        }

        frame.sprinting = self.is_sprinting(input);
        frame.stamina_exhausted = self.state.stamina.tick(frame.sprinting, dt);

        if blend_running {
            if let Some(change) = self.state.stance.step(motor, self.config.time_to_crouch, dt) {
                frame.crouch = Some(change);
            }
        }

        frame
    }

    fn handle_movement_input(
        &mut self,
        input: &PlayerInput,
        camera: &mut impl CameraRig,
        dt: f32,
    ) {
        let sprinting = self.is_sprinting(input);
        let config = &self.config;
        let fov = &mut self.state.fov;

        if sprinting && *fov < config.fov_sprint {
            *fov = (*fov + config.fov_increment * dt).min(config.fov_sprint);
        } else if !sprinting && *fov > config.fov_default {
            *fov = (*fov - config.fov_increment * dt).max(config.fov_default);
        }
        camera.set_field_of_view(*fov);

        let speed = self.gait(input).speed(&self.config);
        let look = self.state.look;
        let vertical_velocity = self.state.move_direction.y;

        let mut direction =
            look.forward() * (input.move_axes.y * speed) + look.right() * (input.move_axes.x * speed);
        direction.y = vertical_velocity;
        self.state.move_direction = direction;
    }

    fn handle_look(&mut self, input: &PlayerInput, camera: &mut impl CameraRig) {
        self.state.look.apply(
            input.look_delta,
            Vec2::new(self.config.look_speed_x, self.config.look_speed_y),
            self.config.upper_look_limit,
            self.config.lower_look_limit,
        );
        camera.set_local_rotation(self.state.look.camera_rotation());
    }

    fn handle_jump(&mut self, input: &PlayerInput, motor: &impl CharacterMotor) -> bool {
        if input.jump_pressed && motor.is_grounded() && !self.state.stance.is_crouched() {
            self.state.move_direction.y = self.config.jump_force;
            true
        } else {
            false
        }
    }

    fn handle_crouch(
        &mut self,
        input: &PlayerInput,
        motor: &mut impl CharacterMotor,
        camera: &impl CameraRig,
        world: &impl SpatialQuery,
        dt: f32,
    ) -> Option<CrouchChange> {
        if !input.crouch_pressed || self.state.stance.in_transition() || !motor.is_grounded() {
            return None;
        }

        let crouched = self.state.stance.is_crouched();
        if crouched
            && world.raycast(camera.world_position(), Dir3::Y, self.config.headroom_distance)
        {
            debug!("Stand blocked by overhead obstacle");
            return Some(CrouchChange::StandBlocked);
        }

        let (target_height, target_center) = if crouched {
            (self.config.standing_height, self.config.standing_center())
        } else {
            (self.config.crouching_height, self.config.crouching_center())
        };

        let change = self
            .state
            .stance
            .begin_toggle(&*motor, target_height, target_center)?;
        debug!("Crouch toggle: {:?}", change);

        // First step runs in the same frame the toggle was pressed
        self.state
            .stance
            .step(motor, self.config.time_to_crouch, dt)
            .or(Some(change))
    }

    fn handle_headbob(
        &mut self,
        input: &PlayerInput,
        motor: &impl CharacterMotor,
        camera: &mut impl CameraRig,
        dt: f32,
    ) {
        let gait = self.gait(input);
        let motion = (self.state.move_direction.x, self.state.move_direction.z);
        if let Some(y) = self.state.headbob.advance(
            &self.config,
            gait,
            motor.is_grounded(),
            motion,
            self.state.default_camera_y,
            dt,
        ) {
            let mut position = camera.local_position();
            position.y = y;
            camera.set_local_position(position);
        }
    }

    fn apply_final_movement(&mut self, motor: &mut impl CharacterMotor, dt: f32) {
        if !motor.is_grounded() {
            self.state.move_direction.y -= self.config.gravity * dt;
        }
        motor.move_by(self.state.move_direction * dt);
        motor.set_rotation(self.state.look.body_rotation());
    }
}
