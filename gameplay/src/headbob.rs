//! Camera headbob while walking, sprinting or crouch-walking on the ground.

use crate::config::MovementConfig;

/// Locomotion mode, picked with crouch > sprint > walk priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gait {
    Walk,
    Sprint,
    Crouch,
}

impl Gait {
    pub fn select(crouched: bool, sprinting: bool) -> Self {
        if crouched {
            Gait::Crouch
        } else if sprinting {
            Gait::Sprint
        } else {
            Gait::Walk
        }
    }

    pub fn speed(self, config: &MovementConfig) -> f32 {
        match self {
            Gait::Walk => config.walk_speed,
            Gait::Sprint => config.sprint_speed,
            Gait::Crouch => config.crouch_speed,
        }
    }

    /// (phase rate, vertical amplitude)
    pub fn bob(self, config: &MovementConfig) -> (f32, f32) {
        match self {
            Gait::Walk => (config.walk_bob_speed, config.walk_bob_amount),
            Gait::Sprint => (config.sprint_bob_speed, config.sprint_bob_amount),
            Gait::Crouch => (config.crouch_bob_speed, config.crouch_bob_amount),
        }
    }
}

/// Phase accumulator for the bob sine wave.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Headbob {
    pub timer: f32,
}

impl Headbob {
    /// Advance the phase and return the camera's local Y. `None` leaves the camera where it is.
    pub fn advance(
        &mut self,
        config: &MovementConfig,
        gait: Gait,
        grounded: bool,
        horizontal_motion: (f32, f32),
        default_y: f32,
        dt: f32,
    ) -> Option<f32> {
        if !grounded {
            return None;
        }

        let threshold = config.bob_motion_threshold;
        let (x, z) = horizontal_motion;
        if x.abs() <= threshold && z.abs() <= threshold {
            return None;
        }

        let (rate, amount) = gait.bob(config);
        self.timer += dt * rate;
        Some(default_y + self.timer.sin() * amount)
    }
}
