//! Crouch state machine.
//!
//! Crouching and standing up are timed blends of the capsule height and center. A blend is
//! stepped once per frame and can't be cancelled; a new toggle is ignored until it finishes.

use bevy::prelude::*;

use crate::rig::CharacterMotor;

/// Progress of a height/center blend between the standing and crouching capsule profiles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrouchBlend {
    pub elapsed: f32,
    pub from_height: f32,
    pub to_height: f32,
    pub from_center: Vec3,
    pub to_center: Vec3,
}

/// Posture of the player's capsule.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Stance {
    #[default]
    Standing,
    Crouching,
    TransitioningToCrouch(CrouchBlend),
    TransitioningToStand(CrouchBlend),
}

/// Stance change reported by a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrouchChange {
    /// A crouch blend started
    CrouchStarted,
    /// A stand-up blend started
    StandStarted,
    /// Standing was requested but something is overhead
    StandBlocked,
    /// A blend completed and the player is now crouched
    Crouched,
    /// A blend completed and the player is now standing
    Stood,
}

impl Stance {
    /// Whether the player moves, jumps and sprints as crouched.
    ///
    /// Only flips once a blend completes, so it stays true while standing back up.
    pub fn is_crouched(&self) -> bool {
        matches!(self, Stance::Crouching | Stance::TransitioningToStand(_))
    }

    pub fn in_transition(&self) -> bool {
        matches!(
            self,
            Stance::TransitioningToCrouch(_) | Stance::TransitioningToStand(_)
        )
    }

    /// Begin blending toward the opposite posture from the motor's current capsule.
    ///
    /// Does nothing while a blend is already running.
    pub fn begin_toggle(
        &mut self,
        motor: &impl CharacterMotor,
        target_height: f32,
        target_center: Vec3,
    ) -> Option<CrouchChange> {
        let blend = CrouchBlend {
            elapsed: 0.0,
            from_height: motor.height(),
            to_height: target_height,
            from_center: motor.center(),
            to_center: target_center,
        };

        match self {
            Stance::Standing => {
                *self = Stance::TransitioningToCrouch(blend);
                Some(CrouchChange::CrouchStarted)
            }
            Stance::Crouching => {
                *self = Stance::TransitioningToStand(blend);
                Some(CrouchChange::StandStarted)
            }
            Stance::TransitioningToCrouch(_) | Stance::TransitioningToStand(_) => None,
        }
    }

    /// Advance a running blend by one frame.
    ///
    /// While time remains the capsule is set to the interpolated profile and `dt` is added to
    /// the elapsed time. Once the duration has passed the capsule snaps to the target and the
    /// stance settles.
    pub fn step(
        &mut self,
        motor: &mut impl CharacterMotor,
        duration: f32,
        dt: f32,
    ) -> Option<CrouchChange> {
        let (blend, settled, change) = match self {
            Stance::TransitioningToCrouch(blend) => {
                (blend, Stance::Crouching, CrouchChange::Crouched)
            }
            Stance::TransitioningToStand(blend) => (blend, Stance::Standing, CrouchChange::Stood),
            Stance::Standing | Stance::Crouching => return None,
        };

        if blend.elapsed < duration {
            let t = blend.elapsed / duration;
            motor.set_height(blend.from_height + (blend.to_height - blend.from_height) * t);
            motor.set_center(blend.from_center.lerp(blend.to_center, t));
            blend.elapsed += dt;
            return None;
        }

        motor.set_height(blend.to_height);
        motor.set_center(blend.to_center);
        *self = settled;
        debug!("Stance settled: {:?}", settled);
        Some(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeMotor;

    const CROUCH_CENTER: Vec3 = Vec3::new(0.0, 0.5, 0.0);

    #[test]
    fn test_crouched_flag_lags_until_blend_completes() {
        let motor = FakeMotor::standing();
        let mut stance = Stance::Standing;
        stance.begin_toggle(&motor, 0.5, CROUCH_CENTER);
        assert!(stance.in_transition());
        assert!(!stance.is_crouched());

        let mut stance = Stance::Crouching;
        stance.begin_toggle(&motor, 2.0, Vec3::ZERO);
        assert!(stance.in_transition());
        assert!(stance.is_crouched());
    }

    #[test]
    fn test_toggle_ignored_mid_blend() {
        let motor = FakeMotor::standing();
        let mut stance = Stance::Standing;
        assert_eq!(
            stance.begin_toggle(&motor, 0.5, CROUCH_CENTER),
            Some(CrouchChange::CrouchStarted)
        );
        let before = stance;
        assert_eq!(stance.begin_toggle(&motor, 2.0, Vec3::ZERO), None);
        assert_eq!(stance, before);
    }

    #[test]
    fn test_blend_interpolates_then_settles() {
        let mut motor = FakeMotor::standing();
        let mut stance = Stance::Standing;
        stance.begin_toggle(&motor, 0.5, CROUCH_CENTER);

        // Duration 0.2 with 0.1 frames: t = 0, t = 0.5, then settle.
        assert_eq!(stance.step(&mut motor, 0.2, 0.1), None);
        assert_eq!(motor.height, 2.0);

        assert_eq!(stance.step(&mut motor, 0.2, 0.1), None);
        assert!((motor.height - 1.25).abs() < 1e-6);
        assert!((motor.center.y - 0.25).abs() < 1e-6);

        // elapsed is now ~0.2; float accumulation may need one extra interpolated frame
        let mut settled = None;
        for _ in 0..2 {
            settled = stance.step(&mut motor, 0.2, 0.1);
            if settled.is_some() {
                break;
            }
        }
        assert_eq!(settled, Some(CrouchChange::Crouched));
        assert_eq!(stance, Stance::Crouching);
        assert_eq!(motor.height, 0.5);
        assert_eq!(motor.center, CROUCH_CENTER);
    }

    #[test]
    fn test_zero_duration_settles_on_first_step() {
        let mut motor = FakeMotor::standing();
        let mut stance = Stance::Standing;
        stance.begin_toggle(&motor, 0.5, CROUCH_CENTER);
        assert_eq!(stance.step(&mut motor, 0.0, 0.016), Some(CrouchChange::Crouched));
        assert_eq!(motor.height, 0.5);
    }

    #[test]
    fn test_step_is_noop_when_settled() {
        let mut motor = FakeMotor::standing();
        let mut stance = Stance::Standing;
        assert_eq!(stance.step(&mut motor, 0.25, 0.016), None);
        assert_eq!(motor.height, 2.0);
    }
}
