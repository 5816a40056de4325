//! Engine-free first-person gameplay: movement, look, crouch, stamina, headbob and gun handling.
//!
//! Everything here is advanced by an explicit `tick(..., dt)` call. The host engine supplies
//! input snapshots and implements the collaborator traits in [`rig`].

pub mod config;
pub mod gun;
pub mod headbob;
pub mod look;
pub mod movement;
pub mod rig;
pub mod stamina;
pub mod stance;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{
    load_gameplay_config_from_file, load_gameplay_config_from_str, GameplayConfig, GunConfig,
    MovementConfig,
};
pub use gun::{FireState, GunAction, GunController, GunInput};
pub use movement::{MovementFrame, MovementState, PlayerController, PlayerInput};
pub use rig::{CameraRig, CharacterMotor, SpatialQuery};
pub use stamina::Stamina;
pub use stance::{CrouchBlend, CrouchChange, Stance};
