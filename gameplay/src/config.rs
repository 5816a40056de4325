//! Tunables for the player and gun controllers.
//!
//! Defaults match the shipped feel of the game. A `GameplayConfig` can be loaded from RON so
//! designers can tweak numbers without recompiling; any field left out keeps its default.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Movement, look, crouch, stamina and headbob tunables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    // --- Feature toggles ---
    pub can_sprint: bool,
    pub can_jump: bool,
    pub can_crouch: bool,
    pub can_headbob: bool,

    // --- Locomotion (units per second) ---
    pub walk_speed: f32,
    pub sprint_speed: f32,
    pub crouch_speed: f32,

    // --- Field of view (degrees) ---
    pub fov_default: f32,
    pub fov_sprint: f32,
    /// Degrees per second the FOV blends toward its sprint/default value
    pub fov_increment: f32,

    // --- Stamina ---
    pub max_stamina: f32,
    pub stamina_regen_rate: f32,
    pub stamina_depletion_rate: f32,
    /// Seconds without sprinting before stamina starts coming back
    pub stamina_regen_delay: f32,

    // --- Look ---
    /// Degrees of yaw per unit of horizontal look input
    pub look_speed_x: f32,
    /// Degrees of pitch per unit of vertical look input
    pub look_speed_y: f32,
    /// How far up the camera may pitch (degrees)
    pub upper_look_limit: f32,
    /// How far down the camera may pitch (degrees)
    pub lower_look_limit: f32,

    // --- Jumping ---
    pub jump_force: f32,
    pub gravity: f32,

    // --- Crouching ---
    pub crouching_height: f32,
    pub standing_height: f32,
    /// Duration of the crouch/stand blend in seconds
    pub time_to_crouch: f32,
    pub crouching_center: [f32; 3],
    pub standing_center: [f32; 3],
    /// Clearance required above the camera before the player may stand up
    pub headroom_distance: f32,

    // --- Headbob ---
    pub walk_bob_speed: f32,
    pub walk_bob_amount: f32,
    pub sprint_bob_speed: f32,
    pub sprint_bob_amount: f32,
    pub crouch_bob_speed: f32,
    pub crouch_bob_amount: f32,
    /// Horizontal speed (per axis) above which the head starts bobbing
    pub bob_motion_threshold: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            can_sprint: true,
            can_jump: true,
            can_crouch: true,
            can_headbob: true,

            walk_speed: 3.0,
            sprint_speed: 6.0,
            crouch_speed: 1.5,

            fov_default: 60.0,
            fov_sprint: 70.0,
            fov_increment: 5.0,

            max_stamina: 100.0,
            stamina_regen_rate: 10.0,
            stamina_depletion_rate: 20.0,
            stamina_regen_delay: 5.0,

            look_speed_x: 2.0,
            look_speed_y: 2.0,
            upper_look_limit: 80.0,
            lower_look_limit: 80.0,

            jump_force: 8.0,
            gravity: 30.0,

            crouching_height: 0.5,
            standing_height: 2.0,
            time_to_crouch: 0.25,
            crouching_center: [0.0, 0.5, 0.0],
            standing_center: [0.0, 0.0, 0.0],
            headroom_distance: 1.0,

            walk_bob_speed: 14.0,
            walk_bob_amount: 0.05,
            sprint_bob_speed: 18.0,
            sprint_bob_amount: 0.1,
            crouch_bob_speed: 8.0,
            crouch_bob_amount: 0.025,
            bob_motion_threshold: 0.1,
        }
    }
}

impl MovementConfig {
    pub fn crouching_center(&self) -> Vec3 {
        Vec3::from_array(self.crouching_center)
    }

    pub fn standing_center(&self) -> Vec3 {
        Vec3::from_array(self.standing_center)
    }

    fn validate(&self) -> Result<(), String> {
        check_range("look_speed_x", self.look_speed_x, 1.0, 10.0)?;
        check_range("look_speed_y", self.look_speed_y, 1.0, 10.0)?;
        check_range("upper_look_limit", self.upper_look_limit, 1.0, 100.0)?;
        check_range("lower_look_limit", self.lower_look_limit, 1.0, 100.0)?;

        for (name, value) in [
            ("walk_speed", self.walk_speed),
            ("sprint_speed", self.sprint_speed),
            ("crouch_speed", self.crouch_speed),
            ("fov_increment", self.fov_increment),
            ("stamina_regen_rate", self.stamina_regen_rate),
            ("stamina_depletion_rate", self.stamina_depletion_rate),
            ("stamina_regen_delay", self.stamina_regen_delay),
            ("jump_force", self.jump_force),
            ("gravity", self.gravity),
            ("time_to_crouch", self.time_to_crouch),
            ("headroom_distance", self.headroom_distance),
            ("bob_motion_threshold", self.bob_motion_threshold),
        ] {
            check_non_negative(name, value)?;
        }

        if self.max_stamina <= 0.0 {
            return Err(format!("max_stamina must be positive (got {})", self.max_stamina));
        }
        if self.crouching_height <= 0.0 || self.standing_height <= 0.0 {
            return Err(format!(
                "capsule heights must be positive (crouching {}, standing {})",
                self.crouching_height, self.standing_height
            ));
        }
        if self.fov_sprint < self.fov_default {
            return Err(format!(
                "fov_sprint ({}) must not be below fov_default ({})",
                self.fov_sprint, self.fov_default
            ));
        }
        Ok(())
    }
}

/// Gun firing, ammo and aim tunables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GunConfig {
    /// Seconds between shots
    pub fire_rate: f32,
    pub magazine_size: u32,
    /// Rounds carried outside the magazine when the gun is spawned
    pub reserved_ammo: u32,
    /// Exponential approach rate toward the aim/hip offset
    pub aim_smoothing: f32,
    /// Gun offset relative to the camera when firing from the hip
    pub normal_local_pos: [f32; 3],
    /// Gun offset relative to the camera when aiming down sights
    pub aiming_local_pos: [f32; 3],
}

impl Default for GunConfig {
    fn default() -> Self {
        Self {
            fire_rate: 0.1,
            magazine_size: 30,
            reserved_ammo: 90,
            aim_smoothing: 10.0,
            normal_local_pos: [0.25, -0.2, -0.5],
            aiming_local_pos: [0.0, -0.12, -0.4],
        }
    }
}

impl GunConfig {
    pub fn normal_local_pos(&self) -> Vec3 {
        Vec3::from_array(self.normal_local_pos)
    }

    pub fn aiming_local_pos(&self) -> Vec3 {
        Vec3::from_array(self.aiming_local_pos)
    }

    fn validate(&self) -> Result<(), String> {
        if self.magazine_size == 0 {
            return Err("magazine_size must be at least 1".to_string());
        }
        check_non_negative("fire_rate", self.fire_rate)?;
        check_non_negative("aim_smoothing", self.aim_smoothing)
    }
}

/// Complete tunable set, as stored in `gameplay.ron`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct GameplayConfig {
    pub movement: MovementConfig,
    pub gun: GunConfig,
}

impl GameplayConfig {
    /// Reject tunables the controllers can't sensibly run with.
    pub fn validate(&self) -> Result<(), String> {
        self.movement
            .validate()
            .map_err(|e| format!("movement: {e}"))?;
        self.gun.validate().map_err(|e| format!("gun: {e}"))
    }
}

fn check_range(name: &str, value: f32, min: f32, max: f32) -> Result<(), String> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(format!("{name} must be within [{min}, {max}] (got {value})"))
    }
}

fn check_non_negative(name: &str, value: f32) -> Result<(), String> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(format!("{name} must not be negative (got {value})"))
    }
}

/// Parse and validate a RON gameplay config.
pub fn load_gameplay_config_from_str(text: &str) -> Result<GameplayConfig, String> {
    let config: GameplayConfig =
        ron::from_str(text).map_err(|e| format!("ron parse failed: {e}"))?;
    config.validate()?;
    debug!("Loaded gameplay config: {:?}", config);
    Ok(config)
}

/// Load a RON gameplay config from a file path.
pub fn load_gameplay_config_from_file(path: impl AsRef<Path>) -> Result<GameplayConfig, String> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| format!("failed to read {path:?}: {e}"))?;
    load_gameplay_config_from_str(&text)
}
