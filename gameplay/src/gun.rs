//! Gun handling: aim-down-sights offset, automatic fire with a cooldown, and reloading.

use bevy::prelude::*;

use crate::config::GunConfig;

/// Input polled for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GunInput {
    /// Primary fire held (automatic fire)
    pub fire_held: bool,
    /// Aim-down-sights held
    pub aim_held: bool,
    pub reload_pressed: bool,
}

/// Whether the gun may fire this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FireState {
    Ready,
    CoolingDown { remaining: f32 },
}

/// Outcome of one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GunAction {
    Idle,
    Fired { remaining: u32 },
    Reloaded { rounds: u32 },
}

#[derive(Component, Clone, Debug)]
pub struct GunController {
    config: GunConfig,
    magazine: u32,
    reserve: u32,
    fire: FireState,
    /// Current gun position relative to the camera
    offset: Vec3,
}

impl GunController {
    /// Spawn with a full magazine and the configured reserve, held at the hip.
    pub fn new(config: GunConfig) -> Self {
        Self {
            magazine: config.magazine_size,
            reserve: config.reserved_ammo,
            fire: FireState::Ready,
            offset: config.normal_local_pos(),
            config,
        }
    }

    pub fn config(&self) -> &GunConfig {
        &self.config
    }

    pub fn magazine(&self) -> u32 {
        self.magazine
    }

    pub fn reserve(&self) -> u32 {
        self.reserve
    }

    pub fn fire_state(&self) -> FireState {
        self.fire
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    /// Check if the gun can fire right now (ready and has a round chambered)
    pub fn can_fire(&self) -> bool {
        self.fire == FireState::Ready && self.magazine > 0
    }

    /// Check if a reload would move any rounds
    pub fn can_reload(&self) -> bool {
        self.magazine < self.config.magazine_size && self.reserve > 0
    }

    /// Advance the gun by one frame.
    pub fn tick(&mut self, input: &GunInput, dt: f32) -> GunAction {
        self.tick_cooldown(dt);
        self.update_aim(input.aim_held, dt);

        if input.fire_held && self.can_fire() {
            return self.fire();
        }
        if input.reload_pressed && self.can_reload() {
            return self.reload();
        }
        GunAction::Idle
    }

    fn tick_cooldown(&mut self, dt: f32) {
        if let FireState::CoolingDown { remaining } = self.fire {
            let remaining = remaining - dt;
            self.fire = if remaining <= 0.0 {
                FireState::Ready
            } else {
                FireState::CoolingDown { remaining }
            };
        }
    }

    fn update_aim(&mut self, aiming: bool, dt: f32) {
        let target = if aiming {
            self.config.aiming_local_pos()
        } else {
            self.config.normal_local_pos()
        };
        let t = 1.0 - (-self.config.aim_smoothing * dt).exp();
        self.offset = self.offset.lerp(target, t);
    }

    fn fire(&mut self) -> GunAction {
        self.magazine -= 1;
        self.fire = FireState::CoolingDown {
            remaining: self.config.fire_rate,
        };
        GunAction::Fired {
            remaining: self.magazine,
        }
    }

    /// Move `min(deficit, reserve)` rounds from the reserve into the magazine.
    fn reload(&mut self) -> GunAction {
        let deficit = self.config.magazine_size - self.magazine;
        let rounds = deficit.min(self.reserve);
        self.magazine += rounds;
        self.reserve -= rounds;
        info!(
            "Reloaded {} rounds ({} / {})",
            rounds, self.magazine, self.reserve
        );
        GunAction::Reloaded { rounds }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const DT: f32 = 1.0 / 60.0;

    const FIRE: GunInput = GunInput {
        fire_held: true,
        aim_held: false,
        reload_pressed: false,
    };
    const RELOAD: GunInput = GunInput {
        fire_held: false,
        aim_held: false,
        reload_pressed: true,
    };

    fn gun(magazine_size: u32, reserved_ammo: u32) -> GunController {
        GunController::new(GunConfig {
            magazine_size,
            reserved_ammo,
            ..default()
        })
    }

    fn with_ammo(magazine_size: u32, magazine: u32, reserve: u32) -> GunController {
        let mut gun = gun(magazine_size, reserve);
        gun.magazine = magazine;
        gun
    }

    #[test]
    fn test_starts_full_and_ready() {
        let gun = gun(30, 90);
        assert_eq!(gun.magazine(), 30);
        assert_eq!(gun.reserve(), 90);
        assert_eq!(gun.fire_state(), FireState::Ready);
        assert_eq!(gun.offset(), gun.config().normal_local_pos());
    }

    #[test]
    fn test_fire_consumes_round_and_starts_cooldown() {
        let mut gun = gun(30, 90);
        assert_eq!(gun.tick(&FIRE, DT), GunAction::Fired { remaining: 29 });
        assert!(matches!(gun.fire_state(), FireState::CoolingDown { .. }));

        // Held fire during the cooldown is dropped, not queued
        assert_eq!(gun.tick(&FIRE, DT), GunAction::Idle);
        assert_eq!(gun.magazine(), 29);
    }

    #[test]
    fn test_cooldown_elapses() {
        let mut gun = gun(30, 90);
        gun.tick(&FIRE, 0.05);
        assert_eq!(gun.tick(&FIRE, 0.05), GunAction::Idle);
        // 0.1s since the shot
        assert_eq!(gun.tick(&FIRE, 0.05), GunAction::Fired { remaining: 28 });
    }

    #[test]
    fn test_release_does_not_skip_cooldown() {
        let mut gun = gun(30, 90);
        gun.tick(&FIRE, DT);
        gun.tick(&GunInput::default(), DT);
        assert_eq!(gun.tick(&FIRE, DT), GunAction::Idle);
    }

    #[test]
    fn test_empty_magazine_rejects_fire() {
        let mut gun = with_ammo(30, 0, 0);
        assert!(!gun.can_fire());
        assert_eq!(gun.tick(&FIRE, 1.0), GunAction::Idle);
        assert_eq!(gun.magazine(), 0);
    }

    #[test]
    fn test_reload_full_deficit() {
        let mut gun = with_ammo(30, 10, 50);
        assert_eq!(gun.tick(&RELOAD, DT), GunAction::Reloaded { rounds: 20 });
        assert_eq!(gun.magazine(), 30);
        assert_eq!(gun.reserve(), 30);
    }

    #[test]
    fn test_reload_partial_when_reserve_short() {
        let mut gun = with_ammo(30, 25, 3);
        assert_eq!(gun.tick(&RELOAD, DT), GunAction::Reloaded { rounds: 3 });
        assert_eq!(gun.magazine(), 28);
        assert_eq!(gun.reserve(), 0);
    }

    #[test]
    fn test_reload_noop_when_full_or_dry() {
        let mut full = gun(30, 90);
        assert_eq!(full.tick(&RELOAD, DT), GunAction::Idle);
        assert_eq!(full.reserve(), 90);

        let mut dry = with_ammo(30, 5, 0);
        assert_eq!(dry.tick(&RELOAD, DT), GunAction::Idle);
        assert_eq!(dry.magazine(), 5);
    }

    #[test]
    fn test_fire_takes_priority_over_reload() {
        let mut gun = with_ammo(30, 10, 50);
        let both = GunInput {
            fire_held: true,
            reload_pressed: true,
            ..default()
        };
        assert_eq!(gun.tick(&both, DT), GunAction::Fired { remaining: 9 });
        assert_eq!(gun.reserve(), 50);
    }

    #[test]
    fn test_aim_approaches_target() {
        let mut gun = gun(30, 90);
        let aim = GunInput {
            aim_held: true,
            ..default()
        };
        let target = gun.config().aiming_local_pos();
        let start = gun.offset().distance(target);

        gun.tick(&aim, DT);
        let after_one = gun.offset().distance(target);
        assert!(after_one < start);

        for _ in 0..300 {
            gun.tick(&aim, DT);
        }
        assert!(gun.offset().distance(target) < 1e-3);

        for _ in 0..300 {
            gun.tick(&GunInput::default(), DT);
        }
        assert!(gun.offset().distance(gun.config().normal_local_pos()) < 1e-3);
    }

    #[test]
    fn test_random_frames_keep_ammo_bounds() {
        let mut gun = gun(30, 200);
        let mut rng = StdRng::seed_from_u64(11);
        let mut total = gun.magazine() + gun.reserve();
        let mut since_last_shot = f32::INFINITY;

        for _ in 0..10_000 {
            let input = GunInput {
                fire_held: rng.gen_bool(0.5),
                aim_held: rng.gen_bool(0.5),
                reload_pressed: rng.gen_bool(0.05),
            };
            let dt = rng.gen_range(0.001..0.05);
            let magazine_before = gun.magazine();
            since_last_shot += dt;

            let action = gun.tick(&input, dt);

            assert!(gun.magazine() <= gun.config().magazine_size);
            match action {
                GunAction::Fired { .. } => {
                    assert!(magazine_before > 0);
                    assert!(since_last_shot >= gun.config().fire_rate - 1e-4);
                    since_last_shot = 0.0;
                    total -= 1;
                }
                GunAction::Reloaded { rounds } => assert!(rounds > 0),
                GunAction::Idle => {}
            }
            assert_eq!(gun.magazine() + gun.reserve(), total);
        }
    }
}
