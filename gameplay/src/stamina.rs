//! Sprint stamina.

use bevy::prelude::*;

use crate::config::MovementConfig;

/// Sprint stamina pool.
///
/// Drains while sprinting. Once the player has stopped sprinting for `regen_delay` seconds it
/// refills at `regen_rate` per second. `current` never leaves `[0, max]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Stamina {
    pub current: f32,
    pub max: f32,
    pub regen_rate: f32,
    pub depletion_rate: f32,
    pub regen_delay: f32,
    /// Seconds since the player last sprinted
    pub regen_timer: f32,
}

impl Stamina {
    pub fn from_config(config: &MovementConfig) -> Self {
        Self {
            current: config.max_stamina,
            max: config.max_stamina,
            regen_rate: config.stamina_regen_rate,
            depletion_rate: config.stamina_depletion_rate,
            regen_delay: config.stamina_regen_delay,
            regen_timer: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0.0
    }

    pub fn percentage(&self) -> f32 {
        self.current / self.max
    }

    /// Advance one frame. Returns true on the frame stamina runs out.
    pub fn tick(&mut self, sprinting: bool, dt: f32) -> bool {
        let was_empty = self.is_empty();

        if sprinting {
            self.current -= self.depletion_rate * dt;
            self.regen_timer = 0.0;
        } else {
            self.regen_timer += dt;
            if self.regen_timer >= self.regen_delay {
                self.current += self.regen_rate * dt;
            }
        }
        self.current = self.current.clamp(0.0, self.max);

        let exhausted = !was_empty && self.is_empty();
        if exhausted {
            debug!("Stamina exhausted");
        }
        exhausted
    }
}
