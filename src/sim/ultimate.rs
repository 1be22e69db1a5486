//! Soul-powered ultimate: a charge meter and an area freeze
//!
//! The freeze picks its victims once, at activation. Enemies that wander
//! into the radius afterwards are left alone.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use crate::tuning::UltimateTuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ultimate {
    pub charge: u32,
    pub max_charge: u32,
    /// Souls banked toward the next charge
    pub partial_souls: u32,
    pub souls_per_charge: u32,
    pub active: bool,
    pub duration: f32,
    pub remaining: f32,
    pub freeze_radius: f32,
    /// Screen flash countdown after activation (render only)
    pub flash: f32,
    pub flash_secs: f32,
}

impl Ultimate {
    pub fn new(tuning: &UltimateTuning) -> Self {
        Self {
            charge: 0,
            max_charge: tuning.max_charge,
            partial_souls: 0,
            souls_per_charge: tuning.souls_per_charge.max(1),
            active: false,
            duration: tuning.duration,
            remaining: 0.0,
            freeze_radius: tuning.freeze_radius,
            flash: 0.0,
            flash_secs: tuning.flash_secs,
        }
    }

    pub fn is_charged(&self) -> bool {
        self.charge >= self.max_charge
    }

    /// Bank collected souls; every `souls_per_charge` become one charge.
    /// Nothing carries over once the meter is full.
    pub fn add_souls(&mut self, count: u32) {
        if self.is_charged() {
            return;
        }
        let banked = u64::from(self.partial_souls) + u64::from(count);
        let per_charge = u64::from(self.souls_per_charge.max(1));
        let charge = u64::from(self.charge) + banked / per_charge;
        if charge >= u64::from(self.max_charge) {
            self.charge = self.max_charge;
            self.partial_souls = 0;
        } else {
            // Both fit: charge < max_charge and the remainder < souls_per_charge
            self.charge = charge as u32;
            self.partial_souls = (banked % per_charge) as u32;
        }
    }

    /// Fire the freeze if the meter is full. Returns how many enemies were
    /// caught, or `None` if nothing happened.
    pub fn try_activate(&mut self, center: Vec2, enemies: &mut [Enemy]) -> Option<usize> {
        if self.active || !self.is_charged() {
            return None;
        }
        self.charge = 0;
        self.active = true;
        self.remaining = self.duration;
        self.flash = self.flash_secs;

        let radius_sq = self.freeze_radius * self.freeze_radius;
        let mut frozen = 0;
        for enemy in enemies
            .iter_mut()
            .filter(|e| e.alive && e.pos.distance_squared(center) <= radius_sq)
        {
            enemy.freeze(self.duration);
            frozen += 1;
        }
        log::info!("Ultimate activated, {frozen} enemies frozen");
        Some(frozen)
    }

    /// Count down the effect. Returns true on the frame it expires.
    pub fn advance(&mut self, dt: f32, enemies: &mut [Enemy]) -> bool {
        self.flash = (self.flash - dt).max(0.0);
        if !self.active {
            return false;
        }
        self.remaining -= dt;
        if self.remaining > 0.0 {
            return false;
        }
        self.remaining = 0.0;
        self.active = false;
        for enemy in enemies.iter_mut().filter(|e| e.alive && e.is_frozen()) {
            enemy.thaw();
        }
        log::info!("Ultimate expired");
        true
    }
}
