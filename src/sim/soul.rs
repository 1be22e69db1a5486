//! Souls left behind by slain enemies
//!
//! A soul drifts on a breathing spiral around the spot where its enemy
//! died until it either expires or the hook drags it in. Once released near
//! the player it flies the last stretch while fading out.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::SoulTuning;

/// Spin slows as `exp(-radius * SPIRAL_DAMPING)`
const SPIRAL_DAMPING: f32 = 0.015;
/// First-order smoothing rate toward the breathing radius
const RADIUS_SMOOTHING: f32 = 0.5;
const BREATH_BASE: f32 = 60.0;
const BREATH_AMPLITUDE: f32 = 80.0;
const BREATH_FREQUENCY: f32 = 0.5;
/// Vertical squash of the orbit ellipse
const ORBIT_SQUASH: f32 = 0.4;
const BOB_AMPLITUDE: f32 = 5.0;
const BOB_FREQUENCY: f32 = 2.0;
const TILT_AMPLITUDE: f32 = 15.0 * PI / 180.0;
const TILT_FREQUENCY: f32 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoulState {
    /// Spiralling around its spawn point
    Orbiting,
    /// Caught by the hook; position is driven by the hook
    Hooked,
    /// Flying into the player and fading
    Absorbing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Soul {
    pub id: u32,
    pub pos: Vec2,
    pub spawn_pos: Vec2,
    pub orbit_angle: f32,
    pub orbit_radius: f32,
    /// Angular speed before radius damping (rad/s)
    pub spin: f32,
    pub age: f32,
    pub max_age: f32,
    pub state: SoulState,
    pub alpha: f32,
    /// Sprite rotation for the renderer
    pub rotation: f32,
    pub alive: bool,
    /// Reached the player's position during absorption
    pub reached: bool,
    /// Already counted toward the ultimate
    pub credited: bool,
}

impl Soul {
    pub fn new(id: u32, pos: Vec2, tuning: &SoulTuning, rng: &mut impl Rng) -> Self {
        let spin = if tuning.max_spin > tuning.min_spin {
            rng.random_range(tuning.min_spin..tuning.max_spin)
        } else {
            tuning.min_spin
        };
        let jitter = if tuning.max_age_jitter > 0.0 {
            rng.random_range(0.0..tuning.max_age_jitter)
        } else {
            0.0
        };
        Self {
            id,
            pos,
            spawn_pos: pos,
            orbit_angle: rng.random_range(0.0..TAU),
            orbit_radius: 0.0,
            spin,
            age: 0.0,
            max_age: tuning.max_age + jitter,
            state: SoulState::Orbiting,
            alpha: 1.0,
            rotation: 0.0,
            alive: true,
            reached: false,
            credited: false,
        }
    }

    pub fn is_catchable(&self) -> bool {
        self.alive && self.state == SoulState::Orbiting
    }

    /// Hand the soul over to a hook
    pub fn snag(&mut self) {
        if self.is_catchable() {
            self.state = SoulState::Hooked;
        }
    }

    /// Start the final flight into the player
    pub fn release(&mut self) {
        if self.alive && self.state != SoulState::Absorbing {
            self.state = SoulState::Absorbing;
        }
    }

    pub fn advance(&mut self, dt: f32, player_pos: Vec2, tuning: &SoulTuning) {
        if !self.alive {
            return;
        }
        match self.state {
            SoulState::Orbiting => self.orbit(dt),
            SoulState::Hooked => {}
            SoulState::Absorbing => self.absorb(dt, player_pos, tuning),
        }
    }

    fn orbit(&mut self, dt: f32) {
        self.age += dt;
        if self.age > self.max_age {
            self.alive = false;
            return;
        }

        let damping = (-self.orbit_radius * SPIRAL_DAMPING).exp();
        self.orbit_angle += self.spin * damping * dt;

        let target = BREATH_BASE + BREATH_AMPLITUDE * (self.age * BREATH_FREQUENCY).sin();
        self.orbit_radius += (target - self.orbit_radius) * RADIUS_SMOOTHING * dt;

        let (sin, cos) = self.orbit_angle.sin_cos();
        self.pos = self.spawn_pos
            + Vec2::new(
                cos * self.orbit_radius,
                sin * self.orbit_radius * ORBIT_SQUASH
                    + BOB_AMPLITUDE * (self.age * BOB_FREQUENCY).sin(),
            );

        let tilt = (self.age * TILT_FREQUENCY).sin() * TILT_AMPLITUDE;
        self.rotation = (sin * ORBIT_SQUASH).atan2(cos) + tilt + PI;
    }

    fn absorb(&mut self, dt: f32, player_pos: Vec2, tuning: &SoulTuning) {
        let to_player = player_pos - self.pos;
        let dist = to_player.length();
        let step = tuning.absorb_speed * dt;
        if dist > step {
            self.pos += to_player / dist * step;
        } else {
            self.pos = player_pos;
            self.reached = true;
        }

        self.alpha -= tuning.fade_rate * dt;
        if self.alpha <= 0.0 {
            self.alpha = 0.0;
            self.alive = false;
        }
    }

    /// Absorption finished (reached the player or faded out) and not yet
    /// counted toward the ultimate
    pub fn ready_to_credit(&self) -> bool {
        self.state == SoulState::Absorbing && !self.credited && (self.reached || !self.alive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn soul_at(pos: Vec2) -> Soul {
        let mut rng = Pcg32::seed_from_u64(7);
        Soul::new(1, pos, &SoulTuning::default(), &mut rng)
    }

    #[test]
    fn test_randomized_lifetime() {
        let soul = soul_at(Vec2::ZERO);
        assert!(soul.max_age >= 30.0 && soul.max_age < 31.5);
        assert!(soul.spin >= 2.0 && soul.spin < 4.0);
        assert_eq!(soul.state, SoulState::Orbiting);
    }

    #[test]
    fn test_orbit_stays_near_spawn() {
        let tuning = SoulTuning::default();
        let mut soul = soul_at(Vec2::new(500.0, 500.0));
        for _ in 0..600 {
            soul.advance(1.0 / 60.0, Vec2::ZERO, &tuning);
        }
        assert!(soul.alive);
        // Radius eases toward at most 140 and the squashed ellipse plus bob
        // never leaves that envelope
        assert!(soul.pos.distance(soul.spawn_pos) < 150.0);
        assert!(soul.orbit_radius > 0.0);
    }

    #[test]
    fn test_expires_after_max_age() {
        let tuning = SoulTuning::default();
        let mut soul = soul_at(Vec2::ZERO);
        soul.max_age = 1.0;
        for _ in 0..10 {
            soul.advance(0.1, Vec2::ZERO, &tuning);
        }
        assert!(soul.alive);
        soul.advance(0.1, Vec2::ZERO, &tuning);
        assert!(!soul.alive);
        assert!(!soul.ready_to_credit());
    }

    #[test]
    fn test_hooked_soul_is_frozen_in_place() {
        let tuning = SoulTuning::default();
        let mut soul = soul_at(Vec2::ZERO);
        soul.snag();
        assert_eq!(soul.state, SoulState::Hooked);
        soul.pos = Vec2::new(3.0, 4.0);
        soul.advance(1.0, Vec2::ZERO, &tuning);
        assert_eq!(soul.pos, Vec2::new(3.0, 4.0));
        assert_eq!(soul.age, 0.0);
    }

    #[test]
    fn test_absorb_snaps_without_overshoot() {
        let tuning = SoulTuning::default();
        let mut soul = soul_at(Vec2::ZERO);
        soul.pos = Vec2::new(100.0, 0.0);
        soul.release();

        // 600 px/s at 60 Hz is 10 px per frame
        soul.advance(1.0 / 60.0, Vec2::ZERO, &tuning);
        assert!((soul.pos.x - 90.0).abs() < 1e-3);
        assert!(!soul.reached);

        soul.pos = Vec2::new(4.0, 0.0);
        soul.advance(1.0 / 60.0, Vec2::ZERO, &tuning);
        assert_eq!(soul.pos, Vec2::ZERO);
        assert!(soul.reached);
        assert!(soul.ready_to_credit());
    }

    #[test]
    fn test_fade_out_kills() {
        let tuning = SoulTuning::default();
        let mut soul = soul_at(Vec2::ZERO);
        soul.release();
        soul.pos = Vec2::new(10_000.0, 0.0);
        for _ in 0..4 {
            soul.advance(0.05, Vec2::ZERO, &tuning);
        }
        assert!(soul.alive);
        soul.advance(0.06, Vec2::ZERO, &tuning);
        assert!(!soul.alive);
        assert_eq!(soul.alpha, 0.0);
        assert!(soul.ready_to_credit());
    }

    #[test]
    fn test_snag_ignores_non_orbiting() {
        let mut soul = soul_at(Vec2::ZERO);
        soul.release();
        soul.snag();
        assert_eq!(soul.state, SoulState::Absorbing);
    }
}
