//! The player-controlled reaper

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::hook::Hook;
use super::projectile::{self, Owner, Projectile};
use super::tick::TickInput;
use super::ultimate::Ultimate;
use crate::tuning::{BoltTuning, HookTuning, Tuning};

/// What the player did on its own during one advance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerActions {
    pub fired: bool,
    pub threw_hook: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub prev_pos: Vec2,
    pub speed: f32,
    pub radius: f32,
    pub health: i32,
    pub max_health: i32,
    /// Damage is ignored while this is above zero
    pub invulnerability: f32,
    pub invulnerability_secs: f32,
    /// Red tint countdown for the renderer
    pub hit_flash: f32,
    pub hit_flash_secs: f32,
    pub fire_cooldown: f32,
    pub fire_period: f32,
    pub projectiles: Vec<Projectile>,
    pub bolt: BoltTuning,
    /// At most one hook in flight; `None` means the hook is at hand
    pub hook: Option<Hook>,
    pub hook_tuning: HookTuning,
    pub ultimate: Ultimate,
    /// Souls absorbed over the run
    pub soul_count: u32,
    /// Sprite mirroring for the renderer (base art faces left)
    pub facing_right: bool,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        let p = &tuning.player;
        Self {
            pos,
            prev_pos: pos,
            speed: p.speed,
            radius: p.radius,
            health: p.max_health,
            max_health: p.max_health,
            invulnerability: 0.0,
            invulnerability_secs: p.invulnerability_secs,
            hit_flash: 0.0,
            hit_flash_secs: p.hit_flash_secs,
            fire_cooldown: 0.0,
            fire_period: p.fire_period,
            projectiles: Vec::new(),
            bolt: tuning.player_bolt,
            hook: None,
            hook_tuning: tuning.hook,
            ultimate: Ultimate::new(&tuning.ultimate),
            soul_count: 0,
            facing_right: false,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerability > 0.0
    }

    pub fn advance(&mut self, dt: f32, input: &TickInput) -> PlayerActions {
        let mut actions = PlayerActions::default();
        self.prev_pos = self.pos;

        let axis = input.move_axis.clamp(Vec2::NEG_ONE, Vec2::ONE);
        let axis = if axis.length_squared() > 1.0 {
            axis.normalize()
        } else {
            axis
        };
        if axis.x > 0.0 {
            self.facing_right = true;
        } else if axis.x < 0.0 {
            self.facing_right = false;
        }
        self.pos += axis * self.speed * dt;

        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);
        if input.fire && self.fire_cooldown <= 0.0 {
            self.projectiles.push(Projectile::spawn(
                self.pos,
                input.aim - self.pos,
                Owner::Player,
                &self.bolt,
            ));
            self.fire_cooldown = self.fire_period;
            actions.fired = true;
        }
        projectile::advance_all(&mut self.projectiles, dt);

        if input.hook {
            actions.threw_hook = self.throw_hook(input.aim);
        }

        self.invulnerability = (self.invulnerability - dt).max(0.0);
        self.hit_flash = (self.hit_flash - dt).max(0.0);
        actions
    }

    /// Returns false if a hook is already out
    pub fn throw_hook(&mut self, aim_point: Vec2) -> bool {
        if self.hook.as_ref().is_some_and(|h| h.active) {
            return false;
        }
        self.hook = Some(Hook::throw(self.pos, aim_point, &self.hook_tuning));
        true
    }

    /// Returns true if the hit landed
    pub fn apply_damage(&mut self, amount: i32) -> bool {
        if amount <= 0 || self.health <= 0 || self.is_invulnerable() {
            return false;
        }
        self.health = self.health.saturating_sub(amount).max(0);
        self.invulnerability = self.invulnerability_secs;
        self.hit_flash = self.hit_flash_secs;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn player() -> Player {
        Player::new(Vec2::ZERO, &Tuning::default())
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let mut p = player();
        let input = TickInput {
            move_axis: Vec2::new(1.0, 1.0),
            ..Default::default()
        };
        p.advance(1.0, &input);
        assert!((p.pos.length() - p.speed).abs() < 1e-2);
        assert!(p.facing_right);
        assert_eq!(p.prev_pos, Vec2::ZERO);
    }

    #[test]
    fn test_analog_axis_keeps_magnitude() {
        let mut p = player();
        let input = TickInput {
            move_axis: Vec2::new(-0.5, 0.0),
            ..Default::default()
        };
        p.advance(1.0, &input);
        assert!((p.pos.x + p.speed * 0.5).abs() < 1e-3);
        assert!(!p.facing_right);
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut p = player();
        let input = TickInput {
            fire: true,
            aim: Vec2::new(0.0, 100.0),
            ..Default::default()
        };
        assert!(p.advance(DT, &input).fired);
        assert_eq!(p.projectiles.len(), 1);
        assert!(p.projectiles[0].dir.y > 0.99);
        assert_eq!(p.projectiles[0].owner, Owner::Player);

        assert!(!p.advance(DT, &input).fired);
        for _ in 0..20 {
            p.advance(DT, &input);
        }
        assert!(p.projectiles.len() >= 2);
    }

    #[test]
    fn test_damage_and_grace_period() {
        let mut p = player();
        assert!(p.apply_damage(10));
        assert_eq!(p.health, 90);
        assert!(p.is_invulnerable());
        assert!(p.hit_flash > 0.0);

        assert!(!p.apply_damage(10));
        assert_eq!(p.health, 90);

        let idle = TickInput::default();
        p.advance(0.4, &idle);
        assert!(!p.apply_damage(10));
        p.advance(0.2, &idle);
        assert!(p.apply_damage(10));
        assert_eq!(p.health, 80);
    }

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut p = player();
        assert!(!p.apply_damage(0));
        assert!(!p.apply_damage(-50));
        assert!(p.apply_damage(i32::MAX));
        assert_eq!(p.health, 0);
        assert!(p.is_dead());
        p.invulnerability = 0.0;
        assert!(!p.apply_damage(5));
        assert_eq!(p.health, 0);
    }

    #[test]
    fn test_single_hook_in_flight() {
        let mut p = player();
        assert!(p.throw_hook(Vec2::new(100.0, 0.0)));
        assert!(!p.throw_hook(Vec2::new(0.0, 100.0)));
        assert!(p.hook.as_ref().is_some_and(|h| h.dir.x > 0.99));

        p.hook = None;
        let input = TickInput {
            hook: true,
            aim: Vec2::new(0.0, -50.0),
            ..Default::default()
        };
        assert!(p.advance(DT, &input).threw_hook);
        assert!(p.hook.is_some());
    }
}
