//! Enemy agents: close in on the player, bite on contact, and (ranged kind)
//! lob bolts from a distance

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::projectile::{self, Owner, Projectile};
use crate::tuning::{BoltTuning, EnemyProfile, Tuning};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Contact damage only
    Melee,
    /// Shoots bolts at the player when in range
    Ranged,
}

impl EnemyKind {
    pub fn can_shoot(self) -> bool {
        matches!(self, EnemyKind::Ranged)
    }

    pub fn profile(self, tuning: &Tuning) -> EnemyProfile {
        match self {
            EnemyKind::Melee => tuning.melee,
            EnemyKind::Ranged => tuning.ranged,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub prev_pos: Vec2,
    /// Current speed (zero while frozen)
    pub speed: f32,
    /// Speed to restore when a freeze ends
    pub base_speed: f32,
    pub radius: f32,
    pub stop_distance: f32,
    pub health: i32,
    pub alive: bool,
    pub can_shoot: bool,
    pub fire_cooldown: f32,
    pub fire_period: f32,
    pub fire_range: f32,
    pub projectiles: Vec<Projectile>,
    pub bolt: BoltTuning,
    pub melee_range: f32,
    pub attack_cooldown: f32,
    pub attack_timer: f32,
    pub contact_damage: i32,
    pub frozen_timer: f32,
    /// Sprite mirroring for the renderer (base art faces left)
    pub facing_right: bool,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2, tuning: &Tuning) -> Self {
        let profile = kind.profile(tuning);
        Self {
            id,
            kind,
            pos,
            prev_pos: pos,
            speed: profile.speed,
            base_speed: profile.speed,
            radius: profile.radius,
            stop_distance: profile.stop_distance,
            health: profile.health,
            alive: true,
            can_shoot: kind.can_shoot(),
            fire_cooldown: 0.0,
            fire_period: profile.fire_period,
            fire_range: profile.fire_range,
            projectiles: Vec::new(),
            bolt: tuning.enemy_bolt,
            melee_range: profile.melee_range,
            attack_cooldown: profile.attack_cooldown,
            attack_timer: 0.0,
            contact_damage: profile.contact_damage,
            frozen_timer: 0.0,
            facing_right: false,
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen_timer > 0.0
    }

    pub fn advance(&mut self, dt: f32, target: Vec2) {
        self.prev_pos = self.pos;
        self.attack_timer = (self.attack_timer - dt).max(0.0);
        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);
        if self.is_frozen() {
            self.frozen_timer = (self.frozen_timer - dt).max(0.0);
            if !self.is_frozen() {
                self.thaw();
            }
        }

        if self.alive {
            let to_target = target - self.pos;
            let dist = to_target.length();
            if dist > self.stop_distance {
                let dir = to_target / dist;
                self.pos += dir * self.speed * dt;
                if dir.x > 0.0 {
                    self.facing_right = true;
                } else if dir.x < 0.0 {
                    self.facing_right = false;
                }
            }

            if self.can_shoot && dist <= self.fire_range && self.fire_cooldown <= 0.0 {
                self.projectiles
                    .push(Projectile::spawn(self.pos, to_target, Owner::Enemy, &self.bolt));
                self.fire_cooldown = self.fire_period;
            }
        }

        projectile::advance_all(&mut self.projectiles, dt);
    }

    /// Returns true exactly once: on the hit that kills
    pub fn apply_damage(&mut self, amount: i32) -> bool {
        if !self.alive || amount <= 0 {
            return false;
        }
        self.health = self.health.saturating_sub(amount).max(0);
        if self.health == 0 {
            self.alive = false;
            return true;
        }
        false
    }

    /// Stop in place and hold fire for `duration`; in-flight bolts vanish
    pub fn freeze(&mut self, duration: f32) {
        if !self.is_frozen() {
            self.base_speed = self.speed;
        }
        self.speed = 0.0;
        self.can_shoot = false;
        self.projectiles.clear();
        self.frozen_timer = duration;
    }

    /// Restore pre-freeze speed and the kind's firing ability
    pub fn thaw(&mut self) {
        self.speed = self.base_speed;
        self.can_shoot = self.kind.can_shoot();
        self.frozen_timer = 0.0;
    }

    /// Within biting distance of a circle at `pos` with `radius`
    pub fn in_melee_reach(&self, pos: Vec2, radius: f32) -> bool {
        let reach = radius + self.melee_range;
        self.pos.distance_squared(pos) <= reach * reach
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn enemy(kind: EnemyKind, pos: Vec2) -> Enemy {
        Enemy::new(1, kind, pos, &Tuning::default())
    }

    #[test]
    fn test_kind_capabilities() {
        let tuning = Tuning::default();
        assert!(!enemy(EnemyKind::Melee, Vec2::ZERO).can_shoot);
        assert!(enemy(EnemyKind::Ranged, Vec2::ZERO).can_shoot);
        assert_eq!(enemy(EnemyKind::Melee, Vec2::ZERO).speed, tuning.melee.speed);
        assert_eq!(enemy(EnemyKind::Ranged, Vec2::ZERO).speed, tuning.ranged.speed);
    }

    #[test]
    fn test_seeks_target() {
        let mut e = enemy(EnemyKind::Melee, Vec2::new(100.0, 0.0));
        e.advance(1.0, Vec2::ZERO);
        assert!((e.pos.x - 20.0).abs() < 1e-3);
        assert_eq!(e.prev_pos, Vec2::new(100.0, 0.0));
        assert!(!e.facing_right);

        let mut e = enemy(EnemyKind::Melee, Vec2::new(-100.0, 0.0));
        e.advance(DT, Vec2::ZERO);
        assert!(e.facing_right);
    }

    #[test]
    fn test_holds_inside_stop_distance() {
        let mut e = enemy(EnemyKind::Melee, Vec2::new(10.0, 0.0));
        e.advance(DT, Vec2::ZERO);
        assert_eq!(e.pos, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_ranged_fires_on_cooldown() {
        let mut e = enemy(EnemyKind::Ranged, Vec2::new(300.0, 0.0));
        e.advance(DT, Vec2::ZERO);
        assert_eq!(e.projectiles.len(), 1);
        assert!(e.projectiles[0].dir.x < -0.99);
        assert!((e.fire_cooldown - e.fire_period).abs() < 1e-6);

        e.advance(DT, Vec2::ZERO);
        assert_eq!(e.projectiles.len(), 1);

        // Out of range: no shot even when the cooldown is over
        let mut far = enemy(EnemyKind::Ranged, Vec2::new(5000.0, 0.0));
        far.advance(DT, Vec2::ZERO);
        assert!(far.projectiles.is_empty());
    }

    #[test]
    fn test_melee_never_fires() {
        let mut e = enemy(EnemyKind::Melee, Vec2::new(300.0, 0.0));
        for _ in 0..200 {
            e.advance(DT, Vec2::ZERO);
        }
        assert!(e.projectiles.is_empty());
    }

    #[test]
    fn test_death_is_reported_once() {
        let mut e = enemy(EnemyKind::Melee, Vec2::ZERO);
        e.health = 5;
        assert!(!e.apply_damage(0));
        assert!(!e.apply_damage(-3));
        assert!(e.apply_damage(7));
        assert!(!e.alive);
        assert_eq!(e.health, 0);
        assert!(!e.apply_damage(7));
        assert_eq!(e.health, 0);
    }

    #[test]
    fn test_freeze_and_thaw_restore_kind_speed() {
        let mut e = enemy(EnemyKind::Ranged, Vec2::new(300.0, 0.0));
        e.advance(DT, Vec2::ZERO);
        assert!(!e.projectiles.is_empty());

        e.freeze(1.0);
        assert_eq!(e.speed, 0.0);
        assert!(!e.can_shoot);
        assert!(e.projectiles.is_empty());
        let pos = e.pos;
        e.advance(0.5, Vec2::ZERO);
        assert_eq!(e.pos, pos);

        e.advance(0.6, Vec2::ZERO);
        assert!(!e.is_frozen());
        assert_eq!(e.speed, Tuning::default().ranged.speed);
        assert!(e.can_shoot);
    }

    #[test]
    fn test_refreeze_keeps_original_speed() {
        let mut e = enemy(EnemyKind::Melee, Vec2::ZERO);
        e.freeze(1.0);
        e.freeze(1.0);
        e.thaw();
        assert_eq!(e.speed, Tuning::default().melee.speed);
    }

    #[test]
    fn test_melee_reach() {
        let e = enemy(EnemyKind::Melee, Vec2::new(40.0, 0.0));
        assert!(e.in_melee_reach(Vec2::ZERO, 18.0));
        assert!(!e.in_melee_reach(Vec2::new(-10.0, 0.0), 18.0));
    }
}
