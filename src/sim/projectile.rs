//! Bolts fired by the player and by ranged enemies

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{direction_or_default, segment_segment_distance_sq};
use crate::tuning::BoltTuning;

/// Who fired a projectile (decides what it can hurt)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    /// Position at the start of the last advance (swept tests use prev -> pos)
    pub prev_pos: Vec2,
    /// Unit travel direction
    pub dir: Vec2,
    pub speed: f32,
    pub remaining_life: f32,
    pub hit_radius: f32,
    pub owner: Owner,
    pub damage: i32,
    pub alive: bool,
}

impl Projectile {
    /// Fire a bolt from `pos` along `aim` (need not be normalized)
    pub fn spawn(pos: Vec2, aim: Vec2, owner: Owner, bolt: &BoltTuning) -> Self {
        Self {
            pos,
            prev_pos: pos,
            dir: direction_or_default(aim),
            speed: bolt.speed,
            remaining_life: bolt.lifetime,
            hit_radius: bolt.hit_radius,
            owner,
            damage: bolt.damage,
            alive: bolt.lifetime > 0.0,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        if !self.alive {
            return;
        }
        self.prev_pos = self.pos;
        self.pos += self.dir * self.speed * dt;
        self.remaining_life -= dt;
        if self.remaining_life <= 0.0 {
            self.alive = false;
        }
    }

    /// Swept test against a circle that moved from `from` to `to` this frame
    pub fn sweep_hits(&self, from: Vec2, to: Vec2, radius: f32) -> bool {
        let reach = radius + self.hit_radius;
        segment_segment_distance_sq(self.prev_pos, self.pos, from, to) <= reach * reach
    }

    /// Rotation for the renderer (radians, 0 = +X)
    pub fn heading(&self) -> f32 {
        self.dir.y.atan2(self.dir.x)
    }
}

/// Advance every bolt and drop the dead ones
pub fn advance_all(projectiles: &mut Vec<Projectile>, dt: f32) {
    for p in projectiles.iter_mut() {
        p.advance(dt);
    }
    prune(projectiles);
}

pub fn prune(projectiles: &mut Vec<Projectile>) {
    projectiles.retain(|p| p.alive);
}
