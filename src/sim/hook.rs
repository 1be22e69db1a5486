//! The crook: a thrown grappling hook that drags souls back to the player
//!
//! Flies straight out, turns around at its reach limit or on catching a
//! soul, then homes on the player. The caught soul is referenced by id only;
//! the soul registry owns it, so the hook looks it up every frame and shrugs
//! if it has vanished.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::direction_or_default;
use super::soul::Soul;
use crate::tuning::HookTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HookState {
    Forward,
    Returning,
}

/// Notable things that happened to the hook during one advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStep {
    Moved,
    /// Caught the soul with this id and turned around
    Snagged(u32),
    /// Let the carried soul go near the player; hook is now inactive
    Released(u32),
    /// Came back empty; hook is now inactive
    Retracted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hook {
    pub pos: Vec2,
    /// Player position at the moment of the throw
    pub origin: Vec2,
    pub dir: Vec2,
    pub speed: f32,
    pub max_distance: f32,
    pub snag_radius: f32,
    pub return_radius: f32,
    pub release_radius: f32,
    pub state: HookState,
    /// Id of the caught soul in the soul registry
    pub snagged: Option<u32>,
    pub active: bool,
    /// Sprite rotation for the renderer (radians)
    pub rotation: f32,
}

impl Hook {
    pub fn throw(origin: Vec2, aim_point: Vec2, tuning: &HookTuning) -> Self {
        let dir = direction_or_default(aim_point - origin);
        Self {
            pos: origin,
            origin,
            dir,
            speed: tuning.speed,
            max_distance: tuning.max_distance,
            snag_radius: tuning.snag_radius,
            return_radius: tuning.return_radius,
            release_radius: tuning.release_radius,
            state: HookState::Forward,
            snagged: None,
            active: true,
            rotation: dir.y.atan2(dir.x),
        }
    }

    pub fn distance_travelled(&self) -> f32 {
        self.pos.distance(self.origin)
    }

    pub fn advance(&mut self, dt: f32, player_pos: Vec2, souls: &mut [Soul]) -> HookStep {
        if !self.active {
            return HookStep::Moved;
        }
        match self.state {
            HookState::Forward => self.fly_out(dt, souls),
            HookState::Returning => self.fly_back(dt, player_pos, souls),
        }
    }

    fn fly_out(&mut self, dt: f32, souls: &mut [Soul]) -> HookStep {
        self.pos += self.dir * self.speed * dt;
        self.rotation = self.dir.y.atan2(self.dir.x);

        let reach_sq = self.snag_radius * self.snag_radius;
        if let Some(soul) = souls
            .iter_mut()
            .find(|s| s.is_catchable() && s.pos.distance_squared(self.pos) < reach_sq)
        {
            soul.snag();
            soul.pos = self.pos;
            self.snagged = Some(soul.id);
            self.state = HookState::Returning;
            log::debug!("Hook snagged soul {}", soul.id);
            return HookStep::Snagged(soul.id);
        }

        if self.distance_travelled() >= self.max_distance {
            self.state = HookState::Returning;
        }
        HookStep::Moved
    }

    fn fly_back(&mut self, dt: f32, player_pos: Vec2, souls: &mut [Soul]) -> HookStep {
        let to_player = player_pos - self.pos;
        let dist = to_player.length();
        if dist > 0.0 {
            let step = (self.speed * dt).min(dist);
            self.pos += to_player / dist * step;
            self.rotation = to_player.y.atan2(to_player.x);
        }
        let remaining = self.pos.distance(player_pos);

        if let Some(id) = self.snagged {
            match souls.iter_mut().find(|s| s.id == id && s.alive) {
                Some(soul) => {
                    soul.pos = self.pos;
                    if remaining < self.release_radius {
                        soul.release();
                        self.snagged = None;
                        self.active = false;
                        return HookStep::Released(id);
                    }
                }
                None => {
                    log::debug!("Hook lost soul {id}");
                    self.snagged = None;
                }
            }
        }

        if remaining < self.return_radius {
            self.active = false;
            return HookStep::Retracted;
        }
        HookStep::Moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::soul::SoulState;
    use crate::tuning::SoulTuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const DT: f32 = 1.0 / 60.0;

    fn soul_at(id: u32, pos: Vec2) -> Soul {
        let mut rng = Pcg32::seed_from_u64(id as u64);
        Soul::new(id, pos, &SoulTuning::default(), &mut rng)
    }

    #[test]
    fn test_round_trip_without_souls() {
        let tuning = HookTuning::default();
        let mut hook = Hook::throw(Vec2::ZERO, Vec2::new(100.0, 0.0), &tuning);
        let mut souls: Vec<Soul> = Vec::new();

        let mut peak = 0.0f32;
        let mut frames = 0;
        while hook.state == HookState::Forward {
            assert_eq!(hook.advance(DT, Vec2::ZERO, &mut souls), HookStep::Moved);
            peak = peak.max(hook.distance_travelled());
            frames += 1;
            assert!(frames < 100);
        }
        assert!(peak >= tuning.max_distance);

        let mut last = HookStep::Moved;
        while hook.active {
            last = hook.advance(DT, Vec2::ZERO, &mut souls);
            assert!(!matches!(last, HookStep::Snagged(_) | HookStep::Released(_)));
            frames += 1;
            assert!(frames < 200);
        }
        assert_eq!(last, HookStep::Retracted);
        assert!(hook.pos.length() < tuning.return_radius);
        assert!(hook.snagged.is_none());
    }

    #[test]
    fn test_snag_turns_hook_early() {
        let tuning = HookTuning::default();
        let mut hook = Hook::throw(Vec2::ZERO, Vec2::new(1.0, 0.0), &tuning);
        let mut souls = vec![soul_at(7, Vec2::new(150.0, 10.0))];

        let mut snagged_at = None;
        for _ in 0..60 {
            if let HookStep::Snagged(id) = hook.advance(DT, Vec2::ZERO, &mut souls) {
                snagged_at = Some(id);
                break;
            }
        }
        assert_eq!(snagged_at, Some(7));
        assert_eq!(hook.state, HookState::Returning);
        assert!(hook.distance_travelled() < tuning.max_distance);
        assert_eq!(souls[0].state, SoulState::Hooked);

        // The soul rides the hook until it is released
        loop {
            let step = hook.advance(DT, Vec2::ZERO, &mut souls);
            if step == HookStep::Released(7) {
                break;
            }
            assert_eq!(souls[0].pos, hook.pos);
        }
        assert!(!hook.active);
        assert_eq!(souls[0].state, SoulState::Absorbing);
        assert!(hook.pos.length() < tuning.release_radius);
    }

    #[test]
    fn test_return_follows_moving_player() {
        let tuning = HookTuning::default();
        let mut hook = Hook::throw(Vec2::ZERO, Vec2::X, &tuning);
        hook.state = HookState::Returning;
        hook.pos = Vec2::new(200.0, 0.0);
        let mut souls: Vec<Soul> = Vec::new();
        hook.advance(DT, Vec2::new(200.0, 300.0), &mut souls);
        // Re-aimed at the player, not back along the throw direction
        assert!(hook.pos.x > 199.9);
        assert!(hook.pos.y > 0.0);
    }

    #[test]
    fn test_lost_payload_is_tolerated() {
        let tuning = HookTuning::default();
        let mut hook = Hook::throw(Vec2::ZERO, Vec2::X, &tuning);
        let mut souls = vec![soul_at(3, Vec2::new(10.0, 0.0))];
        assert_eq!(hook.advance(DT, Vec2::ZERO, &mut souls), HookStep::Snagged(3));

        // Registry drops the soul behind the hook's back
        souls.clear();
        let mut last = HookStep::Moved;
        for _ in 0..60 {
            last = hook.advance(DT, Vec2::ZERO, &mut souls);
            if !hook.active {
                break;
            }
        }
        assert!(hook.snagged.is_none());
        assert_eq!(last, HookStep::Retracted);
    }

    #[test]
    fn test_inactive_hook_is_inert() {
        let tuning = HookTuning::default();
        let mut hook = Hook::throw(Vec2::ZERO, Vec2::X, &tuning);
        hook.active = false;
        let pos = hook.pos;
        assert_eq!(hook.advance(DT, Vec2::ZERO, &mut []), HookStep::Moved);
        assert_eq!(hook.pos, pos);
    }

    #[test]
    fn test_zero_length_throw() {
        let hook = Hook::throw(Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0), &HookTuning::default());
        assert_eq!(hook.dir, Vec2::X);
    }
}
