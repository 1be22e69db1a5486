//! Game state and registries
//!
//! Everything one frame of combat reads or writes lives here: the player,
//! the enemy roster, the soul registry and the seeded RNG.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::{Enemy, EnemyKind};
use super::player::Player;
use super::soul::Soul;
use super::world::WorldBounds;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Player died; ticks do nothing until `restart`
    GameOver,
}

/// Discrete things that happened during a tick, for audio, HUD and the
/// outer game-state layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemySpawned { id: u32, kind: EnemyKind },
    EnemyKilled { id: u32, pos: Vec2 },
    SoulSpawned { id: u32 },
    SoulExpired { id: u32 },
    BoltFired,
    HookThrown,
    HookSnagged { soul: u32 },
    HookReleased { soul: u32 },
    HookRetracted,
    SoulCollected { id: u32 },
    PlayerHit { damage: i32, health: i32 },
    PlayerDied,
    UltimateActivated { frozen: usize },
    UltimateExpired,
}

/// Complete combat state
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Simulated seconds since the run started
    pub time: f32,
    pub frame: u64,
    pub player: Player,
    /// Enemy roster (insertion order)
    pub enemies: Vec<Enemy>,
    /// Soul registry (insertion order); the hook refers into it by id
    pub souls: Vec<Soul>,
    /// Counts down to the next enemy spawn
    pub spawn_timer: f32,
    pub kills: u32,
    pub ultimates_used: u32,
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Start a run with the player in the middle of the world
    pub fn new(seed: u64, tuning: Tuning, world: &dyn WorldBounds) -> Self {
        let player = Player::new(world.center(), &tuning);
        log::info!("New run, seed {seed}");
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Playing,
            time: 0.0,
            frame: 0,
            player,
            enemies: Vec::new(),
            souls: Vec::new(),
            spawn_timer: 0.0,
            kills: 0,
            ultimates_used: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Throw away the run and start over with the same seed and tuning
    pub fn restart(&mut self, world: &dyn WorldBounds) {
        *self = Self::new(self.seed, self.tuning.clone(), world);
    }

    /// Allocate a new entity id
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn soul(&self, id: u32) -> Option<&Soul> {
        self.souls.iter().find(|s| s.id == id)
    }

    pub fn enemy(&self, id: u32) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    /// Put an enemy of `kind` at `pos`
    pub fn add_enemy(&mut self, kind: EnemyKind, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy::new(id, kind, pos, &self.tuning));
        self.events.push(GameEvent::EnemySpawned { id, kind });
        log::debug!("Spawned {kind:?} enemy {id} at {pos}");
        id
    }

    /// Spawn a random enemy on the ring around the player
    pub fn spawn_enemy(&mut self, world: &dyn WorldBounds) -> Option<u32> {
        if self.enemies.len() >= self.tuning.spawn.max_enemies {
            return None;
        }
        let angle = self.rng.random_range(0.0..TAU);
        let kind = if self.rng.random_bool(0.5) {
            EnemyKind::Ranged
        } else {
            EnemyKind::Melee
        };
        let offset = Vec2::from_angle(angle) * self.tuning.spawn.ring_radius;
        let pos = world.clamp(self.player.pos + offset);
        Some(self.add_enemy(kind, pos))
    }

    /// Leave a soul where an enemy fell
    pub fn add_soul(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        let soul = Soul::new(id, pos, &self.tuning.soul, &mut self.rng);
        self.souls.push(soul);
        self.events.push(GameEvent::SoulSpawned { id });
        id
    }
}
