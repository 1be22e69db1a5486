//! Combat simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One `tick` per rendered frame, driven by a caller-supplied `dt`
//! - Seeded RNG only
//! - Stable iteration order (insertion order of each registry)
//! - No rendering, audio or platform dependencies

pub mod enemy;
pub mod geometry;
pub mod hook;
pub mod player;
pub mod projectile;
pub mod soul;
pub mod state;
pub mod tick;
pub mod ultimate;
pub mod world;

pub use enemy::{Enemy, EnemyKind};
pub use geometry::{
    closest_point_on_segment, direction_or_default, segment_circle_hit,
    segment_segment_distance_sq,
};
pub use hook::{Hook, HookState, HookStep};
pub use player::Player;
pub use projectile::{Owner, Projectile};
pub use soul::{Soul, SoulState};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, autopilot, tick};
pub use ultimate::Ultimate;
pub use world::{Arena, WorldBounds};
