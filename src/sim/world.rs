//! Playable area boundary
//!
//! The simulation only needs to know how big the world is and how to pull a
//! point back inside it; whatever draws the map implements this.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};

pub trait WorldBounds {
    /// World extent in pixels, origin at the top-left corner
    fn size(&self) -> Vec2;

    fn clamp(&self, pos: Vec2) -> Vec2 {
        pos.clamp(Vec2::ZERO, self.size())
    }

    fn contains(&self, pos: Vec2) -> bool {
        let size = self.size();
        pos.x >= 0.0 && pos.y >= 0.0 && pos.x <= size.x && pos.y <= size.y
    }

    fn center(&self) -> Vec2 {
        self.size() * 0.5
    }
}

/// A plain rectangular map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(WORLD_WIDTH, WORLD_HEIGHT)
    }
}

impl WorldBounds for Arena {
    fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}
