//! Crook & Souls - combat simulation core
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (entities, collisions, combat resolution)
//! - `tuning`: Data-driven game balance
//! - `audio`: Sound cue boundary (events in, playback elsewhere)

pub mod audio;
pub mod sim;
pub mod tuning;

pub use audio::{AudioMixer, AudioSink, LogSink, SoundEffect};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed visual frame step used by the headless runner (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Default world size in pixels
    pub const WORLD_WIDTH: f32 = 2400.0;
    pub const WORLD_HEIGHT: f32 = 1600.0;
}
