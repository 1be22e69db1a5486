//! Sound cue boundary
//!
//! The simulation never plays audio. It reports `GameEvent`s; this module
//! turns them into cues and hands them to whatever backend implements
//! `AudioSink`.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player bolt fired
    Shoot,
    /// Hook thrown
    HookThrow,
    /// Hook caught a soul
    HookSnag,
    /// Soul absorbed by the player
    SoulCollect,
    /// Enemy slain
    EnemyDeath,
    /// Player took damage
    PlayerHurt,
    /// Freeze ultimate fired
    Ultimate,
    /// Run over
    GameOver,
}

impl GameEvent {
    /// Cue to play for this event, if any
    pub fn sound(&self) -> Option<SoundEffect> {
        match self {
            GameEvent::BoltFired => Some(SoundEffect::Shoot),
            GameEvent::HookThrown => Some(SoundEffect::HookThrow),
            GameEvent::HookSnagged { .. } => Some(SoundEffect::HookSnag),
            GameEvent::SoulCollected { .. } => Some(SoundEffect::SoulCollect),
            GameEvent::EnemyKilled { .. } => Some(SoundEffect::EnemyDeath),
            GameEvent::PlayerHit { .. } => Some(SoundEffect::PlayerHurt),
            GameEvent::UltimateActivated { .. } => Some(SoundEffect::Ultimate),
            GameEvent::PlayerDied => Some(SoundEffect::GameOver),
            GameEvent::EnemySpawned { .. }
            | GameEvent::SoulSpawned { .. }
            | GameEvent::SoulExpired { .. }
            | GameEvent::HookReleased { .. }
            | GameEvent::HookRetracted
            | GameEvent::UltimateExpired => None,
        }
    }
}

/// Fire-and-forget playback backend
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Volume settings applied before cues reach the sink
#[derive(Debug, Clone)]
pub struct AudioMixer {
    pub master_volume: f32,
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for AudioMixer {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl AudioMixer {
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Route every cue-bearing event to `sink`
    pub fn dispatch(&self, events: &[GameEvent], sink: &mut dyn AudioSink) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        for effect in events.iter().filter_map(GameEvent::sound) {
            sink.play(effect, vol);
        }
    }
}

/// Sink that writes cues to the log (headless runs)
#[derive(Debug, Default)]
pub struct LogSink {
    pub played: usize,
}

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        self.played += 1;
        log::trace!("sfx {effect:?} @ {volume:.2}");
    }
}
