//! Game balance tunables
//!
//! Every number the simulation reads lives here so designers can override
//! it from a JSON document. Sections missing from the document keep their
//! defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a tuning document
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("cannot read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Player movement and damage-response parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub speed: f32,
    /// Collision circle radius
    pub radius: f32,
    pub max_health: i32,
    /// Grace period after a hit during which further damage is ignored
    pub invulnerability_secs: f32,
    /// How long the renderer tints the player after a hit
    pub hit_flash_secs: f32,
    /// Seconds between player bolts while fire is held
    pub fire_period: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: 300.0,
            radius: 18.0,
            max_health: 100,
            invulnerability_secs: 0.5,
            hit_flash_secs: 0.25,
            fire_period: 0.25,
        }
    }
}

/// Projectile parameters, one set per owner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoltTuning {
    pub speed: f32,
    pub lifetime: f32,
    pub hit_radius: f32,
    pub damage: i32,
}

impl BoltTuning {
    pub fn player_default() -> Self {
        Self {
            speed: 600.0,
            lifetime: 1.5,
            hit_radius: 8.0,
            damage: 25,
        }
    }

    pub fn enemy_default() -> Self {
        Self {
            speed: 300.0,
            lifetime: 3.0,
            hit_radius: 8.0,
            damage: 10,
        }
    }
}

impl Default for BoltTuning {
    fn default() -> Self {
        Self::enemy_default()
    }
}

/// Per-kind enemy parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyProfile {
    pub speed: f32,
    pub health: i32,
    pub radius: f32,
    /// Distance at which the enemy stops closing in (prevents jitter)
    pub stop_distance: f32,
    pub fire_range: f32,
    pub fire_period: f32,
    pub melee_range: f32,
    pub attack_cooldown: f32,
    pub contact_damage: i32,
}

impl EnemyProfile {
    pub fn melee_default() -> Self {
        Self {
            speed: 80.0,
            ..Self::default()
        }
    }

    pub fn ranged_default() -> Self {
        Self {
            speed: 70.0,
            ..Self::default()
        }
    }
}

impl Default for EnemyProfile {
    fn default() -> Self {
        Self {
            speed: 80.0,
            health: 50,
            radius: 20.0,
            stop_distance: 16.0,
            fire_range: 600.0,
            fire_period: 1.5,
            melee_range: 28.0,
            attack_cooldown: 0.8,
            contact_damage: 10,
        }
    }
}

/// Grappling hook parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HookTuning {
    pub speed: f32,
    pub max_distance: f32,
    /// Distance at which an orbiting soul gets caught
    pub snag_radius: f32,
    /// Distance from the player at which an empty hook is retracted
    pub return_radius: f32,
    /// Distance from the player at which a carried soul is let go
    pub release_radius: f32,
}

impl Default for HookTuning {
    fn default() -> Self {
        Self {
            speed: 900.0,
            max_distance: 400.0,
            snag_radius: 25.0,
            return_radius: 20.0,
            release_radius: 30.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoulTuning {
    pub absorb_speed: f32,
    /// Alpha lost per second while flying to the player
    pub fade_rate: f32,
    pub max_age: f32,
    /// Random extra lifetime added per soul, in `[0, max_age_jitter)`
    pub max_age_jitter: f32,
    pub min_spin: f32,
    pub max_spin: f32,
}

impl Default for SoulTuning {
    fn default() -> Self {
        Self {
            absorb_speed: 600.0,
            fade_rate: 4.0,
            max_age: 30.0,
            max_age_jitter: 1.5,
            min_spin: 2.0,
            max_spin: 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UltimateTuning {
    pub max_charge: u32,
    pub souls_per_charge: u32,
    pub duration: f32,
    pub freeze_radius: f32,
    /// Screen flash length on activation (render only)
    pub flash_secs: f32,
}

impl Default for UltimateTuning {
    fn default() -> Self {
        Self {
            max_charge: 3,
            souls_per_charge: 2,
            duration: 3.5,
            freeze_radius: 700.0,
            flash_secs: 0.4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    pub period: f32,
    /// Enemies appear on a ring of this radius around the player
    pub ring_radius: f32,
    pub max_enemies: usize,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            period: 2.0,
            ring_radius: 600.0,
            max_enemies: 64,
        }
    }
}

/// Complete balance sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub player_bolt: BoltTuning,
    pub enemy_bolt: BoltTuning,
    pub melee: EnemyProfile,
    pub ranged: EnemyProfile,
    pub hook: HookTuning,
    pub soul: SoulTuning,
    pub ultimate: UltimateTuning,
    pub spawn: SpawnTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player: PlayerTuning::default(),
            player_bolt: BoltTuning::player_default(),
            enemy_bolt: BoltTuning::enemy_default(),
            melee: EnemyProfile::melee_default(),
            ranged: EnemyProfile::ranged_default(),
            hook: HookTuning::default(),
            soul: SoulTuning::default(),
            ultimate: UltimateTuning::default(),
            spawn: SpawnTuning::default(),
        }
    }
}

fn check(field: &'static str, value: f32) -> Result<(), TuningError> {
    if !value.is_finite() {
        return Err(TuningError::Invalid {
            field,
            reason: "must be finite",
        });
    }
    if value < 0.0 {
        return Err(TuningError::Invalid {
            field,
            reason: "must not be negative",
        });
    }
    Ok(())
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read a tuning document from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load tuning, falling back to defaults if the file is missing or bad
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("{e}; using default tuning");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would break timers or integrations
    pub fn validate(&self) -> Result<(), TuningError> {
        let p = &self.player;
        check("player.speed", p.speed)?;
        check("player.radius", p.radius)?;
        check("player.invulnerability_secs", p.invulnerability_secs)?;
        check("player.hit_flash_secs", p.hit_flash_secs)?;
        check("player.fire_period", p.fire_period)?;
        if p.max_health <= 0 {
            return Err(TuningError::Invalid {
                field: "player.max_health",
                reason: "must be positive",
            });
        }

        check("player_bolt.speed", self.player_bolt.speed)?;
        check("player_bolt.lifetime", self.player_bolt.lifetime)?;
        check("player_bolt.hit_radius", self.player_bolt.hit_radius)?;
        check("enemy_bolt.speed", self.enemy_bolt.speed)?;
        check("enemy_bolt.lifetime", self.enemy_bolt.lifetime)?;
        check("enemy_bolt.hit_radius", self.enemy_bolt.hit_radius)?;

        for profile in [&self.melee, &self.ranged] {
            check("enemy.speed", profile.speed)?;
            check("enemy.radius", profile.radius)?;
            check("enemy.stop_distance", profile.stop_distance)?;
            check("enemy.fire_range", profile.fire_range)?;
            check("enemy.fire_period", profile.fire_period)?;
            check("enemy.melee_range", profile.melee_range)?;
            check("enemy.attack_cooldown", profile.attack_cooldown)?;
            if profile.health <= 0 {
                return Err(TuningError::Invalid {
                    field: "enemy.health",
                    reason: "must be positive",
                });
            }
        }

        let h = &self.hook;
        check("hook.speed", h.speed)?;
        check("hook.max_distance", h.max_distance)?;
        check("hook.snag_radius", h.snag_radius)?;
        check("hook.return_radius", h.return_radius)?;
        check("hook.release_radius", h.release_radius)?;
        // A carried soul must be let go before the hook retracts under it
        if h.release_radius < h.return_radius {
            return Err(TuningError::Invalid {
                field: "hook.release_radius",
                reason: "must be at least hook.return_radius",
            });
        }

        let s = &self.soul;
        check("soul.absorb_speed", s.absorb_speed)?;
        check("soul.fade_rate", s.fade_rate)?;
        check("soul.max_age", s.max_age)?;
        check("soul.max_age_jitter", s.max_age_jitter)?;
        check("soul.min_spin", s.min_spin)?;
        check("soul.max_spin", s.max_spin)?;
        if s.max_spin < s.min_spin {
            return Err(TuningError::Invalid {
                field: "soul.max_spin",
                reason: "must be at least soul.min_spin",
            });
        }

        let u = &self.ultimate;
        check("ultimate.duration", u.duration)?;
        check("ultimate.freeze_radius", u.freeze_radius)?;
        check("ultimate.flash_secs", u.flash_secs)?;
        if u.souls_per_charge == 0 {
            return Err(TuningError::Invalid {
                field: "ultimate.souls_per_charge",
                reason: "must be at least 1",
            });
        }

        check("spawn.period", self.spawn.period)?;
        check("spawn.ring_radius", self.spawn.ring_radius)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "hook": { "speed": 1200.0 } }"#).unwrap();
        assert_eq!(tuning.hook.speed, 1200.0);
        assert_eq!(tuning.hook.max_distance, 400.0);
        assert_eq!(tuning.player, PlayerTuning::default());
        assert_eq!(tuning.ranged.speed, 70.0);
    }

    #[test]
    fn test_rejects_negative_values() {
        let err = Tuning::from_json(r#"{ "player": { "speed": -1.0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "player.speed",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_zero_souls_per_charge() {
        let err = Tuning::from_json(r#"{ "ultimate": { "souls_per_charge": 0 } }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { .. }));
    }

    #[test]
    fn test_rejects_release_inside_return_radius() {
        let err = Tuning::from_json(r#"{ "hook": { "release_radius": 10.0, "return_radius": 20.0 } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "hook.release_radius",
                ..
            }
        ));
        assert!(Tuning::from_json(r#"{ "hook": { "release_radius": 20.0, "return_radius": 20.0 } }"#).is_ok());
    }

    #[test]
    fn test_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning::default();
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let tuning = Tuning::load_or_default("/definitely/not/here.json");
        assert_eq!(tuning, Tuning::default());
    }
}
