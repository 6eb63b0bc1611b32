//! Game settings and tuning
//!
//! Persisted as JSON next to the binary. Every field has a default so a
//! partial file still loads.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Longest timer a setting may ask for, in seconds
pub const MAX_DELAY_SECS: f32 = 3600.0;

/// Player movement tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    /// Lateral speed (units/s) at full stick deflection
    pub move_speed: f32,
    /// Magnitude of the force pulling a sticking player into the surface
    pub stick_force: f32,
    /// Radius of the surface proximity probe
    pub stick_radius: f32,
    /// Dash velocity magnitude
    pub dash_speed: f32,
    /// Dash duration in seconds
    pub dash_duration: f32,
    /// Gravity scale while not sticking
    pub free_gravity_scale: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            move_speed: 25.0,
            stick_force: 100.0,
            stick_radius: 1.0,
            dash_speed: 50.0,
            dash_duration: 0.2,
            free_gravity_scale: 2.0,
        }
    }
}

/// Dodgeball tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallTuning {
    /// Health removed by a live hit
    pub damage: i32,
    /// Seconds after a throw before the ball returns to a spawn point
    pub respawn_delay: f32,
    /// Impulse magnitude applied along the aim direction on throw
    pub throw_strength: f32,
    /// Maximum holder distance for a pickup
    pub pickup_range: f32,
    /// Distance from the holder's center along the aim while held
    pub hold_offset: f32,
    /// Ball respawns immediately once it falls below this height
    pub floor_y: f32,
    /// Pick up on proximity alone, without the pickup action
    pub auto_pickup: bool,
}

impl Default for BallTuning {
    fn default() -> Self {
        Self {
            damage: 10,
            respawn_delay: 2.0,
            throw_strength: 15.0,
            pickup_range: 2.0,
            hold_offset: 0.55,
            floor_y: -10.0,
            auto_pickup: true,
        }
    }
}

/// Round flow tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundTuning {
    /// Starting (and maximum) health per round
    pub max_health: i32,
    /// Pause between a resolved round and the next one, in seconds
    pub round_end_delay: f32,
}

impl Default for RoundTuning {
    fn default() -> Self {
        Self {
            max_health: 100,
            round_end_delay: 3.0,
        }
    }
}

/// Audio preferences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            muted: false,
        }
    }
}

/// All persisted settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub movement: MovementTuning,
    pub ball: BallTuning,
    pub round: RoundTuning,
    pub audio: AudioSettings,
}

impl Settings {
    /// Reject values that would break the simulation
    pub fn validate(&self) -> Result<()> {
        let m = &self.movement;
        let positive = [
            ("movement.move_speed", m.move_speed),
            ("movement.stick_radius", m.stick_radius),
            ("movement.dash_speed", m.dash_speed),
            ("movement.dash_duration", m.dash_duration),
            ("ball.throw_strength", self.ball.throw_strength),
            ("ball.pickup_range", self.ball.pickup_range),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(GameError::InvalidTuning(format!("{name} must be > 0, got {value}")));
            }
        }

        let non_negative = [
            ("movement.stick_force", m.stick_force),
            ("movement.free_gravity_scale", m.free_gravity_scale),
            ("ball.respawn_delay", self.ball.respawn_delay),
            ("ball.hold_offset", self.ball.hold_offset),
            ("round.round_end_delay", self.round.round_end_delay),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(GameError::InvalidTuning(format!("{name} must be >= 0, got {value}")));
            }
        }

        let timers = [
            ("movement.dash_duration", m.dash_duration),
            ("ball.respawn_delay", self.ball.respawn_delay),
            ("round.round_end_delay", self.round.round_end_delay),
        ];
        for (name, value) in timers {
            if value > MAX_DELAY_SECS {
                return Err(GameError::InvalidTuning(format!(
                    "{name} must be at most {MAX_DELAY_SECS}s, got {value}"
                )));
            }
        }

        if self.ball.damage <= 0 {
            return Err(GameError::InvalidTuning("ball.damage must be > 0".into()));
        }
        if self.round.max_health <= 0 {
            return Err(GameError::InvalidTuning("round.max_health must be > 0".into()));
        }
        if !(0.0..=1.0).contains(&self.audio.master_volume) {
            return Err(GameError::InvalidTuning(format!(
                "audio.master_volume must be within 0..=1, got {}",
                self.audio.master_volume
            )));
        }
        Ok(())
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings ({}): {}", path.as_ref().display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}
