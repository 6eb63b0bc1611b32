//! Sticky Dodgeball - surface-sticking multiplayer dodgeball
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, ball, rounds, physics contract)
//! - `settings`: Data-driven tuning and audio preferences
//! - `results`: End-of-match standings
//! - `audio`: Volume plumbing over an optional audio sink
//! - `scene`: Scene names and the scene service contract

pub mod audio;
pub mod error;
pub mod results;
pub mod scene;
pub mod settings;
pub mod sim;

pub use error::{GameError, Result};
pub use results::{MatchResults, Standing};
pub use settings::{BallTuning, MovementTuning, RoundTuning, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (50 Hz physics)
    pub const SIM_DT: f32 = 1.0 / 50.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// World gravity (units/s², applied scaled by each body's gravity scale)
    pub const GRAVITY: f32 = -9.81;

    /// Collision radius of a player body
    pub const PLAYER_RADIUS: f32 = 0.5;
    /// Collision radius of the dodgeball
    pub const BALL_RADIUS: f32 = 0.25;

    /// Aim stick dead zone; below this the player's local right is used
    pub const AIM_DEAD_ZONE: f32 = 0.1;
}

/// Convert a tick count to seconds
#[inline]
pub fn ticks_to_secs(ticks: u64) -> f32 {
    ticks as f32 * consts::SIM_DT
}

/// Convert a duration in seconds to a whole number of ticks (rounded up)
#[inline]
pub fn secs_to_ticks(secs: f32, dt: f32) -> u64 {
    if secs <= 0.0 || dt <= 0.0 {
        return 0;
    }
    // Absorb f32 noise so 0.2 / 0.02 stays 10 ticks
    ((secs / dt) - 1e-4).ceil() as u64
}

/// Unit vector for a z-rotation (the body's local right axis)
#[inline]
pub fn right_vector(rotation: f32) -> Vec2 {
    Vec2::from_angle(rotation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secs_to_ticks_rounds_up() {
        assert_eq!(secs_to_ticks(0.2, consts::SIM_DT), 10);
        assert_eq!(secs_to_ticks(0.21, consts::SIM_DT), 11);
        assert_eq!(secs_to_ticks(0.0, consts::SIM_DT), 0);
    }

    #[test]
    fn test_right_vector() {
        let r = right_vector(std::f32::consts::FRAC_PI_2);
        assert!(r.x.abs() < 1e-6);
        assert!((r.y - 1.0).abs() < 1e-6);
    }
}
