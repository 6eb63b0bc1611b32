//! Screen wrap
//!
//! Leaving the camera rectangle on one side re-enters on the opposite side.
//! Only positions move; velocities are never touched.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Camera bounds in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Bounds centered on the origin
    pub fn centered(half_width: f32, half_height: f32) -> Self {
        Self::new(
            Vec2::new(-half_width, -half_height),
            Vec2::new(half_width, half_height),
        )
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

/// Which axes wrap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WrapAxes {
    /// Left/right only (the ball can fall out of the bottom)
    Horizontal,
    /// Left/right and top/bottom (players)
    Both,
}

#[inline]
fn wrap_axis(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        max
    } else if value > max {
        min
    } else {
        value
    }
}

/// Wrap a position to the opposite bound on each axis it has left
pub fn wrap_position(pos: Vec2, bounds: &Bounds, axes: WrapAxes) -> Vec2 {
    let x = wrap_axis(pos.x, bounds.min.x, bounds.max.x);
    let y = match axes {
        WrapAxes::Horizontal => pos.y,
        WrapAxes::Both => wrap_axis(pos.y, bounds.min.y, bounds.max.y),
    };
    Vec2::new(x, y)
}
