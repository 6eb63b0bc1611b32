//! Physics service contract
//!
//! The simulation never integrates rigid bodies itself. It queries and nudges
//! an external 2D physics world through this trait, once per fixed tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Handle to a dynamic or kinematic body owned by the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Handle to any collider (static surface or body shape)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ColliderId(pub u32);

/// Collision layer bit set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    /// Static surfaces players can stick to
    pub const GROUND: LayerMask = LayerMask(1 << 0);
    pub const PLAYER: LayerMask = LayerMask(1 << 1);
    pub const BALL: LayerMask = LayerMask(1 << 2);

    #[inline]
    pub fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }
}

impl std::ops::BitOr for LayerMask {
    type Output = LayerMask;

    fn bitor(self, rhs: LayerMask) -> LayerMask {
        LayerMask(self.0 | rhs.0)
    }
}

/// How `apply_force` treats its vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForceMode {
    /// Continuous force, integrated over the next step
    Force,
    /// Instant change of momentum
    Impulse,
}

/// Body simulation type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyType {
    /// Moved by gravity, forces and velocity
    Dynamic,
    /// Only moved by explicit position/velocity writes
    Kinematic,
}

/// One collider returned by an overlap query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapHit {
    pub collider: ColliderId,
    /// Body the collider belongs to (`None` for static surfaces)
    pub body: Option<BodyId>,
    /// Point on the collider closest to the query center
    pub closest_point: Vec2,
}

/// External 2D physics/collision service
pub trait PhysicsWorld {
    /// All colliders on `mask` layers overlapping the circle
    fn overlap_circle(&self, center: Vec2, radius: f32, mask: LayerMask) -> Vec<OverlapHit>;

    fn apply_force(&mut self, body: BodyId, force: Vec2, mode: ForceMode);

    fn velocity(&self, body: BodyId) -> Vec2;
    fn set_velocity(&mut self, body: BodyId, velocity: Vec2);

    fn position(&self, body: BodyId) -> Vec2;
    fn set_position(&mut self, body: BodyId, position: Vec2);

    fn set_gravity_scale(&mut self, body: BodyId, scale: f32);
    fn set_body_type(&mut self, body: BodyId, body_type: BodyType);
    fn set_angular_velocity(&mut self, body: BodyId, angular_velocity: f32);

    /// Advance the physics world by one fixed step
    fn step(&mut self, dt: f32);
}

/// Nearest hit to `point`, ties broken by collider id
pub fn nearest_hit(hits: &[OverlapHit], point: Vec2) -> Option<&OverlapHit> {
    hits.iter().min_by(|a, b| {
        a.closest_point
            .distance_squared(point)
            .total_cmp(&b.closest_point.distance_squared(point))
            .then(a.collider.cmp(&b.collider))
    })
}
