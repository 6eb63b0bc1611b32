//! Signed distance helpers for static arena surfaces
//!
//! Used by the reference physics world for overlap queries and push-out.

use glam::Vec2;

/// Signed distance to a circle
#[inline]
pub fn sd_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Closest point on the boundary of a circle (center itself maps to +x)
#[inline]
pub fn closest_point_on_circle(p: Vec2, center: Vec2, radius: f32) -> Vec2 {
    let dir = (p - center).try_normalize().unwrap_or(Vec2::X);
    center + dir * radius
}

/// Closest point on segment `a`-`b`
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Unsigned distance to a segment (segments have no interior)
#[inline]
pub fn sd_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    (p - closest_point_on_segment(p, a, b)).length()
}

/// Reflect velocity off a surface with given normal
#[inline]
pub fn reflect(vel: Vec2, normal: Vec2) -> Vec2 {
    vel - 2.0 * vel.dot(normal) * normal
}
