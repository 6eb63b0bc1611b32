//! Reference physics world
//!
//! A deliberately small `PhysicsWorld` implementation: circular bodies with
//! unit mass, static segment/circle surfaces, semi-implicit Euler and a
//! single push-out pass per step. Enough to drive the game headless.

use glam::Vec2;

use super::physics::{BodyId, BodyType, ColliderId, ForceMode, LayerMask, OverlapHit, PhysicsWorld};
use super::sdf::{closest_point_on_circle, closest_point_on_segment, reflect, sd_circle, sd_segment};
use crate::consts::GRAVITY;

/// Static surface geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Surface {
    /// Thin wall or platform edge
    Segment { a: Vec2, b: Vec2 },
    /// Solid disc (pillar, boulder)
    Circle { center: Vec2, radius: f32 },
}

impl Surface {
    fn closest_point(&self, p: Vec2) -> Vec2 {
        match *self {
            Surface::Segment { a, b } => closest_point_on_segment(p, a, b),
            Surface::Circle { center, radius } => closest_point_on_circle(p, center, radius),
        }
    }

    /// Distance from `p` to the surface, negative inside solid shapes
    fn distance(&self, p: Vec2) -> f32 {
        match *self {
            Surface::Segment { a, b } => sd_segment(p, a, b),
            Surface::Circle { center, radius } => sd_circle(p, center, radius),
        }
    }

    /// Outward normal at the point of the surface nearest `p`
    fn normal_at(&self, p: Vec2) -> Vec2 {
        match *self {
            Surface::Segment { a, b } => (p - self.closest_point(p))
                .try_normalize()
                .unwrap_or_else(|| (b - a).perp().normalize_or(Vec2::Y)),
            Surface::Circle { center, .. } => (p - center).normalize_or(Vec2::Y),
        }
    }
}

#[derive(Debug, Clone)]
struct StaticCollider {
    id: ColliderId,
    surface: Surface,
    layer: LayerMask,
}

/// A circular body
#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    pub collider: ColliderId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub angular_vel: f32,
    pub radius: f32,
    pub layer: LayerMask,
    pub gravity_scale: f32,
    pub body_type: BodyType,
    /// Bounciness against static surfaces (0 = none)
    pub restitution: f32,
    force: Vec2,
}

/// Headless physics world
#[derive(Debug, Clone)]
pub struct ArenaWorld {
    pub gravity: Vec2,
    surfaces: Vec<StaticCollider>,
    bodies: Vec<Body>,
    next_collider: u32,
}

impl Default for ArenaWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl ArenaWorld {
    pub fn new() -> Self {
        Self {
            gravity: Vec2::new(0.0, GRAVITY),
            surfaces: Vec::new(),
            bodies: Vec::new(),
            next_collider: 1,
        }
    }

    fn next_collider_id(&mut self) -> ColliderId {
        let id = ColliderId(self.next_collider);
        self.next_collider += 1;
        id
    }

    /// Add a static surface on the ground layer
    pub fn add_surface(&mut self, surface: Surface) -> ColliderId {
        let id = self.next_collider_id();
        self.surfaces.push(StaticCollider {
            id,
            surface,
            layer: LayerMask::GROUND,
        });
        id
    }

    pub fn add_segment(&mut self, a: Vec2, b: Vec2) -> ColliderId {
        self.add_surface(Surface::Segment { a, b })
    }

    pub fn add_circle(&mut self, center: Vec2, radius: f32) -> ColliderId {
        self.add_surface(Surface::Circle { center, radius })
    }

    /// Add a dynamic body with gravity scale 1
    pub fn add_body(&mut self, pos: Vec2, radius: f32, layer: LayerMask, restitution: f32) -> BodyId {
        let id = BodyId(self.bodies.len() as u32);
        let collider = self.next_collider_id();
        self.bodies.push(Body {
            id,
            collider,
            pos,
            vel: Vec2::ZERO,
            angular_vel: 0.0,
            radius,
            layer,
            gravity_scale: 1.0,
            body_type: BodyType::Dynamic,
            restitution,
            force: Vec2::ZERO,
        });
        id
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0 as usize)
    }

    fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        let body = self.bodies.get_mut(id.0 as usize);
        if body.is_none() {
            log::warn!("Unknown body {:?}", id);
        }
        body
    }

    fn resolve_surfaces(&mut self, index: usize) {
        let body = &mut self.bodies[index];
        for collider in &self.surfaces {
            let dist = collider.surface.distance(body.pos);
            if dist >= body.radius {
                continue;
            }
            let normal = collider.surface.normal_at(body.pos);
            body.pos += normal * (body.radius - dist);

            let vn = body.vel.dot(normal);
            if vn < 0.0 {
                body.vel = if body.restitution > 0.0 {
                    let bounced = reflect(body.vel, normal);
                    bounced - normal * bounced.dot(normal) * (1.0 - body.restitution)
                } else {
                    body.vel - normal * vn
                };
            }
        }
    }
}

impl PhysicsWorld for ArenaWorld {
    fn overlap_circle(&self, center: Vec2, radius: f32, mask: LayerMask) -> Vec<OverlapHit> {
        let mut hits = Vec::new();

        for collider in self.surfaces.iter().filter(|c| c.layer.intersects(mask)) {
            if collider.surface.distance(center) <= radius {
                hits.push(OverlapHit {
                    collider: collider.id,
                    body: None,
                    closest_point: collider.surface.closest_point(center),
                });
            }
        }

        for body in self.bodies.iter().filter(|b| b.layer.intersects(mask)) {
            let offset = center - body.pos;
            if offset.length() <= radius + body.radius {
                let dir = offset.try_normalize().unwrap_or(Vec2::ZERO);
                hits.push(OverlapHit {
                    collider: body.collider,
                    body: Some(body.id),
                    closest_point: body.pos + dir * offset.length().min(body.radius),
                });
            }
        }

        hits
    }

    fn apply_force(&mut self, body: BodyId, force: Vec2, mode: ForceMode) {
        let Some(b) = self.body_mut(body) else { return };
        if b.body_type == BodyType::Kinematic {
            return;
        }
        match mode {
            ForceMode::Force => b.force += force,
            ForceMode::Impulse => b.vel += force,
        }
    }

    fn velocity(&self, body: BodyId) -> Vec2 {
        self.body(body).map(|b| b.vel).unwrap_or(Vec2::ZERO)
    }

    fn set_velocity(&mut self, body: BodyId, velocity: Vec2) {
        if let Some(b) = self.body_mut(body) {
            b.vel = velocity;
        }
    }

    fn position(&self, body: BodyId) -> Vec2 {
        self.body(body).map(|b| b.pos).unwrap_or(Vec2::ZERO)
    }

    fn set_position(&mut self, body: BodyId, position: Vec2) {
        if let Some(b) = self.body_mut(body) {
            b.pos = position;
        }
    }

    fn set_gravity_scale(&mut self, body: BodyId, scale: f32) {
        if let Some(b) = self.body_mut(body) {
            b.gravity_scale = scale;
        }
    }

    fn set_body_type(&mut self, body: BodyId, body_type: BodyType) {
        if let Some(b) = self.body_mut(body) {
            b.body_type = body_type;
            b.force = Vec2::ZERO;
        }
    }

    fn set_angular_velocity(&mut self, body: BodyId, angular_velocity: f32) {
        if let Some(b) = self.body_mut(body) {
            b.angular_vel = angular_velocity;
        }
    }

    fn step(&mut self, dt: f32) {
        let gravity = self.gravity;
        for i in 0..self.bodies.len() {
            let body = &mut self.bodies[i];
            match body.body_type {
                BodyType::Dynamic => {
                    body.vel += (gravity * body.gravity_scale + body.force) * dt;
                    body.pos += body.vel * dt;
                    body.force = Vec2::ZERO;
                    self.resolve_surfaces(i);
                }
                BodyType::Kinematic => {
                    body.pos += body.vel * dt;
                }
            }
        }
    }
}
