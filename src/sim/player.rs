//! Player movement: surface sticking, dashing and lateral movement
//!
//! A player near a ground surface is pulled into it and walks along its
//! tangent. A dash overrides everything for a fixed number of ticks, after
//! which the surface probe runs again straight away.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::input::PlayerInput;
use super::physics::{BodyId, BodyType, ForceMode, LayerMask, PhysicsWorld, nearest_hit};
use super::state::{Facing, Health, PlayerId};
use super::wrap::{Bounds, WrapAxes, wrap_position};
use crate::consts::AIM_DEAD_ZONE;
use crate::{right_vector, secs_to_ticks};
use crate::settings::MovementTuning;

/// Movement state, derived from the sticking/dashing flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementState {
    /// On the ground without sticking, or airborne
    Free,
    Sticking,
    Dashing,
}

/// A controlled player entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub body: BodyId,
    /// Position snapshot, synced from physics after each step
    pub pos: Vec2,
    /// Velocity snapshot, synced from physics after each step
    pub vel: Vec2,
    /// Z rotation in radians
    pub rotation: f32,
    pub facing: Facing,
    /// Unit dash/throw direction
    pub aim: Vec2,
    pub is_sticking: bool,
    pub is_dashing: bool,
    pub dash_ticks_left: u64,
    /// Unit normal of the surface stuck to, zero when not sticking
    pub surface_normal: Vec2,
    pub health: Health,
    pub spawn: Vec2,
}

/// Tangent a sticking player walks along; on a floor, +x input walks right
#[inline]
pub fn surface_tangent(normal: Vec2) -> Vec2 {
    -normal.perp()
}

/// Rotation that stands a player upright on a surface with this normal
#[inline]
pub fn rotation_for_normal(normal: Vec2) -> f32 {
    normal.y.atan2(normal.x) - std::f32::consts::FRAC_PI_2
}

impl Player {
    pub fn new(id: PlayerId, body: BodyId, spawn: Vec2, max_health: i32) -> Self {
        Self {
            id,
            body,
            pos: spawn,
            vel: Vec2::ZERO,
            rotation: 0.0,
            facing: Facing::Right,
            aim: Vec2::X,
            is_sticking: false,
            is_dashing: false,
            dash_ticks_left: 0,
            surface_normal: Vec2::ZERO,
            health: Health::new(max_health),
            spawn,
        }
    }

    pub fn movement_state(&self) -> MovementState {
        debug_assert!(!(self.is_sticking && self.is_dashing));
        if self.is_dashing {
            MovementState::Dashing
        } else if self.is_sticking {
            MovementState::Sticking
        } else {
            MovementState::Free
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health.is_alive()
    }

    /// Aim from the aim stick, or the body's local right inside the dead zone
    pub fn update_aim(&mut self, input: &PlayerInput) {
        self.aim = if input.aim.length() > AIM_DEAD_ZONE {
            input.aim.normalize()
        } else {
            right_vector(self.rotation)
        };

        if input.movement.x < 0.0 {
            self.facing = Facing::Left;
        } else if input.movement.x > 0.0 {
            self.facing = Facing::Right;
        }
    }

    /// Start a dash along the current aim; ignored while already dashing
    pub fn dash(&mut self, world: &mut dyn PhysicsWorld, tuning: &MovementTuning, dt: f32) -> bool {
        if self.is_dashing {
            return false;
        }
        self.is_dashing = true;
        self.is_sticking = false;
        self.surface_normal = Vec2::ZERO;
        self.dash_ticks_left = secs_to_ticks(tuning.dash_duration, dt).max(1);
        world.set_velocity(self.body, self.aim * tuning.dash_speed);
        world.set_gravity_scale(self.body, tuning.free_gravity_scale);
        log::debug!("{} dashes toward {:?}", self.id, self.aim);
        true
    }

    /// Fixed-step movement for one tick
    pub fn fixed_update(
        &mut self,
        world: &mut dyn PhysicsWorld,
        input: &PlayerInput,
        tuning: &MovementTuning,
    ) {
        if self.is_dashing {
            self.handle_dash(world, tuning);
            return;
        }

        self.move_player(world, input, tuning);
        self.check_for_surface(world, tuning);
        self.align_rotation_with_surface();
    }

    fn move_player(&mut self, world: &mut dyn PhysicsWorld, input: &PlayerInput, tuning: &MovementTuning) {
        let lateral = input.movement.x * tuning.move_speed;
        if self.is_sticking {
            world.set_velocity(self.body, surface_tangent(self.surface_normal) * lateral);
        } else {
            let vy = world.velocity(self.body).y;
            world.set_velocity(self.body, Vec2::new(lateral, vy));
        }
    }

    fn handle_dash(&mut self, world: &mut dyn PhysicsWorld, tuning: &MovementTuning) {
        self.dash_ticks_left = self.dash_ticks_left.saturating_sub(1);
        if self.dash_ticks_left > 0 {
            return;
        }
        self.is_dashing = false;
        self.check_for_surface(world, tuning);
        self.align_rotation_with_surface();
    }

    /// Probe for nearby ground; stick to the nearest surface if any
    pub fn check_for_surface(&mut self, world: &mut dyn PhysicsWorld, tuning: &MovementTuning) {
        if self.is_dashing {
            return;
        }

        let pos = world.position(self.body);
        let hits = world.overlap_circle(pos, tuning.stick_radius, LayerMask::GROUND);
        let normal = nearest_hit(&hits, pos).and_then(|hit| (pos - hit.closest_point).try_normalize());

        match normal {
            Some(normal) => {
                self.surface_normal = normal;
                self.is_sticking = true;
                world.apply_force(self.body, -normal * tuning.stick_force, ForceMode::Force);
                world.set_gravity_scale(self.body, 0.0);
            }
            None => {
                self.surface_normal = Vec2::ZERO;
                self.is_sticking = false;
                world.set_gravity_scale(self.body, tuning.free_gravity_scale);
            }
        }
    }

    pub fn align_rotation_with_surface(&mut self) {
        if self.is_sticking && self.surface_normal != Vec2::ZERO {
            self.rotation = rotation_for_normal(self.surface_normal);
        }
    }

    /// Refresh the position/velocity snapshot from physics
    pub fn sync_from(&mut self, world: &dyn PhysicsWorld) {
        self.pos = world.position(self.body);
        self.vel = world.velocity(self.body);
    }

    /// Screen wrap on both axes; velocity is left alone
    pub fn wrap(&mut self, world: &mut dyn PhysicsWorld, bounds: &Bounds) {
        let wrapped = wrap_position(self.pos, bounds, WrapAxes::Both);
        if wrapped != self.pos {
            world.set_position(self.body, wrapped);
            self.pos = wrapped;
        }
    }

    /// Take damage; returns true when this hit eliminated the player
    pub fn take_damage(&mut self, world: &mut dyn PhysicsWorld, amount: i32) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.health.take_damage(amount);
        if self.is_alive() {
            return false;
        }

        // Out of play until the next round
        self.is_dashing = false;
        self.is_sticking = false;
        self.surface_normal = Vec2::ZERO;
        world.set_body_type(self.body, BodyType::Kinematic);
        world.set_velocity(self.body, Vec2::ZERO);
        true
    }

    /// Back to spawn with full health and a clean movement state
    pub fn reset_for_round(&mut self, world: &mut dyn PhysicsWorld, tuning: &MovementTuning) {
        self.health.restore();
        self.is_dashing = false;
        self.is_sticking = false;
        self.dash_ticks_left = 0;
        self.surface_normal = Vec2::ZERO;
        self.rotation = 0.0;
        self.facing = Facing::Right;
        self.aim = Vec2::X;
        self.pos = self.spawn;
        self.vel = Vec2::ZERO;

        world.set_body_type(self.body, BodyType::Dynamic);
        world.set_position(self.body, self.spawn);
        world.set_velocity(self.body, Vec2::ZERO);
        world.set_angular_velocity(self.body, 0.0);
        world.set_gravity_scale(self.body, tuning.free_gravity_scale);
    }
}
