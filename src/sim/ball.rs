//! Dodgeball lifecycle
//!
//! Idle at a spawn point, held kinematically next to a player, thrown as a
//! free damaging body, then respawned. The ball only ever refers to players
//! by id.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::physics::{BodyId, BodyType, ForceMode, PhysicsWorld};
use super::player::Player;
use super::state::PlayerId;
use super::wrap::{Bounds, WrapAxes, wrap_position};
use crate::settings::BallTuning;

/// Ball possession state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallState {
    /// Free at (or falling from) a spawn point
    Idle,
    /// Attached to a player
    Held { holder: PlayerId },
    /// Launched; damaging while `has_been_thrown` is set
    Thrown,
}

/// The dodgeball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub body: BodyId,
    /// Position snapshot, synced from physics after each step
    pub pos: Vec2,
    /// Velocity snapshot, synced from physics after each step
    pub vel: Vec2,
    pub state: BallState,
    /// Who threw it last; immune to its hit
    pub last_holder: Option<PlayerId>,
    pub has_been_thrown: bool,
    pub damage: i32,
    pub spawn_points: Vec<Vec2>,
}

impl Ball {
    pub fn new(body: BodyId, spawn_points: Vec<Vec2>, damage: i32) -> Self {
        let pos = spawn_points.first().copied().unwrap_or(Vec2::ZERO);
        Self {
            body,
            pos,
            vel: Vec2::ZERO,
            state: BallState::Idle,
            last_holder: None,
            has_been_thrown: false,
            damage,
            spawn_points,
        }
    }

    #[inline]
    pub fn is_held(&self) -> bool {
        matches!(self.state, BallState::Held { .. })
    }

    pub fn holder(&self) -> Option<PlayerId> {
        match self.state {
            BallState::Held { holder } => Some(holder),
            _ => None,
        }
    }

    /// Thrown and not yet spent on a hit
    #[inline]
    pub fn is_live(&self) -> bool {
        self.state == BallState::Thrown && self.has_been_thrown
    }

    /// Pickup rule: free, idle and within range
    pub fn can_be_picked_up(&self, distance: f32, range: f32) -> bool {
        self.state == BallState::Idle && distance <= range
    }

    /// Where the ball sits while held, or is released from when thrown
    pub fn hold_position(holder: &Player, tuning: &BallTuning) -> Vec2 {
        holder.pos + holder.aim.normalize_or_zero() * tuning.hold_offset
    }

    pub fn pick_up(&mut self, world: &mut dyn PhysicsWorld, holder: &Player, tuning: &BallTuning) {
        self.state = BallState::Held { holder: holder.id };
        self.pos = Self::hold_position(holder, tuning);
        self.vel = Vec2::ZERO;

        world.set_body_type(self.body, BodyType::Kinematic);
        world.set_gravity_scale(self.body, 0.0);
        world.set_velocity(self.body, Vec2::ZERO);
        world.set_angular_velocity(self.body, 0.0);
        world.set_position(self.body, self.pos);
        log::debug!("{} picked up the ball", holder.id);
    }

    /// Keep a held ball glued to its holder
    pub fn follow_holder(&mut self, world: &mut dyn PhysicsWorld, holder: &Player, tuning: &BallTuning) {
        self.pos = Self::hold_position(holder, tuning);
        world.set_position(self.body, self.pos);
    }

    /// Release along the holder's aim; returns the throw direction
    pub fn throw(&mut self, world: &mut dyn PhysicsWorld, holder: &Player, tuning: &BallTuning) -> Vec2 {
        let direction = holder.aim.normalize_or(Vec2::X);
        self.pos = Self::hold_position(holder, tuning);
        self.state = BallState::Thrown;
        self.last_holder = Some(holder.id);
        self.has_been_thrown = true;

        world.set_body_type(self.body, BodyType::Dynamic);
        world.set_gravity_scale(self.body, 1.0);
        world.set_position(self.body, self.pos);
        world.set_velocity(self.body, Vec2::ZERO);
        world.apply_force(self.body, direction * tuning.throw_strength, ForceMode::Impulse);
        self.vel = world.velocity(self.body);

        log::debug!("{} threw the ball toward {:?}", holder.id, direction);
        direction
    }

    /// A live hit landed; the ball is spent until thrown again
    pub fn register_hit(&mut self) {
        self.has_been_thrown = false;
    }

    /// Back to a random spawn point, at rest; returns the spawn index used
    pub fn respawn<R: Rng + ?Sized>(&mut self, world: &mut dyn PhysicsWorld, rng: &mut R) -> usize {
        let index = if self.spawn_points.is_empty() {
            log::warn!("Ball has no spawn points; respawning in place");
            0
        } else {
            rng.random_range(0..self.spawn_points.len())
        };
        let spawn = self.spawn_points.get(index).copied().unwrap_or(self.pos);

        self.state = BallState::Idle;
        self.last_holder = None;
        self.has_been_thrown = false;
        self.pos = spawn;
        self.vel = Vec2::ZERO;

        world.set_body_type(self.body, BodyType::Dynamic);
        world.set_position(self.body, spawn);
        world.set_velocity(self.body, Vec2::ZERO);
        world.set_angular_velocity(self.body, 0.0);
        world.set_gravity_scale(self.body, 1.0);
        log::debug!("Ball respawned at spawn point {} {:?}", index, spawn);
        index
    }

    pub fn is_below_floor(&self, floor_y: f32) -> bool {
        self.pos.y < floor_y
    }

    pub fn sync_from(&mut self, world: &dyn PhysicsWorld) {
        self.pos = world.position(self.body);
        self.vel = world.velocity(self.body);
    }

    /// Horizontal screen wrap; the ball may still fall out of the bottom
    pub fn wrap(&mut self, world: &mut dyn PhysicsWorld, bounds: &Bounds) {
        let wrapped = wrap_position(self.pos, bounds, WrapAxes::Horizontal);
        if wrapped != self.pos {
            world.set_position(self.body, wrapped);
            self.pos = wrapped;
        }
    }
}

/// Eligible player nearest to `point` within `range`, ties to the lowest id
pub fn nearest_player<'a>(
    players: impl IntoIterator<Item = &'a Player>,
    point: Vec2,
    range: f32,
) -> Option<PlayerId> {
    players
        .into_iter()
        .map(|p| (p.pos.distance(point), p.id))
        .filter(|(d, _)| *d <= range)
        .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
        .map(|(_, id)| id)
}
