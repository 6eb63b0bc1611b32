//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by player id)
//! - Physics reached only through the `PhysicsWorld` trait

pub mod ball;
pub mod input;
pub mod physics;
pub mod player;
pub mod round;
pub mod schedule;
pub mod sdf;
pub mod state;
pub mod tick;
pub mod world;
pub mod wrap;

pub use ball::{Ball, BallState, nearest_player};
pub use input::{InputSource, PlayerInput, TickInput};
pub use physics::{BodyId, BodyType, ColliderId, ForceMode, LayerMask, OverlapHit, PhysicsWorld};
pub use player::{MovementState, Player, rotation_for_normal, surface_tangent};
pub use round::{MatchSetup, MatchState, RoundOutcome, RoundPhase};
pub use schedule::{Deferred, Owner, Scheduler, TimerId};
pub use state::{Facing, GameBuilder, GameEvent, GameState, Health, PlayerId};
pub use tick::{apply_damage, spread_spawns, tick};
pub use world::{ArenaWorld, Body, Surface};
pub use wrap::{Bounds, WrapAxes, wrap_position};
