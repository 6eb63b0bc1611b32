//! Game state and core simulation types
//!
//! `GameState` owns every player, the ball, the match coordinator and the
//! deferred action queue. Physics bodies live in the external world and are
//! referenced by handle only.

use std::fmt;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::physics::{BodyId, PhysicsWorld};
use super::player::Player;
use super::round::{MatchSetup, MatchState, RoundOutcome};
use super::schedule::Scheduler;
use super::wrap::Bounds;
use crate::error::{GameError, Result};
use crate::results::MatchResults;
use crate::settings::Settings;

/// Player identifier, contiguous from 0 in join order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub usize);

impl PlayerId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PlayerId {
    /// One-based, the way the HUD labels players
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// Hit points, never below zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        let max = max.max(0);
        Self { current: max, max }
    }

    /// Apply damage, returning the remaining health
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        self.current = (self.current - amount.max(0)).max(0);
        self.current
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn restore(&mut self) {
        self.current = self.max;
    }
}

/// Sprite facing, flipped by horizontal movement input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Notifications for UI, audio and scene glue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Dashed { player: PlayerId, direction: Vec2 },
    BallPickedUp { player: PlayerId },
    BallThrown { player: PlayerId, direction: Vec2 },
    BallRespawned { spawn_index: usize },
    PlayerDamaged {
        victim: PlayerId,
        attacker: Option<PlayerId>,
        amount: i32,
        remaining: i32,
    },
    PlayerEliminated { player: PlayerId },
    RoundResolved { round: u32, outcome: RoundOutcome },
    ScoreChanged { player: PlayerId, score: u32 },
    RoundChanged { round: u32, total_rounds: u32 },
    MatchOver { results: MatchResults },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Players, index == `PlayerId`
    pub players: Vec<Player>,
    pub ball: Ball,
    pub match_state: MatchState,
    pub scheduler: Scheduler,
    /// Camera rectangle used for screen wrap
    pub bounds: Bounds,
    pub settings: Settings,
    /// Events produced since the last `drain_events`
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    pub fn alive_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_alive()).count()
    }

    /// Take all pending notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Assembles a `GameState` from externally created physics bodies
#[derive(Debug, Clone)]
pub struct GameBuilder {
    setup: MatchSetup,
    settings: Settings,
    seed: u64,
    bounds: Bounds,
    players: Vec<(BodyId, Vec2)>,
    ball_body: Option<BodyId>,
    ball_spawns: Vec<Vec2>,
}

impl GameBuilder {
    pub fn new(setup: MatchSetup) -> Self {
        Self {
            setup,
            settings: Settings::default(),
            seed: 0,
            bounds: Bounds::centered(16.0, 9.0),
            players: Vec::new(),
            ball_body: None,
            ball_spawns: Vec::new(),
        }
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Register the next player's body and spawn point (ids follow call order)
    pub fn player(mut self, body: BodyId, spawn: Vec2) -> Self {
        self.players.push((body, spawn));
        self
    }

    pub fn ball(mut self, body: BodyId, spawn_points: impl IntoIterator<Item = Vec2>) -> Self {
        self.ball_body = Some(body);
        self.ball_spawns = spawn_points.into_iter().collect();
        self
    }

    /// Validate collaborators, place every body and start round 1
    pub fn build(self, world: &mut dyn PhysicsWorld) -> Result<GameState> {
        self.settings.validate()?;

        let ball_body = self
            .ball_body
            .ok_or(GameError::MissingCollaborator("ball body"))?;
        if self.ball_spawns.is_empty() {
            return Err(GameError::MissingCollaborator("ball spawn points"));
        }
        if self.players.len() != self.setup.players {
            return Err(GameError::InvalidPlayerCount(self.players.len()));
        }

        let match_state = MatchState::new(self.setup);
        let max_health = self.settings.round.max_health;
        let movement = self.settings.movement;

        let players: Vec<Player> = self
            .players
            .iter()
            .enumerate()
            .map(|(i, &(body, spawn))| {
                let mut player = Player::new(PlayerId(i), body, spawn, max_health);
                player.reset_for_round(world, &movement);
                player
            })
            .collect();

        let mut rng = Pcg32::seed_from_u64(self.seed);
        let mut ball = Ball::new(ball_body, self.ball_spawns, self.settings.ball.damage);
        ball.respawn(world, &mut rng);

        log::info!(
            "Match ready: {} players, {} rounds, seed {}",
            players.len(),
            match_state.total_rounds,
            self.seed
        );

        let events = vec![GameEvent::RoundChanged {
            round: match_state.current_round,
            total_rounds: match_state.total_rounds,
        }];

        Ok(GameState {
            seed: self.seed,
            rng,
            time_ticks: 0,
            players,
            ball,
            match_state,
            scheduler: Scheduler::new(),
            bounds: self.bounds,
            settings: self.settings,
            events,
        })
    }
}
