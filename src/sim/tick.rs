//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Order within a
//! tick: deferred actions, input edges, movement, ball pickup, physics step,
//! screen wrap, floor respawn, contact damage, round check.

use glam::Vec2;

use super::ball::{BallState, nearest_player};
use super::input::TickInput;
use super::physics::{LayerMask, PhysicsWorld};
use super::round::RoundPhase;
use super::schedule::{Deferred, Owner};
use super::state::{GameEvent, GameState, PlayerId};
use crate::consts::BALL_RADIUS;
use crate::secs_to_ticks;

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, world: &mut dyn PhysicsWorld, input: &TickInput, dt: f32) {
    state.time_ticks += 1;

    run_deferred(state, world);

    // Between rounds and after the match nothing moves
    if state.match_state.phase != RoundPhase::InProgress {
        return;
    }

    handle_actions(state, world, input, dt);

    let movement = state.settings.movement;
    for player in state.players.iter_mut().filter(|p| p.is_alive()) {
        player.fixed_update(world, &input.for_player(player.id), &movement);
    }

    handle_pickup(state, world, input);

    world.step(dt);

    for player in state.players.iter_mut().filter(|p| p.is_alive()) {
        player.sync_from(world);
        player.wrap(world, &state.bounds);
    }

    update_ball(state, world);
    apply_contact_damage(state, world, dt);
}

fn run_deferred(state: &mut GameState, world: &mut dyn PhysicsWorld) {
    for (owner, action) in state.scheduler.drain_due(state.time_ticks) {
        match action {
            Deferred::RespawnBall => {
                if state.ball.is_held() {
                    log::debug!("Skipping respawn of a held ball");
                    continue;
                }
                respawn_ball(state, world);
            }
            Deferred::AdvanceRound => {
                if state.match_state.advance(&mut state.events) == RoundPhase::InProgress {
                    start_round(state, world);
                }
            }
        }
        log::trace!("Deferred {:?} for {:?} ran at tick {}", action, owner, state.time_ticks);
    }
}

/// Dash and throw edges, in player id order
fn handle_actions(state: &mut GameState, world: &mut dyn PhysicsWorld, input: &TickInput, dt: f32) {
    let movement = state.settings.movement;
    let ball_tuning = state.settings.ball;

    for i in 0..state.players.len() {
        let id = PlayerId(i);
        let actions = input.for_player(id);
        let player = &mut state.players[i];
        if !player.is_alive() {
            continue;
        }

        player.update_aim(&actions);

        if actions.dash && player.dash(world, &movement, dt) {
            state.events.push(GameEvent::Dashed {
                player: id,
                direction: player.aim,
            });
        }

        if actions.throw && state.ball.holder() == Some(id) {
            let direction = state.ball.throw(world, &state.players[i], &ball_tuning);
            state.events.push(GameEvent::BallThrown { player: id, direction });

            state.scheduler.cancel_owner(Owner::Ball);
            let deadline = state
                .time_ticks
                .saturating_add(secs_to_ticks(ball_tuning.respawn_delay, dt));
            state.scheduler.schedule(deadline, Owner::Ball, Deferred::RespawnBall);
        }
    }
}

/// Resolve at most one pickup per tick: nearest eligible player wins
fn handle_pickup(state: &mut GameState, world: &mut dyn PhysicsWorld, input: &TickInput) {
    let tuning = state.settings.ball;
    if state.ball.state != BallState::Idle {
        return;
    }

    let candidates = state.players.iter().filter(|p| {
        p.is_alive() && (tuning.auto_pickup || input.for_player(p.id).pickup)
    });
    let Some(id) = nearest_player(candidates, state.ball.pos, tuning.pickup_range) else {
        return;
    };

    let player = &state.players[id.index()];
    if !state.ball.can_be_picked_up(player.pos.distance(state.ball.pos), tuning.pickup_range) {
        return;
    }
    state.ball.pick_up(world, player, &tuning);
    state.scheduler.cancel_owner(Owner::Ball);
    state.events.push(GameEvent::BallPickedUp { player: id });
}

fn update_ball(state: &mut GameState, world: &mut dyn PhysicsWorld) {
    let tuning = state.settings.ball;

    if let Some(holder) = state.ball.holder() {
        match state.players.get(holder.index()).filter(|p| p.is_alive()) {
            Some(player) => state.ball.follow_holder(world, player, &tuning),
            None => {
                log::debug!("{} is out; returning the ball", holder);
                respawn_ball(state, world);
            }
        }
        return;
    }

    state.ball.sync_from(world);
    state.ball.wrap(world, &state.bounds);

    if state.ball.is_below_floor(tuning.floor_y) {
        respawn_ball(state, world);
    }
}

/// Live ball against players; one victim per tick
fn apply_contact_damage(state: &mut GameState, world: &mut dyn PhysicsWorld, dt: f32) {
    if !state.ball.is_live() {
        return;
    }

    let hits = world.overlap_circle(state.ball.pos, BALL_RADIUS, LayerMask::PLAYER);
    let last_holder = state.ball.last_holder;
    let victims = state.players.iter().filter(|p| {
        p.is_alive()
            && Some(p.id) != last_holder
            && hits.iter().any(|h| h.body == Some(p.body))
    });
    let Some(victim) = nearest_player(victims, state.ball.pos, f32::INFINITY) else {
        return;
    };

    let damage = state.ball.damage;
    state.ball.register_hit();
    apply_damage(state, world, victim, last_holder, damage, dt);
}

/// Damage a player and re-check the round. `dt` is the caller's tick length,
/// used to time the pause before the next round.
pub fn apply_damage(
    state: &mut GameState,
    world: &mut dyn PhysicsWorld,
    victim: PlayerId,
    attacker: Option<PlayerId>,
    amount: i32,
    dt: f32,
) {
    let Some(player) = state.players.get_mut(victim.index()) else {
        log::warn!("Damage for unknown {}; skipping", victim);
        return;
    };
    if !player.is_alive() {
        return;
    }

    let eliminated = player.take_damage(world, amount);
    let remaining = player.health.current;
    log::debug!("{} takes {} damage ({} left)", victim, amount, remaining);
    state.events.push(GameEvent::PlayerDamaged {
        victim,
        attacker,
        amount,
        remaining,
    });

    if eliminated {
        log::info!("{} is out", victim);
        state.events.push(GameEvent::PlayerEliminated { player: victim });
    }

    check_round(state, dt);
}

fn check_round(state: &mut GameState, dt: f32) {
    let alive: Vec<(PlayerId, bool)> = state.players.iter().map(|p| (p.id, p.is_alive())).collect();
    if state
        .match_state
        .check_for_round_winner(alive, &mut state.events)
        .is_some()
    {
        let delay = secs_to_ticks(state.settings.round.round_end_delay, dt);
        state.scheduler.schedule(
            state.time_ticks.saturating_add(delay),
            Owner::Match,
            Deferred::AdvanceRound,
        );
    }
}

fn respawn_ball(state: &mut GameState, world: &mut dyn PhysicsWorld) {
    state.scheduler.cancel_owner(Owner::Ball);
    let spawn_index = state.ball.respawn(world, &mut state.rng);
    state.events.push(GameEvent::BallRespawned { spawn_index });
}

/// Reset players and ball for a fresh round
fn start_round(state: &mut GameState, world: &mut dyn PhysicsWorld) {
    let movement = state.settings.movement;
    for player in &mut state.players {
        player.reset_for_round(world, &movement);
    }
    respawn_ball(state, world);
}

/// Spread `count` positions evenly across a horizontal line
pub fn spread_spawns(count: usize, left: Vec2, right: Vec2) -> Vec<Vec2> {
    match count {
        0 => Vec::new(),
        1 => vec![left.lerp(right, 0.5)],
        n => (0..n)
            .map(|i| left.lerp(right, i as f32 / (n - 1) as f32))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{PLAYER_RADIUS, SIM_DT};
    use crate::settings::Settings;
    use crate::sim::input::PlayerInput;
    use crate::sim::round::{MatchSetup, RoundOutcome};
    use crate::sim::state::GameBuilder;
    use crate::sim::world::ArenaWorld;
    use crate::sim::wrap::Bounds;

    const BALL_SPAWNS: [Vec2; 3] = [
        Vec2::new(-6.0, 4.0),
        Vec2::new(0.0, 6.0),
        Vec2::new(6.0, 4.0),
    ];

    /// Zero-gravity arena so positions only change through gameplay
    fn game(spawns: &[Vec2], rounds: u32, settings: Settings, ball_spawns: &[Vec2]) -> (ArenaWorld, GameState) {
        let mut world = ArenaWorld::new();
        world.gravity = Vec2::ZERO;
        let mut builder = GameBuilder::new(MatchSetup::new(spawns.len(), rounds).unwrap())
            .settings(settings)
            .seed(42)
            .bounds(Bounds::centered(16.0, 9.0));
        for &spawn in spawns {
            let body = world.add_body(spawn, PLAYER_RADIUS, LayerMask::PLAYER, 0.0);
            builder = builder.player(body, spawn);
        }
        let ball = world.add_body(ball_spawns[0], BALL_RADIUS, LayerMask::BALL, 0.5);
        let state = builder
            .ball(ball, ball_spawns.iter().copied())
            .build(&mut world)
            .unwrap();
        (world, state)
    }

    fn throw_input(id: PlayerId) -> TickInput {
        let mut input = TickInput::default();
        input.set(
            id,
            PlayerInput {
                aim: Vec2::X,
                throw: true,
                ..Default::default()
            },
        );
        input
    }

    fn aim_right(count: usize) -> TickInput {
        TickInput {
            players: vec![
                PlayerInput {
                    aim: Vec2::X,
                    ..Default::default()
                };
                count
            ],
        }
    }

    #[test]
    fn test_ball_below_floor_respawns_at_rest() {
        let spawns = [Vec2::new(-10.0, 0.0), Vec2::new(10.0, 0.0)];
        let (mut world, mut state) = game(&spawns, 1, Settings::default(), &BALL_SPAWNS);
        assert_eq!(state.ball.state, BallState::Idle);

        world.set_position(state.ball.body, Vec2::new(0.0, -11.0));
        world.set_velocity(state.ball.body, Vec2::new(1.0, -5.0));
        world.set_angular_velocity(state.ball.body, 3.0);
        state.drain_events();

        tick(&mut state, &mut world, &TickInput::default(), SIM_DT);

        assert!(BALL_SPAWNS.contains(&state.ball.pos));
        assert_eq!(world.position(state.ball.body), state.ball.pos);
        assert_eq!(state.ball.vel, Vec2::ZERO);
        assert_eq!(world.velocity(state.ball.body), Vec2::ZERO);
        assert_eq!(world.body(state.ball.body).unwrap().angular_vel, 0.0);
        assert!(!state.ball.has_been_thrown);
        assert!(
            state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::BallRespawned { .. }))
        );
    }

    #[test]
    fn test_auto_pickup_nearest_player() {
        let spawns = [Vec2::new(-1.5, 4.0), Vec2::new(0.5, 4.0), Vec2::new(10.0, 0.0)];
        let (mut world, mut state) = game(&spawns, 1, Settings::default(), &[Vec2::new(0.0, 4.0)]);

        tick(&mut state, &mut world, &TickInput::default(), SIM_DT);
        assert_eq!(state.ball.holder(), Some(PlayerId(1)));
        assert!(state.ball.is_held());
    }

    #[test]
    fn test_manual_pickup_requires_action_and_range() {
        let mut settings = Settings::default();
        settings.ball.auto_pickup = false;
        let spawns = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)];
        let (mut world, mut state) = game(&spawns, 1, settings, &[Vec2::new(1.0, 0.0)]);

        tick(&mut state, &mut world, &TickInput::default(), SIM_DT);
        assert!(!state.ball.is_held());

        // Out of range player pressing pickup gets nothing
        let mut far = TickInput::default();
        far.set(PlayerId(1), PlayerInput { pickup: true, ..Default::default() });
        tick(&mut state, &mut world, &far, SIM_DT);
        assert!(!state.ball.is_held());

        let mut near = TickInput::default();
        near.set(PlayerId(0), PlayerInput { pickup: true, ..Default::default() });
        tick(&mut state, &mut world, &near, SIM_DT);
        assert_eq!(state.ball.holder(), Some(PlayerId(0)));
    }

    #[test]
    fn test_throw_then_timed_respawn() {
        let spawns = [Vec2::new(0.0, 0.0), Vec2::new(0.0, 8.0)];
        let (mut world, mut state) = game(&spawns, 1, Settings::default(), &[Vec2::new(0.5, 0.0)]);

        tick(&mut state, &mut world, &aim_right(2), SIM_DT);
        assert_eq!(state.ball.holder(), Some(PlayerId(0)));

        tick(&mut state, &mut world, &throw_input(PlayerId(0)), SIM_DT);
        assert_eq!(state.ball.state, BallState::Thrown);
        assert_eq!(state.ball.holder(), None);
        assert!(state.ball.has_been_thrown);
        assert!(state.scheduler.has_pending(Owner::Ball, Deferred::RespawnBall));

        let delay = secs_to_ticks(state.settings.ball.respawn_delay, SIM_DT);
        for _ in 0..delay {
            tick(&mut state, &mut world, &TickInput::default(), SIM_DT);
        }
        assert!(!state.ball.has_been_thrown);
        assert_ne!(state.ball.state, BallState::Thrown);
    }

    #[test]
    fn test_thrown_ball_damages_other_player_once() {
        let spawns = [Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0)];
        let mut settings = Settings::default();
        settings.ball.auto_pickup = false;
        let (mut world, mut state) = game(&spawns, 1, settings, &[Vec2::new(0.5, 0.0)]);

        let mut pick = aim_right(2);
        pick.players[0].pickup = true;
        tick(&mut state, &mut world, &pick, SIM_DT);
        assert_eq!(state.ball.holder(), Some(PlayerId(0)));

        tick(&mut state, &mut world, &throw_input(PlayerId(0)), SIM_DT);
        for _ in 0..10 {
            tick(&mut state, &mut world, &aim_right(2), SIM_DT);
        }

        let damage = state.settings.ball.damage;
        assert_eq!(state.players[1].health.current, 100 - damage);
        assert_eq!(state.players[0].health.current, 100);
        assert!(!state.ball.has_been_thrown);
        let hits = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::PlayerDamaged { .. }))
            .count();
        assert_eq!(hits, 1);
    }

    #[test]
    fn test_elimination_resolves_round_then_advances() {
        let spawns = [Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0)];
        let mut settings = Settings::default();
        settings.round.max_health = 10;
        let (mut world, mut state) = game(&spawns, 2, settings, &[Vec2::new(0.0, 8.0)]);

        apply_damage(&mut state, &mut world, PlayerId(1), None, 10, SIM_DT);
        assert_eq!(
            state.match_state.phase,
            RoundPhase::Resolved(RoundOutcome::Survivor(PlayerId(0)))
        );
        assert_eq!(state.match_state.scores, vec![1, 0]);

        // Frozen while resolved
        let frozen_at = world.position(state.players[0].body);
        let delay = secs_to_ticks(state.settings.round.round_end_delay, SIM_DT);
        for _ in 0..delay - 1 {
            tick(&mut state, &mut world, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.match_state.current_round, 1);
        assert_eq!(world.position(state.players[0].body), frozen_at);

        tick(&mut state, &mut world, &TickInput::default(), SIM_DT);
        assert_eq!(state.match_state.current_round, 2);
        assert_eq!(state.match_state.phase, RoundPhase::InProgress);
        assert!(state.players.iter().all(|p| p.is_alive()));
        assert_eq!(world.position(state.players[1].body), spawns[1]);
    }

    #[test]
    fn test_round_delay_follows_tick_length() {
        let spawns = [Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0)];
        let mut settings = Settings::default();
        settings.round.max_health = 10;
        let (mut world, mut state) = game(&spawns, 2, settings, &[Vec2::new(0.0, 8.0)]);

        let dt = 0.01;
        apply_damage(&mut state, &mut world, PlayerId(1), None, 10, dt);
        let delay = secs_to_ticks(state.settings.round.round_end_delay, dt);
        assert_eq!(delay, 300);

        for _ in 0..delay - 1 {
            tick(&mut state, &mut world, &TickInput::default(), dt);
        }
        assert_eq!(state.match_state.current_round, 1);
        tick(&mut state, &mut world, &TickInput::default(), dt);
        assert_eq!(state.match_state.current_round, 2);
    }

    #[test]
    fn test_huge_delays_saturate_deadlines() {
        let spawns = [Vec2::new(0.0, 0.0), Vec2::new(0.0, 6.0)];
        let mut settings = Settings::default();
        settings.round.max_health = 10;
        let (mut world, mut state) = game(&spawns, 2, settings, &[Vec2::new(0.5, 0.0)]);

        tick(&mut state, &mut world, &aim_right(2), SIM_DT);
        assert_eq!(state.ball.holder(), Some(PlayerId(0)));

        // Loaded past validation; deadlines must not overflow
        state.settings.ball.respawn_delay = 1e30;
        state.settings.round.round_end_delay = 1e30;
        tick(&mut state, &mut world, &throw_input(PlayerId(0)), SIM_DT);
        apply_damage(&mut state, &mut world, PlayerId(1), None, 10, SIM_DT);

        assert!(state.scheduler.has_pending(Owner::Ball, Deferred::RespawnBall));
        assert!(state.scheduler.has_pending(Owner::Match, Deferred::AdvanceRound));
        tick(&mut state, &mut world, &TickInput::default(), SIM_DT);
        assert!(matches!(state.match_state.phase, RoundPhase::Resolved(_)));
    }

    /// Thrown by player 1, then player 2 eliminated on the same tick
    fn throw_then_win(settings: Settings) -> (ArenaWorld, GameState) {
        let spawns = [Vec2::new(0.0, 0.0), Vec2::new(0.0, 6.0)];
        let mut settings = settings;
        settings.ball.auto_pickup = false;
        settings.round.max_health = 10;
        let (mut world, mut state) = game(&spawns, 2, settings, &[Vec2::new(0.5, 0.0)]);

        let mut pick = aim_right(2);
        pick.players[0].pickup = true;
        tick(&mut state, &mut world, &pick, SIM_DT);
        tick(&mut state, &mut world, &throw_input(PlayerId(0)), SIM_DT);
        assert!(state.scheduler.has_pending(Owner::Ball, Deferred::RespawnBall));

        apply_damage(&mut state, &mut world, PlayerId(1), None, 10, SIM_DT);
        assert!(matches!(state.match_state.phase, RoundPhase::Resolved(_)));
        (world, state)
    }

    #[test]
    fn test_round_reset_cancels_pending_respawn() {
        let mut settings = Settings::default();
        settings.round.round_end_delay = 1.0;
        let (mut world, mut state) = throw_then_win(settings);

        let delay = secs_to_ticks(1.0, SIM_DT);
        for _ in 0..delay {
            tick(&mut state, &mut world, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.match_state.current_round, 2);
        assert!(!state.scheduler.has_pending(Owner::Ball, Deferred::RespawnBall));
        assert_eq!(state.ball.state, BallState::Idle);
        assert_eq!(state.ball.pos, Vec2::new(0.5, 0.0));
        assert!(!state.ball.has_been_thrown);

        // The old throw's deadline passes without a second respawn
        state.drain_events();
        for _ in 0..secs_to_ticks(state.settings.ball.respawn_delay, SIM_DT) {
            tick(&mut state, &mut world, &TickInput::default(), SIM_DT);
        }
        assert!(
            !state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::BallRespawned { .. }))
        );
        assert_eq!(state.ball.state, BallState::Idle);
    }

    #[test]
    fn test_respawn_fires_between_rounds() {
        let (mut world, mut state) = throw_then_win(Settings::default());
        state.drain_events();

        for _ in 0..secs_to_ticks(state.settings.ball.respawn_delay, SIM_DT) {
            tick(&mut state, &mut world, &TickInput::default(), SIM_DT);
        }
        assert!(matches!(state.match_state.phase, RoundPhase::Resolved(_)));
        assert_eq!(state.ball.state, BallState::Idle);
        assert!(!state.ball.has_been_thrown);
        assert!(
            state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::BallRespawned { .. }))
        );
    }

    #[test]
    fn test_spent_thrown_ball_cannot_be_caught() {
        let spawns = [Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0)];
        let (mut world, mut state) = game(&spawns, 1, Settings::default(), &[Vec2::new(0.5, 0.0)]);

        tick(&mut state, &mut world, &aim_right(2), SIM_DT);
        tick(&mut state, &mut world, &throw_input(PlayerId(0)), SIM_DT);
        for _ in 0..6 {
            tick(&mut state, &mut world, &aim_right(2), SIM_DT);
        }

        // Spent on player 2 and still within their reach, but not catchable
        assert!(state.players[1].health.current < 100);
        assert!(state.players[1].pos.distance(state.ball.pos) <= state.settings.ball.pickup_range);
        assert_eq!(state.ball.state, BallState::Thrown);
        assert!(!state.ball.is_held());
    }

    #[test]
    fn test_four_players_three_rounds_to_match_over() {
        let spawns = spread_spawns(4, Vec2::new(-9.0, 0.0), Vec2::new(9.0, 0.0));
        let mut settings = Settings::default();
        settings.round.round_end_delay = 0.0;
        let (mut world, mut state) = game(&spawns, 3, settings, &[Vec2::new(0.0, 8.0)]);

        for survivor in [2usize, 0, 1] {
            for id in (0..4).filter(|&i| i != survivor) {
                apply_damage(&mut state, &mut world, PlayerId(id), None, 1000, SIM_DT);
            }
            tick(&mut state, &mut world, &TickInput::default(), SIM_DT);
        }

        assert_eq!(state.match_state.scores, vec![1, 1, 1, 0]);
        assert_eq!(state.match_state.phase, RoundPhase::MatchOver);
        let results = state.match_state.results();
        assert_eq!(results.entries[0].player, PlayerId(3));
        assert_eq!(results.entries[0].score, 0);
        assert!(
            state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::MatchOver { .. }))
        );

        // Nothing moves after the match
        let t = state.time_ticks;
        tick(&mut state, &mut world, &TickInput::default(), SIM_DT);
        assert_eq!(state.time_ticks, t + 1);
        assert_eq!(state.match_state.phase, RoundPhase::MatchOver);
    }

    #[test]
    fn test_simultaneous_elimination_is_draw() {
        let spawns = [Vec2::new(-4.0, 0.0), Vec2::new(4.0, 0.0)];
        let (mut world, mut state) = game(&spawns, 3, Settings::default(), &[Vec2::new(0.0, 8.0)]);

        // Player 1 already down without a round check, then the last one falls
        state.players[0].health.take_damage(1000);
        apply_damage(&mut state, &mut world, PlayerId(1), None, 1000, SIM_DT);
        assert_eq!(state.match_state.phase, RoundPhase::Resolved(RoundOutcome::Draw));
        assert_eq!(state.match_state.scores, vec![0, 0]);
    }

    #[test]
    fn test_wrap_keeps_velocity() {
        let spawns = [Vec2::new(15.8, 0.0), Vec2::new(-4.0, 0.0)];
        let (mut world, mut state) = game(&spawns, 1, Settings::default(), &[Vec2::new(0.0, 8.0)]);

        let mut input = TickInput::default();
        input.set(
            PlayerId(0),
            PlayerInput {
                movement: Vec2::new(1.0, 0.0),
                ..Default::default()
            },
        );
        tick(&mut state, &mut world, &input, SIM_DT);

        let speed = state.settings.movement.move_speed;
        assert_eq!(state.players[0].pos.x, -16.0);
        assert_eq!(world.velocity(state.players[0].body), Vec2::new(speed, 0.0));
        assert_eq!(state.players[0].vel, Vec2::new(speed, 0.0));
    }

    #[test]
    fn test_holder_elimination_returns_ball() {
        let spawns = [Vec2::new(0.0, 0.0), Vec2::new(6.0, 0.0), Vec2::new(-6.0, 0.0)];
        let (mut world, mut state) = game(&spawns, 1, Settings::default(), &[Vec2::new(0.5, 0.0)]);
        tick(&mut state, &mut world, &aim_right(3), SIM_DT);
        assert_eq!(state.ball.holder(), Some(PlayerId(0)));

        apply_damage(&mut state, &mut world, PlayerId(0), None, 1000, SIM_DT);
        tick(&mut state, &mut world, &TickInput::default(), SIM_DT);
        assert!(!state.ball.is_held());
    }

    #[test]
    fn test_determinism() {
        let spawns = [Vec2::new(-3.0, 0.0), Vec2::new(3.0, 0.0)];
        let (mut world1, mut state1) = game(&spawns, 2, Settings::default(), &BALL_SPAWNS);
        let (mut world2, mut state2) = game(&spawns, 2, Settings::default(), &BALL_SPAWNS);

        for i in 0..30 {
            let mut input = aim_right(2);
            input.players[0].movement = Vec2::new((i as f32 * 0.3).sin(), 0.0);
            input.players[1].dash = i % 7 == 0;
            world1.set_position(state1.ball.body, Vec2::new(0.0, -20.0));
            world2.set_position(state2.ball.body, Vec2::new(0.0, -20.0));
            tick(&mut state1, &mut world1, &input, SIM_DT);
            tick(&mut state2, &mut world2, &input, SIM_DT);
        }

        assert_eq!(state1.ball.pos, state2.ball.pos);
        for (a, b) in state1.players.iter().zip(&state2.players) {
            assert_eq!(a.pos, b.pos);
        }
    }

    #[test]
    fn test_spread_spawns() {
        let s = spread_spawns(3, Vec2::new(-2.0, 0.0), Vec2::new(2.0, 0.0));
        assert_eq!(s, vec![Vec2::new(-2.0, 0.0), Vec2::ZERO, Vec2::new(2.0, 0.0)]);
        assert_eq!(spread_spawns(1, Vec2::ZERO, Vec2::new(2.0, 0.0)), vec![Vec2::new(1.0, 0.0)]);
        assert!(spread_spawns(0, Vec2::ZERO, Vec2::X).is_empty());
    }
}
