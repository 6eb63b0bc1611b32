//! Match and round coordination
//!
//! Scores count rounds survived: the last player standing in a round gets a
//! point. A round where nobody is left standing is a draw and scores nothing.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, PlayerId};
use crate::error::{GameError, Result};
use crate::results::MatchResults;

/// Validated setup-screen input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSetup {
    pub players: usize,
    pub rounds: u32,
}

impl MatchSetup {
    pub fn new(players: usize, rounds: u32) -> Result<Self> {
        if players < 2 {
            return Err(GameError::InvalidPlayerCount(players));
        }
        if rounds == 0 {
            return Err(GameError::InvalidRoundCount(rounds));
        }
        Ok(Self { players, rounds })
    }

    /// Parse the raw text fields of the setup screen
    pub fn parse(players: &str, rounds: &str) -> Result<Self> {
        let p = players
            .trim()
            .parse::<usize>()
            .map_err(|_| GameError::InvalidSetupInput {
                field: "players",
                input: players.to_string(),
            })?;
        let r = rounds
            .trim()
            .parse::<u32>()
            .map_err(|_| GameError::InvalidSetupInput {
                field: "rounds",
                input: rounds.to_string(),
            })?;
        Self::new(p, r)
    }
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Exactly one player left alive
    Survivor(PlayerId),
    /// Everyone went down together
    Draw,
}

/// Round state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    InProgress,
    /// Waiting for the next round to start
    Resolved(RoundOutcome),
    MatchOver,
}

/// Match coordinator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub total_rounds: u32,
    /// 1-based
    pub current_round: u32,
    /// Rounds survived, indexed by player id
    pub scores: Vec<u32>,
    pub phase: RoundPhase,
}

impl MatchState {
    /// Fresh match; players get ids `0..setup.players`
    pub fn new(setup: MatchSetup) -> Self {
        Self {
            total_rounds: setup.rounds,
            current_round: 1,
            scores: vec![0; setup.players],
            phase: RoundPhase::InProgress,
        }
    }

    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        (0..self.scores.len()).map(PlayerId)
    }

    pub fn score(&self, id: PlayerId) -> Option<u32> {
        self.scores.get(id.index()).copied()
    }

    pub fn add_score(&mut self, id: PlayerId, points: u32) -> Result<u32> {
        let count = self.scores.len();
        let score = self
            .scores
            .get_mut(id.index())
            .ok_or(GameError::PlayerOutOfRange { id: id.index(), count })?;
        *score += points;
        Ok(*score)
    }

    pub fn is_game_over(&self) -> bool {
        self.current_round >= self.total_rounds
    }

    /// Liveness re-check. `alive` lists `(id, is_alive)` for every player.
    ///
    /// Resolves the round once at most one player is alive, awarding the
    /// survivor a point. Returns the outcome when this call resolved it.
    pub fn check_for_round_winner(
        &mut self,
        alive: impl IntoIterator<Item = (PlayerId, bool)>,
        events: &mut Vec<GameEvent>,
    ) -> Option<RoundOutcome> {
        if self.phase != RoundPhase::InProgress {
            return None;
        }

        let survivors: Vec<PlayerId> = alive
            .into_iter()
            .filter_map(|(id, is_alive)| is_alive.then_some(id))
            .collect();

        let outcome = match survivors.as_slice() {
            [] => {
                log::warn!("Round {} ended with no survivors; scoring a draw", self.current_round);
                RoundOutcome::Draw
            }
            [winner] => {
                let winner = *winner;
                match self.add_score(winner, 1) {
                    Ok(score) => {
                        log::info!("{} survives round {} ({} points)", winner, self.current_round, score);
                        events.push(GameEvent::ScoreChanged { player: winner, score });
                    }
                    Err(e) => log::warn!("Skipping score for round {}: {}", self.current_round, e),
                }
                RoundOutcome::Survivor(winner)
            }
            _ => return None,
        };

        self.phase = RoundPhase::Resolved(outcome);
        events.push(GameEvent::RoundResolved {
            round: self.current_round,
            outcome,
        });
        Some(outcome)
    }

    /// Leave a resolved round: next round, or match over after the last one
    pub fn advance(&mut self, events: &mut Vec<GameEvent>) -> RoundPhase {
        if !matches!(self.phase, RoundPhase::Resolved(_)) {
            log::warn!("advance() called in {:?}; ignoring", self.phase);
            return self.phase;
        }

        if self.is_game_over() {
            self.phase = RoundPhase::MatchOver;
            let results = self.results();
            log::info!("Match over after {} rounds", self.total_rounds);
            events.push(GameEvent::MatchOver { results });
        } else {
            self.current_round += 1;
            self.phase = RoundPhase::InProgress;
            log::info!("Round {} of {}", self.current_round, self.total_rounds);
            events.push(GameEvent::RoundChanged {
                round: self.current_round,
                total_rounds: self.total_rounds,
            });
        }
        self.phase
    }

    pub fn results(&self) -> MatchResults {
        MatchResults::from_scores(&self.scores)
    }
}
