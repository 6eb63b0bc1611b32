//! End-of-match standings
//!
//! Entries are kept in reveal order for the results screen: lowest score
//! first, the champion last. `place` is the competition rank (1 = best,
//! tied scores share a place).

use serde::{Deserialize, Serialize};

use crate::sim::PlayerId;

/// One player's final line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: PlayerId,
    /// Rounds survived
    pub score: u32,
    pub place: usize,
}

impl Standing {
    /// HUD line, e.g. "Player 2: 3"
    pub fn label(&self) -> String {
        format!("{}: {}", self.player, self.score)
    }
}

/// Final results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResults {
    pub entries: Vec<Standing>,
}

impl MatchResults {
    /// Build from a score table indexed by player id
    pub fn from_scores(scores: &[u32]) -> Self {
        let mut entries: Vec<Standing> = scores
            .iter()
            .enumerate()
            .map(|(i, &score)| Standing {
                player: PlayerId(i),
                score,
                place: 1 + scores.iter().filter(|&&other| other > score).count(),
            })
            .collect();

        // Ascending by score; stable, so ties stay in id order
        entries.sort_by_key(|s| s.score);
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest scorer (lowest id among ties)
    pub fn champion(&self) -> Option<&Standing> {
        self.entries
            .iter()
            .filter(|s| s.place == 1)
            .min_by_key(|s| s.player)
    }

    /// Entries best first
    pub fn podium(&self) -> impl Iterator<Item = &Standing> {
        let mut best_first: Vec<&Standing> = self.entries.iter().collect();
        best_first.sort_by_key(|s| (s.place, s.player));
        best_first.into_iter()
    }
}
