//! Error types
//!
//! Configuration and setup problems surface as `GameError`. Gameplay edge
//! cases (draws, stale ids) are logged and skipped instead.

use thiserror::Error;

/// Crate result alias
pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid player count {0} (need more than 1)")]
    InvalidPlayerCount(usize),

    #[error("invalid round count {0} (need at least 1)")]
    InvalidRoundCount(u32),

    #[error("setup field `{field}` is not a number: {input:?}")]
    InvalidSetupInput { field: &'static str, input: String },

    #[error("required collaborator not configured: {0}")]
    MissingCollaborator(&'static str),

    #[error("player id {id} out of range (match has {count} players)")]
    PlayerOutOfRange { id: usize, count: usize },

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("settings io: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings json: {0}")]
    Json(#[from] serde_json::Error),
}
