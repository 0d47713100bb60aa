//! Error types for the command surface.
//!
//! All of these are locally recoverable: a failed command consumes no game
//! turn and leaves the engine waiting for another attempt.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a command from the front end was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameError {
    /// Not enough mana for the special ability.
    #[error("not enough mana: have {have}, need {need}")]
    #[serde(rename_all = "camelCase")]
    NotEnoughMana { have: i32, need: i32 },
    /// Target index is out of range of the living enemy roster.
    #[error("invalid target {index}: {living} living enemies")]
    #[serde(rename_all = "camelCase")]
    InvalidTarget { index: usize, living: usize },
    /// Unrecognized action menu choice.
    #[error("invalid action choice {choice}")]
    #[serde(rename_all = "camelCase")]
    InvalidChoice { choice: u8 },
    /// Command not allowed in the current phase.
    #[error("command not allowed in the current phase")]
    WrongPhase,
}

/// Result type alias for engine commands.
pub type GameResult<T> = Result<T, GameError>;
