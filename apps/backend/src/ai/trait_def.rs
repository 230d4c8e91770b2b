//! Bot player trait definition.

use std::fmt;

use crate::domain::Card;
use crate::error::AppError;
use crate::errors::ErrorCode;

/// Errors that can occur during bot decision-making.
#[derive(Debug)]
pub enum BotError {
    /// Bot encountered an internal error
    Internal(String),
    /// Bot was asked to decide with no valid option
    InvalidMove(String),
}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotError::Internal(msg) => write!(f, "bot internal error: {msg}"),
            BotError::InvalidMove(msg) => write!(f, "bot invalid move: {msg}"),
        }
    }
}

impl std::error::Error for BotError {}

impl From<BotError> for AppError {
    fn from(err: BotError) -> Self {
        AppError::internal(ErrorCode::BotError, err.to_string())
    }
}

/// A bot's answer during pegging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeggingChoice {
    Play(Card),
    Go,
}

/// Trait for bot players.
///
/// Implementations see only read-only hand and sequence data and must return
/// a choice the rules accept.
pub trait BotPlayer: Send + Sync {
    /// Choose exactly `count` cards from `hand` for the crib.
    fn choose_discard(&self, hand: &[Card], count: usize) -> Result<Vec<Card>, BotError>;

    /// Choose a pegging card, or `Go` when nothing in `hand` fits under 31.
    fn choose_pegging_play(
        &self,
        hand: &[Card],
        total: u8,
        sequence: &[Card],
    ) -> Result<PeggingChoice, BotError>;
}
