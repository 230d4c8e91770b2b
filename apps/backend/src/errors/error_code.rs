//! Error codes surfaced to callers of the match coordinator.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE.

use core::fmt;

/// Centralized error codes.
///
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that the
/// transport layer can forward unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Intent validation
    /// Intent not allowed in the current stage
    PhaseMismatch,
    /// Seat index outside the match
    InvalidSeat,
    /// Seat count outside 2..=4
    InvalidSeatCount,
    /// Out of turn
    OutOfTurn,
    /// Card not in hand
    CardNotInHand,
    /// Same card named twice in one intent
    DuplicateCard,
    /// Discard size does not match the rules
    WrongDiscardCount,
    /// Seat has already discarded this round
    AlreadyDiscarded,
    /// Pegging total would exceed 31
    ExceedsThirtyOne,
    /// Go declared while a legal play exists
    GoWithLegalPlay,
    /// Card token could not be parsed
    ParseCard,
    /// General validation error
    ValidationError,

    // Resource Not Found
    /// Match not found
    MatchNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// Optimistic lock conflict (retries exhausted)
    OptimisticLock,
    /// Generic conflict
    Conflict,

    // System Errors
    /// Persisted match state cannot be trusted
    StateUnavailable,
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout
    DbTimeout,
    /// Bot decision failed
    BotError,
    /// Bot scheduler hit its iteration cap
    BotLoopExceeded,
    /// Internal error
    InternalError,
    /// Configuration error
    ConfigError,
    /// Data corruption detected
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::InvalidSeat => "INVALID_SEAT",
            Self::InvalidSeatCount => "INVALID_SEAT_COUNT",
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::CardNotInHand => "CARD_NOT_IN_HAND",
            Self::DuplicateCard => "DUPLICATE_CARD",
            Self::WrongDiscardCount => "WRONG_DISCARD_COUNT",
            Self::AlreadyDiscarded => "ALREADY_DISCARDED",
            Self::ExceedsThirtyOne => "EXCEEDS_THIRTY_ONE",
            Self::GoWithLegalPlay => "GO_WITH_LEGAL_PLAY",
            Self::ParseCard => "PARSE_CARD",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::MatchNotFound => "MATCH_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::Conflict => "CONFLICT",

            Self::StateUnavailable => "STATE_UNAVAILABLE",
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::BotError => "BOT_ERROR",
            Self::BotLoopExceeded => "BOT_LOOP_EXCEEDED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }

    /// Every code, in declaration order.
    pub const ALL: [ErrorCode; 25] = [
        Self::PhaseMismatch,
        Self::InvalidSeat,
        Self::InvalidSeatCount,
        Self::OutOfTurn,
        Self::CardNotInHand,
        Self::DuplicateCard,
        Self::WrongDiscardCount,
        Self::AlreadyDiscarded,
        Self::ExceedsThirtyOne,
        Self::GoWithLegalPlay,
        Self::ParseCard,
        Self::ValidationError,
        Self::MatchNotFound,
        Self::NotFound,
        Self::OptimisticLock,
        Self::Conflict,
        Self::StateUnavailable,
        Self::DbError,
        Self::DbUnavailable,
        Self::DbTimeout,
        Self::BotError,
        Self::BotLoopExceeded,
        Self::InternalError,
        Self::ConfigError,
        Self::DataCorruption,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
