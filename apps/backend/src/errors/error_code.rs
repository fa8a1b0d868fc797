//! Error codes for the backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP responses.

use core::fmt;

/// Centralized error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Hand token is not one of rock / paper / scissors
    InvalidHand,
    /// total_rounds outside the accepted range
    InvalidTotalRounds,
    /// Username empty, too long or otherwise unusable
    InvalidUsername,
    /// Both match slots reference the same participant
    SameParticipant,
    /// Path id is malformed or non-positive
    InvalidId,
    /// General validation error
    ValidationError,
    /// General bad request error (e.g. malformed JSON)
    BadRequest,

    // Resource Not Found
    ParticipantNotFound,
    MatchNotFound,
    RoundNotFound,
    /// General not found error
    NotFound,

    // Engine Conflicts
    AlreadyPlayed,
    RoundAlreadyFinished,
    UnknownParticipant,
    MatchFinished,
    RoundLimitReached,
    RoundInProgress,
    UsernameTaken,
    /// Lost a transactional race; safe to retry
    OptimisticLock,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    DbError,
    DbUnavailable,
    DbTimeout,
    DataCorruption,
    Internal,
    ConfigError,
}

impl ErrorCode {
    /// The exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidHand => "INVALID_HAND",
            Self::InvalidTotalRounds => "INVALID_TOTAL_ROUNDS",
            Self::InvalidUsername => "INVALID_USERNAME",
            Self::SameParticipant => "SAME_PARTICIPANT",
            Self::InvalidId => "INVALID_ID",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::ParticipantNotFound => "PARTICIPANT_NOT_FOUND",
            Self::MatchNotFound => "MATCH_NOT_FOUND",
            Self::RoundNotFound => "ROUND_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::AlreadyPlayed => "ALREADY_PLAYED",
            Self::RoundAlreadyFinished => "ROUND_ALREADY_FINISHED",
            Self::UnknownParticipant => "UNKNOWN_PARTICIPANT",
            Self::MatchFinished => "MATCH_FINISHED",
            Self::RoundLimitReached => "ROUND_LIMIT_REACHED",
            Self::RoundInProgress => "ROUND_IN_PROGRESS",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
