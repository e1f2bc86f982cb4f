//! Error types for parsing domain values.

use thiserror::Error;

/// Errors that can occur when parsing or validating domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The input string is empty.
    #[error("value cannot be empty")]
    Empty,

    /// The date is not one of the event days.
    #[error("unknown event date '{0}' (expected 2025-11-22 or 2025-11-23)")]
    UnknownDate(String),

    /// The booth code or name is not one of the five booths.
    #[error("unknown booth '{0}'")]
    UnknownBooth(String),

    /// The round number is outside `1..=6`.
    #[error("round must be between 1 and 6, got {0}")]
    RoundOutOfRange(i64),

    /// The slot number is outside `1..=12`.
    #[error("slot number must be between 1 and 12, got {0}")]
    SlotOutOfRange(i64),

    /// Reservation ids are issued by the server and always positive.
    #[error("reservation id must be positive, got {0}")]
    InvalidReservationId(i64),

    /// The input is not a number where one was expected.
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
}

impl DomainError {
    /// Returns true if this error indicates a numeric range violation.
    pub fn is_range_error(&self) -> bool {
        matches!(
            self,
            DomainError::RoundOutOfRange(_)
                | DomainError::SlotOutOfRange(_)
                | DomainError::InvalidReservationId(_)
        )
    }
}
