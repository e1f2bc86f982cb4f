//! Board and backend errors.

use thiserror::Error;

/// Failure of a backend call. Every backend entry point reports failures as
/// this value; nothing escapes the call boundary as a panic.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    /// The backend base URL is not configured.
    #[error("API URL is not configured.")]
    Configuration,

    /// Transport failure (connect, timeout, body read).
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx response.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The requested resource does not exist (HTTP 404).
    #[error("not found: {0}")]
    NotFound(String),

    /// 2xx response whose body is not what the endpoint promises.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Missing fields on submit.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error(
    "name and phone are both required (missing: {})",
    missing_fields(.missing_name, .missing_phone)
)]
pub struct ValidationError {
    pub missing_name: bool,
    pub missing_phone: bool,
}

fn missing_fields(name: &bool, phone: &bool) -> &'static str {
    match (*name, *phone) {
        (true, true) => "name, phone",
        (true, false) => "name",
        _ => "phone",
    }
}

/// Errors raised by board operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardError {
    /// Submit without both name and phone.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Slot index outside the board.
    #[error("slot index {0} is outside the board (0-11)")]
    IndexOutOfRange(usize),

    /// Edit or submit on a pending or confirmed slot.
    #[error("slot {slot_no} is locked ({state})")]
    SlotLocked { slot_no: u8, state: &'static str },

    /// Delete on a slot without a confirmed reservation.
    #[error("slot {slot_no} has no confirmed reservation")]
    NotConfirmed { slot_no: u8 },

    /// No board is active (nothing selected yet).
    #[error("no date, booth and round selected")]
    NoSelection,

    /// A result arrived for a selection that is no longer active.
    #[error("selection changed while the request was in flight")]
    StaleSelection,

    /// The backend call failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl BoardError {
    /// Returns true if the error was raised before any request was issued.
    pub fn is_local(&self) -> bool {
        !matches!(self, BoardError::Backend(_))
    }
}
