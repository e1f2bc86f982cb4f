//! Error handling and display for the CLI.

use booth_board::{BackendError, BoardError};
use colored::Colorize;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("API URL is not configured.")]
    Configuration,

    #[error("API error: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Create an API error from response details.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}

impl From<CliError> for BackendError {
    fn from(err: CliError) -> Self {
        match err {
            CliError::Configuration => BackendError::Configuration,
            CliError::Api { status, message } => BackendError::Api { status, message },
            CliError::Network(e) => BackendError::Network(e.to_string()),
            CliError::NotFound(what) => BackendError::NotFound(what),
            CliError::InvalidResponse(what) => BackendError::InvalidResponse(what),
            CliError::Other(e) => BackendError::InvalidResponse(e.to_string()),
        }
    }
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    if let Some(hint) = hint_for(err) {
        eprintln!("\n{}", format!("Hint: {}", hint).yellow());
    }
}

/// Follow-up advice for errors the user can act on.
fn hint_for(err: &anyhow::Error) -> Option<&'static str> {
    let board = err.downcast_ref::<BoardError>();
    let backend = match board {
        Some(BoardError::Backend(inner)) => Some(inner),
        _ => None,
    };

    match (err.downcast_ref::<CliError>(), board, backend) {
        (Some(CliError::Configuration), _, _) | (_, _, Some(BackendError::Configuration)) => Some(
            "Set BOOTH_API_BASE_URL, pass --api-url, or run `booth context set --base-url <URL>`.",
        ),
        (Some(CliError::Network(_)), _, _) | (_, _, Some(BackendError::Network(_))) => {
            Some("Check your network connection and API endpoint.")
        }
        (_, Some(BoardError::Validation(_)), _) => Some("Pass both --name and --phone."),
        (_, Some(BoardError::SlotLocked { .. }), _)
        | (_, Some(BoardError::NotConfirmed { .. }), _) => {
            Some("Run `booth slots` to see the current board.")
        }
        _ => None,
    }
}
