//! Errors surfaced by the application layer

use thiserror::Error;

use crate::{engine::TimerError, preferences::PreferenceError};

/// Prompt returned when a preference change would discard a running countdown
pub const RESET_CONFIRMATION: &str =
    "Reset timer with new settings? This will reset the current timer, losing the existing elapsed time.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Timer(#[from] TimerError),

    #[error("{}", RESET_CONFIRMATION)]
    ConfirmationRequired,

    #[error("invalid duration {0}: must be a positive number of seconds")]
    InvalidDuration(f64),

    #[error(transparent)]
    Preferences(#[from] PreferenceError),

    #[error("failed to lock {0}")]
    Lock(&'static str),
}

impl AppError {
    /// Whether the caller asked for something the current state does not allow
    pub fn is_conflict(&self) -> bool {
        matches!(self, AppError::Timer(_) | AppError::ConfirmationRequired)
    }
}
