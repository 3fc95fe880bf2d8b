//! Error types for engine operations

use thiserror::Error;

use super::TimerStatus;

/// Operation called from a state that does not support it.
///
/// The engine state is left untouched whenever one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("timer is already running")]
    AlreadyRunning,

    #[error("timer is not running (currently {0})")]
    NotRunning(TimerStatus),

    #[error("timer is not paused (currently {0})")]
    NotPaused(TimerStatus),

    #[error("duration cannot change while the timer is running")]
    DurationLocked,
}
