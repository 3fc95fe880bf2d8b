//! State management module
//!
//! This module holds the shared countdown engine and the structures derived
//! from it.

pub mod app_state;
pub mod error;
pub mod timer_snapshot;

// Re-export main types
pub use app_state::AppState;
pub use error::{AppError, RESET_CONFIRMATION};
pub use timer_snapshot::TimerSnapshot;
