//! Egg Timer - a single countdown timer engine
//!
//! This library provides the countdown state machine, the mapping from
//! remaining time to display values, and a small HTTP surface to drive it.

pub mod api;
pub mod config;
pub mod display;
pub mod engine;
pub mod preferences;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use display::{bucket_for, text_for, Bucket};
pub use engine::{CountdownTimer, TimerEvent, TimerObserver, TimerStatus};
pub use state::AppState;
pub use utils::signals::shutdown_signal;
