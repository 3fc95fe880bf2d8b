//! Countdown engine module
//!
//! This module contains the timer state machine, its time sources and the
//! observer surface it notifies.

pub mod clock;
pub mod error;
pub mod observer;
pub mod timer;

// Re-export main types
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::TimerError;
pub use observer::{EventPublisher, TimerEvent, TimerObserver};
pub use timer::{CountdownTimer, ScheduleId, TimerStatus, DEFAULT_DURATION_SECS, TICK_PERIOD};
