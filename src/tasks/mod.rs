//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod event_listener;
pub mod schedule;

// Re-export main functions
pub use event_listener::event_listener_task;
pub use schedule::schedule_task;
