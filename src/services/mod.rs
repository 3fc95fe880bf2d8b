//! External side effects module
//!
//! This module contains the hooks the timer triggers outside the process.

pub mod completion;

// Re-export main functions
pub use completion::*;
