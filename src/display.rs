//! Mapping from remaining time to display values
//!
//! Everything here is pure: the caller feeds in the remaining seconds it was
//! notified with, plus the engine state, and gets back a label and a progress
//! bucket it can use to pick an asset.

use serde::{Deserialize, Serialize};

use crate::engine::TimerStatus;

/// Text shown once the countdown reaches zero
pub const DONE_TEXT: &str = "Done!";

/// Discrete progress level used to pick a visual asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bucket {
    #[serde(rename = "stopped")]
    Stopped,
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "25")]
    Quarter,
    #[serde(rename = "50")]
    Half,
    #[serde(rename = "75")]
    ThreeQuarters,
    #[serde(rename = "100")]
    Full,
}

impl Bucket {
    /// Asset label for this bucket
    pub fn label(&self) -> &'static str {
        match self {
            Bucket::Stopped => "stopped",
            Bucket::Zero => "0",
            Bucket::Quarter => "25",
            Bucket::Half => "50",
            Bucket::ThreeQuarters => "75",
            Bucket::Full => "100",
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Format remaining seconds as `MM:SS`, or the done text at zero
pub fn text_for(remaining_seconds: u64) -> String {
    if remaining_seconds == 0 {
        return DONE_TEXT.to_string();
    }

    let minutes = remaining_seconds / 60;
    let seconds = remaining_seconds - minutes * 60;
    format!("{:02}:{:02}", minutes, seconds)
}

/// Pick the progress bucket for the given remaining time.
///
/// A stopped timer shows either the idle image or, when it just finished, the
/// full one. Otherwise the bucket follows the completed percentage on
/// half-open quarter ranges; anything outside `[0, 100)` is full.
pub fn bucket_for(remaining_seconds: u64, status: TimerStatus, duration: f64) -> Bucket {
    if status == TimerStatus::Stopped {
        return if remaining_seconds != 0 {
            Bucket::Stopped
        } else {
            Bucket::Full
        };
    }

    let percent_complete = 100.0 - (remaining_seconds as f64 / duration * 100.0);

    match percent_complete {
        p if (0.0..25.0).contains(&p) => Bucket::Zero,
        p if (25.0..50.0).contains(&p) => Bucket::Quarter,
        p if (50.0..75.0).contains(&p) => Bucket::Half,
        p if (75.0..100.0).contains(&p) => Bucket::ThreeQuarters,
        _ => Bucket::Full,
    }
}

/// Text and bucket for one reading, ready to serialize
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Readout {
    pub text: String,
    pub bucket: Bucket,
}

impl Readout {
    pub fn for_state(remaining_seconds: u64, status: TimerStatus, duration: f64) -> Self {
        Self {
            text: text_for(remaining_seconds),
            bucket: bucket_for(remaining_seconds, status, duration),
        }
    }
}

/// Which controls a front end should offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub start: bool,
    pub stop: bool,
    pub reset: bool,
}

impl Controls {
    /// Controls for the given state. Right after finishing only reset is offered.
    pub fn for_state(status: TimerStatus, finished: bool) -> Self {
        if finished {
            return Self { start: false, stop: false, reset: true };
        }

        match status {
            TimerStatus::Stopped => Self { start: true, stop: false, reset: false },
            TimerStatus::Paused => Self { start: true, stop: false, reset: true },
            TimerStatus::Running => Self { start: false, stop: true, reset: false },
        }
    }
}
