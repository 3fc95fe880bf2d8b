//! Point-in-time view of the countdown for API consumers

use serde::{Deserialize, Serialize};

use crate::{
    display::{Bucket, Controls, Readout},
    engine::{TimerEvent, TimerStatus},
};

/// Everything a front end needs to render the timer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub status: TimerStatus,
    pub duration_seconds: f64,
    pub remaining_seconds: u64,
    pub text: String,
    pub bucket: Bucket,
    pub controls: Controls,
    pub last_event: Option<TimerEvent>,
}

impl TimerSnapshot {
    /// Build a snapshot from the engine state and the last notification.
    ///
    /// Without a notification (never started, or reset since) the selected
    /// duration stands in for the remaining time, like an idle display would.
    pub fn new(
        status: TimerStatus,
        duration_seconds: f64,
        last_event: Option<TimerEvent>,
        selected_duration: f64,
    ) -> Self {
        let remaining_seconds = match last_event {
            Some(event) => event.remaining_seconds(),
            None => selected_duration.round().max(0.0) as u64,
        };
        let readout = Readout::for_state(remaining_seconds, status, duration_seconds);
        let finished = last_event == Some(TimerEvent::Finished);

        Self {
            status,
            duration_seconds,
            remaining_seconds,
            text: readout.text,
            bucket: readout.bucket,
            controls: Controls::for_state(status, finished),
            last_event,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }
}
