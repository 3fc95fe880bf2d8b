//! Tick and completion notifications

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

/// Receiver of engine notifications.
///
/// Called synchronously from whatever context runs the tick, with the engine
/// lock held. Implementations must return quickly.
pub trait TimerObserver: Send {
    /// Whole seconds still to go, always greater than zero
    fn on_tick(&mut self, remaining_seconds: u64);

    /// The countdown reached zero and the engine has already reset itself
    fn on_finished(&mut self);
}

/// Notification emitted by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimerEvent {
    Tick { remaining_seconds: u64 },
    Finished,
}

impl TimerEvent {
    /// Remaining seconds carried by the event, zero once finished
    pub fn remaining_seconds(&self) -> u64 {
        match self {
            TimerEvent::Tick { remaining_seconds } => *remaining_seconds,
            TimerEvent::Finished => 0,
        }
    }
}

/// Observer that forwards every notification to a broadcast channel
#[derive(Debug, Clone)]
pub struct EventPublisher {
    tx: broadcast::Sender<TimerEvent>,
}

impl EventPublisher {
    pub fn new(tx: broadcast::Sender<TimerEvent>) -> Self {
        Self { tx }
    }

    fn publish(&self, event: TimerEvent) {
        // No subscribers is not an error, the event is simply dropped
        if self.tx.send(event).is_err() {
            debug!("No listeners for timer event {:?}", event);
        }
    }
}

impl TimerObserver for EventPublisher {
    fn on_tick(&mut self, remaining_seconds: u64) {
        self.publish(TimerEvent::Tick { remaining_seconds });
    }

    fn on_finished(&mut self) {
        self.publish(TimerEvent::Finished);
    }
}
