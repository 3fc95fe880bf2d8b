//! Countdown state machine

use std::{
    fmt,
    time::{Duration, Instant},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Clock, SystemClock, TimerError, TimerObserver};

/// Duration used until something else is configured, and restored on reset
pub const DEFAULT_DURATION_SECS: f64 = 360.0;

/// Period of the scheduled tick
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Externally visible engine state, derived from the schedule and elapsed time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Stopped,
    Paused,
    Running,
}

impl fmt::Display for TimerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerStatus::Stopped => write!(f, "stopped"),
            TimerStatus::Paused => write!(f, "paused"),
            TimerStatus::Running => write!(f, "running"),
        }
    }
}

/// Handle identifying one installed periodic schedule.
///
/// Every start or resume installs a schedule with a new id, so a driver
/// holding an old id can tell that its schedule was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleId(u64);

/// Single countdown timer.
///
/// The engine never sleeps or spawns anything itself. While a schedule is
/// installed, some driver is expected to call [`CountdownTimer::tick_scheduled`]
/// once per [`TICK_PERIOD`]; tests drive it with a manual clock instead.
pub struct CountdownTimer<C: Clock = SystemClock> {
    clock: C,
    reference_start: Option<Instant>,
    duration: f64,
    elapsed: f64,
    schedule: Option<ScheduleId>,
    next_schedule: u64,
    observer: Option<Box<dyn TimerObserver>>,
}

impl CountdownTimer<SystemClock> {
    /// Create a stopped timer on the wall clock with the default duration
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for CountdownTimer<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> CountdownTimer<C> {
    /// Create a stopped timer reading time from `clock`
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            reference_start: None,
            duration: DEFAULT_DURATION_SECS,
            elapsed: 0.0,
            schedule: None,
            next_schedule: 0,
            observer: None,
        }
    }

    /// Register the observer notified on every tick, replacing any previous one
    pub fn set_observer(&mut self, observer: impl TimerObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn status(&self) -> TimerStatus {
        if self.schedule.is_some() {
            TimerStatus::Running
        } else if self.elapsed > 0.0 {
            TimerStatus::Paused
        } else {
            TimerStatus::Stopped
        }
    }

    pub fn is_running(&self) -> bool {
        self.status() == TimerStatus::Running
    }

    pub fn is_paused(&self) -> bool {
        self.status() == TimerStatus::Paused
    }

    pub fn is_stopped(&self) -> bool {
        self.status() == TimerStatus::Stopped
    }

    /// Configured countdown length in seconds
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Change the countdown length. Only allowed while stopped or paused.
    pub fn set_duration(&mut self, seconds: f64) -> Result<(), TimerError> {
        if self.is_running() {
            return Err(TimerError::DurationLocked);
        }
        self.duration = seconds;
        Ok(())
    }

    /// Elapsed seconds as of the last tick
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Remaining seconds as of the last tick, rounded and clamped at zero
    pub fn remaining_seconds(&self) -> u64 {
        (self.duration - self.elapsed).round().max(0.0) as u64
    }

    /// Handle of the live schedule, if any
    pub fn schedule(&self) -> Option<ScheduleId> {
        self.schedule
    }

    /// Begin a fresh countdown from the full duration
    pub fn start(&mut self) -> Result<(), TimerError> {
        if self.is_running() {
            return Err(TimerError::AlreadyRunning);
        }

        self.reference_start = Some(self.clock.now());
        self.elapsed = 0.0;
        self.install_schedule();
        debug!("Countdown started for {}s", self.duration);

        self.evaluate();
        Ok(())
    }

    /// Cancel the schedule, keeping the elapsed time so the countdown can resume
    pub fn stop(&mut self) -> Result<(), TimerError> {
        let status = self.status();
        if status != TimerStatus::Running {
            return Err(TimerError::NotRunning(status));
        }

        self.cancel_schedule();
        self.evaluate();
        debug!("Countdown stopped after {:.1}s", self.elapsed);
        Ok(())
    }

    /// Continue a paused countdown from where it left off
    pub fn resume(&mut self) -> Result<(), TimerError> {
        let status = self.status();
        if status != TimerStatus::Paused {
            return Err(TimerError::NotPaused(status));
        }

        let now = self.clock.now();
        let already = Duration::from_secs_f64(self.elapsed);
        // An instant before the clock's origin cannot be represented; fall back to
        // restarting the run period rather than panicking
        self.reference_start = Some(now.checked_sub(already).unwrap_or(now));
        self.install_schedule();
        debug!("Countdown resumed with {:.1}s already elapsed", self.elapsed);

        self.evaluate();
        Ok(())
    }

    /// Return to the stopped state with the default duration.
    ///
    /// Any duration configured earlier is discarded; callers re-apply their
    /// preference before the next start.
    pub fn reset(&mut self) {
        self.cancel_schedule();
        self.reference_start = None;
        self.duration = DEFAULT_DURATION_SECS;
        self.elapsed = 0.0;

        self.evaluate();
    }

    /// Evaluate the countdown now if it is running.
    ///
    /// For drivers that keep their own cadence instead of following the
    /// schedule handle.
    pub fn tick(&mut self) {
        if self.is_running() {
            self.evaluate();
        }
    }

    /// Evaluate the countdown on behalf of the schedule `id`.
    ///
    /// A cancelled or superseded schedule does nothing. Returns whether `id` is
    /// still the live schedule afterwards, i.e. whether the driver should keep
    /// firing.
    pub fn tick_scheduled(&mut self, id: ScheduleId) -> bool {
        if self.schedule != Some(id) {
            return false;
        }
        self.evaluate();
        self.schedule == Some(id)
    }

    fn install_schedule(&mut self) {
        self.next_schedule += 1;
        self.schedule = Some(ScheduleId(self.next_schedule));
    }

    fn cancel_schedule(&mut self) {
        self.schedule = None;
    }

    fn evaluate(&mut self) {
        let Some(reference_start) = self.reference_start else {
            return;
        };

        self.elapsed = self
            .clock
            .now()
            .saturating_duration_since(reference_start)
            .as_secs_f64();

        let remaining = (self.duration - self.elapsed).round();

        if remaining <= 0.0 {
            debug!("Countdown of {}s finished", self.duration);
            self.reset();
            if let Some(observer) = self.observer.as_mut() {
                observer.on_finished();
            }
        } else if let Some(observer) = self.observer.as_mut() {
            observer.on_tick(remaining as u64);
        }
    }
}

impl<C: Clock> fmt::Debug for CountdownTimer<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountdownTimer")
            .field("status", &self.status())
            .field("reference_start", &self.reference_start)
            .field("duration", &self.duration)
            .field("elapsed", &self.elapsed)
            .field("schedule", &self.schedule)
            .field("has_observer", &self.observer.is_some())
            .finish()
    }
}
