//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::{sync::broadcast, task::JoinHandle};
use tracing::{debug, info, warn};

use super::{AppError, TimerSnapshot};
use crate::{
    engine::{
        CountdownTimer, EventPublisher, ScheduleId, TimerError, TimerEvent, TimerObserver,
    },
    preferences::PreferenceStore,
    tasks::schedule_task,
};

/// Observer installed on the shared engine: remembers the latest event for
/// status queries and fans it out to subscribers
struct StateObserver {
    publisher: EventPublisher,
    last_event: Arc<Mutex<Option<TimerEvent>>>,
}

impl StateObserver {
    fn record(&self, event: TimerEvent) {
        if let Ok(mut last) = self.last_event.lock() {
            *last = Some(event);
        }
    }
}

impl TimerObserver for StateObserver {
    fn on_tick(&mut self, remaining_seconds: u64) {
        self.record(TimerEvent::Tick { remaining_seconds });
        self.publisher.on_tick(remaining_seconds);
    }

    fn on_finished(&mut self) {
        self.record(TimerEvent::Finished);
        self.publisher.on_finished();
    }
}

/// Main application state: the one countdown engine plus everything around it
pub struct AppState {
    /// The countdown engine; every operation and scheduled tick locks it
    pub timer: Arc<Mutex<CountdownTimer>>,
    /// Source of the selected duration
    pub preferences: Arc<Mutex<Box<dyn PreferenceStore>>>,
    /// Latest notification from the engine, cleared on reset
    pub last_event: Arc<Mutex<Option<TimerEvent>>>,
    /// Channel for timer notifications
    pub event_tx: broadcast::Sender<TimerEvent>,
    /// Command run when a countdown finishes
    pub on_finish: Option<String>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Task currently firing the engine's schedule
    schedule_task: Mutex<Option<(ScheduleId, JoinHandle<()>)>>,
}

impl AppState {
    /// Create a new AppState with a stopped timer
    pub fn new(
        port: u16,
        host: String,
        preferences: Box<dyn PreferenceStore>,
        on_finish: Option<String>,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(100);
        let last_event = Arc::new(Mutex::new(None));

        let mut timer = CountdownTimer::new();
        timer.set_observer(StateObserver {
            publisher: EventPublisher::new(event_tx.clone()),
            last_event: Arc::clone(&last_event),
        });

        Self {
            timer: Arc::new(Mutex::new(timer)),
            preferences: Arc::new(Mutex::new(preferences)),
            last_event,
            event_tx,
            on_finish,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            schedule_task: Mutex::new(None),
        }
    }

    /// Subscribe to tick and completion notifications
    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.event_tx.subscribe()
    }

    /// Run `op` on the locked engine and, still under the lock, make the
    /// schedule task match the engine's schedule handle
    fn with_timer<F>(self: &Arc<Self>, action: &str, op: F) -> Result<TimerSnapshot, AppError>
    where
        F: FnOnce(&mut CountdownTimer) -> Result<(), AppError>,
    {
        {
            let mut timer = self.timer.lock().map_err(|_| AppError::Lock("timer"))?;
            op(&mut *timer)?;
            self.sync_schedule(&timer);
        }

        self.record_action(action);
        self.snapshot()
    }

    /// Start a fresh countdown using the selected duration
    pub fn start(self: &Arc<Self>) -> Result<TimerSnapshot, AppError> {
        let selected = self.selected_duration()?;
        info!("Starting countdown for {}s", selected);
        self.with_timer("start", |timer| {
            if timer.is_running() {
                return Err(TimerError::AlreadyRunning.into());
            }
            timer.set_duration(selected)?;
            timer.start()?;
            Ok(())
        })
    }

    /// Pause the running countdown
    pub fn stop(self: &Arc<Self>) -> Result<TimerSnapshot, AppError> {
        info!("Stopping countdown");
        self.with_timer("stop", |timer| Ok(timer.stop()?))
    }

    /// Continue a paused countdown
    pub fn resume(self: &Arc<Self>) -> Result<TimerSnapshot, AppError> {
        info!("Resuming countdown");
        self.with_timer("resume", |timer| Ok(timer.resume()?))
    }

    /// Return to the idle state showing the selected duration
    pub fn reset(self: &Arc<Self>) -> Result<TimerSnapshot, AppError> {
        info!("Resetting countdown");
        self.with_timer("reset", |timer| {
            timer.reset();
            self.clear_last_event()
        })
    }

    /// Resume when paused, otherwise start a fresh countdown
    pub fn toggle(self: &Arc<Self>) -> Result<TimerSnapshot, AppError> {
        let paused = self
            .timer
            .lock()
            .map_err(|_| AppError::Lock("timer"))?
            .is_paused();

        if paused {
            self.resume()
        } else {
            self.start()
        }
    }

    /// Store a new selected duration and reset the timer to it.
    ///
    /// A running countdown is only discarded when `confirm_reset` is set;
    /// otherwise the change is refused with [`AppError::ConfirmationRequired`].
    pub fn set_selected_duration(
        self: &Arc<Self>,
        seconds: f64,
        confirm_reset: bool,
    ) -> Result<TimerSnapshot, AppError> {
        if !seconds.is_finite() || seconds <= 0.0 {
            return Err(AppError::InvalidDuration(seconds));
        }

        self.with_timer("preferences", |timer| {
            if timer.is_running() && !confirm_reset {
                warn!("Refusing to change duration while running without confirmation");
                return Err(AppError::ConfirmationRequired);
            }

            self.preferences
                .lock()
                .map_err(|_| AppError::Lock("preferences"))?
                .set_selected_duration(seconds)?;
            info!("Selected duration changed to {}s", seconds);

            timer.reset();
            self.clear_last_event()
        })
    }

    /// Selected duration from the preference store
    pub fn selected_duration(&self) -> Result<f64, AppError> {
        Ok(self
            .preferences
            .lock()
            .map_err(|_| AppError::Lock("preferences"))?
            .selected_duration())
    }

    /// Current timer snapshot
    pub fn snapshot(&self) -> Result<TimerSnapshot, AppError> {
        let (status, duration) = {
            let timer = self.timer.lock().map_err(|_| AppError::Lock("timer"))?;
            (timer.status(), timer.duration())
        };
        let last_event = *self.last_event.lock().map_err(|_| AppError::Lock("last event"))?;
        let selected = self.selected_duration()?;

        Ok(TimerSnapshot::new(status, duration, last_event, selected))
    }

    /// Fire one tick for the schedule `id`; returns whether it is still live
    pub fn scheduled_tick(&self, id: ScheduleId) -> Result<bool, AppError> {
        let mut timer = self.timer.lock().map_err(|_| AppError::Lock("timer"))?;
        Ok(timer.tick_scheduled(id))
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    fn clear_last_event(&self) -> Result<(), AppError> {
        *self.last_event.lock().map_err(|_| AppError::Lock("last event"))? = None;
        Ok(())
    }

    /// Replace the schedule task with one firing the engine's live schedule,
    /// or none. Takes the locked engine so the handle cannot go stale between
    /// reading it and spawning for it.
    ///
    /// The engine already ignores ticks from a superseded schedule, so aborting
    /// the old task only saves it a wakeup.
    fn sync_schedule(self: &Arc<Self>, timer: &CountdownTimer) {
        let schedule = timer.schedule();
        let Ok(mut current) = self.schedule_task.lock() else {
            warn!("Schedule task lock poisoned, leaving schedule task as is");
            return;
        };

        if current.as_ref().map(|(id, _)| *id) == schedule {
            return;
        }

        if let Some((id, old)) = current.take() {
            old.abort();
            debug!("Cancelled schedule task for {:?}", id);
        }

        if let Some(id) = schedule {
            let state = Arc::clone(self);
            let handle = tokio::spawn(async move {
                schedule_task(state, id).await;
            });
            *current = Some((id, handle));
            debug!("Spawned schedule task for {:?}", id);
        }
    }
}
