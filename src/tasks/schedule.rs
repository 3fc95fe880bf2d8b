//! Periodic tick background task

use std::sync::Arc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error};

use crate::{
    engine::{ScheduleId, TICK_PERIOD},
    state::AppState,
};

/// Fire the engine's schedule `id` once per tick period until it is cancelled.
///
/// The first firing happens one period after spawn since every operation that
/// installs a schedule already ticks synchronously.
pub async fn schedule_task(state: Arc<AppState>, id: ScheduleId) {
    debug!("Schedule task for {:?} running", id);

    let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        match state.scheduled_tick(id) {
            Ok(true) => {}
            Ok(false) => {
                debug!("Schedule {:?} no longer live, stopping task", id);
                break;
            }
            Err(e) => {
                error!("Failed to tick countdown: {}", e);
                break;
            }
        }
    }
}
