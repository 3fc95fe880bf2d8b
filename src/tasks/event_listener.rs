//! Timer event listener background task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};

use crate::{
    display::text_for,
    engine::TimerEvent,
    services::run_completion_command,
    state::AppState,
};

/// Background task that logs timer notifications and runs the completion hook
pub async fn event_listener_task(state: Arc<AppState>) {
    info!("Starting timer event listener");

    let mut event_rx = state.subscribe();

    loop {
        match event_rx.recv().await {
            Ok(TimerEvent::Tick { remaining_seconds }) => {
                debug!("Countdown at {}", text_for(remaining_seconds));
            }
            Ok(TimerEvent::Finished) => {
                info!("Countdown finished");

                if let Some(command) = state.on_finish.as_deref() {
                    if let Err(e) = run_completion_command(command).await {
                        error!("Completion command failed: {}", e);
                    }
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Event listener lagged, skipped {} timer events", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Timer event channel closed, stopping listener");
                break;
            }
        }
    }
}
