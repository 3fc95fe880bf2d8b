//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{extract::State, response::Json};
use tracing::{error, info, warn};

use crate::state::{AppError, AppState, TimerSnapshot};
use super::responses::{
    ApiResponse, HealthResponse, PreferencesRequest, PreferencesResponse, StatusResponse,
};

/// Log the outcome of a timer operation and wrap it for the client
fn respond(
    action: &str,
    result: Result<TimerSnapshot, AppError>,
) -> Result<Json<ApiResponse>, AppError> {
    match result {
        Ok(timer) => {
            info!("{} endpoint called - timer now {} at {}", action, timer.status, timer.text);
            Ok(Json(ApiResponse::ok(format!("Timer {}", timer.status), timer)))
        }
        Err(e) if e.is_conflict() => {
            warn!("{} rejected: {}", action, e);
            Err(e)
        }
        Err(e) => {
            error!("{} failed: {}", action, e);
            Err(e)
        }
    }
}

/// Handle POST /start - Start a fresh countdown from the selected duration
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, AppError> {
    respond("Start", state.start())
}

/// Handle POST /stop - Pause the running countdown
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, AppError> {
    respond("Stop", state.stop())
}

/// Handle POST /resume - Continue a paused countdown
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, AppError> {
    respond("Resume", state.resume())
}

/// Handle POST /reset - Return to the idle state
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, AppError> {
    respond("Reset", state.reset())
}

/// Handle POST /toggle - Resume when paused, otherwise start
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, AppError> {
    respond("Toggle", state.toggle())
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, AppError> {
    let timer = state.snapshot().inspect_err(|e| error!("Failed to get timer state: {}", e))?;
    let selected_duration = state
        .selected_duration()
        .inspect_err(|e| error!("Failed to read preferences: {}", e))?;

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        selected_duration,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /preferences - Return the selected duration
pub async fn get_preferences_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PreferencesResponse>, AppError> {
    let selected_duration = state.selected_duration()?;
    Ok(Json(PreferencesResponse { selected_duration }))
}

/// Handle PUT /preferences - Change the selected duration and reset the timer
pub async fn set_preferences_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PreferencesRequest>,
) -> Result<Json<ApiResponse>, AppError> {
    respond(
        "Preferences",
        state.set_selected_duration(request.seconds, request.reset),
    )
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
