//! Egg Timer - a countdown timer controlled over HTTP
//!
//! This is the main entry point for the egg-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use egg_timer::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::event_listener_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("egg_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting egg-timer server v{}", env!("CARGO_PKG_VERSION"));

    let preferences = config.preferences();
    info!(
        "Configuration: host={}, port={}, selected duration={}s",
        config.host,
        config.port,
        preferences.selected_duration()
    );

    // Create application state
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        preferences,
        config.on_finish.clone(),
    ));

    // Start the event listener background task
    let listener_state = Arc::clone(&state);
    tokio::spawn(async move {
        event_listener_task(listener_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start       - Start a fresh countdown");
    info!("  POST /stop        - Pause the countdown");
    info!("  POST /resume      - Resume a paused countdown");
    info!("  POST /reset       - Reset to the selected duration");
    info!("  POST /toggle      - Resume if paused, otherwise start");
    info!("  GET  /status      - Current timer state and display");
    info!("  GET  /preferences - Selected duration");
    info!("  PUT  /preferences - Change the selected duration");
    info!("  GET  /health      - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
