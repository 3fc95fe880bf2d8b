use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use egg_timer::{
    api::create_router, preferences::MemoryPreferences, state::AppState, TimerEvent,
};

fn test_state(selected: f64) -> Arc<AppState> {
    Arc::new(AppState::new(
        0,
        "127.0.0.1".to_string(),
        Box::new(MemoryPreferences::with_selected(selected)),
        None,
    ))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_health() {
    let app = create_router(test_state(360.0));
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_idle_status_shows_selected_duration() {
    let app = create_router(test_state(125.0));
    let (status, body) = send(&app, "GET", "/status", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["status"], "stopped");
    assert_eq!(body["timer"]["text"], "02:05");
    assert_eq!(body["timer"]["bucket"], "stopped");
    assert_eq!(body["selected_duration"], 125.0);
    assert_eq!(body["last_action"], Value::Null);
}

#[tokio::test]
async fn test_start_stop_resume_reset() {
    let app = create_router(test_state(125.0));

    let (status, body) = send(&app, "POST", "/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["status"], "running");
    assert_eq!(body["timer"]["duration_seconds"], 125.0);
    assert_eq!(body["timer"]["remaining_seconds"], 125);
    assert_eq!(body["timer"]["text"], "02:05");
    assert_eq!(body["timer"]["bucket"], "0");

    let (status, body) = send(&app, "POST", "/start", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "error");

    tokio::time::sleep(Duration::from_millis(20)).await;
    let (status, body) = send(&app, "POST", "/stop", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["status"], "paused");
    assert_eq!(body["timer"]["remaining_seconds"], 125);
    assert_eq!(body["timer"]["controls"]["reset"], true);

    let (status, _) = send(&app, "POST", "/stop", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&app, "POST", "/resume", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["status"], "running");
    assert_eq!(body["timer"]["remaining_seconds"], 125);

    let (status, _) = send(&app, "POST", "/resume", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&app, "POST", "/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["status"], "stopped");
    assert_eq!(body["timer"]["duration_seconds"], 360.0);
    assert_eq!(body["timer"]["text"], "02:05");
    assert_eq!(body["timer"]["bucket"], "stopped");
    assert_eq!(body["timer"]["last_event"], Value::Null);

    let (_, body) = send(&app, "GET", "/status", None).await;
    assert_eq!(body["last_action"], "reset");
}

#[tokio::test]
async fn test_operations_rejected_when_stopped() {
    let app = create_router(test_state(60.0));

    let (status, body) = send(&app, "POST", "/stop", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "timer is not running (currently stopped)");

    let (status, _) = send(&app, "POST", "/resume", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, "POST", "/reset", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_toggle_starts_and_resumes() {
    let app = create_router(test_state(60.0));

    let (status, body) = send(&app, "POST", "/toggle", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["status"], "running");

    tokio::time::sleep(Duration::from_millis(20)).await;
    send(&app, "POST", "/stop", None).await;

    let (status, body) = send(&app, "POST", "/toggle", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["status"], "running");
    assert_eq!(body["timer"]["remaining_seconds"], 60);

    let (status, _) = send(&app, "POST", "/toggle", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_preferences_require_confirmation_while_running() {
    let app = create_router(test_state(60.0));
    send(&app, "POST", "/start", None).await;

    let (status, body) =
        send(&app, "PUT", "/preferences", Some(json!({ "seconds": 90 }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"].as_str().unwrap().starts_with("Reset timer with new settings?"));

    let (_, body) = send(&app, "GET", "/preferences", None).await;
    assert_eq!(body["selected_duration"], 60.0);

    let (status, body) =
        send(&app, "PUT", "/preferences", Some(json!({ "seconds": 90, "reset": true }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["status"], "stopped");
    assert_eq!(body["timer"]["text"], "01:30");

    let (_, body) = send(&app, "GET", "/preferences", None).await;
    assert_eq!(body["selected_duration"], 90.0);

    let (_, body) = send(&app, "POST", "/start", None).await;
    assert_eq!(body["timer"]["duration_seconds"], 90.0);
}

#[tokio::test]
async fn test_preferences_change_when_stopped() {
    let app = create_router(test_state(60.0));

    let (status, body) =
        send(&app, "PUT", "/preferences", Some(json!({ "seconds": 30 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["text"], "00:30");

    let (status, _) = send(&app, "PUT", "/preferences", Some(json!({ "seconds": 0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_schedule_drives_countdown_to_completion() {
    let state = test_state(1.0);
    let mut events = state.subscribe();
    let app = create_router(Arc::clone(&state));

    let (status, _) = send(&app, "POST", "/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(events.recv().await.unwrap(), TimerEvent::Tick { remaining_seconds: 1 });

    let finished = tokio::time::timeout(Duration::from_secs(5), events.recv())
        .await
        .expect("countdown did not finish")
        .unwrap();
    assert_eq!(finished, TimerEvent::Finished);

    let (_, body) = send(&app, "GET", "/status", None).await;
    assert_eq!(body["timer"]["status"], "stopped");
    assert_eq!(body["timer"]["text"], "Done!");
    assert_eq!(body["timer"]["bucket"], "100");
    assert_eq!(body["timer"]["controls"]["start"], false);
}
