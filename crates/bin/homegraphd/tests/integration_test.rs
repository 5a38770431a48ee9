//! End-to-end smoke tests for the full homegraphd stack.
//!
//! Each test spins up the complete application (seeded engine, real axum
//! router) and exercises the HTTP layer via `tower::ServiceExt::oneshot` —
//! no TCP port is bound.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use homegraph_adapter_http_axum::router;
use homegraph_adapter_http_axum::state::AppState;
use homegraph_engine::{Engine, SystemClock};

/// Build a fully-wired router over a freshly seeded engine.
fn app() -> axum::Router {
    router::build(AppState::new(Engine::with_default_world(SystemClock)))
}

fn post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// run + details round trips
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_turn_light_on_and_read_it_back() {
    let app = app();

    let resp = app
        .clone()
        .oneshot(post(
            "/api/run",
            serde_json::json!({"devices": ["light_001"], "op": "on"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["result"], "Applied 'on' to 1 device(s).");
    assert!(body["card_id"].is_string());

    let resp = app
        .oneshot(post(
            "/api/details",
            serde_json::json!({"devices": ["light_001"]}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let info: serde_json::Value =
        serde_json::from_str(body["devices_info"].as_str().unwrap()).unwrap();
    let on = info["light_001"]
        .as_array()
        .unwrap()
        .iter()
        .find(|view| view["name"] == "on")
        .unwrap();
    assert_eq!(on["value"], serde_json::json!(true));
}

#[tokio::test]
async fn should_enrich_thermostat_details_with_both_units() {
    let resp = app()
        .oneshot(post(
            "/api/details",
            serde_json::json!({"devices": ["thermostat_001"]}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    let info: serde_json::Value =
        serde_json::from_str(body["devices_info"].as_str().unwrap()).unwrap();
    let setpoint = info["thermostat_001"]
        .as_array()
        .unwrap()
        .iter()
        .find(|view| view["name"] == "thermostatTemperatureSetpoint")
        .unwrap();
    assert_eq!(setpoint["unit"], "F");
    assert_eq!(setpoint["value_imperial"], serde_json::json!(70.0));
    assert_eq!(setpoint["value_metric"], serde_json::json!(21.11));
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_not_found_for_unknown_device() {
    let resp = app()
        .oneshot(post(
            "/api/run",
            serde_json::json!({"devices": ["ghost_001"], "op": "on"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body = body_json(resp).await;
    assert_eq!(body["error"], "Device 'ghost_001' not found.");
}

#[tokio::test]
async fn should_return_bad_request_for_arity_violation() {
    let resp = app()
        .oneshot(post(
            "/api/run",
            serde_json::json!({"devices": ["light_001"], "op": "on", "values": ["true"]}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = body_json(resp).await;
    assert_eq!(
        body["error"],
        "Invalid input: Command 'on' does not support values."
    );
}

#[tokio::test]
async fn should_return_bad_request_for_out_of_range_brightness() {
    let resp = app()
        .oneshot(post(
            "/api/run",
            serde_json::json!({
                "devices": ["light_001"],
                "op": "set_brightness",
                "values": ["1.5"],
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = body_json(resp).await;
    assert_eq!(
        body["error"],
        "Value for set_brightness must be between 0.0 and 1.0"
    );
}

#[tokio::test]
async fn should_return_bad_request_for_unsupported_command() {
    let resp = app()
        .oneshot(post(
            "/api/run",
            serde_json::json!({"devices": ["lock_001"], "op": "set_brightness", "values": ["0.5"]}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = body_json(resp).await;
    assert_eq!(
        body["error"],
        "Device 'lock_001' does not support command 'set_brightness'."
    );
}

// ---------------------------------------------------------------------------
// Schedule lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_view_and_cancel_schedules() {
    let app = app();

    let resp = app
        .clone()
        .oneshot(post(
            "/api/run",
            serde_json::json!({
                "devices": ["light_001"],
                "op": "on",
                "delay": "10m",
                "duration": "5m",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["result"], "Scheduled 'on' for 1 device(s).");

    let resp = app
        .clone()
        .oneshot(post(
            "/api/schedules/view",
            serde_json::json!({"devices": ["light_001"]}),
        ))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["tts"], "Found 1 schedules.");

    let resp = app
        .clone()
        .oneshot(post(
            "/api/schedules/cancel",
            serde_json::json!({"devices": ["light_001"]}),
        ))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["tts"], "Cancelled 1 schedules.");

    let resp = app
        .oneshot(post(
            "/api/schedules/view",
            serde_json::json!({"devices": ["light_001"]}),
        ))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["tts"], "Found 0 schedules.");
}

#[tokio::test]
async fn should_fire_due_schedule_through_process_hook() {
    let app = app();

    // Zero delay: due as soon as the driver asks.
    let resp = app
        .clone()
        .oneshot(post(
            "/api/run",
            serde_json::json!({"devices": ["light_001"], "op": "on", "delay": "0s"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .clone()
        .oneshot(post("/api/schedules/process", serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["fired"], 1);

    let resp = app
        .oneshot(post(
            "/api/details",
            serde_json::json!({"devices": ["light_001"]}),
        ))
        .await
        .unwrap();
    let body = body_json(resp).await;
    let info: serde_json::Value =
        serde_json::from_str(body["devices_info"].as_str().unwrap()).unwrap();
    let on = info["light_001"]
        .as_array()
        .unwrap()
        .iter()
        .find(|view| view["name"] == "on")
        .unwrap();
    assert_eq!(on["value"], serde_json::json!(true));
}

#[tokio::test]
async fn should_cancel_idempotently_when_nothing_pending() {
    let resp = app()
        .oneshot(post(
            "/api/schedules/cancel",
            serde_json::json!({"devices": ["tv_001"]}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["tts"], "Cancelled 0 schedules.");
}
