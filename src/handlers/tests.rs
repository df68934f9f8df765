use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::{
    config::Config,
    create_router,
    tracking::{ExerciseProfile, ProfileRegistry},
    AppState,
};

fn app() -> Router {
    create_router(AppState::new(Config::default(), ProfileRegistry::builtin()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    };

    let response = app.clone().oneshot(request.unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Left arm with the elbow bent to `degrees`
fn left_arm(degrees: f32) -> Value {
    let rad = degrees.to_radians();
    json!({
        "left_shoulder": {"x": 1.0, "y": 0.0, "visibility": 0.9},
        "left_elbow": {"x": 0.0, "y": 0.0, "visibility": 0.9},
        "left_wrist": {"x": rad.cos(), "y": rad.sin(), "visibility": 0.9}
    })
}

async fn frame(app: &Router, timestamp: f64, degrees: f32) -> (StatusCode, Value) {
    let body = json!({ "timestamp": timestamp, "landmarks": left_arm(degrees) });
    send(app, Method::POST, "/api/v1/session/frames", Some(body)).await
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["exercises"], 5);
}

#[tokio::test]
async fn test_exercise_profiles() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/v1/exercises", None).await;
    assert_eq!(status, StatusCode::OK);
    let profiles = tokio_test::assert_ok!(serde_json::from_value::<Vec<ExerciseProfile>>(body));
    assert_eq!(profiles.len(), 5);
    assert!(profiles.iter().all(|p| p.validate().is_ok()));

    let (status, body) = send(&app, Method::GET, "/api/v1/exercises/squat", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exercise"], "squat");
    assert_eq!(body["low_threshold"], 90.0);
    assert_eq!(body["count_on"], "up");

    let (status, body) = send(&app, Method::GET, "/api/v1/exercises/plank", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn test_select_exercise() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/v1/session/exercise",
        Some(json!({ "exercise": "Lateral_Raise" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["profile"]["count_on"], "down");
    assert_eq!(body["snapshot"]["exercise_name"], "lateral_raise");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/v1/session/exercise",
        Some(json!({ "exercise": "burpee" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unknown exercise: burpee");

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/v1/session/exercise",
        Some(json!({ "exercise": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Failed selections leave the previous exercise in place
    let (_, body) = send(&app, Method::GET, "/api/v1/session", None).await;
    assert_eq!(body["exercise_name"], "lateral_raise");
}

#[tokio::test]
async fn test_counts_reps_over_http() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/api/v1/session/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["active"], true);
    assert!(body["session_id"].is_string());

    let angles = [170.0, 170.0, 170.0, 35.0, 35.0, 35.0, 170.0, 170.0];
    let mut last = Value::Null;
    for (i, angle) in angles.iter().enumerate() {
        let (status, body) = frame(&app, i as f64 * 0.2, *angle).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "tracked");
        last = body;
    }
    assert_eq!(last["snapshot"]["count"], 1);
    assert_eq!(last["snapshot"]["stage"], "up");

    let (status, body) = send(&app, Method::POST, "/api/v1/session/stop", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"]["count"], 1);
    assert_eq!(body["snapshot"]["active"], false);
    assert_eq!(body["snapshot"]["count"], 1);
}

#[tokio::test]
async fn test_frame_outcomes() {
    let app = app();

    // Not started yet: measured, not counted
    let (status, body) = frame(&app, 0.0, 90.0).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "idle");
    assert!((body["raw_angle"].as_f64().unwrap() - 90.0).abs() < 0.1);
    assert_eq!(body["snapshot"]["count"], 0);

    send(&app, Method::POST, "/api/v1/session/start", None).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/session/frames",
        Some(json!({ "timestamp": 0.1, "landmarks": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "skipped");
    assert_eq!(body["skipped_reason"], "no pose detected");

    let (status, body) = frame(&app, 1.0, 170.0).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["event"]["kind"], "classified");
    assert_eq!(body["snapshot"]["stage"], "down");
}

#[tokio::test]
async fn test_out_of_order_frame_conflicts() {
    let app = app();
    send(&app, Method::POST, "/api/v1/session/start", None).await;

    let (status, _) = frame(&app, 2.0, 170.0).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = frame(&app, 1.0, 30.0).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], 409);

    let (_, body) = send(&app, Method::GET, "/api/v1/session", None).await;
    assert_eq!(body["stage"], "down");
}

#[tokio::test]
async fn test_malformed_landmarks_rejected() {
    let app = app();

    let points = vec![json!({"x": 0.0, "y": 0.0, "visibility": 0.9}); 5];
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/session/frames",
        Some(json!({ "timestamp": 0.0, "landmarks": points })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "expected 33 landmarks, got 5");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/session/frames",
        Some(json!({ "timestamp": -3.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_frame_without_timestamp_uses_server_clock() {
    let app = app();
    send(&app, Method::POST, "/api/v1/session/start", None).await;

    let body = json!({ "landmarks": left_arm(170.0) });
    let (status, body) = send(&app, Method::POST, "/api/v1/session/frames", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "tracked");
}

#[tokio::test]
async fn test_undecodable_landmarks_are_bad_requests() {
    let app = app();

    let bodies = [
        json!({ "landmarks": { "left_hand": {"x": 0.1, "y": 0.2, "visibility": 0.9} } }),
        json!({ "landmarks": { "left_elbow": {"x": 0.1, "y": 0.2} } }),
    ];
    for body in bodies {
        let (status, body) = send(&app, Method::POST, "/api/v1/session/frames", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
        assert!(body["error"].is_string());
    }

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/v1/session/exercise",
        Some(json!({ "name": "squat" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}
