// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use training_tracker::config::Config;
use training_tracker::routes::create_router;
use training_tracker::AppState;

/// Create a test app with the default test configuration.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Config::test_default())
}

#[allow(dead_code)]
pub fn create_test_app_with(config: Config) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config));
    (create_router(state.clone()), state)
}

/// Build a request, with a JSON body when one is given.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[allow(dead_code)]
pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Send one request and decode the JSON reply.
#[allow(dead_code)]
pub async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(json_request(method, uri, body))
        .await
        .unwrap();
    let status = response.status();
    (status, body_json(response).await)
}

/// Create an athlete and return its `userId`.
#[allow(dead_code)]
pub async fn create_athlete(app: &axum::Router, user_id: &str, heartrate: u32) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/athletes",
        Some(json!({
            "userId": user_id,
            "gender": "Kvinne",
            "sport": "Sykling",
            "meta": { "heartrate": heartrate, "watt": 250, "speed": 35.0 }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["data"]["userId"].as_str().unwrap().to_string()
}

/// Create a question and return its ID.
#[allow(dead_code)]
pub async fn create_question(app: &axum::Router) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/questions",
        Some(json!({ "question": "Hvordan føltes økten?", "type": "text" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["data"]["id"].as_str().unwrap().to_string()
}

/// Create a two-interval activity and return the response data.
#[allow(dead_code)]
pub async fn create_activity(app: &axum::Router, user_id: &str, date: &str, tags: &str) -> Value {
    let question_id = create_question(app).await;
    let (status, body) = send(
        app,
        "POST",
        &format!("/api/athletes/{}/activities", user_id),
        Some(json!({
            "date": date,
            "name": "Terskeløkt",
            "tags": tags,
            "sport": "Sykling",
            "questionIds": [question_id],
            "metricOptions": { "heartRate": true, "watt": true, "speed": true },
            "intervals": [
                { "duration": 10, "zone": 2 },
                { "duration": 20, "zone": 4 }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["data"].clone()
}
