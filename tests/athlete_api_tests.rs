// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Athlete profile API tests: creation, zones, edits and planning limits.

use axum::http::StatusCode;
use serde_json::{json, Value};
use training_tracker::config::Config;
use training_tracker::services::UntrackedMetrics;

mod common;

fn zone_values(athlete: &Value, metric: &str) -> Vec<f64> {
    athlete["meta"]["intensityZones"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|z| z["metric"] == metric)
        .map(|z| z["targetValue"].as_f64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_create_athlete_derives_zones() {
    let (app, _state) = common::create_test_app();

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/athletes",
        Some(json!({
            "userId": "kari",
            "gender": "Kvinne",
            "sport": "Løping",
            "meta": { "heartrate": 200, "watt": 300, "speed": 40 }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    let athlete = &body["data"];
    assert_eq!(athlete["userId"], "kari");
    assert_eq!(athlete["sport"], "Løping");
    assert_eq!(athlete["meta"]["maxHeartRate"], 200);
    assert_eq!(athlete["meta"]["intensityZones"].as_array().unwrap().len(), 15);
    assert_eq!(
        zone_values(athlete, "heartRate"),
        vec![100.0, 120.0, 140.0, 160.0, 180.0]
    );
    assert_eq!(
        zone_values(athlete, "watt"),
        vec![150.0, 180.0, 210.0, 240.0, 270.0]
    );
}

#[tokio::test]
async fn test_create_athlete_generates_user_id() {
    let (app, _state) = common::create_test_app();

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/athletes",
        Some(json!({ "gender": "Mann", "sport": "Ski", "meta": { "heartrate": 185 } })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let user_id = body["data"]["userId"].as_str().unwrap();
    assert!(uuid::Uuid::parse_str(user_id).is_ok());
}

#[tokio::test]
async fn test_duplicate_user_id_conflicts() {
    let (app, _state) = common::create_test_app();
    common::create_athlete(&app, "ola", 190).await;

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/athletes",
        Some(json!({ "userId": "ola", "gender": "Mann", "sport": "Annet" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_missing_gender_is_rejected() {
    let (app, _state) = common::create_test_app();

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/athletes",
        Some(json!({ "gender": "", "sport": "Sykling" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Validation failed");
    assert!(body["details"].as_str().unwrap().contains("gender"));
}

#[tokio::test]
async fn test_unknown_sport_is_rejected() {
    let (app, _state) = common::create_test_app();

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/athletes",
        Some(json!({ "gender": "Mann", "sport": "Curling" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_get_missing_athlete_is_not_found() {
    let (app, _state) = common::create_test_app();

    let (status, body) = common::send(&app, "GET", "/api/athletes/nobody", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No athlete found with this id");
}

#[tokio::test]
async fn test_list_includes_owned_records() {
    let (app, _state) = common::create_test_app();
    common::create_athlete(&app, "ola", 190).await;
    common::create_activity(&app, "ola", "2024-04-10", "rolig").await;

    let (status, body) = common::send(&app, "GET", "/api/athletes", None).await;

    assert_eq!(status, StatusCode::OK);
    let athletes = body["data"].as_array().unwrap();
    assert_eq!(athletes.len(), 1);
    assert_eq!(athletes[0]["activities"].as_array().unwrap().len(), 1);
    assert!(athletes[0]["contests"].as_array().unwrap().is_empty());
    assert!(athletes[0]["goals"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_profile_edit_can_lower_baselines() {
    let (app, _state) = common::create_test_app();
    common::create_athlete(&app, "ola", 190).await;

    let (status, body) = common::send(
        &app,
        "PUT",
        "/api/athletes/ola",
        Some(json!({
            "gender": "Mann",
            "sport": "Løping",
            "meta": { "heartrate": 180, "watt": 0, "speed": 12.0 }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let athlete = &body["data"];
    assert_eq!(athlete["gender"], "Mann");
    assert_eq!(athlete["meta"]["maxHeartRate"], 180);
    assert_eq!(
        zone_values(athlete, "heartRate"),
        vec![90.0, 108.0, 126.0, 144.0, 162.0]
    );
    assert_eq!(zone_values(athlete, "watt"), vec![0.0; 5]);

    let (_, fetched) = common::send(&app, "GET", "/api/athletes/ola", None).await;
    assert_eq!(fetched["data"]["meta"]["maxHeartRate"], 180);
}

#[tokio::test]
async fn test_update_missing_athlete_is_not_found() {
    let (app, _state) = common::create_test_app();

    let (status, _) = common::send(
        &app,
        "PUT",
        "/api/athletes/ghost",
        Some(json!({ "gender": "Mann", "sport": "Ski" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_omit_policy_drops_untracked_zones() {
    let config = Config {
        untracked_metrics: UntrackedMetrics::Omit,
        ..Config::test_default()
    };
    let (app, _state) = common::create_test_app_with(config);

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/athletes",
        Some(json!({
            "userId": "løper",
            "gender": "Kvinne",
            "sport": "Løping",
            "meta": { "heartrate": 190, "speed": 14.0 }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let athlete = &body["data"];
    assert_eq!(athlete["meta"]["intensityZones"].as_array().unwrap().len(), 10);
    assert!(zone_values(athlete, "watt").is_empty());
}

#[tokio::test]
async fn test_contest_limit_per_year() {
    let (app, _state) = common::create_test_app();
    common::create_athlete(&app, "ola", 190).await;

    for (i, date) in ["2024-02-01", "2024-06-01", "2024-09-01"].iter().enumerate() {
        let (status, body) = common::send(
            &app,
            "POST",
            "/api/athletes/ola/contests",
            Some(json!({
                "name": format!("Ritt {}", i),
                "date": date,
                "location": "Lillehammer",
                "goal": "Under 3 timer",
                "sport": "Sykling",
                "priority": "A"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
    }

    let fourth = json!({
        "name": "Ritt 4",
        "date": "2024-11-01T09:00:00Z",
        "location": "Oslo",
        "goal": "Fullføre",
        "sport": "Sykling",
        "priority": "C"
    });
    let (status, body) = common::send(
        &app,
        "POST",
        "/api/athletes/ola/contests",
        Some(fourth.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "An athlete cannot have more than three contests in a given year"
    );

    // A different year is fine
    let mut next_year = fourth;
    next_year["date"] = json!("2025-01-15");
    let (status, _) = common::send(
        &app,
        "POST",
        "/api/athletes/ola/contests",
        Some(next_year),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, listed) = common::send(&app, "GET", "/api/athletes/ola/contests", None).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_goal_limit_per_year() {
    let (app, _state) = common::create_test_app();
    common::create_athlete(&app, "ola", 190).await;

    let goal = |date: &str| {
        json!({ "name": "Volum", "date": date, "goal": 500, "comment": "timer" })
    };

    for date in ["2024-03-01", "2024-04-01", "2024-05-01"] {
        let (status, _) =
            common::send(&app, "POST", "/api/athletes/ola/goals", Some(goal(date))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) =
        common::send(&app, "POST", "/api/athletes/ola/goals", Some(goal("2024-12-31"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_goal_with_invalid_date_is_rejected() {
    let (app, _state) = common::create_test_app();
    common::create_athlete(&app, "ola", 190).await;

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/athletes/ola/goals",
        Some(json!({ "name": "Volum", "date": "neste uke", "goal": 10 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_health_check() {
    let (app, _state) = common::create_test_app();

    let (status, body) = common::send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
