// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Athlete profile routes.

use crate::error::{AppError, Result};
use crate::models::draft::{AthleteUpdate, NewAthlete};
use crate::models::{Athlete, AthleteBaseline, AthleteDetail, Sport};
use crate::routes::extract::ValidatedJson;
use crate::routes::ApiResponse;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/athletes", get(list_athletes).post(create_athlete))
        .route(
            "/api/athletes/{user_id}",
            get(get_athlete).put(update_athlete),
        )
}

/// Athlete body for create and update. `meta` carries the baselines.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct AthleteRequest {
    /// Ignored on update; the path decides which athlete is edited.
    #[validate(length(min = 1, max = 128))]
    user_id: Option<String>,
    #[validate(length(min = 1, message = "Sport and gender are required"))]
    gender: String,
    sport: Sport,
    #[serde(default)]
    meta: AthleteBaseline,
}

fn check_baseline(baseline: &AthleteBaseline) -> Result<()> {
    if !baseline.is_valid() {
        return Err(AppError::BadRequest(
            "Speed baseline must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}

async fn list_athletes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<AthleteDetail>>>> {
    Ok(ApiResponse::ok(state.db.list_athletes().await?))
}

async fn get_athlete(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<AthleteDetail>>> {
    let detail = state
        .db
        .get_athlete_detail(&user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No athlete found with this id".to_string()))?;
    Ok(ApiResponse::ok(detail))
}

/// Create an athlete. Zones are derived from the submitted baselines.
async fn create_athlete(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<AthleteRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Athlete>>)> {
    check_baseline(&body.meta)?;

    let new = NewAthlete {
        user_id: body
            .user_id
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        gender: body.gender,
        sport: body.sport,
        baseline: body.meta,
    };

    let athlete = state
        .db
        .insert_athlete(new, state.config.untracked_metrics)
        .await?;

    tracing::info!(user_id = %athlete.user_id, "Created athlete");
    Ok(ApiResponse::created(athlete))
}

/// Profile edit. Baselines are set as given, which may lower them, and all
/// zones are recomputed.
async fn update_athlete(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    ValidatedJson(body): ValidatedJson<AthleteRequest>,
) -> Result<Json<ApiResponse<Athlete>>> {
    check_baseline(&body.meta)?;

    let update = AthleteUpdate {
        gender: body.gender,
        sport: body.sport,
        baseline: body.meta,
    };

    let athlete = state
        .db
        .update_athlete(&user_id, update, state.config.untracked_metrics)
        .await?;

    tracing::info!(
        user_id = %user_id,
        max_heart_rate = athlete.meta.baseline.max_heart_rate,
        threshold_watt = athlete.meta.baseline.threshold_watt,
        threshold_speed = athlete.meta.baseline.threshold_speed,
        "Updated athlete baselines"
    );
    Ok(ApiResponse::ok(athlete))
}
