// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Contest and training goal routes.

use crate::error::Result;
use crate::models::draft::{ContestDraft, GoalDraft};
use crate::models::{Contest, Priority, Sport, TrainingGoal};
use crate::routes::extract::ValidatedJson;
use crate::routes::ApiResponse;
use crate::time_utils::flexible_date;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/athletes/{user_id}/contests",
            get(list_contests).post(create_contest),
        )
        .route(
            "/api/athletes/{user_id}/goals",
            get(list_goals).post(create_goal),
        )
}

// ─── Contests ────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
struct ContestRequest {
    #[validate(length(min = 1))]
    name: String,
    #[serde(with = "flexible_date")]
    date: DateTime<Utc>,
    #[validate(length(min = 1))]
    location: String,
    #[validate(length(min = 1))]
    goal: String,
    sport: Sport,
    priority: Priority,
    #[serde(default)]
    comment: String,
}

async fn list_contests(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Contest>>>> {
    Ok(ApiResponse::ok(state.db.list_contests(&user_id).await?))
}

async fn create_contest(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    ValidatedJson(body): ValidatedJson<ContestRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Contest>>)> {
    let draft = ContestDraft {
        name: body.name,
        date: body.date,
        location: body.location,
        goal: body.goal,
        sport: body.sport,
        priority: body.priority,
        comment: body.comment,
    };

    let contest = state.db.insert_contest(&user_id, draft).await?;

    tracing::info!(user_id = %user_id, contest_id = contest.id, "Created contest");
    Ok(ApiResponse::created(contest))
}

// ─── Training Goals ──────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
struct GoalRequest {
    #[validate(length(min = 1))]
    name: String,
    #[serde(with = "flexible_date")]
    date: DateTime<Utc>,
    goal: u32,
    #[serde(default)]
    comment: String,
}

async fn list_goals(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<TrainingGoal>>>> {
    Ok(ApiResponse::ok(state.db.list_goals(&user_id).await?))
}

async fn create_goal(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    ValidatedJson(body): ValidatedJson<GoalRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TrainingGoal>>)> {
    let draft = GoalDraft {
        name: body.name,
        date: body.date,
        goal: body.goal,
        comment: body.comment,
    };

    let goal = state.db.insert_goal(&user_id, draft).await?;

    tracing::info!(user_id = %user_id, goal_id = goal.id, "Created training goal");
    Ok(ApiResponse::created(goal))
}
