// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Arithmetic quiz routes.
//!
//! The session middleware is applied in routes/mod.rs for these routes.

use crate::error::{AppError, Result};
use crate::middleware::QuizSession;
use crate::models::Task;
use crate::routes::extract::ValidatedJson;
use crate::routes::ApiResponse;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/restapi", get(get_tasks).put(submit_answer))
}

#[derive(Deserialize)]
struct TasksQuery {
    /// Kept as a string so a non-numeric count gets our own error.
    count: Option<String>,
}

fn parse_count(raw: Option<&str>) -> Option<usize> {
    raw?.trim().parse::<usize>().ok().filter(|n| *n >= 1)
}

/// Get the first `count` tasks.
async fn get_tasks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TasksQuery>,
) -> Result<Json<ApiResponse<Vec<Task>>>> {
    let count = parse_count(params.count.as_deref())
        .ok_or_else(|| AppError::BadRequest("Invalid count".to_string()))?;

    Ok(ApiResponse::ok(state.quiz.tasks(count).to_vec()))
}

#[derive(Debug, Deserialize, Validate)]
struct AnswerRequest {
    #[validate(length(min = 1))]
    id: String,
    answer: f64,
}

#[derive(Serialize)]
struct AnswerResponse {
    success: bool,
    attempts: u32,
}

/// Check an answer. Wrong answers are reported as errors carrying the
/// attempt count.
async fn submit_answer(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<QuizSession>,
    ValidatedJson(body): ValidatedJson<AnswerRequest>,
) -> Result<Json<AnswerResponse>> {
    let accepted = state.quiz.submit(&session.id, &body.id, body.answer)?;

    tracing::debug!(
        task_id = %body.id,
        attempts = accepted.attempts,
        "Quiz answer accepted"
    );

    Ok(Json(AnswerResponse {
        success: true,
        attempts: accepted.attempts,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(Some("2")), Some(2));
        assert_eq!(parse_count(Some(" 10 ")), Some(10));
        assert_eq!(parse_count(Some("0")), None);
        assert_eq!(parse_count(Some("-1")), None);
        assert_eq!(parse_count(Some("abc")), None);
        assert_eq!(parse_count(None), None);
    }
}
