// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Report question routes.

use crate::error::Result;
use crate::models::Question;
use crate::routes::extract::ValidatedJson;
use crate::routes::ApiResponse;
use crate::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/questions", get(list_questions).post(create_question))
}

#[derive(Debug, Deserialize, Validate)]
struct QuestionRequest {
    #[validate(length(min = 1, message = "Question and type are required"))]
    question: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Question and type are required"))]
    kind: String,
}

async fn list_questions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Question>>>> {
    Ok(ApiResponse::ok(state.db.list_questions().await?))
}

async fn create_question(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<QuestionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Question>>)> {
    let question = state.db.insert_question(&body.question, &body.kind).await?;

    tracing::info!(question_id = %question.id, kind = %question.kind, "Created question");
    Ok(ApiResponse::created(question))
}
