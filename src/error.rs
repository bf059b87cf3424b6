// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A quiz answer was not accepted; carries the attempt count so far.
    #[error("{message}")]
    AnswerRejected { message: String, attempts: u32 },

    #[error("Import source error: {0}")]
    Upstream(String),
}

/// JSON failure envelope.
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attempts: Option<u32>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut attempts = None;
        let mut details = None;
        let (status, error) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Validation(errors) => {
                details = Some(errors.to_string());
                (StatusCode::BAD_REQUEST, "Validation failed".to_string())
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::AnswerRejected {
                message,
                attempts: n,
            } => {
                attempts = Some(*n);
                (StatusCode::BAD_REQUEST, message.clone())
            }
            AppError::Upstream(msg) => {
                tracing::warn!(error = %msg, "Import source error");
                (StatusCode::BAD_GATEWAY, msg.clone())
            }
        };

        let body = ErrorResponse {
            success: false,
            error,
            details,
            attempts,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
