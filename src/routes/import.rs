// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Athlete import route.

use crate::error::Result;
use crate::routes::ApiResponse;
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/import", post(import_athletes))
}

#[derive(Serialize)]
struct ImportSummary {
    imported: usize,
}

/// Pull every page of the external athlete source into the database.
async fn import_athletes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<ImportSummary>>> {
    tracing::info!(source = %state.config.import_api_url, "Starting athlete import");

    let imported = state
        .importer
        .import_all(
            &state.db,
            state.config.untracked_metrics,
            state.config.import_max_pages,
        )
        .await?;

    tracing::info!(imported, "Athlete import complete");
    Ok(ApiResponse::ok(ImportSummary { imported }))
}
