// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Training Tracker API Server
//!
//! Serves the athlete training log, where intensity zones follow each
//! athlete's reported performance, and the arithmetic quiz.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use training_tracker::{config::Config, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        untracked_metrics = ?config.untracked_metrics,
        quiz_max_attempts = config.quiz_max_attempts,
        "Starting Training Tracker API"
    );

    let state = Arc::new(AppState::new(config.clone()));
    let app = training_tracker::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging. `RUST_LOG` overrides the default filter.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("training_tracker=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
