// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Training Tracker: athlete training log and arithmetic quiz API
//!
//! This crate provides the backend API for an athlete training log
//! (athletes, activities, reports, contests, goals) whose intensity zones
//! follow the athlete's performance baselines, plus a small quiz service.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::MemoryDb;
use services::{ImportClient, QuizService};
use std::time::Duration;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: MemoryDb,
    pub quiz: QuizService,
    pub importer: ImportClient,
}

impl AppState {
    /// Build state with an empty database from configuration.
    pub fn new(config: Config) -> Self {
        let quiz = QuizService::new(
            config.quiz_max_attempts,
            Duration::from_secs(config.quiz_session_ttl_minutes.saturating_mul(60)),
        );
        let importer = ImportClient::new(config.import_api_url.clone());
        Self {
            config,
            db: MemoryDb::new(),
            quiz,
            importer,
        }
    }
}
