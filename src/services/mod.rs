// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod import;
pub mod quiz;
pub mod zones;

pub use import::ImportClient;
pub use quiz::{AttemptStore, QuizService};
pub use zones::{calculate_zones, raise_baseline, zones_for, UntrackedMetrics};
