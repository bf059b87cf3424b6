// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Seasonal planning records: contests and training goals.

use crate::models::athlete::Sport;
use crate::time_utils::flexible_date;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An athlete may plan at most this many contests, and separately this many
/// goals, per calendar year.
pub const MAX_PER_YEAR: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    A,
    B,
    C,
}

/// A competition the athlete is training towards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contest {
    pub id: u64,
    pub athlete_id: String,
    pub name: String,
    #[serde(with = "flexible_date")]
    pub date: DateTime<Utc>,
    pub location: String,
    pub goal: String,
    pub sport: Sport,
    pub priority: Priority,
    pub comment: String,
}

/// A numeric training goal with a target date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingGoal {
    pub id: u64,
    pub athlete_id: String,
    pub name: String,
    #[serde(with = "flexible_date")]
    pub date: DateTime<Utc>,
    pub goal: u32,
    pub comment: String,
}
