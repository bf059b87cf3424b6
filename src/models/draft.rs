// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Validated inputs for creating and updating stored records.
//!
//! Handlers turn request bodies into these; the database assigns IDs.

use crate::models::{
    AthleteBaseline, MetricOptions, Priority, ReportAnswer, ReportInterval, ReportStatus, Sport,
};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct NewAthlete {
    pub user_id: String,
    pub gender: String,
    pub sport: Sport,
    pub baseline: AthleteBaseline,
}

/// Profile edit: sets baselines absolutely.
#[derive(Debug, Clone)]
pub struct AthleteUpdate {
    pub gender: String,
    pub sport: Sport,
    pub baseline: AthleteBaseline,
}

/// Interval as submitted; `id` is kept if it matches an existing interval.
#[derive(Debug, Clone)]
pub struct IntervalDraft {
    pub id: Option<String>,
    pub duration: u32,
    pub zone: u8,
}

#[derive(Debug, Clone)]
pub struct ActivityDraft {
    pub date: DateTime<Utc>,
    pub name: String,
    pub tags: String,
    pub sport: Sport,
    pub question_ids: Vec<String>,
    pub metric_options: MetricOptions,
    pub intervals: Vec<IntervalDraft>,
    pub contest_id: Option<u64>,
    pub goal_id: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct ReportDraft {
    pub date: DateTime<Utc>,
    pub status: ReportStatus,
    pub intervals: Vec<ReportInterval>,
    pub answers: Vec<ReportAnswer>,
}

#[derive(Debug, Clone)]
pub struct ContestDraft {
    pub name: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub goal: String,
    pub sport: Sport,
    pub priority: Priority,
    pub comment: String,
}

#[derive(Debug, Clone)]
pub struct GoalDraft {
    pub name: String,
    pub date: DateTime<Utc>,
    pub goal: u32,
    pub comment: String,
}
