// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Planned training activity model for storage and API.

use crate::models::athlete::Sport;
use crate::models::report::ActivityReport;
use crate::time_utils::flexible_date;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn enabled() -> bool {
    true
}

/// Which metrics are recorded for an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricOptions {
    #[serde(default = "enabled", alias = "heartrate")]
    pub heart_rate: bool,
    #[serde(default = "enabled")]
    pub watt: bool,
    #[serde(default = "enabled")]
    pub speed: bool,
}

impl Default for MetricOptions {
    fn default() -> Self {
        Self {
            heart_rate: true,
            watt: true,
            speed: true,
        }
    }
}

/// One planned interval of an activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interval {
    pub id: String,
    /// Minutes
    pub duration: u32,
    /// Target intensity zone, 1..=5
    pub zone: u8,
}

/// Stored activity record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: u64,
    /// Owner's `user_id`
    pub athlete_id: String,
    #[serde(with = "flexible_date")]
    pub date: DateTime<Utc>,
    pub name: String,
    pub tags: String,
    pub sport: Sport,
    pub question_ids: Vec<String>,
    pub metric_options: MetricOptions,
    pub intervals: Vec<Interval>,
    pub contest_id: Option<u64>,
    pub goal_id: Option<u64>,
    pub report: Option<ActivityReport>,
}

impl Activity {
    pub fn has_interval(&self, interval_id: &str) -> bool {
        self.intervals.iter().any(|i| i.id == interval_id)
    }
}
