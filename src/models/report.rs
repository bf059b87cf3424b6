// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity reports: what was actually observed during a completed activity.

use crate::models::activity::MetricOptions;
use crate::time_utils::flexible_date;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Self-reported outcome of an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    No,
    Low,
    Normal,
    High,
}

/// Observed values for one planned interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "check_min_avg_max"))]
pub struct ReportInterval {
    #[validate(length(min = 1))]
    pub interval_id: String,
    pub duration: u32,
    /// Perceived intensity, 1..=10
    #[validate(range(min = 1, max = 10))]
    pub intensity_min: u8,
    #[validate(range(min = 1, max = 10))]
    pub intensity_max: u8,
    #[validate(range(min = 1, max = 10))]
    pub intensity_avg: u8,
    pub heart_rate_min: u32,
    pub heart_rate_max: u32,
    pub heart_rate_avg: u32,
    pub watt_min: u32,
    pub watt_max: u32,
    pub watt_avg: u32,
    #[validate(range(min = 0.0))]
    pub speed_min: f64,
    #[validate(range(min = 0.0))]
    pub speed_max: f64,
    #[validate(range(min = 0.0))]
    pub speed_avg: f64,
}

fn ordered<T: PartialOrd>(min: T, avg: T, max: T) -> bool {
    min <= avg && avg <= max
}

/// Every metric must satisfy `min <= avg <= max`.
fn check_min_avg_max(interval: &ReportInterval) -> Result<(), ValidationError> {
    let metrics = [
        (
            "intensity",
            ordered(interval.intensity_min, interval.intensity_avg, interval.intensity_max),
        ),
        (
            "heartRate",
            ordered(interval.heart_rate_min, interval.heart_rate_avg, interval.heart_rate_max),
        ),
        (
            "watt",
            ordered(interval.watt_min, interval.watt_avg, interval.watt_max),
        ),
        (
            "speed",
            ordered(interval.speed_min, interval.speed_avg, interval.speed_max),
        ),
    ];

    match metrics.iter().find(|(_, ok)| !ok) {
        Some((metric, _)) => {
            let mut err = ValidationError::new("min_avg_max");
            err.message = Some(format!("{} must satisfy min <= avg <= max", metric).into());
            Err(err)
        }
        None => Ok(()),
    }
}

/// Answer to one of the activity's questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportAnswer {
    pub question_id: String,
    pub answer: String,
}

/// Stored activity report (at most one per activity).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityReport {
    pub id: u64,
    #[serde(with = "flexible_date")]
    pub date: DateTime<Utc>,
    pub status: ReportStatus,
    pub intervals: Vec<ReportInterval>,
    pub answers: Vec<ReportAnswer>,
}

/// Per-metric peak values seen in a report. `None` means not observed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ObservedPeaks {
    pub heart_rate: Option<u32>,
    pub watt: Option<u32>,
    pub speed: Option<f64>,
}

impl ActivityReport {
    /// Maximum observed value per metric, restricted to the metrics the
    /// activity records.
    pub fn observed_peaks(&self, options: MetricOptions) -> ObservedPeaks {
        let heart_rate = options
            .heart_rate
            .then(|| self.intervals.iter().map(|i| i.heart_rate_max).max())
            .flatten();
        let watt = options
            .watt
            .then(|| self.intervals.iter().map(|i| i.watt_max).max())
            .flatten();
        let speed = options
            .speed
            .then(|| {
                self.intervals
                    .iter()
                    .map(|i| i.speed_max)
                    .filter(|v| v.is_finite())
                    .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
            })
            .flatten();

        ObservedPeaks {
            heart_rate,
            watt,
            speed,
        }
    }
}
