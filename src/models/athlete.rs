// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Athlete profile, performance baselines and sport types.

use crate::models::plan::{Contest, TrainingGoal};
use crate::models::zone::{IntensityZone, Metric};
use crate::models::Activity;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Sport an athlete (or activity, or contest) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Sport {
    #[serde(rename = "Løping")]
    Running,
    #[serde(rename = "Sykling")]
    Cycling,
    #[serde(rename = "Ski")]
    Skiing,
    #[serde(rename = "Triatlon")]
    Triathlon,
    #[serde(rename = "Svømming")]
    Swimming,
    #[serde(rename = "Styrke")]
    Strength,
    #[serde(rename = "Annet")]
    Other,
}

/// The three scalar performance baselines for one athlete.
///
/// A zero value means the metric is not tracked.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct AthleteBaseline {
    /// Beats per minute
    #[serde(default, alias = "heartrate")]
    pub max_heart_rate: u32,
    #[serde(default, alias = "watt")]
    pub threshold_watt: u32,
    /// km/h
    #[serde(default, alias = "speed")]
    pub threshold_speed: f64,
}

impl AthleteBaseline {
    pub fn new(max_heart_rate: u32, threshold_watt: u32, threshold_speed: f64) -> Self {
        Self {
            max_heart_rate,
            threshold_watt,
            threshold_speed,
        }
    }

    /// Baseline value for a metric as a float.
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::HeartRate => f64::from(self.max_heart_rate),
            Metric::Watt => f64::from(self.threshold_watt),
            Metric::Speed => self.threshold_speed,
        }
    }

    pub fn is_tracked(&self, metric: Metric) -> bool {
        self.value(metric) > 0.0
    }

    /// Speed is the only baseline that deserializes from a signed number.
    pub fn is_valid(&self) -> bool {
        self.threshold_speed.is_finite() && self.threshold_speed >= 0.0
    }
}

/// Baselines plus the zone ladder derived from them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct AthleteMeta {
    #[serde(flatten)]
    pub baseline: AthleteBaseline,
    pub intensity_zones: Vec<IntensityZone>,
}

impl AthleteMeta {
    /// Replace the baseline and overwrite the whole zone set.
    pub fn overwrite(&mut self, baseline: AthleteBaseline, zones: Vec<IntensityZone>) {
        self.baseline = baseline;
        self.intensity_zones = zones;
    }

    pub fn zone(&self, metric: Metric, level: u8) -> Option<&IntensityZone> {
        self.intensity_zones
            .iter()
            .find(|z| z.key() == (metric, level))
    }
}

/// Stored athlete record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Athlete {
    /// Internal numeric ID
    pub id: u64,
    /// External identifier used in URLs
    pub user_id: String,
    pub gender: String,
    pub sport: Sport,
    pub meta: AthleteMeta,
}

/// Athlete together with everything they own, as served by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AthleteDetail {
    #[serde(flatten)]
    pub athlete: Athlete,
    pub activities: Vec<Activity>,
    pub contests: Vec<Contest>,
    pub goals: Vec<TrainingGoal>,
}
