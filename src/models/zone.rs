// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Intensity zone records derived from athlete baselines.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A performance metric that carries its own zone ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    HeartRate,
    Watt,
    Speed,
}

impl Metric {
    /// All metrics, in storage order.
    pub const ALL: [Metric; 3] = [Metric::HeartRate, Metric::Watt, Metric::Speed];
}

/// One target value on an athlete's zone ladder.
///
/// Identified by `(metric, level)` within an athlete.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct IntensityZone {
    pub metric: Metric,
    /// 1..=5
    pub level: u8,
    pub target_value: f64,
}

impl IntensityZone {
    pub fn key(&self) -> (Metric, u8) {
        (self.metric, self.level)
    }
}
