// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Intensity zone derivation.
//!
//! Every metric gets the same five-level ladder of percentages of the
//! athlete's baseline. Zones are recomputed in full whenever a baseline
//! changes, either through a direct profile edit or because an activity
//! report observed a peak above the stored baseline.

use crate::models::{AthleteBaseline, IntensityZone, Metric, ObservedPeaks};
use std::str::FromStr;

/// Percentage of baseline for levels 1 through 5.
pub const LEVEL_PERCENTAGES: [f64; 5] = [0.5, 0.6, 0.7, 0.8, 0.9];

/// Number of rows produced for one athlete.
pub const ZONES_PER_ATHLETE: usize = Metric::ALL.len() * LEVEL_PERCENTAGES.len();

/// Compute the full zone ladder for a baseline.
///
/// Always returns 15 rows, ordered by metric then ascending level. A zero
/// baseline yields zero-valued rows for that metric.
pub fn calculate_zones(baseline: &AthleteBaseline) -> Vec<IntensityZone> {
    Metric::ALL
        .iter()
        .flat_map(|&metric| {
            let base = baseline.value(metric);
            LEVEL_PERCENTAGES
                .iter()
                .zip(1u8..)
                .map(move |(&pct, level)| IntensityZone {
                    metric,
                    level,
                    target_value: base * pct,
                })
        })
        .collect()
}

/// What to store for metrics the athlete does not track (zero baseline).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UntrackedMetrics {
    /// Store zero-valued zones, keeping the ladder at 15 rows.
    #[default]
    Emit,
    /// Drop the zones of untracked metrics.
    Omit,
}

impl FromStr for UntrackedMetrics {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "emit" => Ok(Self::Emit),
            "omit" => Ok(Self::Omit),
            other => Err(format!("expected 'emit' or 'omit', got '{}'", other)),
        }
    }
}

/// Zones to persist for a baseline under the given policy.
pub fn zones_for(baseline: &AthleteBaseline, policy: UntrackedMetrics) -> Vec<IntensityZone> {
    let zones = calculate_zones(baseline);
    match policy {
        UntrackedMetrics::Emit => zones,
        UntrackedMetrics::Omit => zones
            .into_iter()
            .filter(|z| baseline.is_tracked(z.metric))
            .collect(),
    }
}

/// Raise any baseline metric that an observed peak exceeds.
///
/// Returns the new baseline if at least one metric went up, `None` if the
/// report leaves every baseline unchanged. Never lowers a value.
pub fn raise_baseline(current: &AthleteBaseline, peaks: &ObservedPeaks) -> Option<AthleteBaseline> {
    let mut raised = *current;
    let mut changed = false;

    if let Some(hr) = peaks.heart_rate.filter(|&hr| hr > current.max_heart_rate) {
        raised.max_heart_rate = hr;
        changed = true;
    }
    if let Some(watt) = peaks.watt.filter(|&w| w > current.threshold_watt) {
        raised.threshold_watt = watt;
        changed = true;
    }
    if let Some(speed) = peaks.speed.filter(|&s| s > current.threshold_speed) {
        raised.threshold_speed = speed;
        changed = true;
    }

    changed.then_some(raised)
}
