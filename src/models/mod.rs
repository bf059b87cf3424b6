// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod activity;
pub mod athlete;
pub mod draft;
pub mod plan;
pub mod question;
pub mod quiz;
pub mod report;
pub mod zone;

pub use activity::{Activity, Interval, MetricOptions};
pub use athlete::{Athlete, AthleteBaseline, AthleteDetail, AthleteMeta, Sport};
pub use plan::{Contest, Priority, TrainingGoal};
pub use question::Question;
pub use quiz::{Operation, Task};
pub use report::{ActivityReport, ObservedPeaks, ReportAnswer, ReportInterval, ReportStatus};
pub use zone::{IntensityZone, Metric};
