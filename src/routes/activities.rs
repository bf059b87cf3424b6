// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity and activity report routes.

use crate::error::{AppError, Result};
use crate::models::draft::{ActivityDraft, IntervalDraft, ReportDraft};
use crate::models::{
    Activity, ActivityReport, AthleteBaseline, MetricOptions, ReportAnswer, ReportInterval,
    ReportStatus, Sport,
};
use crate::routes::extract::ValidatedJson;
use crate::routes::ApiResponse;
use crate::time_utils::flexible_date;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/athletes/{user_id}/activities",
            get(list_activities).post(create_activity),
        )
        .route(
            "/api/athletes/{user_id}/activities/{activity_id}",
            get(get_activity)
                .put(update_activity)
                .post(duplicate_activity)
                .delete(delete_activity),
        )
        .route(
            "/api/athletes/{user_id}/activities/{activity_id}/reports",
            get(get_report).post(create_report),
        )
}

// ─── Listing ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Report state an activity is filtered on. `none` selects activities
/// without a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum StatusFilter {
    None,
    No,
    Low,
    Normal,
    High,
}

impl StatusFilter {
    fn matches(self, report: Option<&ActivityReport>) -> bool {
        let wanted = match self {
            StatusFilter::None => return report.is_none(),
            StatusFilter::No => ReportStatus::No,
            StatusFilter::Low => ReportStatus::Low,
            StatusFilter::Normal => ReportStatus::Normal,
            StatusFilter::High => ReportStatus::High,
        };
        report.is_some_and(|r| r.status == wanted)
    }
}

#[derive(Debug, Default, Deserialize)]
struct ActivitiesQuery {
    sport: Option<Sport>,
    /// Matches one of the activity's comma-separated tags, ignoring case
    tag: Option<String>,
    status: Option<StatusFilter>,
    #[serde(default)]
    order: SortOrder,
}

fn has_tag(tags: &str, wanted: &str) -> bool {
    let wanted = wanted.trim();
    tags.split(',')
        .map(str::trim)
        .any(|t| t.eq_ignore_ascii_case(wanted))
}

fn filter_activities(mut activities: Vec<Activity>, query: &ActivitiesQuery) -> Vec<Activity> {
    activities.retain(|a| {
        query.sport.is_none_or(|s| a.sport == s)
            && query.tag.as_deref().is_none_or(|t| has_tag(&a.tags, t))
            && query.status.is_none_or(|s| s.matches(a.report.as_ref()))
    });

    activities.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
    if query.order == SortOrder::Desc {
        activities.reverse();
    }
    activities
}

async fn list_activities(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(query): Query<ActivitiesQuery>,
) -> Result<Json<ApiResponse<Vec<Activity>>>> {
    let activities = state.db.list_activities(&user_id).await?;
    Ok(ApiResponse::ok(filter_activities(activities, &query)))
}

// ─── Create / Update ─────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, Validate)]
struct IntervalRequest {
    /// Present when editing an existing interval
    id: Option<String>,
    #[validate(range(min = 1))]
    duration: u32,
    #[validate(range(min = 1, max = 5))]
    zone: u8,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct ActivityRequest {
    #[serde(with = "flexible_date")]
    date: DateTime<Utc>,
    #[validate(length(min = 1))]
    name: String,
    #[validate(length(min = 1))]
    tags: String,
    sport: Sport,
    #[validate(length(min = 1, message = "At least one question is required"))]
    question_ids: Vec<String>,
    #[serde(default)]
    metric_options: MetricOptions,
    #[validate(length(min = 1, message = "At least one interval is required"), nested)]
    intervals: Vec<IntervalRequest>,
    contest_id: Option<u64>,
    #[serde(alias = "trainingGoalId")]
    goal_id: Option<u64>,
}

impl From<ActivityRequest> for ActivityDraft {
    fn from(body: ActivityRequest) -> Self {
        Self {
            date: body.date,
            name: body.name,
            tags: body.tags,
            sport: body.sport,
            question_ids: body.question_ids,
            metric_options: body.metric_options,
            intervals: body
                .intervals
                .into_iter()
                .map(|i| IntervalDraft {
                    id: i.id,
                    duration: i.duration,
                    zone: i.zone,
                })
                .collect(),
            contest_id: body.contest_id,
            goal_id: body.goal_id,
        }
    }
}

async fn create_activity(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    ValidatedJson(body): ValidatedJson<ActivityRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Activity>>)> {
    let activity = state.db.insert_activity(&user_id, body.into()).await?;

    tracing::info!(
        user_id = %user_id,
        activity_id = activity.id,
        intervals = activity.intervals.len(),
        "Created activity"
    );
    Ok(ApiResponse::created(activity))
}

async fn get_activity(
    State(state): State<Arc<AppState>>,
    Path((user_id, activity_id)): Path<(String, u64)>,
) -> Result<Json<ApiResponse<Activity>>> {
    let activity = state
        .db
        .get_activity(&user_id, activity_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Activity {} not found", activity_id)))?;
    Ok(ApiResponse::ok(activity))
}

async fn update_activity(
    State(state): State<Arc<AppState>>,
    Path((user_id, activity_id)): Path<(String, u64)>,
    ValidatedJson(body): ValidatedJson<ActivityRequest>,
) -> Result<Json<ApiResponse<Activity>>> {
    let activity = state
        .db
        .update_activity(&user_id, activity_id, body.into())
        .await?;

    tracing::info!(user_id = %user_id, activity_id, "Updated activity");
    Ok(ApiResponse::ok(activity))
}

/// Copy an activity as a new, unreported plan.
async fn duplicate_activity(
    State(state): State<Arc<AppState>>,
    Path((user_id, activity_id)): Path<(String, u64)>,
) -> Result<(StatusCode, Json<ApiResponse<Activity>>)> {
    let copy = state.db.duplicate_activity(&user_id, activity_id).await?;

    tracing::info!(
        user_id = %user_id,
        source_id = activity_id,
        activity_id = copy.id,
        "Duplicated activity"
    );
    Ok(ApiResponse::created(copy))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeletedActivity {
    id: u64,
}

async fn delete_activity(
    State(state): State<Arc<AppState>>,
    Path((user_id, activity_id)): Path<(String, u64)>,
) -> Result<Json<ApiResponse<DeletedActivity>>> {
    state.db.delete_activity(&user_id, activity_id).await?;

    tracing::info!(user_id = %user_id, activity_id, "Deleted activity");
    Ok(ApiResponse::ok(DeletedActivity { id: activity_id }))
}

// ─── Reports ─────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
struct ReportRequest {
    #[serde(with = "flexible_date")]
    date: DateTime<Utc>,
    status: ReportStatus,
    #[serde(alias = "ReportIntervals")]
    #[validate(length(min = 1, message = "At least one interval is required"), nested)]
    intervals: Vec<ReportInterval>,
    #[serde(default, alias = "ReportQuestions")]
    answers: Vec<ReportAnswer>,
}

/// Stored report plus the athlete's new baselines when it raised them.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportCreated {
    report: ActivityReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    raised_baseline: Option<AthleteBaseline>,
}

async fn get_report(
    State(state): State<Arc<AppState>>,
    Path((user_id, activity_id)): Path<(String, u64)>,
) -> Result<Json<ApiResponse<ActivityReport>>> {
    let activity = state
        .db
        .get_activity(&user_id, activity_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Activity {} not found", activity_id)))?;

    let report = activity.report.ok_or_else(|| {
        AppError::NotFound(format!("Activity {} has no report", activity_id))
    })?;
    Ok(ApiResponse::ok(report))
}

/// Submit the report for an activity. Peaks above the athlete's baselines
/// raise them and recompute every zone in the same transaction.
async fn create_report(
    State(state): State<Arc<AppState>>,
    Path((user_id, activity_id)): Path<(String, u64)>,
    ValidatedJson(body): ValidatedJson<ReportRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReportCreated>>)> {
    let draft = ReportDraft {
        date: body.date,
        status: body.status,
        intervals: body.intervals,
        answers: body.answers,
    };

    let outcome = state
        .db
        .insert_report_atomic(&user_id, activity_id, draft, state.config.untracked_metrics)
        .await?;

    match &outcome.raised_baseline {
        Some(baseline) => tracing::info!(
            user_id = %user_id,
            activity_id,
            max_heart_rate = baseline.max_heart_rate,
            threshold_watt = baseline.threshold_watt,
            threshold_speed = baseline.threshold_speed,
            "Report raised baselines, zones recomputed"
        ),
        None => tracing::info!(user_id = %user_id, activity_id, "Stored activity report"),
    }

    Ok(ApiResponse::created(ReportCreated {
        report: outcome.report,
        raised_baseline: outcome.raised_baseline,
    }))
}
