// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process database with typed operations.
//!
//! Provides high-level operations for:
//! - Athletes (profile, baselines and intensity zones)
//! - Activities (with intervals and the optional report)
//! - Contests and training goals (per-year limits)
//! - Questions
//!
//! All tables sit behind one `RwLock`. Every compound write (report insert
//! plus baseline raise, limit check plus insert) runs under a single write
//! guard, so it is atomic with respect to concurrent requests.

use crate::error::AppError;
use crate::models::draft::{
    ActivityDraft, AthleteUpdate, ContestDraft, GoalDraft, IntervalDraft, NewAthlete, ReportDraft,
};
use crate::models::plan::MAX_PER_YEAR;
use crate::models::{
    Activity, ActivityReport, Athlete, AthleteBaseline, AthleteDetail, AthleteMeta, Contest,
    Interval, Question, TrainingGoal,
};
use crate::services::zones::{self, UntrackedMetrics};
use crate::time_utils::year_of;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    athletes: BTreeMap<String, Athlete>,
    activities: BTreeMap<u64, Activity>,
    contests: BTreeMap<u64, Contest>,
    goals: BTreeMap<u64, TrainingGoal>,
    questions: Vec<Question>,
    next_athlete_id: u64,
    next_activity_id: u64,
    next_report_id: u64,
    next_contest_id: u64,
    next_goal_id: u64,
}

fn allocate(counter: &mut u64) -> u64 {
    *counter += 1;
    *counter
}

fn new_uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Outcome of storing an activity report.
#[derive(Debug, Clone)]
pub struct ReportOutcome {
    pub report: ActivityReport,
    /// The athlete's new baseline, if the report raised it.
    pub raised_baseline: Option<AthleteBaseline>,
}

impl Tables {
    fn require_athlete(&self, user_id: &str) -> Result<&Athlete, AppError> {
        self.athletes
            .get(user_id)
            .ok_or_else(|| AppError::NotFound(format!("Athlete {} not found", user_id)))
    }

    fn require_activity(&self, user_id: &str, activity_id: u64) -> Result<&Activity, AppError> {
        self.activities
            .get(&activity_id)
            .filter(|a| a.athlete_id == user_id)
            .ok_or_else(|| AppError::NotFound(format!("Activity {} not found", activity_id)))
    }

    fn require_activity_mut(
        &mut self,
        user_id: &str,
        activity_id: u64,
    ) -> Result<&mut Activity, AppError> {
        self.activities
            .get_mut(&activity_id)
            .filter(|a| a.athlete_id == user_id)
            .ok_or_else(|| AppError::NotFound(format!("Activity {} not found", activity_id)))
    }

    fn activities_of(&self, user_id: &str) -> Vec<Activity> {
        self.activities
            .values()
            .filter(|a| a.athlete_id == user_id)
            .cloned()
            .collect()
    }

    /// Check that everything an activity draft points at exists and belongs
    /// to the athlete.
    fn check_references(&self, user_id: &str, draft: &ActivityDraft) -> Result<(), AppError> {
        for question_id in &draft.question_ids {
            if !self.questions.iter().any(|q| &q.id == question_id) {
                return Err(AppError::BadRequest(format!(
                    "Question {} does not exist",
                    question_id
                )));
            }
        }
        if let Some(contest_id) = draft.contest_id {
            if !self
                .contests
                .get(&contest_id)
                .is_some_and(|c| c.athlete_id == user_id)
            {
                return Err(AppError::BadRequest(format!(
                    "Contest {} does not belong to athlete",
                    contest_id
                )));
            }
        }
        if let Some(goal_id) = draft.goal_id {
            if !self
                .goals
                .get(&goal_id)
                .is_some_and(|g| g.athlete_id == user_id)
            {
                return Err(AppError::BadRequest(format!(
                    "Training goal {} does not belong to athlete",
                    goal_id
                )));
            }
        }
        Ok(())
    }
}

/// Keep the IDs of intervals that already exist; mint new ones otherwise.
/// An existing ID listed more than once is kept only for its first use.
fn resolve_intervals(existing: &[Interval], drafts: Vec<IntervalDraft>) -> Vec<Interval> {
    let mut claimed = HashSet::new();
    drafts
        .into_iter()
        .map(|d| {
            let id = d
                .id
                .filter(|id| existing.iter().any(|i| &i.id == id))
                .filter(|id| claimed.insert(id.clone()))
                .unwrap_or_else(new_uuid);
            Interval {
                id,
                duration: d.duration,
                zone: d.zone,
            }
        })
        .collect()
}

fn count_in_year<'a, I>(dates: I, year: i32) -> usize
where
    I: Iterator<Item = &'a chrono::DateTime<chrono::Utc>>,
{
    dates.filter(|d| year_of(**d) == year).count()
}

/// In-process database client. Cheap to clone; clones share tables.
#[derive(Clone, Default)]
pub struct MemoryDb {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Athlete Operations ──────────────────────────────────────

    /// List every athlete with activities, contests and goals attached.
    pub async fn list_athletes(&self) -> Result<Vec<AthleteDetail>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .athletes
            .keys()
            .filter_map(|user_id| Self::detail(&tables, user_id))
            .collect())
    }

    pub async fn get_athlete(&self, user_id: &str) -> Result<Option<Athlete>, AppError> {
        Ok(self.tables.read().await.athletes.get(user_id).cloned())
    }

    /// Get an athlete with activities, contests and goals attached.
    pub async fn get_athlete_detail(
        &self,
        user_id: &str,
    ) -> Result<Option<AthleteDetail>, AppError> {
        let tables = self.tables.read().await;
        Ok(Self::detail(&tables, user_id))
    }

    fn detail(tables: &Tables, user_id: &str) -> Option<AthleteDetail> {
        let athlete = tables.athletes.get(user_id)?.clone();
        Some(AthleteDetail {
            athlete,
            activities: tables.activities_of(user_id),
            contests: tables
                .contests
                .values()
                .filter(|c| c.athlete_id == user_id)
                .cloned()
                .collect(),
            goals: tables
                .goals
                .values()
                .filter(|g| g.athlete_id == user_id)
                .cloned()
                .collect(),
        })
    }

    /// Create an athlete and its initial zone ladder.
    pub async fn insert_athlete(
        &self,
        new: NewAthlete,
        policy: UntrackedMetrics,
    ) -> Result<Athlete, AppError> {
        let mut tables = self.tables.write().await;

        if tables.athletes.contains_key(&new.user_id) {
            return Err(AppError::Conflict(format!(
                "Athlete {} already exists",
                new.user_id
            )));
        }

        let athlete = Athlete {
            id: allocate(&mut tables.next_athlete_id),
            user_id: new.user_id.clone(),
            gender: new.gender,
            sport: new.sport,
            meta: AthleteMeta {
                baseline: new.baseline,
                intensity_zones: zones::zones_for(&new.baseline, policy),
            },
        };
        tables.athletes.insert(new.user_id, athlete.clone());
        Ok(athlete)
    }

    /// Apply a profile edit. Baselines are set as given and every zone is
    /// recomputed.
    pub async fn update_athlete(
        &self,
        user_id: &str,
        update: AthleteUpdate,
        policy: UntrackedMetrics,
    ) -> Result<Athlete, AppError> {
        let mut tables = self.tables.write().await;
        let athlete = tables
            .athletes
            .get_mut(user_id)
            .ok_or_else(|| AppError::NotFound(format!("Athlete {} not found", user_id)))?;

        athlete.gender = update.gender;
        athlete.sport = update.sport;
        athlete
            .meta
            .overwrite(update.baseline, zones::zones_for(&update.baseline, policy));

        Ok(athlete.clone())
    }

    // ─── Activity Operations ─────────────────────────────────────

    pub async fn list_activities(&self, user_id: &str) -> Result<Vec<Activity>, AppError> {
        let tables = self.tables.read().await;
        tables.require_athlete(user_id)?;
        Ok(tables.activities_of(user_id))
    }

    pub async fn get_activity(
        &self,
        user_id: &str,
        activity_id: u64,
    ) -> Result<Option<Activity>, AppError> {
        Ok(self
            .tables
            .read()
            .await
            .activities
            .get(&activity_id)
            .filter(|a| a.athlete_id == user_id)
            .cloned())
    }

    pub async fn insert_activity(
        &self,
        user_id: &str,
        draft: ActivityDraft,
    ) -> Result<Activity, AppError> {
        let mut tables = self.tables.write().await;
        tables.require_athlete(user_id)?;
        tables.check_references(user_id, &draft)?;

        let activity = Activity {
            id: allocate(&mut tables.next_activity_id),
            athlete_id: user_id.to_string(),
            date: draft.date,
            name: draft.name,
            tags: draft.tags,
            sport: draft.sport,
            question_ids: draft.question_ids,
            metric_options: draft.metric_options,
            intervals: resolve_intervals(&[], draft.intervals),
            contest_id: draft.contest_id,
            goal_id: draft.goal_id,
            report: None,
        };
        tables.activities.insert(activity.id, activity.clone());
        Ok(activity)
    }

    /// Replace an activity's fields.
    ///
    /// Once a report exists its interval references must stay valid, so the
    /// set of interval IDs may not change.
    pub async fn update_activity(
        &self,
        user_id: &str,
        activity_id: u64,
        draft: ActivityDraft,
    ) -> Result<Activity, AppError> {
        let mut tables = self.tables.write().await;
        tables.require_activity(user_id, activity_id)?;
        tables.check_references(user_id, &draft)?;
        let activity = tables.require_activity_mut(user_id, activity_id)?;

        let intervals = resolve_intervals(&activity.intervals, draft.intervals);
        if activity.report.is_some() {
            let mut before: Vec<&str> = activity.intervals.iter().map(|i| i.id.as_str()).collect();
            let mut after: Vec<&str> = intervals.iter().map(|i| i.id.as_str()).collect();
            before.sort_unstable();
            after.sort_unstable();
            if before != after {
                return Err(AppError::Conflict(
                    "Activity has a report; its intervals cannot be added or removed".to_string(),
                ));
            }
        }

        activity.date = draft.date;
        activity.name = draft.name;
        activity.tags = draft.tags;
        activity.sport = draft.sport;
        activity.question_ids = draft.question_ids;
        activity.metric_options = draft.metric_options;
        activity.intervals = intervals;
        activity.contest_id = draft.contest_id;
        activity.goal_id = draft.goal_id;

        Ok(activity.clone())
    }

    /// Copy an activity under a new ID, with fresh interval IDs and no report.
    pub async fn duplicate_activity(
        &self,
        user_id: &str,
        activity_id: u64,
    ) -> Result<Activity, AppError> {
        let mut tables = self.tables.write().await;
        let mut copy = tables.require_activity_mut(user_id, activity_id)?.clone();

        copy.id = allocate(&mut tables.next_activity_id);
        copy.report = None;
        for interval in &mut copy.intervals {
            interval.id = new_uuid();
        }

        tables.activities.insert(copy.id, copy.clone());
        Ok(copy)
    }

    /// Delete an activity together with its report.
    pub async fn delete_activity(&self, user_id: &str, activity_id: u64) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        tables.require_activity_mut(user_id, activity_id)?;
        tables.activities.remove(&activity_id);
        Ok(())
    }

    // ─── Report Operations ───────────────────────────────────────

    /// Store a report and, in the same transaction, raise the athlete's
    /// baselines to any higher observed peak and recompute every zone.
    pub async fn insert_report_atomic(
        &self,
        user_id: &str,
        activity_id: u64,
        draft: ReportDraft,
        policy: UntrackedMetrics,
    ) -> Result<ReportOutcome, AppError> {
        let mut tables = self.tables.write().await;
        tables.require_athlete(user_id)?;

        for answer in &draft.answers {
            if !tables.questions.iter().any(|q| q.id == answer.question_id) {
                return Err(AppError::BadRequest(format!(
                    "Question {} does not exist",
                    answer.question_id
                )));
            }
        }

        let report_id = tables.next_report_id + 1;
        let activity = tables.require_activity_mut(user_id, activity_id)?;

        if activity.report.is_some() {
            return Err(AppError::Conflict(format!(
                "Activity {} already has a report",
                activity_id
            )));
        }
        if let Some(unknown) = draft
            .intervals
            .iter()
            .find(|ri| !activity.has_interval(&ri.interval_id))
        {
            return Err(AppError::BadRequest(format!(
                "Interval {} does not belong to activity {}",
                unknown.interval_id, activity_id
            )));
        }

        let report = ActivityReport {
            id: report_id,
            date: draft.date,
            status: draft.status,
            intervals: draft.intervals,
            answers: draft.answers,
        };
        let peaks = report.observed_peaks(activity.metric_options);
        activity.report = Some(report.clone());
        tables.next_report_id = report_id;

        let athlete = tables
            .athletes
            .get_mut(user_id)
            .ok_or_else(|| AppError::NotFound(format!("Athlete {} not found", user_id)))?;

        let raised_baseline = zones::raise_baseline(&athlete.meta.baseline, &peaks);
        if let Some(baseline) = raised_baseline {
            athlete
                .meta
                .overwrite(baseline, zones::zones_for(&baseline, policy));
        }

        Ok(ReportOutcome {
            report,
            raised_baseline,
        })
    }

    // ─── Contest & Goal Operations ───────────────────────────────

    pub async fn list_contests(&self, user_id: &str) -> Result<Vec<Contest>, AppError> {
        let tables = self.tables.read().await;
        tables.require_athlete(user_id)?;
        Ok(tables
            .contests
            .values()
            .filter(|c| c.athlete_id == user_id)
            .cloned()
            .collect())
    }

    /// Insert a contest unless the athlete already has the yearly maximum.
    pub async fn insert_contest(
        &self,
        user_id: &str,
        draft: ContestDraft,
    ) -> Result<Contest, AppError> {
        let mut tables = self.tables.write().await;
        tables.require_athlete(user_id)?;

        let same_year = count_in_year(
            tables
                .contests
                .values()
                .filter(|c| c.athlete_id == user_id)
                .map(|c| &c.date),
            year_of(draft.date),
        );
        if same_year >= MAX_PER_YEAR {
            return Err(AppError::BadRequest(
                "An athlete cannot have more than three contests in a given year".to_string(),
            ));
        }

        let contest = Contest {
            id: allocate(&mut tables.next_contest_id),
            athlete_id: user_id.to_string(),
            name: draft.name,
            date: draft.date,
            location: draft.location,
            goal: draft.goal,
            sport: draft.sport,
            priority: draft.priority,
            comment: draft.comment,
        };
        tables.contests.insert(contest.id, contest.clone());
        Ok(contest)
    }

    pub async fn list_goals(&self, user_id: &str) -> Result<Vec<TrainingGoal>, AppError> {
        let tables = self.tables.read().await;
        tables.require_athlete(user_id)?;
        Ok(tables
            .goals
            .values()
            .filter(|g| g.athlete_id == user_id)
            .cloned()
            .collect())
    }

    /// Insert a training goal unless the athlete already has the yearly maximum.
    pub async fn insert_goal(
        &self,
        user_id: &str,
        draft: GoalDraft,
    ) -> Result<TrainingGoal, AppError> {
        let mut tables = self.tables.write().await;
        tables.require_athlete(user_id)?;

        let same_year = count_in_year(
            tables
                .goals
                .values()
                .filter(|g| g.athlete_id == user_id)
                .map(|g| &g.date),
            year_of(draft.date),
        );
        if same_year >= MAX_PER_YEAR {
            return Err(AppError::BadRequest(
                "An athlete cannot have more than three training goals in a given year"
                    .to_string(),
            ));
        }

        let goal = TrainingGoal {
            id: allocate(&mut tables.next_goal_id),
            athlete_id: user_id.to_string(),
            name: draft.name,
            date: draft.date,
            goal: draft.goal,
            comment: draft.comment,
        };
        tables.goals.insert(goal.id, goal.clone());
        Ok(goal)
    }

    // ─── Question Operations ─────────────────────────────────────

    pub async fn list_questions(&self) -> Result<Vec<Question>, AppError> {
        Ok(self.tables.read().await.questions.clone())
    }

    pub async fn insert_question(&self, question: &str, kind: &str) -> Result<Question, AppError> {
        let question = Question {
            id: new_uuid(),
            question: question.to_string(),
            kind: kind.to_string(),
        };
        self.tables.write().await.questions.push(question.clone());
        Ok(question)
    }
}
