// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Athlete import from the external paginated user source.
//!
//! Handles:
//! - Page-by-page fetching until the source reports no more data
//! - Translating gender and sport into the values this service stores
//! - Creating each athlete (with zones) under a fresh `userId`

use crate::db::MemoryDb;
use crate::error::AppError;
use crate::models::draft::NewAthlete;
use crate::models::{AthleteBaseline, Sport};
use crate::services::zones::UntrackedMetrics;
use serde::Deserialize;

/// One page of the external source.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalPage {
    pub success: bool,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub data: Vec<ExternalAthlete>,
}

#[derive(Debug, Deserialize)]
pub struct ExternalAthlete {
    pub gender: String,
    pub sport: String,
    pub meta: AthleteBaseline,
}

/// HTTP client for the external athlete source.
#[derive(Clone)]
pub struct ImportClient {
    http: reqwest::Client,
    base_url: String,
}

impl ImportClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch one page (1-indexed).
    pub async fn fetch_page(&self, page: u32) -> Result<ExternalPage, AppError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("page", page.to_string())])
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream(format!(
                "Source returned HTTP {} for page {}",
                status, page
            )));
        }

        response
            .json::<ExternalPage>()
            .await
            .map_err(|e| AppError::Upstream(format!("Malformed page {}: {}", page, e)))
    }

    /// Import every page into the database. Returns the number of athletes
    /// created.
    pub async fn import_all(
        &self,
        db: &MemoryDb,
        policy: UntrackedMetrics,
        max_pages: u32,
    ) -> Result<usize, AppError> {
        let mut imported = 0;

        for page in 1..=max_pages {
            let batch = self.fetch_page(page).await?;
            if !batch.success {
                return Err(AppError::Upstream(
                    "Failed to fetch data from external API".to_string(),
                ));
            }

            for external in batch.data {
                if !external.meta.is_valid() {
                    tracing::warn!(
                        page,
                        threshold_speed = external.meta.threshold_speed,
                        "Skipping imported athlete with invalid baseline"
                    );
                    continue;
                }
                db.insert_athlete(to_new_athlete(external), policy).await?;
                imported += 1;
            }

            tracing::debug!(page, imported, has_more = batch.has_more, "Imported page");

            if !batch.has_more {
                return Ok(imported);
            }
        }

        tracing::warn!(max_pages, imported, "Import stopped at page limit");
        Ok(imported)
    }
}

fn translate_gender(gender: &str) -> &'static str {
    if gender.eq_ignore_ascii_case("male") {
        "Mann"
    } else {
        "Kvinne"
    }
}

fn translate_sport(sport: &str) -> Sport {
    match sport.to_ascii_lowercase().as_str() {
        "running" => Sport::Running,
        "cycling" => Sport::Cycling,
        "skiing" => Sport::Skiing,
        "triathlon" => Sport::Triathlon,
        "swimming" => Sport::Swimming,
        "strength" => Sport::Strength,
        _ => Sport::Other,
    }
}

fn to_new_athlete(external: ExternalAthlete) -> NewAthlete {
    NewAthlete {
        user_id: uuid::Uuid::new_v4().to_string(),
        gender: translate_gender(&external.gender).to_string(),
        sport: translate_sport(&external.sport),
        baseline: external.meta,
    }
}
