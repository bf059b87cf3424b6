// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Quiz session cookie middleware.
//!
//! Attempt counters are scoped to a browser session rather than the whole
//! process. The session is identified by an opaque cookie which is issued
//! on first contact.

use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;

pub const SESSION_COOKIE: &str = "quiz_session";

/// Quiz session extracted from (or issued as) a cookie.
#[derive(Debug, Clone)]
pub struct QuizSession {
    pub id: String,
}

fn is_valid_session_id(raw: &str) -> bool {
    uuid::Uuid::parse_str(raw).is_ok()
}

/// Middleware that attaches a [`QuizSession`] to the request, setting the
/// cookie on the response when a new session was created.
pub async fn quiz_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let existing = jar
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| is_valid_session_id(v));

    let (session_id, issued) = match existing {
        Some(id) => (id, false),
        None => (uuid::Uuid::new_v4().to_string(), true),
    };

    request.extensions_mut().insert(QuizSession {
        id: session_id.clone(),
    });

    // Opportunistic cleanup; the store is small.
    let pruned = state.quiz.attempts().prune_expired();
    if pruned > 0 {
        tracing::debug!(pruned, "Pruned expired quiz attempt counters");
    }

    let response = next.run(request).await;

    if issued {
        let ttl_secs = state.config.quiz_session_ttl_minutes.saturating_mul(60);
        let max_age = time::Duration::seconds(i64::try_from(ttl_secs).unwrap_or(i64::MAX));
        let cookie = Cookie::build((SESSION_COOKIE, session_id))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(max_age)
            .build();
        (jar.add(cookie), response).into_response()
    } else {
        response
    }
}
