// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Arithmetic quiz: task catalog and per-session attempt counting.

use crate::error::AppError;
use crate::models::quiz::{default_tasks, Task};
use dashmap::DashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
struct AttemptEntry {
    failures: u32,
    touched: Instant,
}

/// Failed-attempt counters keyed by `(session, task)`.
///
/// Entries idle for longer than the TTL are treated as absent and are
/// dropped on the next prune.
pub struct AttemptStore {
    entries: DashMap<(String, String), AttemptEntry>,
    ttl: Duration,
}

impl AttemptStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    fn key(session: &str, task_id: &str) -> (String, String) {
        (session.to_string(), task_id.to_string())
    }

    /// Failures recorded so far for this session and task.
    pub fn failures(&self, session: &str, task_id: &str) -> u32 {
        self.entries
            .get(&Self::key(session, task_id))
            .filter(|e| e.touched.elapsed() < self.ttl)
            .map(|e| e.failures)
            .unwrap_or(0)
    }

    /// Record one more failure unless `limit` failures are already on
    /// record. Returns the new count, or `None` when the limit was hit.
    ///
    /// The check and the increment happen under one shard lock, so
    /// concurrent submissions cannot push the count past `limit`.
    pub fn record_failure(&self, session: &str, task_id: &str, limit: u32) -> Option<u32> {
        let now = Instant::now();
        let mut entry = self
            .entries
            .entry(Self::key(session, task_id))
            .or_insert(AttemptEntry {
                failures: 0,
                touched: now,
            });
        if entry.touched.elapsed() >= self.ttl {
            entry.failures = 0;
        }
        if entry.failures >= limit {
            return None;
        }
        entry.failures += 1;
        entry.touched = now;
        Some(entry.failures)
    }

    /// Drop expired entries. Returns how many were removed.
    pub fn prune_expired(&self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, e| e.touched.elapsed() < self.ttl);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of an accepted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accepted {
    /// Failed attempts before the correct answer
    pub attempts: u32,
}

pub struct QuizService {
    tasks: Vec<Task>,
    attempts: AttemptStore,
    max_attempts: u32,
}

impl QuizService {
    pub fn new(max_attempts: u32, session_ttl: Duration) -> Self {
        Self::with_tasks(default_tasks(), max_attempts, session_ttl)
    }

    pub fn with_tasks(tasks: Vec<Task>, max_attempts: u32, session_ttl: Duration) -> Self {
        Self {
            tasks,
            attempts: AttemptStore::new(session_ttl),
            max_attempts,
        }
    }

    /// The first `count` tasks of the catalog.
    pub fn tasks(&self, count: usize) -> &[Task] {
        &self.tasks[..count.min(self.tasks.len())]
    }

    pub fn attempts(&self) -> &AttemptStore {
        &self.attempts
    }

    /// Check an answer for a task within a session.
    ///
    /// A wrong answer consumes an attempt until the limit is reached; a
    /// correct answer is accepted and leaves the counter as is.
    pub fn submit(&self, session: &str, task_id: &str, answer: f64) -> Result<Accepted, AppError> {
        let task = self
            .tasks
            .iter()
            .find(|t| t.id == task_id)
            .ok_or_else(|| AppError::BadRequest("Invalid id".to_string()))?;

        if task.answer() == Some(answer) {
            let failures = self.attempts.failures(session, task_id);
            return Ok(Accepted { attempts: failures });
        }

        match self
            .attempts
            .record_failure(session, task_id, self.max_attempts)
        {
            Some(failures) => Err(AppError::AnswerRejected {
                message: "Incorrect answer".to_string(),
                attempts: failures,
            }),
            None => {
                tracing::debug!(task_id, "Maximum attempts reached");
                Err(AppError::AnswerRejected {
                    message: "Maximum attempts reached".to_string(),
                    attempts: self.max_attempts,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(3600);

    fn attempts_of(err: AppError) -> (String, u32) {
        match err {
            AppError::AnswerRejected { message, attempts } => (message, attempts),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_correct_answer_first_try() {
        let quiz = QuizService::new(3, TTL);
        assert_eq!(quiz.submit("s", "123", 11.0).unwrap(), Accepted { attempts: 0 });
    }

    #[test]
    fn test_wrong_answers_count_up_to_limit() {
        let quiz = QuizService::new(3, TTL);

        for expected in 1..=3 {
            let (msg, n) = attempts_of(quiz.submit("s", "123", 10.0).unwrap_err());
            assert_eq!(msg, "Incorrect answer");
            assert_eq!(n, expected);
        }

        let (msg, n) = attempts_of(quiz.submit("s", "123", 10.0).unwrap_err());
        assert_eq!(msg, "Maximum attempts reached");
        assert_eq!(n, 3);
        assert_eq!(quiz.attempts().failures("s", "123"), 3);
    }

    #[test]
    fn test_correct_answer_reports_prior_failures() {
        let quiz = QuizService::new(3, TTL);
        quiz.submit("s", "356", 5.0).unwrap_err();
        assert_eq!(quiz.submit("s", "356", 6.0).unwrap(), Accepted { attempts: 1 });
    }

    #[test]
    fn test_sessions_and_tasks_are_isolated() {
        let quiz = QuizService::new(3, TTL);
        quiz.submit("a", "123", 0.0).unwrap_err();
        quiz.submit("a", "123", 0.0).unwrap_err();

        assert_eq!(quiz.attempts().failures("a", "123"), 2);
        assert_eq!(quiz.attempts().failures("b", "123"), 0);
        assert_eq!(quiz.attempts().failures("a", "234"), 0);
    }

    #[test]
    fn test_unknown_task() {
        let quiz = QuizService::new(3, TTL);
        let err = quiz.submit("s", "999", 1.0).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref msg) if msg == "Invalid id"));
        assert!(quiz.attempts().is_empty());
    }

    #[test]
    fn test_task_count_clamps() {
        let quiz = QuizService::new(3, TTL);
        assert_eq!(quiz.tasks(1).len(), 1);
        assert_eq!(quiz.tasks(1)[0].id, "123");
        assert_eq!(quiz.tasks(10).len(), 3);
    }

    #[test]
    fn test_expired_entries_reset_and_prune() {
        let store = AttemptStore::new(Duration::ZERO);
        store.record_failure("s", "123", 3);
        // Zero TTL: everything is already expired.
        assert_eq!(store.failures("s", "123"), 0);
        assert_eq!(store.record_failure("s", "123", 3), Some(1));
        assert_eq!(store.prune_expired(), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_record_failure_stops_at_limit() {
        let store = AttemptStore::new(TTL);
        assert_eq!(store.record_failure("s", "123", 2), Some(1));
        assert_eq!(store.record_failure("s", "123", 2), Some(2));
        assert_eq!(store.record_failure("s", "123", 2), None);
        assert_eq!(store.failures("s", "123"), 2);
    }

    #[test]
    fn test_concurrent_wrong_answers_never_exceed_limit() {
        let quiz = QuizService::new(3, TTL);

        let rejected: Vec<(String, u32)> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..16)
                .map(|_| scope.spawn(|| attempts_of(quiz.submit("s", "356", 1.0).unwrap_err())))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let incorrect = rejected
            .iter()
            .filter(|(msg, _)| msg == "Incorrect answer")
            .count();
        assert_eq!(incorrect, 3);
        assert!(rejected.iter().all(|(_, n)| *n <= 3));
        assert_eq!(quiz.attempts().failures("s", "356"), 3);
    }
}
