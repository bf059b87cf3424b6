//! Application configuration loaded from environment variables.

use crate::services::zones::UntrackedMetrics;
use std::env;
use std::str::FromStr;

const DEFAULT_IMPORT_API_URL: &str = "https://webapp-api.vercel.app/api/users";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,

    // --- Athlete import ---
    /// Paginated external athlete source
    pub import_api_url: String,
    /// Upper bound on pages fetched per import run
    pub import_max_pages: u32,

    // --- Zones ---
    /// Whether zero baselines still produce zone rows
    pub untracked_metrics: UntrackedMetrics,

    // --- Quiz ---
    pub quiz_max_attempts: u32,
    /// Idle time after which a quiz session's attempt counters are dropped
    pub quiz_session_ttl_minutes: u64,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:3000".to_string(),
            import_api_url: "http://127.0.0.1:9/api/users".to_string(),
            import_max_pages: 100,
            untracked_metrics: UntrackedMetrics::Emit,
            quiz_max_attempts: 3,
            quiz_session_ttl_minutes: 60,
        }
    }
}

impl Config {
    /// Default config for tests.
    pub fn test_default() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            port: parse_var("PORT", 8080)?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            import_api_url: env::var("IMPORT_API_URL")
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|_| DEFAULT_IMPORT_API_URL.to_string()),
            import_max_pages: parse_var("IMPORT_MAX_PAGES", 100)?,
            untracked_metrics: parse_var("UNTRACKED_ZONE_METRICS", UntrackedMetrics::Emit)?,
            quiz_max_attempts: parse_var("QUIZ_MAX_ATTEMPTS", 3)?,
            quiz_session_ttl_minutes: parse_var("QUIZ_SESSION_TTL_MINUTES", 60)?,
        })
    }
}

/// Parse an optional environment variable, falling back to `default` when unset.
fn parse_var<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::Invalid(key, e.to_string())),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    Invalid(&'static str, String),
}
