// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time parsing and formatting.

use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a date given either as RFC3339 or as a bare `YYYY-MM-DD`
/// (interpreted as midnight UTC).
pub fn parse_date_input(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Calendar year of a timestamp (UTC).
pub fn year_of(date: DateTime<Utc>) -> i32 {
    date.year()
}

/// Serde adapter: RFC3339 with `Z` on the way out, lenient on the way in.
pub mod flexible_date {
    use super::*;

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format_utc_rfc3339(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        parse_date_input(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "invalid date '{}': expected YYYY-MM-DD or RFC3339",
                raw
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_date_is_midnight_utc() {
        let dt = parse_date_input("2024-05-17").unwrap();
        assert_eq!(format_utc_rfc3339(dt), "2024-05-17T00:00:00Z");
    }

    #[test]
    fn test_parse_rfc3339_with_offset_normalizes_to_utc() {
        let dt = parse_date_input("2024-05-17T10:00:00+02:00").unwrap();
        assert_eq!(format_utc_rfc3339(dt), "2024-05-17T08:00:00Z");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_date_input("yesterday").is_none());
        assert!(parse_date_input("2024-13-01").is_none());
        assert!(parse_date_input("").is_none());
    }

    #[test]
    fn test_year_of() {
        let dt = parse_date_input("2023-12-31T23:59:59Z").unwrap();
        assert_eq!(year_of(dt), 2023);
    }
}
