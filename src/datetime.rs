//! Timestamp helpers for CloudDrop.
//!
//! SQLite's `datetime('now')` default stores UTC timestamps as
//! `YYYY-MM-DD HH:MM:SS` text. These helpers convert between that form and
//! chrono types for callers that need real timestamps.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Parse a SQLite `datetime('now')` text value as UTC.
pub fn parse_sqlite_datetime(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Format a timestamp as RFC 3339.
pub fn to_rfc3339(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}
