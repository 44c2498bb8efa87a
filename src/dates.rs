//! Calendar date-time parsing for `lastmod` values
//!
//! Accepts the forms sitemap producers typically hand over and renders
//! them as ISO-8601 with an explicit offset.

use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat};

/// Naive date-time layouts, interpreted as UTC
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a modification value into a timestamp
///
/// Supported inputs:
/// - `2024-01-15T10:30:00Z` and other RFC 3339 forms
/// - `Mon, 15 Jan 2024 10:30:00 +0000` (RFC 2822)
/// - `2024-01-15T10:30:00`, `2024-01-15 10:30:00` (assumed UTC)
/// - `2024-01-15` (midnight UTC)
pub fn parse_timestamp(s: &str) -> Result<DateTime<FixedOffset>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Ok(dt);
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt.and_utc().fixed_offset());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt.and_utc().fixed_offset());
        }
    }

    tracing::debug!(date_str = %s, "Could not parse modification date");
    Err(Error::InvalidDate(s.to_string()))
}

/// Render a timestamp as ISO-8601, e.g. `2024-01-01T00:00:00+00:00`
pub fn format_iso8601(dt: &DateTime<FixedOffset>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, false)
}
