//! Time utilities: countdown formatting, start-time parsing and display.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

/// Accepted local formats for a start time (the first two match an HTML
/// `datetime-local` value).
const START_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Format a millisecond delta as `[-]HH:MM:SS`.
///
/// Sub-second precision is truncated and hours do not wrap at 24.
/// The sign is only printed for negative deltas.
pub fn fmt_delta(ms: i64) -> String {
    let sign = if ms < 0 { "-" } else { "" };
    let d = ms.unsigned_abs();
    let h = d / 3_600_000;
    let m = (d % 3_600_000) / 60_000;
    let s = (d % 60_000) / 1000;
    format!("{}{:02}:{:02}:{:02}", sign, h, m, s)
}

/// Parse a user-supplied start time into epoch milliseconds.
///
/// Local times (`YYYY-MM-DD HH:MM[:SS]`, with a space or a `T`) and
/// RFC 3339 timestamps are accepted. Returns `None` for anything else,
/// including local times that do not exist (DST gaps).
pub fn parse_start(input: &str) -> Option<i64> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }

    START_FORMATS.iter().find_map(|fmt| {
        let naive = NaiveDateTime::parse_from_str(s, fmt).ok()?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.timestamp_millis())
    })
}

/// Render an epoch-millisecond instant in local time.
pub fn format_start(ms: i64) -> String {
    match Local.timestamp_millis_opt(ms).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => ms.to_string(),
    }
}
