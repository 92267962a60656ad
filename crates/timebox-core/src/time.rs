//! Instant representation shared by every resolver.
//!
//! Instants are signed epoch milliseconds so that differences (elapsed time,
//! time-until-start) can go negative without wrapping. Durations are unsigned
//! millisecond counts.

use chrono::{DateTime, TimeZone, Utc};

/// Epoch milliseconds.
pub type Millis = i64;

/// Convert a chrono timestamp into epoch milliseconds.
pub fn to_millis(at: DateTime<Utc>) -> Millis {
    at.timestamp_millis()
}

/// Convert epoch milliseconds back into a chrono timestamp.
///
/// Returns `None` when the value is outside chrono's representable range.
pub fn from_millis(ms: Millis) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms).single()
}

/// `start + duration`, saturating at the ends of the `i64` range.
pub fn end_of(start: Millis, duration_ms: u64) -> Millis {
    start.saturating_add(i64::try_from(duration_ms).unwrap_or(i64::MAX))
}

/// Half-open window check: `start <= at < start + duration`.
///
/// Zero-length windows never contain anything.
pub fn window_contains(start: Millis, duration_ms: u64, at: Millis) -> bool {
    at >= start && at < end_of(start, duration_ms)
}

/// Parse either an integer millisecond count or an RFC 3339 timestamp.
pub fn parse_instant(raw: &str) -> Option<Millis> {
    let trimmed = raw.trim();
    if let Ok(ms) = trimmed.parse::<i64>() {
        return Some(ms);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| to_millis(dt.with_timezone(&Utc)))
}
