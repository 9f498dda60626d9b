//! Timestamp utilities
//!
//! Show start times are stored with whole-second precision so that the
//! TEXT encoding sqlx uses for `DateTime<Utc>` sorts and compares the same
//! way the instants do. That only holds for four-digit years, so
//! instants outside 0000..=9999 are never stored.

use chrono::{DateTime, Datelike, SubsecRound, Utc};

/// Earliest and latest year whose TEXT encoding sorts chronologically
pub const STORABLE_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// Capture the current UTC instant, truncated to whole seconds
///
/// Call this once per logical operation and pass the value down; the query
/// layer never reads the clock itself.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// Truncate an instant to the precision used by the store
pub fn to_store_precision(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.trunc_subsecs(0)
}

/// True when `instant` can be stored and compared as TEXT
pub fn is_storable(instant: DateTime<Utc>) -> bool {
    STORABLE_YEARS.contains(&instant.year())
}
