//! Shared helper utilities for factory methods.

use chrono::{NaiveDate, NaiveDateTime};

/// Counter for generating unique identifiers in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Builds a local wall-clock timestamp, panicking on invalid input.
///
/// Only meant for literal values in tests.
///
/// # Example
///
/// ```rust,ignore
/// let start = at(2026, 3, 2, 9, 0);
/// ```
pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .expect("valid test timestamp")
}
