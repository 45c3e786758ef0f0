//! Wall-clock time in the schedule's fixed UTC offset.
//!
//! Event times are stored as naive local timestamps. Every comparison against "now" goes
//! through `ScheduleClock` so the status refresh, reminders and purge agree on what the
//! local time is.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, Timelike, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleClock {
    offset: FixedOffset,
}

impl ScheduleClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Current local wall-clock time truncated to whole seconds.
    pub fn now(&self) -> NaiveDateTime {
        self.local(Utc::now())
    }

    /// Converts an instant into the schedule's local wall-clock time, truncated to whole
    /// seconds so it compares cleanly against stored timestamps.
    pub fn local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        let local = instant.with_timezone(&self.offset).naive_local();
        local.with_nanosecond(0).unwrap_or(local)
    }
}

impl Default for ScheduleClock {
    /// UTC+08:00
    fn default() -> Self {
        Self::new(FixedOffset::east_opt(8 * 3600).unwrap_or(Utc.fix()))
    }
}
