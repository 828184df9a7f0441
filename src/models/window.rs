//! Time windows for range queries.

use super::Timestamp;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An inclusive time window `[start, end]`.
///
/// An inverted window (`end < start`) is representable and simply matches
/// nothing; callers that want to treat that as misuse validate before
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Start of the window (inclusive).
    pub start: Timestamp,
    /// End of the window (inclusive).
    pub end: Timestamp,
}

impl TimeWindow {
    /// Creates a window from explicit bounds.
    #[must_use]
    pub const fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// Creates the window `[end - duration, end]`.
    #[must_use]
    pub fn lookback(end: Timestamp, duration: Duration) -> Self {
        Self {
            start: end.rewound_by(duration),
            end,
        }
    }

    /// Checks whether a moment falls inside the window, both ends inclusive.
    #[must_use]
    pub fn contains(&self, moment: &Timestamp) -> bool {
        self.start <= *moment && *moment <= self.end
    }

    /// Checks whether the window can match anything at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
