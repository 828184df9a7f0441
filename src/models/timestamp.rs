//! Capture timestamps.
//!
//! Every capture is identified by the moment it was taken, encoded as the
//! fixed-width compact string `YYYYMMDD_HHMMSS`. Because every field is
//! zero-padded, lexicographic order of the compact form equals chronological
//! order, so the compact string doubles as the sort key in artifact names.
//!
//! Timestamps are naive local time: the capture agent and this crate run on
//! the same machine, and no timezone is encoded in artifact names.
//!
//! # Example
//!
//! ```rust
//! use rewind::Timestamp;
//!
//! let ts = Timestamp::parse("20240315_093000")?;
//! assert_eq!(ts.compact(), "20240315_093000");
//! assert_eq!(ts.long_format(), "March 15, 2024 at 09:30:00 AM");
//! # Ok::<(), rewind::Error>(())
//! ```

use crate::{Error, Result};
use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Width of the compact encoding: 8 date digits, `_`, 6 time digits.
const COMPACT_LEN: usize = 15;

/// Byte offset of the `_` separator in the compact encoding.
const SEPARATOR_IDX: usize = 8;

/// The moment a capture was taken, at second precision.
///
/// Ordering is chronological, which for the compact encoding coincides with
/// lexicographic order of the strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Creates a timestamp from a datetime, truncating sub-second precision.
    #[must_use]
    pub fn new(datetime: NaiveDateTime) -> Self {
        Self(datetime.with_nanosecond(0).unwrap_or(datetime))
    }

    /// Returns the current local moment.
    #[must_use]
    pub fn now() -> Self {
        Self::new(Local::now().naive_local())
    }

    /// Creates a timestamp from calendar fields.
    ///
    /// Returns `None` for impossible calendar values.
    #[must_use]
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let time = NaiveTime::from_hms_opt(hour, minute, second)?;
        Some(Self(date.and_time(time)))
    }

    /// Parses the compact `YYYYMMDD_HHMMSS` encoding.
    ///
    /// This is the exact inverse of [`Self::compact`]: the input must be
    /// exactly fifteen bytes, all-digit fields around a single `_`, and the
    /// fields must name a real calendar moment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedTimestamp`] on any shape or calendar
    /// violation.
    pub fn parse(input: &str) -> Result<Self> {
        let malformed = || Error::MalformedTimestamp(input.to_string());

        if input.len() != COMPACT_LEN || input.as_bytes()[SEPARATOR_IDX] != b'_' {
            return Err(malformed());
        }
        let (date_part, time_part) = (&input[..SEPARATOR_IDX], &input[SEPARATOR_IDX + 1..]);
        if !date_part.bytes().all(|b| b.is_ascii_digit())
            || !time_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(malformed());
        }

        let field = |s: &str| s.parse::<u32>().map_err(|_| malformed());
        let year = date_part[..4].parse::<i32>().map_err(|_| malformed())?;
        let month = field(&date_part[4..6])?;
        let day = field(&date_part[6..8])?;
        let hour = field(&time_part[..2])?;
        let minute = field(&time_part[2..4])?;
        let second = field(&time_part[4..6])?;

        Self::from_ymd_hms(year, month, day, hour, minute, second).ok_or_else(malformed)
    }

    /// Renders the compact `YYYYMMDD_HHMMSS` encoding.
    #[must_use]
    pub fn compact(&self) -> String {
        format!(
            "{:04}{:02}{:02}_{:02}{:02}{:02}",
            self.0.year(),
            self.0.month(),
            self.0.day(),
            self.0.hour(),
            self.0.minute(),
            self.0.second()
        )
    }

    /// Renders a human-readable long form, e.g. `March 15, 2024 at 09:30:00 AM`.
    #[must_use]
    pub fn long_format(&self) -> String {
        self.0.format("%B %d, %Y at %I:%M:%S %p").to_string()
    }

    /// Returns the absolute time distance to another moment.
    #[must_use]
    pub fn distance(&self, other: &Self) -> Duration {
        (self.0 - other.0).abs()
    }

    /// Returns the moment `duration` before this one, clamped at the minimum
    /// representable datetime.
    #[must_use]
    pub fn rewound_by(&self, duration: Duration) -> Self {
        Self(self.0.checked_sub_signed(duration).unwrap_or(NaiveDateTime::MIN))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.compact())
    }
}

impl FromStr for Timestamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(datetime: NaiveDateTime) -> Self {
        Self::new(datetime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    #[test]
    fn test_parse_compact_roundtrip() {
        let input = "20240315_093000";
        assert_eq!(ts(input).compact(), input);
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        for bad in [
            "",
            "20240315",
            "20240315-093000",
            "20240315_09300",
            "20240315_0930000",
            "2024031a_093000",
            "20240315_09300a",
            " 0240315_093000",
        ] {
            assert!(
                matches!(Timestamp::parse(bad), Err(Error::MalformedTimestamp(_))),
                "should reject {bad:?}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_impossible_calendar_values() {
        for bad in [
            "20241301_000000", // month 13
            "20240230_000000", // Feb 30
            "20240101_250000", // hour 25
            "20240101_006100", // minute 61
            "20240101_000061", // second 61
            "20240400_000000", // day 0
        ] {
            assert!(
                matches!(Timestamp::parse(bad), Err(Error::MalformedTimestamp(_))),
                "should reject {bad:?}"
            );
        }
    }

    #[test]
    fn test_parse_accepts_leap_day() {
        assert_eq!(ts("20240229_120000").compact(), "20240229_120000");
        assert!(Timestamp::parse("20230229_120000").is_err());
    }

    #[test]
    fn test_lexicographic_order_matches_chronological() {
        let a = ts("20231231_235959");
        let b = ts("20240101_000000");
        let c = ts("20240101_000001");
        assert!(a < b && b < c);
        assert!(a.compact() < b.compact() && b.compact() < c.compact());
    }

    #[test]
    fn test_long_format() {
        assert_eq!(
            ts("20240315_093000").long_format(),
            "March 15, 2024 at 09:30:00 AM"
        );
        assert_eq!(
            ts("20241201_151545").long_format(),
            "December 01, 2024 at 03:15:45 PM"
        );
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = ts("20240101_090000");
        let b = ts("20240101_103000");
        assert_eq!(a.distance(&b), Duration::minutes(90));
        assert_eq!(b.distance(&a), Duration::minutes(90));
        assert_eq!(a.distance(&a), Duration::zero());
    }

    #[test]
    fn test_rewound_by() {
        let now = ts("20240315_000000");
        assert_eq!(now.rewound_by(Duration::days(14)), ts("20240301_000000"));
    }

    #[test]
    fn test_new_truncates_subseconds() {
        let with_nanos = ts("20240315_093000")
            .0
            .with_nanosecond(500_000_000)
            .unwrap();
        assert_eq!(Timestamp::new(with_nanos).compact(), "20240315_093000");
    }
}
