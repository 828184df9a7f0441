//! Lookback expression parsing.
//!
//! A lookback is the literal grammar `<count> <unit>` — `"1 day"`,
//! `"2 weeks"`, `"3 months"` — answering "how far back should I search?".

use crate::{Error, Result};
use chrono::Duration;

/// Months are approximated as 30 days. Calendar-exact month arithmetic would
/// change which captures fall inside existing users' windows.
pub const DAYS_PER_MONTH: i64 = 30;

/// Parses a lookback expression into a duration.
///
/// The grammar is exactly two whitespace-separated tokens: a non-negative
/// integer count and a unit from `day(s)`, `week(s)`, `month(s)`.
///
/// # Errors
///
/// Returns [`Error::MalformedDuration`] on anything else. Callers abort
/// range resolution on that; the question is never silently answered in
/// point mode instead.
///
/// # Examples
///
/// ```rust
/// use rewind::services::parse_lookback;
/// use chrono::Duration;
///
/// assert_eq!(parse_lookback("2 weeks")?, Duration::weeks(2));
/// assert!(parse_lookback("abc weeks").is_err());
/// # Ok::<(), rewind::Error>(())
/// ```
pub fn parse_lookback(input: &str) -> Result<Duration> {
    let malformed = || Error::MalformedDuration(input.to_string());

    let mut tokens = input.split_whitespace();
    let (Some(count_str), Some(unit), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Err(malformed());
    };

    let count: i64 = count_str.parse().map_err(|_| malformed())?;
    if count < 0 {
        return Err(malformed());
    }

    match unit.to_lowercase().as_str() {
        "day" | "days" => Ok(Duration::days(count)),
        "week" | "weeks" => Ok(Duration::weeks(count)),
        "month" | "months" => Ok(Duration::days(count * DAYS_PER_MONTH)),
        _ => Err(malformed()),
    }
}
