//! Temporal resolution over a scanned set of capture timestamps.
//!
//! Both operations take the ascending set produced by a scan. They are
//! deliberately linear scans rather than binary searches: an imperfectly
//! ordered input degrades to well-defined (if less meaningful) results
//! instead of undefined behavior.

use crate::models::{TimeWindow, Timestamp};
use crate::{Error, Result};

/// Finds the moment with the smallest absolute distance to `target`.
///
/// Equidistant candidates resolve to the chronologically earlier one. The
/// tie-break is applied explicitly against the candidate itself, so the
/// result is deterministic even when the input is not sorted.
///
/// # Errors
///
/// Returns [`Error::EmptySet`] when `moments` is empty; callers distinguish
/// "nothing recorded yet" up front rather than here.
pub fn closest(target: &Timestamp, moments: &[Timestamp]) -> Result<Timestamp> {
    let mut best: Option<Timestamp> = None;

    for candidate in moments {
        let replace = match best {
            None => true,
            Some(current) => {
                let d_candidate = candidate.distance(target);
                let d_current = current.distance(target);
                d_candidate < d_current || (d_candidate == d_current && *candidate < current)
            },
        };
        if replace {
            best = Some(*candidate);
        }
    }

    best.ok_or(Error::EmptySet)
}

/// Returns the ordered subsequence of `moments` inside `window`.
///
/// Both window ends are inclusive and input order is preserved. An empty
/// result is a normal outcome ("nothing happened last week"), including for
/// inverted windows, and is never an error.
#[must_use]
pub fn within(window: &TimeWindow, moments: &[Timestamp]) -> Vec<Timestamp> {
    moments
        .iter()
        .filter(|moment| window.contains(moment))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    #[test]
    fn test_closest_empty_set() {
        assert!(matches!(
            closest(&ts("20240101_000000"), &[]),
            Err(Error::EmptySet)
        ));
    }

    #[test]
    fn test_closest_single_element() {
        let only = ts("20240101_090000");
        assert_eq!(closest(&ts("20270101_000000"), &[only]).unwrap(), only);
    }

    #[test]
    fn test_closest_picks_minimal_distance() {
        let moments = vec![
            ts("20240101_090000"),
            ts("20240101_120000"),
            ts("20240101_150000"),
        ];
        assert_eq!(
            closest(&ts("20240101_115500"), &moments).unwrap(),
            ts("20240101_120000")
        );
        assert_eq!(
            closest(&ts("20240101_000000"), &moments).unwrap(),
            ts("20240101_090000")
        );
        assert_eq!(
            closest(&ts("20241231_000000"), &moments).unwrap(),
            ts("20240101_150000")
        );
    }

    #[test]
    fn test_closest_tie_breaks_to_earlier() {
        // 10:30 is exactly 90 minutes from both 09:00 and 12:00.
        let moments = vec![
            ts("20240101_090000"),
            ts("20240101_120000"),
            ts("20240101_150000"),
        ];
        assert_eq!(
            closest(&ts("20240101_103000"), &moments).unwrap(),
            ts("20240101_090000")
        );
    }

    #[test]
    fn test_closest_tie_break_is_order_independent() {
        let mut moments = vec![ts("20240101_120000"), ts("20240101_090000")];
        assert_eq!(
            closest(&ts("20240101_103000"), &moments).unwrap(),
            ts("20240101_090000")
        );
        moments.reverse();
        assert_eq!(
            closest(&ts("20240101_103000"), &moments).unwrap(),
            ts("20240101_090000")
        );
    }

    #[test]
    fn test_within_is_ordered_subsequence() {
        let moments = vec![
            ts("20240101_090000"),
            ts("20240105_090000"),
            ts("20240110_090000"),
            ts("20240115_090000"),
        ];
        let window = TimeWindow::new(ts("20240105_090000"), ts("20240110_090000"));
        assert_eq!(
            within(&window, &moments),
            vec![ts("20240105_090000"), ts("20240110_090000")]
        );
    }

    #[test]
    fn test_within_empty_match_is_ok() {
        let moments = vec![ts("20240101_090000")];
        let window = TimeWindow::new(ts("20240201_000000"), ts("20240301_000000"));
        assert!(within(&window, &moments).is_empty());
    }

    #[test]
    fn test_within_inverted_window_is_empty() {
        let moments = vec![ts("20240101_090000"), ts("20240201_090000")];
        let window = TimeWindow::new(ts("20240301_000000"), ts("20240101_000000"));
        assert!(within(&window, &moments).is_empty());
    }
}
