//! Property-based tests for the temporal core.
//!
//! Uses proptest to verify invariants across random inputs:
//! - Compact encoding round-trips exactly
//! - Lexicographic order of compact strings equals chronological order
//! - `closest` returns a member at minimal distance, earlier on ties
//! - `within` returns exactly the in-window subsequence

// Property tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use proptest::prelude::*;
use rewind::services::{closest, within};
use rewind::{TimeWindow, Timestamp};

/// Strategy producing arbitrary valid timestamps.
///
/// Days cap at 28 so every (year, month) combination is valid.
fn timestamp_strategy() -> impl Strategy<Value = Timestamp> {
    (
        1970i32..=2999,
        1u32..=12,
        1u32..=28,
        0u32..=23,
        0u32..=59,
        0u32..=59,
    )
        .prop_map(|(y, mo, d, h, mi, s)| {
            Timestamp::from_ymd_hms(y, mo, d, h, mi, s).expect("fields are valid")
        })
}

proptest! {
    /// Property: `parse(compact(t)) == t` for all valid timestamps.
    #[test]
    fn prop_compact_roundtrip(ts in timestamp_strategy()) {
        let encoded = ts.compact();
        prop_assert_eq!(encoded.len(), 15);
        prop_assert_eq!(Timestamp::parse(&encoded).unwrap(), ts);
    }

    /// Property: compact-string order equals chronological order.
    #[test]
    fn prop_lexicographic_is_chronological(a in timestamp_strategy(), b in timestamp_strategy()) {
        prop_assert_eq!(a.compact().cmp(&b.compact()), a.cmp(&b));
    }

    /// Property: `closest` returns a member of the set, and no member is
    /// strictly closer; equidistant members are never earlier than the result.
    #[test]
    fn prop_closest_is_minimal_member(
        mut moments in prop::collection::vec(timestamp_strategy(), 1..20),
        target in timestamp_strategy(),
    ) {
        moments.sort_unstable();
        let picked = closest(&target, &moments).unwrap();

        prop_assert!(moments.contains(&picked));
        let picked_distance = picked.distance(&target);
        for moment in &moments {
            let distance = moment.distance(&target);
            prop_assert!(distance >= picked_distance);
            if distance == picked_distance {
                prop_assert!(picked <= *moment, "ties resolve to the earlier moment");
            }
        }
    }

    /// Property: `within` is exactly the ordered in-window subsequence.
    #[test]
    fn prop_within_is_in_window_subsequence(
        mut moments in prop::collection::vec(timestamp_strategy(), 0..20),
        a in timestamp_strategy(),
        b in timestamp_strategy(),
    ) {
        moments.sort_unstable();
        let window = TimeWindow::new(a, b);
        let inside = within(&window, &moments);

        let expected: Vec<Timestamp> = moments
            .iter()
            .filter(|m| window.start <= **m && **m <= window.end)
            .copied()
            .collect();
        prop_assert_eq!(&inside, &expected);

        for moment in &inside {
            prop_assert!(window.contains(moment));
        }
    }

    /// Property: inverted windows never match.
    #[test]
    fn prop_inverted_window_is_empty(
        mut moments in prop::collection::vec(timestamp_strategy(), 0..20),
        a in timestamp_strategy(),
        b in timestamp_strategy(),
    ) {
        moments.sort_unstable();
        if b < a {
            let window = TimeWindow::new(a, b);
            prop_assert!(within(&window, &moments).is_empty());
        }
    }
}
