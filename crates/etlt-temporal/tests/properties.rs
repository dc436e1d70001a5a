//! Algebraic properties of the interval operations.

use std::collections::BTreeSet;

use etlt_model::Row;
use etlt_temporal::{Interval, IntervalRow, distinct_intervals, merge_adjacent_rows, relation};
use proptest::prelude::*;

fn interval() -> impl Strategy<Value = Interval> {
    (0i64..60, 0i64..20).prop_map(|(start, len)| Interval::new(start, start + len))
}

fn points(intervals: &[Interval]) -> BTreeSet<i64> {
    intervals
        .iter()
        .flat_map(|interval| interval.start..=interval.end)
        .collect()
}

fn boundaries(intervals: &[Interval]) -> BTreeSet<i64> {
    // a boundary is a point where a new piece must start
    intervals
        .iter()
        .flat_map(|interval| [interval.start, interval.end + 1])
        .collect()
}

proptest! {
    #[test]
    fn relation_is_antisymmetric(a in -50i64..50, b in -50i64..50, c in -50i64..50, d in -50i64..50) {
        let forward = relation(a, b, c, d);
        let backward = relation(c, d, a, b);
        prop_assert_eq!(forward.map(|r| r.code()), backward.map(|r| -r.code()));
        prop_assert_eq!(forward.is_none(), a > b || c > d);
    }

    #[test]
    fn condensed_intervals_are_disjoint_and_cover_input(input in prop::collection::vec(interval(), 0..8)) {
        let condensed = distinct_intervals(input.iter().copied());

        for pair in condensed.windows(2) {
            prop_assert!(pair[0].end < pair[1].start, "{:?} overlaps {:?}", pair[0], pair[1]);
        }
        prop_assert_eq!(points(&condensed), points(&input));

        // every input boundary is respected and no other boundary is introduced
        let starts: BTreeSet<i64> = condensed.iter().map(|i| i.start).collect();
        let covered = points(&input);
        for boundary in boundaries(&input) {
            if covered.contains(&boundary) {
                prop_assert!(starts.contains(&boundary), "missing boundary {}", boundary);
            }
        }
        prop_assert!(starts.iter().all(|start| boundaries(&input).contains(start)));
    }

    #[test]
    fn condense_is_idempotent(input in prop::collection::vec(interval(), 0..8)) {
        let once = distinct_intervals(input);
        let twice = distinct_intervals(once.iter().copied());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn merge_reaches_a_fixed_point(input in prop::collection::vec((interval(), 0i64..3), 0..8)) {
        let mut rows: Vec<IntervalRow> = input
            .into_iter()
            .map(|(interval, value)| IntervalRow::new(interval, Row::new().with("value", value)))
            .collect();
        rows.sort_by_key(|row| row.interval);

        let once = merge_adjacent_rows(rows).unwrap();
        for pair in once.windows(2) {
            prop_assert!(pair[0].interval.end < pair[1].interval.start);
        }
        let twice = merge_adjacent_rows(once.clone()).unwrap();
        prop_assert_eq!(once, twice);
    }
}
