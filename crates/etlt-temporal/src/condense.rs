//! Condensing overlapping intervals into their distinct sub-intervals.

use std::collections::BTreeSet;

use etlt_model::Row;
use tracing::debug;

use crate::{Interval, Relation, Result, Type2Helper};

/// Pieces replacing `new` and `old` when they overlap, `None` if they are
/// already distinct (disjoint or identical).
fn split(new: Interval, old: Interval) -> Option<Vec<Interval>> {
    let (x, y) = (new, old);
    let pieces = match x.relation(&y)? {
        Relation::Before
        | Relation::Meets
        | Relation::BeforeInverse
        | Relation::MeetsInverse
        | Relation::Equal => return None,
        Relation::Overlaps => vec![
            Interval::new(x.start, y.start - 1),
            Interval::new(y.start, x.end),
            Interval::new(x.end + 1, y.end),
        ],
        Relation::OverlapsInverse => vec![
            Interval::new(y.start, x.start - 1),
            Interval::new(x.start, y.end),
            Interval::new(y.end + 1, x.end),
        ],
        Relation::Starts => vec![
            Interval::new(x.start, x.end),
            Interval::new(x.end + 1, y.end),
        ],
        Relation::StartsInverse => vec![
            Interval::new(y.start, y.end),
            Interval::new(y.end + 1, x.end),
        ],
        Relation::During => vec![
            Interval::new(y.start, x.start - 1),
            Interval::new(x.start, x.end),
            Interval::new(x.end + 1, y.end),
        ],
        Relation::DuringInverse => vec![
            Interval::new(x.start, y.start - 1),
            Interval::new(y.start, y.end),
            Interval::new(y.end + 1, x.end),
        ],
        Relation::Finishes => vec![
            Interval::new(y.start, x.start - 1),
            Interval::new(x.start, x.end),
        ],
        Relation::FinishesInverse => vec![
            Interval::new(x.start, y.start - 1),
            Interval::new(y.start, y.end),
        ],
    };
    Some(pieces)
}

/// Add an interval to a set of pairwise distinct intervals.
///
/// Pending pieces live on an explicit stack so the set is never modified
/// while it is being scanned.
fn add(distinct: &mut BTreeSet<Interval>, interval: Interval) {
    let mut pending = vec![interval];
    while let Some(candidate) = pending.pop() {
        let hit = distinct
            .iter()
            .find_map(|old| split(candidate, *old).map(|pieces| (*old, pieces)));
        match hit {
            Some((old, pieces)) => {
                distinct.remove(&old);
                // reversed so pieces are inserted in ascending order
                pending.extend(pieces.into_iter().rev());
            }
            None => {
                distinct.insert(candidate);
            }
        }
    }
}

/// The minimal set of pairwise disjoint intervals respecting every boundary
/// of the input intervals, in ascending order.
///
/// Invalid intervals are ignored.
pub fn distinct_intervals<I>(intervals: I) -> Vec<Interval>
where
    I: IntoIterator<Item = Interval>,
{
    let mut distinct = BTreeSet::new();
    for interval in intervals.into_iter().filter(Interval::is_valid) {
        add(&mut distinct, interval);
    }
    distinct.into_iter().collect()
}

impl Type2Helper {
    /// The data set condensed to the distinct intervals per pseudo key.
    ///
    /// Every output row is a copy of the first row of its group with the
    /// interval replaced. The prepared groups are left as they are.
    pub fn condense(&self) -> Result<Vec<Row>> {
        let mut rows = Vec::new();
        for group in &self.groups {
            let Some(first) = group.rows.first() else {
                continue;
            };
            for interval in distinct_intervals(group.rows.iter().map(|row| row.interval)) {
                let mut row = first.clone();
                row.interval = interval;
                rows.push(group.to_row(&self.config, &row)?);
            }
        }

        debug!(
            groups = self.groups.len(),
            rows_in = self.row_count(),
            rows_out = rows.len(),
            "Condensed type-2 groups"
        );
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(start: i64, end: i64) -> Interval {
        Interval::new(start, end)
    }

    #[test]
    fn overlapping_pair_splits_in_three() {
        assert_eq!(
            distinct_intervals([iv(1, 59), iv(32, 90)]),
            vec![iv(1, 31), iv(32, 59), iv(60, 90)]
        );
    }

    #[test]
    fn identical_intervals_collapse() {
        assert_eq!(distinct_intervals([iv(1, 10), iv(1, 10)]), vec![iv(1, 10)]);
    }

    #[test]
    fn contained_interval_splits_outer() {
        assert_eq!(
            distinct_intervals([iv(1, 30), iv(10, 20)]),
            vec![iv(1, 9), iv(10, 20), iv(21, 30)]
        );
    }

    #[test]
    fn shared_start_and_shared_end() {
        assert_eq!(distinct_intervals([iv(1, 30), iv(1, 10)]), vec![iv(1, 10), iv(11, 30)]);
        assert_eq!(distinct_intervals([iv(1, 30), iv(21, 30)]), vec![iv(1, 20), iv(21, 30)]);
    }

    #[test]
    fn invalid_intervals_are_ignored() {
        assert_eq!(distinct_intervals([iv(5, 1), iv(1, 3)]), vec![iv(1, 3)]);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(distinct_intervals(Vec::new()).is_empty());
    }
}
