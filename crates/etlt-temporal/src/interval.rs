//! Closed intervals in the ordinal day domain.

use std::cmp::{max, min};

use serde::{Deserialize, Serialize};

use crate::allen::{self, Relation};

/// A closed interval `[start, end]` of ordinal day numbers.
///
/// An interval with `start > end` is invalid. Invalid intervals are kept as
/// values rather than rejected: they stand for "no record" and make every
/// operation that touches them produce nothing.
///
/// Ordering is by `(start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: i64,
    pub end: i64,
}

impl Interval {
    pub const fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    pub const fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    pub const fn contains(&self, point: i64) -> bool {
        self.start <= point && point <= self.end
    }

    /// Relation of `self` (X) to `other` (Y), `None` if either is invalid.
    pub fn relation(&self, other: &Interval) -> Option<Relation> {
        allen::relation(self.start, self.end, other.start, other.end)
    }

    /// The common part of two intervals, `None` if they share no point.
    pub fn intersect(&self, other: &Interval) -> Option<Interval> {
        let candidate = Interval::new(max(self.start, other.start), min(self.end, other.end));
        candidate.is_valid().then_some(candidate)
    }
}

impl From<(i64, i64)> for Interval {
    fn from((start, end): (i64, i64)) -> Self {
        Self::new(start, end)
    }
}
