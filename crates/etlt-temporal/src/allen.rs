//! Allen's interval algebra over closed integer intervals.
//!
//! Every pair of valid intervals stands in exactly one of 13 relations. The
//! codes follow the convention "X relative to Y"; inverse relations carry the
//! negated code, so `relation(x, y) == -relation(y, x)`.

use std::fmt;
use std::ops::Neg;

use serde::{Deserialize, Serialize};

use crate::TemporalError;

/// Relation of interval X to interval Y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i8)]
pub enum Relation {
    /// X and Y are the same interval.
    Equal = 0,
    /// X ends more than one point before Y starts.
    Before = 1,
    /// Y starts directly after X ends.
    Meets = 2,
    /// X starts first and ends inside Y.
    Overlaps = 3,
    /// X and Y start together, X ends first.
    Starts = 4,
    /// X lies strictly inside Y.
    During = 5,
    /// X and Y end together, X starts later.
    Finishes = 6,
    BeforeInverse = -1,
    MeetsInverse = -2,
    OverlapsInverse = -3,
    StartsInverse = -4,
    DuringInverse = -5,
    FinishesInverse = -6,
}

impl Relation {
    pub const ALL: [Relation; 13] = [
        Self::Equal,
        Self::Before,
        Self::Meets,
        Self::Overlaps,
        Self::Starts,
        Self::During,
        Self::Finishes,
        Self::BeforeInverse,
        Self::MeetsInverse,
        Self::OverlapsInverse,
        Self::StartsInverse,
        Self::DuringInverse,
        Self::FinishesInverse,
    ];

    /// Numeric relation code.
    pub const fn code(self) -> i8 {
        self as i8
    }

    /// The relation of Y to X.
    pub const fn inverse(self) -> Self {
        match self {
            Self::Equal => Self::Equal,
            Self::Before => Self::BeforeInverse,
            Self::Meets => Self::MeetsInverse,
            Self::Overlaps => Self::OverlapsInverse,
            Self::Starts => Self::StartsInverse,
            Self::During => Self::DuringInverse,
            Self::Finishes => Self::FinishesInverse,
            Self::BeforeInverse => Self::Before,
            Self::MeetsInverse => Self::Meets,
            Self::OverlapsInverse => Self::Overlaps,
            Self::StartsInverse => Self::Starts,
            Self::DuringInverse => Self::During,
            Self::FinishesInverse => Self::Finishes,
        }
    }

    /// Returns true if the two intervals share no point.
    pub const fn is_disjoint(self) -> bool {
        matches!(
            self,
            Self::Before | Self::Meets | Self::BeforeInverse | Self::MeetsInverse
        )
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Equal => "X_EQUAL_Y",
            Self::Before => "X_BEFORE_Y",
            Self::Meets => "X_MEETS_Y",
            Self::Overlaps => "X_OVERLAPS_WITH_Y",
            Self::Starts => "X_STARTS_Y",
            Self::During => "X_DURING_Y",
            Self::Finishes => "X_FINISHES_Y",
            Self::BeforeInverse => "X_BEFORE_Y_INVERSE",
            Self::MeetsInverse => "X_MEETS_Y_INVERSE",
            Self::OverlapsInverse => "X_OVERLAPS_WITH_Y_INVERSE",
            Self::StartsInverse => "X_STARTS_Y_INVERSE",
            Self::DuringInverse => "X_DURING_Y_INVERSE",
            Self::FinishesInverse => "X_FINISHES_Y_INVERSE",
        }
    }
}

impl Neg for Relation {
    type Output = Relation;

    fn neg(self) -> Self::Output {
        self.inverse()
    }
}

impl TryFrom<i8> for Relation {
    type Error = TemporalError;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|relation| relation.code() == code)
            .ok_or(TemporalError::UnexpectedRelation { code })
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

/// Classifies the relation of `[x_start, x_end]` to `[y_start, y_end]`.
///
/// Returns `None` if either interval has its start after its end.
pub fn relation(x_start: i64, x_end: i64, y_start: i64, y_end: i64) -> Option<Relation> {
    if x_start > x_end || y_start > y_end {
        return None;
    }

    if y_end < x_end {
        return relation(y_start, y_end, x_start, x_end).map(Relation::inverse);
    }

    // widened so sentinel values near i64::MIN/MAX cannot overflow
    let diff_start = i128::from(y_start) - i128::from(x_start);
    let gap = i128::from(y_start) - i128::from(x_end);

    if y_end == x_end {
        return Some(match diff_start {
            0 => Relation::Equal,
            d if d < 0 => Relation::Finishes,
            _ => Relation::FinishesInverse,
        });
    }

    Some(match gap {
        g if g > 1 => Relation::Before,
        1 => Relation::Meets,
        _ if diff_start > 0 => Relation::Overlaps,
        _ if diff_start == 0 => Relation::Starts,
        _ => Relation::During,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_inverse_negation() {
        for relation in Relation::ALL {
            assert_eq!(relation.inverse().code(), -relation.code());
            assert_eq!(-(-relation), relation);
        }
    }

    #[test]
    fn try_from_rejects_unknown_codes() {
        assert_eq!(Relation::try_from(-3).ok(), Some(Relation::OverlapsInverse));
        assert!(matches!(
            Relation::try_from(7),
            Err(TemporalError::UnexpectedRelation { code: 7 })
        ));
    }

    #[test]
    fn display_includes_code() {
        assert_eq!(Relation::DuringInverse.to_string(), "X_DURING_Y_INVERSE (-5)");
    }

    #[test]
    fn extreme_bounds_do_not_overflow() {
        assert_eq!(relation(i64::MIN, 0, 2, i64::MAX), Some(Relation::Before));
        assert_eq!(relation(i64::MIN, i64::MAX, 0, 0), Some(Relation::DuringInverse));
    }
}
