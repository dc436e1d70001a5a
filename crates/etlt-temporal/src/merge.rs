//! Merging of adjacent rows and intersection with secondary intervals.
//!
//! Overlapping rows must not occur in proper reference data, but joining
//! several reference data sets on their natural keys produces them all the
//! time. They are resolved as follows:
//!
//! - the interval with the most recent start prevails for the overlapping period
//! - with equal starts the interval with the most recent end prevails
//! - with equal starts and ends the last row in the data set prevails
//!
//! Adjacent or overlapping rows with identical payloads are folded into one row.

use tracing::{debug, trace};

use crate::helper::{Group, IntervalRow};
use crate::{Interval, Relation, Result, TemporalError, Type2Config, Type2Helper};

/// Resolve adjacent and overlapping rows of one group.
///
/// The rows must be sorted by `(start, end)`; a stable sort keeps duplicates
/// in input order so the last one wins. A row with an invalid interval voids
/// the whole group and an empty list is returned.
pub fn merge_adjacent_rows(rows: Vec<IntervalRow>) -> Result<Vec<IntervalRow>> {
    if rows.iter().any(|row| !row.interval.is_valid()) {
        trace!("Invalid interval voids group");
        return Ok(Vec::new());
    }

    let mut merged = Vec::with_capacity(rows.len());
    let mut rows = rows.into_iter();
    let Some(mut prev) = rows.next() else {
        return Ok(merged);
    };

    for row in rows {
        let Some(relation) = prev.interval.relation(&row.interval) else {
            return Ok(Vec::new());
        };

        match relation {
            // prev: |----|
            // row:          |-----|
            Relation::Before => {
                emit(&mut merged, std::mem::replace(&mut prev, row));
            }

            // prev: |-------|
            // row:           |-------|
            Relation::Meets => {
                if prev.payload == row.payload {
                    prev.interval.end = row.interval.end;
                } else {
                    emit(&mut merged, std::mem::replace(&mut prev, row));
                }
            }

            // prev: |-----------|
            // row:        |----------|
            Relation::Overlaps => {
                if prev.payload == row.payload {
                    prev.interval.end = row.interval.end;
                } else {
                    prev.interval.end = row.interval.start - 1;
                    emit(&mut merged, std::mem::replace(&mut prev, row));
                }
            }

            // prev: |------|
            // row:  |----------------|
            // Truncating prev to row.start - 1 leaves nothing of it.
            Relation::Starts | Relation::Equal => {
                prev = row;
            }

            // prev: |----------------|
            // row:       |------|
            // The most recent start prevails, the part of prev after row is discarded.
            Relation::DuringInverse => {
                if prev.payload == row.payload {
                    prev.interval.end = row.interval.end;
                } else {
                    prev.interval.end = row.interval.start - 1;
                    emit(&mut merged, std::mem::replace(&mut prev, row));
                }
            }

            // prev: |----------------|
            // row:            |------|
            Relation::FinishesInverse => {
                if prev.payload != row.payload {
                    prev.interval.end = row.interval.start - 1;
                    emit(&mut merged, std::mem::replace(&mut prev, row));
                }
            }

            // With prev.start <= row.start the remaining relations cannot occur.
            Relation::During
            | Relation::Finishes
            | Relation::BeforeInverse
            | Relation::MeetsInverse
            | Relation::OverlapsInverse
            | Relation::StartsInverse => {
                return Err(TemporalError::DataNotSorted { relation });
            }
        }
    }

    emit(&mut merged, prev);
    Ok(merged)
}

/// Append a resolved row, folding it into the previous one when they meet
/// with identical payloads.
///
/// This happens when a discarded row sat between two rows with the same
/// payload, and keeps merging a fixed point.
fn emit(merged: &mut Vec<IntervalRow>, row: IntervalRow) {
    if let Some(last) = merged.last_mut()
        && last.interval.relation(&row.interval) == Some(Relation::Meets)
        && last.payload == row.payload
    {
        last.interval.end = row.interval.end;
        return;
    }
    merged.push(row);
}

/// Intersect each row's primary interval with its secondary intervals.
///
/// Rows with an empty intersection are dropped. Secondary interval fields are
/// removed from the surviving rows.
fn intersect_rows(
    config: &Type2Config,
    rows: Vec<IntervalRow>,
    secondary: &[(String, String)],
) -> Result<Vec<IntervalRow>> {
    let mut kept = Vec::with_capacity(rows.len());

    'rows: for mut row in rows {
        let primary = row.interval;
        let mut current = primary;
        for (start_field, end_field) in secondary {
            let other = Interval::new(
                secondary_bound(config, &row, primary, start_field)?,
                secondary_bound(config, &row, primary, end_field)?,
            );
            match current.intersect(&other) {
                Some(common) => current = common,
                None => continue 'rows,
            }
        }

        for field in secondary.iter().flat_map(|(start, end)| [start, end]) {
            if !config.is_interval_field(field) {
                row.payload.remove(field);
            }
        }
        row.interval = current;
        kept.push(row);
    }

    Ok(kept)
}

fn secondary_bound(
    config: &Type2Config,
    row: &IntervalRow,
    primary: Interval,
    field: &str,
) -> Result<i64> {
    if field == config.start_field {
        return Ok(primary.start);
    }
    if field == config.end_field {
        return Ok(primary.end);
    }
    let value = row
        .payload
        .get(field)
        .ok_or_else(|| TemporalError::MissingField {
            field: field.to_string(),
        })?;
    Ok(etlt_model::to_ordinal(value)?)
}

impl Type2Helper {
    /// Resolve adjacent and overlapping rows without secondary intervals.
    pub fn merge_adjacent(&mut self) -> Result<()> {
        self.merge::<&str>(&[])
    }

    /// Merge the join of two or more reference data sets.
    ///
    /// `secondary` holds, for every joined data set besides the primary one,
    /// the names of its start and end field. With no secondary intervals this
    /// only resolves adjacent and overlapping rows. Groups left empty are
    /// removed.
    pub fn merge<S>(&mut self, secondary: &[(S, S)]) -> Result<()>
    where
        S: AsRef<str>,
    {
        let secondary: Vec<(String, String)> = secondary
            .iter()
            .map(|(start, end)| (start.as_ref().to_string(), end.as_ref().to_string()))
            .collect();

        let _span = tracing::debug_span!(
            "type2_merge",
            groups = self.groups.len(),
            secondary = secondary.len()
        )
        .entered();

        let mut merged = Vec::with_capacity(self.groups.len());
        for group in &self.groups {
            let mut rows = intersect_rows(&self.config, group.rows.clone(), &secondary)?;
            rows.sort_by_key(|row| row.interval);
            let rows = merge_adjacent_rows(rows)?;

            if rows.is_empty() {
                trace!(key = ?group.key, "Group removed by merge");
                continue;
            }
            merged.push(Group {
                key: group.key.clone(),
                repr: group.repr,
                rows,
            });
        }

        debug!(
            groups_in = self.groups.len(),
            groups_out = merged.len(),
            "Merged type-2 groups"
        );
        self.groups = merged;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use etlt_model::Row;

    fn payload(value: f64) -> Row {
        Row::new().with("value", value)
    }

    fn row(start: i64, end: i64, value: f64) -> IntervalRow {
        IntervalRow::new(Interval::new(start, end), payload(value))
    }

    fn intervals(rows: &[IntervalRow]) -> Vec<(i64, i64)> {
        rows.iter()
            .map(|row| (row.interval.start, row.interval.end))
            .collect()
    }

    #[test]
    fn empty_input() {
        assert!(merge_adjacent_rows(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn before_keeps_both() {
        let merged = merge_adjacent_rows(vec![row(1, 5, 1.0), row(10, 12, 1.0)]).unwrap();
        assert_eq!(intervals(&merged), vec![(1, 5), (10, 12)]);
    }

    #[test]
    fn meets_with_equal_payload_concatenates() {
        let merged = merge_adjacent_rows(vec![row(1, 5, 1.0), row(6, 9, 1.0)]).unwrap();
        assert_eq!(intervals(&merged), vec![(1, 9)]);
    }

    #[test]
    fn overlaps_with_different_payload_truncates_earlier() {
        let merged = merge_adjacent_rows(vec![row(1, 10, 1.0), row(5, 20, 2.0)]).unwrap();
        assert_eq!(intervals(&merged), vec![(1, 4), (5, 20)]);
        assert_eq!(merged[1].payload, payload(2.0));
    }

    #[test]
    fn equal_intervals_last_row_wins() {
        let merged = merge_adjacent_rows(vec![row(1, 10, 1.0), row(1, 10, 2.0)]).unwrap();
        assert_eq!(merged, vec![row(1, 10, 2.0)]);
    }

    #[test]
    fn finishes_inverse_with_equal_payload_is_covered() {
        let merged = merge_adjacent_rows(vec![row(1, 10, 1.0), row(5, 10, 1.0)]).unwrap();
        assert_eq!(intervals(&merged), vec![(1, 10)]);
    }

    #[test]
    fn discarded_row_does_not_split_equal_neighbours() {
        let merged =
            merge_adjacent_rows(vec![row(1, 10, 1.0), row(5, 8, 2.0), row(5, 12, 1.0)]).unwrap();
        assert_eq!(intervals(&merged), vec![(1, 12)]);
    }

    #[test]
    fn unsorted_rows_are_rejected() {
        let err = merge_adjacent_rows(vec![row(10, 20, 1.0), row(1, 5, 1.0)]).unwrap_err();
        assert!(matches!(
            err,
            TemporalError::DataNotSorted {
                relation: Relation::BeforeInverse
            }
        ));
    }

    #[test]
    fn single_invalid_row_voids_group() {
        assert!(merge_adjacent_rows(vec![row(10, 1, 1.0)]).unwrap().is_empty());
    }
}
