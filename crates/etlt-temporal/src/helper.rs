//! Grouping of interval rows by pseudo key.
//!
//! [`Type2Helper`] owns the prepared groups between the caller's
//! `prepare_data` and `get_rows` calls. Each group remembers how its interval
//! fields were represented so results can be converted back.

use std::collections::HashMap;

use etlt_model::{DateRepr, PseudoKey, Row, Value, from_ordinal, to_ordinal};

use crate::{Interval, Result, TemporalError, Type2Config};

/// A row split into its primary interval and the remaining fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalRow {
    pub interval: Interval,
    /// Every field except the primary start and end fields.
    pub payload: Row,
}

impl IntervalRow {
    pub fn new(interval: Interval, payload: Row) -> Self {
        Self { interval, payload }
    }
}

/// Rows sharing one pseudo key.
#[derive(Debug, Clone)]
pub struct Group {
    pub(crate) key: PseudoKey,
    pub(crate) repr: DateRepr,
    pub(crate) rows: Vec<IntervalRow>,
}

impl Group {
    pub fn key(&self) -> &PseudoKey {
        &self.key
    }

    /// Representation of the group's interval fields.
    pub fn repr(&self) -> DateRepr {
        self.repr
    }

    pub fn rows(&self) -> &[IntervalRow] {
        &self.rows
    }

    /// Rebuild a full row with the interval converted back to the group's representation.
    pub(crate) fn to_row(&self, config: &Type2Config, row: &IntervalRow) -> Result<Row> {
        let mut out = row.payload.clone();
        out.insert(
            config.start_field.as_str(),
            from_ordinal(self.repr, row.interval.start)?,
        );
        out.insert(
            config.end_field.as_str(),
            from_ordinal(self.repr, row.interval.end)?,
        );
        Ok(out)
    }
}

/// Reference data with date intervals, grouped by pseudo key.
#[derive(Debug, Clone)]
pub struct Type2Helper {
    pub(crate) config: Type2Config,
    pub(crate) groups: Vec<Group>,
}

impl Type2Helper {
    /// Create a helper for the configured fields.
    pub fn new(config: Type2Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            groups: Vec::new(),
        })
    }

    pub fn config(&self) -> &Type2Config {
        &self.config
    }

    /// Groups in order of first appearance of their pseudo key.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn row_count(&self) -> usize {
        self.groups.iter().map(|group| group.rows.len()).sum()
    }

    /// Group copies of the rows by pseudo key; the caller's rows are not touched.
    pub fn prepare_data(&mut self, rows: &[Row]) -> Result<()> {
        self.prepare_owned(rows.iter().cloned())
    }

    /// Group the rows by pseudo key, taking ownership of them.
    ///
    /// Replaces any previously prepared data. On error the previous groups are kept.
    pub fn prepare_owned<I>(&mut self, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = Row>,
    {
        let mut groups: Vec<Group> = Vec::new();
        let mut index: HashMap<PseudoKey, usize> = HashMap::new();

        for mut row in rows {
            let key = row
                .project(&self.config.pseudo_key)
                .map_err(|field| TemporalError::MissingField {
                    field: field.to_string(),
                })?;
            let start = take_field(&mut row, &self.config.start_field)?;
            let end = take_field(&mut row, &self.config.end_field)?;

            let slot = match index.get(&key) {
                Some(slot) => *slot,
                None => {
                    // representation is fixed by the first row of each group
                    let repr = DateRepr::of(&start)?;
                    index.insert(key.clone(), groups.len());
                    groups.push(Group {
                        key,
                        repr,
                        rows: Vec::new(),
                    });
                    groups.len() - 1
                }
            };

            let group = &mut groups[slot];
            let interval = Interval::new(
                ordinal_in(group.repr, &self.config.start_field, &start)?,
                ordinal_in(group.repr, &self.config.end_field, &end)?,
            );
            group.rows.push(IntervalRow::new(interval, row));
        }

        tracing::debug!(
            groups = groups.len(),
            rows = groups.iter().map(|g| g.rows.len()).sum::<usize>(),
            "Prepared type-2 groups"
        );
        self.groups = groups;
        Ok(())
    }

    /// Number each group's rows in interval order.
    ///
    /// Afterwards the pseudo key and the value of `field` identify a row
    /// uniquely. The first row of every group gets `start`.
    pub fn enumerate(&mut self, field: &str, start: i64) {
        for group in &mut self.groups {
            group.rows.sort_by_key(|row| row.interval);
            for (ordinal, row) in (start..).zip(group.rows.iter_mut()) {
                row.payload.insert(field, Value::Int(ordinal));
            }
        }
    }

    /// All rows of all groups, with intervals in their original representation.
    pub fn get_rows(&self) -> Result<Vec<Row>> {
        let mut rows = Vec::with_capacity(self.row_count());
        for group in &self.groups {
            for row in &group.rows {
                rows.push(group.to_row(&self.config, row)?);
            }
        }
        Ok(rows)
    }
}

fn take_field(row: &mut Row, field: &str) -> Result<Value> {
    row.remove(field).ok_or_else(|| TemporalError::MissingField {
        field: field.to_string(),
    })
}

/// Converts a boundary that must be stored in the group's representation.
fn ordinal_in(repr: DateRepr, field: &str, value: &Value) -> Result<i64> {
    if !repr.matches(value) {
        // unsupported types are reported as such, not as a mix
        DateRepr::of(value)?;
        return Err(TemporalError::MixedDateRepresentation {
            field: field.to_string(),
            expected: repr,
            found: value.type_name(),
        });
    }
    Ok(to_ordinal(value)?)
}
