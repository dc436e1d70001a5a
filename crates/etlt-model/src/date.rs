//! Conversion between date representations and the ordinal day domain.
//!
//! Interval arithmetic runs on ordinal day numbers (day 1 is 0001-01-01 in
//! the proleptic Gregorian calendar). Callers may supply interval boundaries
//! as ISO-8601 text, as `NaiveDate` values or as already converted integers;
//! [`DateRepr`] remembers which one so results can be converted back.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{ModelError, Result, Value};

/// Time suffixes that denote midnight and are stripped before parsing.
const MIDNIGHT_SUFFIXES: [&str; 2] = ["T00:00:00", " 00:00:00"];

/// Representation of an interval boundary column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateRepr {
    /// ISO-8601 text (`YYYY-MM-DD`).
    Text,
    /// Native `NaiveDate` values.
    Date,
    /// Integers already in the ordinal domain.
    Ordinal,
}

impl DateRepr {
    /// Detects the representation of a single boundary value.
    pub fn of(value: &Value) -> Result<Self> {
        match value {
            Value::Text(_) => Ok(Self::Text),
            Value::Date(_) => Ok(Self::Date),
            Value::Int(_) => Ok(Self::Ordinal),
            other => Err(ModelError::UnsupportedType {
                type_name: other.type_name(),
            }),
        }
    }

    /// Returns true if the value is stored in this representation.
    pub fn matches(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::Text, Value::Text(_))
                | (Self::Date, Value::Date(_))
                | (Self::Ordinal, Value::Int(_))
        )
    }
}

impl std::fmt::Display for DateRepr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Date => write!(f, "date"),
            Self::Ordinal => write!(f, "ordinal"),
        }
    }
}

/// Parses a `YYYY-MM-DD` date, accepting a trailing midnight time.
pub fn parse_iso_date(text: &str) -> Result<NaiveDate> {
    let trimmed = text.trim();
    let date_part = MIDNIGHT_SUFFIXES
        .iter()
        .find_map(|suffix| trimmed.strip_suffix(suffix))
        .unwrap_or(trimmed);

    // chrono also accepts unpadded fields
    let well_formed = date_part.len() == 10
        && date_part
            .bytes()
            .enumerate()
            .all(|(idx, b)| if idx == 4 || idx == 7 { b == b'-' } else { b.is_ascii_digit() });
    if !well_formed {
        return Err(ModelError::MalformedDate {
            value: text.to_string(),
        });
    }

    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| ModelError::MalformedDate {
        value: text.to_string(),
    })
}

/// Converts a boundary value to its ordinal day number.
pub fn to_ordinal(value: &Value) -> Result<i64> {
    match value {
        Value::Text(text) => Ok(i64::from(parse_iso_date(text)?.num_days_from_ce())),
        Value::Date(date) => Ok(i64::from(date.num_days_from_ce())),
        Value::Int(ordinal) => Ok(*ordinal),
        other => Err(ModelError::UnsupportedType {
            type_name: other.type_name(),
        }),
    }
}

/// Converts an ordinal day number back to the given representation.
pub fn from_ordinal(repr: DateRepr, ordinal: i64) -> Result<Value> {
    if repr == DateRepr::Ordinal {
        return Ok(Value::Int(ordinal));
    }

    let date = i32::try_from(ordinal)
        .ok()
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .ok_or(ModelError::OrdinalOutOfRange { ordinal })?;

    Ok(match repr {
        DateRepr::Text => Value::Text(date.format("%Y-%m-%d").to_string()),
        _ => Value::Date(date),
    })
}
