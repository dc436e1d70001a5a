//! Core data model for the ETLT toolkit.
//!
//! Provides the record shape every other crate works on:
//!
//! - **value**: [`Value`], the tagged scalar stored in a row field
//! - **row**: [`Row`] (field name -> value) and [`PseudoKey`] projections
//! - **date**: conversion between ISO-8601 text, `NaiveDate` and ordinal day numbers

#![deny(unsafe_code)]

pub mod date;
mod error;
mod row;
mod value;

pub use date::{DateRepr, from_ordinal, parse_iso_date, to_ordinal};
pub use error::{ModelError, Result};
pub use row::{PseudoKey, Row};
pub use value::Value;
