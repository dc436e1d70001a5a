//! Type-2 reference data reconciliation.
//!
//! Works on rows that carry a date interval (start and end field) and a
//! pseudo key. Rows are grouped by pseudo key, converted to the ordinal day
//! domain and then:
//!
//! - **merged**: adjacent or overlapping intervals folded into a minimal set,
//!   optionally after intersecting with secondary intervals on the same row
//! - **condensed**: split into the minimal partition of disjoint intervals
//! - **enumerated**: numbered per pseudo key in interval order
//!
//! # Example
//!
//! ```ignore
//! use etlt_temporal::{Type2Config, Type2Helper};
//!
//! let config = Type2Config::new("start", "end").with_pseudo_key(["a", "b"]);
//! let mut helper = Type2Helper::new(config)?;
//! helper.prepare_data(&rows)?;
//! helper.merge(&[("start2", "end2")])?;
//! let merged = helper.get_rows()?;
//! ```

#![deny(unsafe_code)]

pub mod allen;
mod condense;
mod config;
mod error;
mod helper;
mod interval;
mod merge;

pub use allen::{Relation, relation};
pub use condense::distinct_intervals;
pub use config::Type2Config;
pub use error::{Result, TemporalError};
pub use helper::{Group, IntervalRow, Type2Helper};
pub use interval::Interval;
pub use merge::merge_adjacent_rows;
