//! Error types for interval reconciliation.

use std::path::PathBuf;

use etlt_model::{DateRepr, ModelError};
use thiserror::Error;

use crate::Relation;

/// Errors raised by the type-2 helper operations.
///
/// An error aborts the whole operation call; groups prepared before the call
/// are left untouched.
#[derive(Debug, Error)]
pub enum TemporalError {
    /// A boundary value could not be converted to the ordinal domain.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// A row lacks a pseudo-key or interval field.
    #[error("field '{field}' is missing from row")]
    MissingField { field: String },

    /// A group mixes date representations in its interval fields.
    #[error("field '{field}' holds a {found} value but its group uses {expected} dates")]
    MixedDateRepresentation {
        field: String,
        expected: DateRepr,
        found: &'static str,
    },

    /// The merger met a relation that cannot occur between sorted rows.
    #[error("data is not sorted properly, relation: {relation}")]
    DataNotSorted { relation: Relation },

    /// A relation code outside Allen's 13 relations.
    #[error("unexpected relation code {code}")]
    UnexpectedRelation { code: i8 },

    /// Configuration could not be parsed or is inconsistent.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Configuration file could not be read.
    #[error("failed to read configuration {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for interval operations.
pub type Result<T> = std::result::Result<T, TemporalError>;
