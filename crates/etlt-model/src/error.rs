//! Error types for the row model.

use thiserror::Error;

/// Errors raised while converting row values into the ordinal date domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A text value that should hold a `YYYY-MM-DD` date could not be parsed.
    #[error("malformed date '{value}': expected YYYY-MM-DD")]
    MalformedDate { value: String },

    /// The value cannot be used as an interval boundary.
    #[error("unsupported interval value of type {type_name}")]
    UnsupportedType { type_name: &'static str },

    /// An ordinal day number has no calendar date.
    #[error("ordinal day {ordinal} is outside the supported date range")]
    OrdinalOutOfRange { ordinal: i64 },
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
