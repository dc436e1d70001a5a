//! Error types for dimension lookups.

use etlt_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DimensionError {
    /// The backing store could not resolve a key.
    #[error("failed to resolve natural key {key}: {message}")]
    Resolve { key: String, message: String },

    /// A lookup date could not be converted to the ordinal domain.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// A resolved reference interval ends before it starts.
    #[error("reference interval for {key} is invalid: {start} > {end}")]
    InvalidInterval { key: String, start: i64, end: i64 },
}

impl DimensionError {
    pub fn resolve(key: impl std::fmt::Debug, message: impl Into<String>) -> Self {
        Self::Resolve {
            key: format!("{key:?}"),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DimensionError>;
