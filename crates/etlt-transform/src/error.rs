//! Error types for row transformation.

use etlt_dimension::DimensionError;
use etlt_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    /// A step could not process a row.
    #[error("step {step} failed: {message}")]
    Step { step: String, message: String },

    /// A sink rejected a row. Aborts the run.
    #[error("failed to write {sink} row: {message}")]
    Sink { sink: &'static str, message: String },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Dimension(#[from] DimensionError),
}

pub type Result<T> = std::result::Result<T, TransformError>;
