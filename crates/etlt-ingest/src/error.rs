//! Error types for CSV ingestion.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    /// Failed to open or read a file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a file.
    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV or an I/O error inside the CSV reader/writer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A header cell is empty or the input has no header row at all.
    #[error("missing header for column {column}")]
    MissingHeader { column: usize },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
