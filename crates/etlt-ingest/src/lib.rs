//! CSV row source and sink.
//!
//! The format is always given explicitly through [`CsvOptions`]; nothing is
//! guessed from the input. Every cell is read as text (or null), typed
//! conversion is left to the transformer steps.

#![deny(unsafe_code)]

mod error;
mod options;
mod reader;
mod writer;

pub use error::{IngestError, Result};
pub use options::CsvOptions;
pub use reader::{read_rows, read_rows_from_path};
pub use writer::{write_rows, write_rows_to_path};
