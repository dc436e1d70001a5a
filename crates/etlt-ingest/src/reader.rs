//! Reading CSV records into rows.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use etlt_model::{Row, Value};
use tracing::debug;

use crate::{CsvOptions, IngestError, Result};

const BOM: char = '\u{feff}';

/// Read all records of `reader` as rows.
pub fn read_rows<R: Read>(reader: R, options: &CsvOptions) -> Result<Vec<Row>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_headers)
        .trim(if options.trim { Trim::All } else { Trim::None })
        .from_reader(reader);

    let headers: Option<Vec<String>> = if options.has_headers {
        let record = reader.headers()?;
        if record.is_empty() {
            return Err(IngestError::MissingHeader { column: 0 });
        }
        let mut names = Vec::with_capacity(record.len());
        for (column, name) in record.iter().enumerate() {
            let name = name.trim_start_matches(BOM);
            if name.is_empty() {
                return Err(IngestError::MissingHeader { column });
            }
            names.push(name.to_string());
        }
        Some(names)
    } else {
        None
    };

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let mut row = Row::new();
        for (column, cell) in record.iter().enumerate() {
            let name = match &headers {
                Some(names) => names
                    .get(column)
                    .cloned()
                    .ok_or(IngestError::MissingHeader { column })?,
                None => column.to_string(),
            };
            let cell = if index == 0 && column == 0 {
                cell.trim_start_matches(BOM)
            } else {
                cell
            };
            row.insert(name, cell_value(cell, options));
        }
        rows.push(row);
    }

    debug!(rows = rows.len(), "Read CSV rows");
    Ok(rows)
}

/// Read all records of the file at `path` as rows.
pub fn read_rows_from_path(path: &Path, options: &CsvOptions) -> Result<Vec<Row>> {
    let file = File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = read_rows(file, options)?;
    debug!(path = %path.display(), rows = rows.len(), "Loaded CSV file");
    Ok(rows)
}

fn cell_value(cell: &str, options: &CsvOptions) -> Value {
    if cell.is_empty() && options.empty_as_null {
        Value::Null
    } else {
        Value::Text(cell.to_string())
    }
}
