//! Writing rows as CSV records.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use etlt_model::Row;
use tracing::debug;

use crate::{CsvOptions, IngestError, Result};

/// Write `rows` to `writer` with the given column order.
///
/// Fields not listed in `columns` are not written, listed fields missing
/// from a row are written empty. Dates are written as `YYYY-MM-DD`.
pub fn write_rows<'a, W, I, S>(
    writer: W,
    columns: &[S],
    rows: I,
    options: &CsvOptions,
) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Row>,
    S: AsRef<str>,
{
    let mut writer = WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(writer);

    if options.has_headers {
        writer.write_record(columns.iter().map(AsRef::as_ref))?;
    }

    let mut written = 0;
    for row in rows {
        writer.write_record(columns.iter().map(|column| {
            row.get(column.as_ref())
                .map(ToString::to_string)
                .unwrap_or_default()
        }))?;
        written += 1;
    }
    writer.flush().map_err(csv::Error::from)?;

    debug!(rows = written, columns = columns.len(), "Wrote CSV rows");
    Ok(written)
}

/// Write `rows` to a new file at `path`, replacing an existing one.
pub fn write_rows_to_path<'a, I, S>(
    path: &Path,
    columns: &[S],
    rows: I,
    options: &CsvOptions,
) -> Result<usize>
where
    I: IntoIterator<Item = &'a Row>,
    S: AsRef<str>,
{
    let file = File::create(path).map_err(|source| IngestError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    write_rows(file, columns, rows, options)
}
