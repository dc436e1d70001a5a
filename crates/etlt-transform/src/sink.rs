//! Destinations for routed rows.

use etlt_model::Row;

use crate::Result;

/// Receives the rows of one bucket.
pub trait RowSink {
    /// `reason` is the park or ignore reason, `None` for transformed rows.
    fn write(&mut self, row: Row, reason: Option<&str>) -> Result<()>;
}

/// Collects rows in memory.
#[derive(Debug, Clone, Default)]
pub struct VecSink {
    entries: Vec<(Row, Option<String>)>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.entries.iter().map(|(row, _)| row)
    }

    pub fn reasons(&self) -> impl Iterator<Item = Option<&str>> {
        self.entries.iter().map(|(_, reason)| reason.as_deref())
    }

    pub fn entries(&self) -> &[(Row, Option<String>)] {
        &self.entries
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.entries.into_iter().map(|(row, _)| row).collect()
    }
}

impl RowSink for VecSink {
    fn write(&mut self, row: Row, reason: Option<&str>) -> Result<()> {
        self.entries.push((row, reason.map(str::to_string)));
        Ok(())
    }
}
