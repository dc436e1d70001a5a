//! Routing of source rows through the steps.

use std::time::Instant;

use etlt_model::{Row, Value};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{Result, RowSink, Step, StepOutcome};

/// Park reason of rows on which a step failed.
pub const EXCEPTION_REASON: &str = "Exception";

/// Where a single source row went.
#[derive(Debug, Clone, PartialEq)]
pub enum Routed {
    Transformed(Row),
    Parked(String),
    Ignored(String),
}

/// Row counts of a transformer run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformSummary {
    pub total: usize,
    pub transformed: usize,
    pub parked: usize,
    pub ignored: usize,
    /// Rows parked because a step failed; included in `parked`.
    pub errors: usize,
}

/// Runs the steps over source rows and routes them to sinks.
#[derive(Default)]
pub struct Transformer {
    steps: Vec<Box<dyn Step>>,
    mandatory_fields: Vec<String>,
    summary: TransformSummary,
}

impl std::fmt::Debug for Transformer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transformer")
            .field(
                "steps",
                &self.steps.iter().map(|step| step.name()).collect::<Vec<_>>(),
            )
            .field("mandatory_fields", &self.mandatory_fields)
            .field("summary", &self.summary)
            .finish()
    }
}

impl Transformer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step; steps run in the order they were added.
    pub fn with_step(mut self, step: impl Step + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Fields that must be present and non-empty in every transformed row.
    pub fn with_mandatory_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mandatory_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Counts accumulated over all runs.
    pub fn summary(&self) -> TransformSummary {
        self.summary
    }

    /// Transform one source row without touching the counters.
    ///
    /// The first step that parks or ignores the row ends its transformation.
    /// A step error is returned as is.
    pub fn transform_row(&mut self, row: &Row) -> Result<Routed> {
        let mut in_row = row.clone();
        let mut tmp_row = Row::new();
        let mut out_row = Row::new();

        for step in &mut self.steps {
            match step.apply(&mut in_row, &mut tmp_row, &mut out_row)? {
                StepOutcome::Continue => {}
                StepOutcome::Park(reason) => return Ok(Routed::Parked(reason)),
                StepOutcome::Ignore(reason) => return Ok(Routed::Ignored(reason)),
            }
        }

        let missing: Vec<&str> = self
            .mandatory_fields
            .iter()
            .map(String::as_str)
            .filter(|field| out_row.get(field).is_none_or(Value::is_empty))
            .collect();
        if !missing.is_empty() {
            return Ok(Routed::Parked(missing.join(" ")));
        }

        Ok(Routed::Transformed(out_row))
    }

    /// Transform all rows and write each one to exactly one sink.
    ///
    /// Parked and ignored sinks receive the original source row. A sink error
    /// aborts the run; counts up to that row are kept in [`Self::summary`].
    pub fn run<I>(
        &mut self,
        rows: I,
        transformed: &mut dyn RowSink,
        parked: &mut dyn RowSink,
        ignored: &mut dyn RowSink,
    ) -> Result<TransformSummary>
    where
        I: IntoIterator<Item = Row>,
    {
        let started = Instant::now();
        let mut run = TransformSummary::default();
        let result = self.route_rows(rows, transformed, parked, ignored, &mut run);

        self.summary.total += run.total;
        self.summary.transformed += run.transformed;
        self.summary.parked += run.parked;
        self.summary.ignored += run.ignored;
        self.summary.errors += run.errors;
        result?;

        info!(
            total = run.total,
            transformed = run.transformed,
            ignored = run.ignored,
            parked = run.parked,
            errors = run.errors,
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Transformed source rows"
        );
        Ok(run)
    }

    fn route_rows<I>(
        &mut self,
        rows: I,
        transformed: &mut dyn RowSink,
        parked: &mut dyn RowSink,
        ignored: &mut dyn RowSink,
        run: &mut TransformSummary,
    ) -> Result<()>
    where
        I: IntoIterator<Item = Row>,
    {
        for (index, row) in rows.into_iter().enumerate() {
            run.total += 1;
            let routed = self.transform_row(&row).unwrap_or_else(|error| {
                warn!(row = index + 1, %error, "Error during processing of row");
                run.errors += 1;
                Routed::Parked(EXCEPTION_REASON.to_string())
            });

            match routed {
                Routed::Transformed(out_row) => {
                    transformed.write(out_row, None)?;
                    run.transformed += 1;
                }
                Routed::Parked(reason) => {
                    debug!(row = index + 1, %reason, "Row parked");
                    parked.write(row, Some(&reason))?;
                    run.parked += 1;
                }
                Routed::Ignored(reason) => {
                    debug!(row = index + 1, %reason, "Row ignored");
                    ignored.write(row, Some(&reason))?;
                    run.ignored += 1;
                }
            }
        }
        Ok(())
    }
}
