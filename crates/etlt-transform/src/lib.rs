//! Row transformer.
//!
//! A [`Transformer`] runs an ordered list of [`Step`]s over every source row.
//! Each row ends up in exactly one of three sinks:
//!
//! - **transformed**: all steps passed and every mandatory field is filled
//! - **parked**: a step parked the row, a step failed, or a mandatory field is
//!   empty; the original source row is kept for later reprocessing
//! - **ignored**: a step decided the row is irrelevant
//!
//! # Example
//!
//! ```ignore
//! use etlt_transform::{StepOutcome, Transformer, VecSink, from_fn};
//!
//! let mut transformer = Transformer::new()
//!     .with_step(from_fn("copy code", |in_row, _tmp, out_row| {
//!         out_row.insert("code", in_row.get("code").cloned().unwrap_or_default());
//!         Ok(StepOutcome::Continue)
//!     }))
//!     .with_mandatory_fields(["code"]);
//! let summary = transformer.run(rows, &mut transformed, &mut parked, &mut ignored)?;
//! ```

#![deny(unsafe_code)]

mod error;
mod sink;
mod step;
mod transformer;

pub use error::{Result, TransformError};
pub use sink::{RowSink, VecSink};
pub use step::{FnStep, LookupStep, Step, StepOutcome, from_fn};
pub use transformer::{EXCEPTION_REASON, Routed, TransformSummary, Transformer};
