//! Transformation steps.

use std::fmt;

use etlt_dimension::{KeyResolver, Type1Dimension};
use etlt_model::{Row, Value};

use crate::Result;

/// What happens to a row after a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Go on with the next step.
    Continue,
    /// Send the source row to the parked sink with a reason.
    Park(String),
    /// Send the source row to the ignored sink with a reason.
    Ignore(String),
}

/// One step of a row transformation.
///
/// `in_row` is a copy of the source row, `tmp_row` holds intermediate values
/// shared between steps and `out_row` collects the transformed row. All
/// three start fresh for every source row.
pub trait Step {
    /// Name used in log events.
    fn name(&self) -> &str;

    fn apply(&mut self, in_row: &mut Row, tmp_row: &mut Row, out_row: &mut Row)
    -> Result<StepOutcome>;
}

/// A step backed by a closure, see [`from_fn`].
pub struct FnStep<F> {
    name: String,
    f: F,
}

impl<F> fmt::Debug for FnStep<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnStep").field("name", &self.name).finish()
    }
}

impl<F> Step for FnStep<F>
where
    F: FnMut(&mut Row, &mut Row, &mut Row) -> Result<StepOutcome>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(
        &mut self,
        in_row: &mut Row,
        tmp_row: &mut Row,
        out_row: &mut Row,
    ) -> Result<StepOutcome> {
        (self.f)(in_row, tmp_row, out_row)
    }
}

/// Wrap a closure as a named step.
pub fn from_fn<F>(name: impl Into<String>, f: F) -> FnStep<F>
where
    F: FnMut(&mut Row, &mut Row, &mut Row) -> Result<StepOutcome>,
{
    FnStep {
        name: name.into(),
        f,
    }
}

/// Replaces a natural key in the input row by its surrogate key.
///
/// An empty input field or an invalid natural key yields a null output
/// field; listing the output field as mandatory parks such rows.
#[derive(Debug)]
pub struct LookupStep<R> {
    name: String,
    in_field: String,
    out_field: String,
    dimension: Type1Dimension<Value, R>,
}

impl<R: KeyResolver<Value>> LookupStep<R> {
    pub fn new(
        in_field: impl Into<String>,
        out_field: impl Into<String>,
        dimension: Type1Dimension<Value, R>,
    ) -> Self {
        let in_field = in_field.into();
        let out_field = out_field.into();
        Self {
            name: format!("lookup {in_field} -> {out_field}"),
            in_field,
            out_field,
            dimension,
        }
    }

    pub fn dimension(&self) -> &Type1Dimension<Value, R> {
        &self.dimension
    }
}

impl<R: KeyResolver<Value>> Step for LookupStep<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(
        &mut self,
        in_row: &mut Row,
        _tmp_row: &mut Row,
        out_row: &mut Row,
    ) -> Result<StepOutcome> {
        let id = match in_row.get(&self.in_field) {
            Some(key) if !key.is_empty() => self.dimension.get_id(key, Some(&*in_row))?,
            _ => None,
        };
        out_row.insert(self.out_field.as_str(), id);
        Ok(StepOutcome::Continue)
    }
}
