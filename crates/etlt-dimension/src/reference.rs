//! Type-2 dimensions whose reference data comes with date intervals.
//!
//! A natural key maps to a different surrogate key per period. The cache keeps,
//! per natural key, the intervals seen so far; a lookup date outside all of
//! them goes to the resolver.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use etlt_model::{Row, Value, to_ordinal};
use etlt_temporal::Interval;
use tracing::trace;

use crate::{DimensionError, Result};

/// A period of reference data and its surrogate key.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceInterval {
    pub start: Value,
    pub end: Value,
    pub id: i64,
}

impl ReferenceInterval {
    pub fn new(start: impl Into<Value>, end: impl Into<Value>, id: i64) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            id,
        }
    }
}

/// Backing store of a type-2 reference dimension.
pub trait ReferenceResolver<K> {
    /// The period containing `date` for `key`, `None` if the natural key is
    /// not valid at that date.
    fn resolve(
        &mut self,
        key: &K,
        date: &Value,
        enhancement: Option<&Row>,
    ) -> Result<Option<ReferenceInterval>>;

    fn before_resolve(&mut self) -> Result<()> {
        Ok(())
    }

    fn after_resolve(&mut self, success: bool) -> Result<()> {
        let _ = success;
        Ok(())
    }
}

#[derive(Debug)]
pub struct Type2ReferenceDimension<K, R> {
    resolver: R,
    map: HashMap<K, Vec<(Interval, Option<i64>)>>,
}

impl<K, R> Type2ReferenceDimension<K, R>
where
    K: Eq + Hash + Clone + Debug,
    R: ReferenceResolver<K>,
{
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            map: HashMap::new(),
        }
    }

    /// Seed the cache with a known period of `key`.
    pub fn preload(&mut self, key: K, reference: &ReferenceInterval) -> Result<()> {
        let interval = reference_interval(&key, reference)?;
        self.map
            .entry(key)
            .or_default()
            .push((interval, Some(reference.id)));
        Ok(())
    }

    /// Surrogate key of `key` at `date`.
    ///
    /// Returns `None` for a null or empty date and for keys the resolver
    /// declares not valid. A negative answer is cached for that single day.
    pub fn get_id(
        &mut self,
        key: &K,
        date: &Value,
        enhancement: Option<&Row>,
    ) -> Result<Option<i64>> {
        if date.is_empty() {
            return Ok(None);
        }
        let day = to_ordinal(date)?;

        if let Some(entries) = self.map.get(key)
            && let Some((_, id)) = entries.iter().find(|(interval, _)| interval.contains(day))
        {
            return Ok(*id);
        }

        self.resolver.before_resolve()?;
        let resolved = self.resolver.resolve(key, date, enhancement);
        let finished = self.resolver.after_resolve(resolved.is_ok());
        let resolved = resolved?;
        finished?;

        let entry = match resolved {
            Some(reference) => (reference_interval(key, &reference)?, Some(reference.id)),
            None => (Interval::new(day, day), None),
        };
        trace!(?key, day, id = ?entry.1, "Resolved reference interval");
        self.map.entry(key.clone()).or_default().push(entry);
        Ok(entry.1)
    }

    /// Cached periods of `key`, in the order they were added.
    pub fn intervals(&self, key: &K) -> &[(Interval, Option<i64>)] {
        self.map.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }
}

fn reference_interval<K: Debug>(key: &K, reference: &ReferenceInterval) -> Result<Interval> {
    let interval = Interval::new(to_ordinal(&reference.start)?, to_ordinal(&reference.end)?);
    if !interval.is_valid() {
        return Err(DimensionError::InvalidInterval {
            key: format!("{key:?}"),
            start: interval.start,
            end: interval.end,
        });
    }
    Ok(interval)
}
