//! Regular (type 1) dimensions: one surrogate key per natural key.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use etlt_model::Row;
use tracing::trace;

use crate::Result;

/// Backing store of a dimension, typically a stored procedure.
///
/// `before_resolve` and `after_resolve` bracket every call to `resolve`. In a
/// concurrent environment they are the place to lock the dimension and to
/// commit or roll back.
pub trait KeyResolver<K> {
    /// Surrogate key of `key`, `None` if the natural key is not valid.
    fn resolve(&mut self, key: &K, enhancement: Option<&Row>) -> Result<Option<i64>>;

    fn before_resolve(&mut self) -> Result<()> {
        Ok(())
    }

    /// `success` is false when `resolve` returned an error.
    fn after_resolve(&mut self, success: bool) -> Result<()> {
        let _ = success;
        Ok(())
    }
}

/// Cache in front of a [`KeyResolver`].
#[derive(Debug)]
pub struct Type1Dimension<K, R> {
    resolver: R,
    map: HashMap<K, Option<i64>>,
}

impl<K, R> Type1Dimension<K, R>
where
    K: Eq + Hash + Clone + Debug,
    R: KeyResolver<K>,
{
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            map: HashMap::new(),
        }
    }

    /// Seed the cache with known translations, e.g. the dimension table.
    pub fn preload<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, Option<i64>)>,
    {
        self.map.extend(entries);
    }

    /// Surrogate key of `key`, `None` if the natural key is not valid.
    ///
    /// Unknown keys are resolved once; the answer is cached either way.
    pub fn get_id(&mut self, key: &K, enhancement: Option<&Row>) -> Result<Option<i64>> {
        if let Some(id) = self.map.get(key) {
            return Ok(*id);
        }

        self.resolver.before_resolve()?;
        let resolved = self.resolver.resolve(key, enhancement);
        let finished = self.resolver.after_resolve(resolved.is_ok());
        let id = resolved?;
        finished?;

        trace!(?key, ?id, "Resolved natural key");
        self.map.insert(key.clone(), id);
        Ok(id)
    }

    /// Number of cached natural keys.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }
}
