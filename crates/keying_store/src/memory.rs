//! In-memory keyed store.

use crate::dao::KeyedDao;
use crate::error::{StoreError, StoreResult};
use crate::range::prefix_range;
use keying_core::{KeyEngine, Keyed};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// A keyed store backed by an ordered in-memory map.
///
/// Records are cloned in and out. Keys iterate in ascending lexical order, so
/// an `INVERSE_TIME` leading segment lists the newest records first.
///
/// # Thread Safety
///
/// The store is thread-safe and can be shared across threads.
pub struct InMemoryDao<T> {
    engine: Arc<KeyEngine>,
    entries: RwLock<BTreeMap<String, T>>,
}

impl<T: Keyed + Clone> InMemoryDao<T> {
    /// Creates an empty store keyed by `engine`.
    #[must_use]
    pub fn new(engine: Arc<KeyEngine>) -> Self {
        Self {
            engine,
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Returns the number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns all identifiers in key order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }
}

impl<T: Keyed + Clone> KeyedDao<T> for InMemoryDao<T> {
    fn engine(&self) -> &KeyEngine {
        &self.engine
    }

    fn save(&self, mut entity: T) -> StoreResult<String> {
        self.engine.key(&mut entity)?;
        let id = self.key_of(&entity)?;
        debug!(key = %id, "saving record");
        self.entries.write().insert(id.clone(), entity);
        Ok(id)
    }

    fn find_by_id(&self, id: &str) -> StoreResult<T> {
        self.entries
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(id))
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        if self.entries.write().remove(id).is_some() {
            debug!(key = %id, "deleted record");
        }
        Ok(())
    }

    fn count(&self, limit: usize) -> StoreResult<usize> {
        Ok(self.len().min(limit))
    }

    fn find_by_prefix(&self, prefix: &str) -> StoreResult<Vec<T>> {
        Ok(self
            .entries
            .read()
            .range(prefix_range(prefix))
            .map(|(_, entity)| entity.clone())
            .collect())
    }
}

impl<T> std::fmt::Debug for InMemoryDao<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryDao")
            .field("entries", &self.entries.read().len())
            .finish()
    }
}
