//! Keyed data-access trait.

use crate::error::{StoreError, StoreResult};
use keying_core::{KeyEngine, Keyed};
use std::collections::BTreeMap;

/// Create, read and delete operations for records keyed by a [`KeyEngine`].
///
/// Implementors provide the storage primitives. The batch operations have
/// default implementations in terms of the single-record ones.
///
/// # Invariants
///
/// - `save` keys the record before persisting it and never overwrites an
///   identifier the record already carries
/// - Identifiers returned by `save` are the record's primary key
/// - Lookups of missing identifiers in batch operations are skipped silently
pub trait KeyedDao<T: Keyed + Clone> {
    /// Returns the engine used to key records.
    fn engine(&self) -> &KeyEngine;

    /// Saves or updates a record and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the record's type has an invalid key strategy.
    fn save(&self, entity: T) -> StoreResult<String>;

    /// Loads the record stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if nothing is stored under `id`.
    fn find_by_id(&self, id: &str) -> StoreResult<T>;

    /// Removes the record stored under `id`. Removing a missing record is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn delete(&self, id: &str) -> StoreResult<()>;

    /// Returns the number of stored records, counting at most `limit`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn count(&self, limit: usize) -> StoreResult<usize>;

    /// Returns every record whose identifier starts with `prefix`, in key order.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn find_by_prefix(&self, prefix: &str) -> StoreResult<Vec<T>>;

    /// Returns the identifier a stored record is filed under.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingKey`] if the record has no identifier.
    fn key_of(&self, entity: &T) -> StoreResult<String> {
        let pipeline = self.engine().pipeline(entity)?;
        pipeline
            .id_field()
            .read(entity)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .ok_or_else(|| StoreError::missing_key(pipeline.record_type().name()))
    }

    /// Saves every record and returns them by identifier.
    ///
    /// # Errors
    ///
    /// Stops at the first record that cannot be saved. Records before it
    /// remain saved.
    fn save_all<I>(&self, entities: I) -> StoreResult<BTreeMap<String, T>>
    where
        I: IntoIterator<Item = T>,
    {
        let mut saved = BTreeMap::new();
        for entity in entities {
            let id = self.save(entity.clone())?;
            let stored = self.find_by_id(&id)?;
            saved.insert(id, stored);
        }
        Ok(saved)
    }

    /// Loads every record stored under one of `ids`. Missing ids are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn find_by_ids<'a, I>(&self, ids: I) -> StoreResult<BTreeMap<String, T>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut found = BTreeMap::new();
        for id in ids {
            match self.find_by_id(id) {
                Ok(entity) => {
                    found.insert(id.to_string(), entity);
                }
                Err(StoreError::NotFound { .. }) => {}
                Err(err) => return Err(err),
            }
        }
        Ok(found)
    }

    /// Removes every given record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingKey`] for a record that was never keyed.
    fn delete_all<I>(&self, entities: I) -> StoreResult<()>
    where
        I: IntoIterator<Item = T>,
    {
        for entity in entities {
            let id = self.key_of(&entity)?;
            self.delete(&id)?;
        }
        Ok(())
    }

    /// Removes the records stored under each of `ids`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn delete_by_keys<'a, I>(&self, ids: I) -> StoreResult<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for id in ids {
            self.delete(id)?;
        }
        Ok(())
    }
}
