//! The key engine facade.

use crate::cache::PipelineCache;
use crate::config::KeyConfig;
use crate::error::{KeyError, KeyResult};
use crate::pipeline::Pipeline;
use crate::schema::Keyed;
use crate::stats::{EngineStats, StatsSnapshot};
use std::sync::Arc;
use tracing::debug;

/// Stamps and previews record identifiers.
///
/// An engine owns its pipeline cache; nothing is shared through globals.
/// Share one engine (e.g. behind an `Arc`) across every caller that keys the
/// same record types, and construct fresh engines in tests.
///
/// # Example
///
/// ```rust
/// use keying_core::{IdField, KeyEngine, Keyed, Schema, SegmentKind, Strategy};
///
/// #[derive(Default)]
/// struct Comment {
///     key: Option<String>,
///     post: String,
/// }
///
/// impl Keyed for Comment {
///     fn schema(&self) -> Schema<Self> {
///         Schema::new(
///             Strategy::new([SegmentKind::Property, SegmentKind::Uuid]).with_properties(["post"]),
///             IdField::new("key", |c: &Comment| c.key.as_deref(), |c, key| c.key = Some(key)),
///         )
///         .property("post", |c: &Comment| c.post.clone())
///     }
/// }
///
/// let engine = KeyEngine::new();
/// let mut comment = Comment { post: "p1".into(), ..Comment::default() };
/// engine.key(&mut comment).unwrap();
/// assert!(comment.key.as_deref().unwrap().starts_with("p1"));
///
/// // A UUID segment changes on every call, so it cannot be previewed.
/// assert!(engine.compute(&comment).is_err());
/// ```
#[derive(Debug, Default)]
pub struct KeyEngine {
    config: KeyConfig,
    cache: PipelineCache,
    stats: EngineStats,
}

impl KeyEngine {
    /// Creates an engine with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with a custom configuration.
    #[must_use]
    pub fn with_config(config: KeyConfig) -> Self {
        Self {
            config,
            cache: PipelineCache::new(),
            stats: EngineStats::new(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &KeyConfig {
        &self.config
    }

    /// Returns the compiled pipeline for `record`'s type, compiling it on first use.
    ///
    /// # Errors
    ///
    /// Returns a strategy error if the type's strategy is invalid.
    pub fn pipeline<T: Keyed>(&self, record: &T) -> KeyResult<Arc<Pipeline<T>>> {
        self.cache.get(record, &self.config, &self.stats)
    }

    /// Compiles `record`'s type ahead of first use.
    ///
    /// Call this at startup for every record type so strategy errors surface
    /// before any record is persisted.
    ///
    /// # Errors
    ///
    /// Returns a strategy error if the type's strategy is invalid.
    pub fn prepare<T: Keyed>(&self, record: &T) -> KeyResult<()> {
        self.pipeline(record).map(|_| ())
    }

    /// Stamps `record`'s identifier unless it already holds a non-empty value.
    ///
    /// An already keyed record is returned untouched. Otherwise every
    /// component is rendered, in order, and the concatenation is written to
    /// the identifier field.
    ///
    /// # Errors
    ///
    /// Returns a strategy error if the type's strategy is invalid. The record
    /// is not modified in that case.
    pub fn key<'a, T: Keyed>(&self, record: &'a mut T) -> KeyResult<&'a mut T> {
        let pipeline = self.pipeline(record)?;
        if pipeline.stamp(record) {
            self.stats.record_stamp();
            debug!(
                record_type = %pipeline.record_type(),
                key = pipeline.id_field().read(record).unwrap_or_default(),
                "stamped record key"
            );
        } else {
            self.stats.record_skip();
        }
        Ok(record)
    }

    /// Computes the key `record` would receive, without modifying it.
    ///
    /// # Errors
    ///
    /// Returns a strategy error if the type's strategy is invalid, or
    /// [`KeyError::NonDeterministic`] if any component (e.g. a UUID) renders a
    /// different value on every call.
    pub fn compute<T: Keyed>(&self, record: &T) -> KeyResult<String> {
        let pipeline = self.pipeline(record)?;
        if let Some(kind) = pipeline.non_deterministic_kind() {
            self.stats.record_compute_rejection();
            return Err(KeyError::non_deterministic(
                pipeline.record_type().name(),
                kind,
            ));
        }
        self.stats.record_compute();
        Ok(pipeline.render(record))
    }

    /// Returns true if `record`'s identifier is already populated.
    ///
    /// # Errors
    ///
    /// Returns a strategy error if the type's strategy is invalid.
    pub fn is_keyed<T: Keyed>(&self, record: &T) -> KeyResult<bool> {
        Ok(self.pipeline(record)?.is_keyed(record))
    }

    /// Returns the number of record types compiled so far.
    #[must_use]
    pub fn cached_types(&self) -> usize {
        self.cache.len()
    }

    /// Returns the pipeline cache.
    #[must_use]
    pub fn cache(&self) -> &PipelineCache {
        &self.cache
    }

    /// Returns a snapshot of the engine counters.
    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}
