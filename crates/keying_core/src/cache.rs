//! Per-type pipeline cache.

use crate::config::KeyConfig;
use crate::error::KeyResult;
use crate::pipeline::Pipeline;
use crate::schema::{Keyed, RecordType};
use crate::stats::EngineStats;
use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace, warn};

type ErasedPipeline = Arc<dyn Any + Send + Sync>;

/// Compiled pipelines, one per record type.
///
/// Lookups take a shared lock. Compilation happens outside any lock, so two
/// callers seeing a new type at the same time may both compile it; the first
/// insert wins and the other result is dropped. Failed compilations are not
/// remembered. Entries are never evicted.
#[derive(Default)]
pub struct PipelineCache {
    pipelines: RwLock<HashMap<RecordType, ErasedPipeline>>,
}

impl PipelineCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached pipeline for `record`'s type, compiling it on first use.
    ///
    /// # Errors
    ///
    /// Returns the strategy error from compilation. Nothing is cached in that case.
    pub fn get<T: Keyed>(
        &self,
        record: &T,
        config: &KeyConfig,
        stats: &EngineStats,
    ) -> KeyResult<Arc<Pipeline<T>>> {
        let record_type = record.record_type();
        if let Some(pipeline) = self.lookup::<T>(&record_type) {
            trace!(record_type = %record_type, "pipeline cache hit");
            stats.record_cache_hit();
            return Ok(pipeline);
        }

        let schema = record.schema();
        let compiled = match Pipeline::compile(record_type.clone(), &schema, config) {
            Ok(pipeline) => Arc::new(pipeline),
            Err(err) => {
                warn!(record_type = %record_type, error = %err, "key strategy rejected");
                stats.record_compile_failure();
                return Err(err);
            }
        };
        stats.record_compilation();
        debug!(
            record_type = %record_type,
            strategy = %schema.strategy(),
            "compiled key pipeline"
        );

        let mut pipelines = self.pipelines.write();
        let stored = pipelines
            .entry(record_type)
            .or_insert_with(|| compiled.clone() as ErasedPipeline);
        Ok(Arc::clone(stored)
            .downcast::<Pipeline<T>>()
            .unwrap_or(compiled))
    }

    /// Returns the cached pipeline for a record type, if compiled.
    #[must_use]
    pub fn lookup<T: 'static>(&self, record_type: &RecordType) -> Option<Arc<Pipeline<T>>> {
        let stored = Arc::clone(self.pipelines.read().get(record_type)?);
        stored.downcast::<Pipeline<T>>().ok()
    }

    /// Returns true if a pipeline is cached for the record type.
    #[must_use]
    pub fn contains(&self, record_type: &RecordType) -> bool {
        self.pipelines.read().contains_key(record_type)
    }

    /// Returns the number of cached pipelines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pipelines.read().len()
    }

    /// Returns true if nothing has been compiled yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pipelines.read().is_empty()
    }

    /// Returns every cached record type.
    #[must_use]
    pub fn record_types(&self) -> Vec<RecordType> {
        self.pipelines.read().keys().cloned().collect()
    }
}

impl std::fmt::Debug for PipelineCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineCache")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{IdField, Schema};
    use crate::segment::{SegmentKind, Strategy};
    use std::thread;

    struct Ticket {
        key: Option<String>,
        seat: u32,
    }

    impl Keyed for Ticket {
        fn schema(&self) -> Schema<Self> {
            Schema::new(
                Strategy::new([SegmentKind::Property]).with_properties(["seat"]),
                IdField::new("key", |t: &Ticket| t.key.as_deref(), |t, key| t.key = Some(key)),
            )
            .property("seat", |t: &Ticket| t.seat.to_string())
        }
    }

    struct Broken;

    impl Keyed for Broken {
        fn schema(&self) -> Schema<Self> {
            Schema::new(
                Strategy::new([SegmentKind::Time]),
                IdField::new("key", |_: &Broken| None, |_, _| {}),
            )
        }
    }

    fn ticket(seat: u32) -> Ticket {
        Ticket { key: None, seat }
    }

    #[test]
    fn compiles_once_then_hits() {
        let cache = PipelineCache::new();
        let config = KeyConfig::default();
        let stats = EngineStats::new();

        let first = cache.get(&ticket(1), &config, &stats).unwrap();
        let second = cache.get(&ticket(2), &config, &stats).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert!(cache.contains(&RecordType::of::<Ticket>()));

        let snap = stats.snapshot();
        assert_eq!(snap.compilations, 1);
        assert_eq!(snap.cache_hits, 1);
    }

    #[test]
    fn failures_are_not_cached() {
        let cache = PipelineCache::new();
        let config = KeyConfig::default();
        let stats = EngineStats::new();

        assert!(cache.get(&Broken, &config, &stats).is_err());
        assert!(cache.get(&Broken, &config, &stats).is_err());
        assert!(cache.is_empty());
        assert_eq!(stats.snapshot().compile_failures, 2);
    }

    #[test]
    fn concurrent_first_use_keeps_one_pipeline() {
        let cache = Arc::new(PipelineCache::new());
        let stats = Arc::new(EngineStats::new());

        let handles: Vec<_> = (0..8)
            .map(|seat| {
                let cache = Arc::clone(&cache);
                let stats = Arc::clone(&stats);
                thread::spawn(move || {
                    let pipeline = cache
                        .get(&ticket(seat), &KeyConfig::default(), &stats)
                        .unwrap();
                    pipeline.render(&ticket(seat))
                })
            })
            .collect();

        for (seat, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), seat.to_string());
        }
        assert_eq!(cache.len(), 1);
        let stored = cache.lookup::<Ticket>(&RecordType::of::<Ticket>()).unwrap();
        let again = cache.get(&ticket(0), &KeyConfig::default(), &stats).unwrap();
        assert!(Arc::ptr_eq(&stored, &again));
    }
}
