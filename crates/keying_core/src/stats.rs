//! Key engine statistics.
//!
//! All counters are atomic and may be read while keys are being computed.
//! Values only ever increase.

use std::sync::atomic::{AtomicU64, Ordering};

/// Running counters for a [`KeyEngine`](crate::KeyEngine).
#[derive(Debug, Default)]
pub struct EngineStats {
    /// Pipelines compiled successfully (including redundant racing compiles).
    compilations: AtomicU64,
    /// Compilations rejected with a strategy error.
    compile_failures: AtomicU64,
    /// Pipeline lookups served from the cache.
    cache_hits: AtomicU64,
    /// Records whose identifier was written by `key`.
    keys_stamped: AtomicU64,
    /// `key` calls on records that already had an identifier.
    keys_skipped: AtomicU64,
    /// Successful `compute` calls.
    computes: AtomicU64,
    /// `compute` calls refused because of a non-deterministic component.
    compute_rejections: AtomicU64,
}

impl EngineStats {
    /// Creates a zeroed stats instance.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_compilation(&self) {
        self.compilations.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_compile_failure(&self) {
        self.compile_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_stamp(&self) {
        self.keys_stamped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_skip(&self) {
        self.keys_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_compute(&self) {
        self.computes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_compute_rejection(&self) {
        self.compute_rejections.fetch_add(1, Ordering::Relaxed);
    }

    /// Takes a point-in-time copy of all counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            compilations: self.compilations.load(Ordering::Relaxed),
            compile_failures: self.compile_failures.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            keys_stamped: self.keys_stamped.load(Ordering::Relaxed),
            keys_skipped: self.keys_skipped.load(Ordering::Relaxed),
            computes: self.computes.load(Ordering::Relaxed),
            compute_rejections: self.compute_rejections.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time copy of [`EngineStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    /// Pipelines compiled successfully.
    pub compilations: u64,
    /// Compilations rejected with a strategy error.
    pub compile_failures: u64,
    /// Pipeline lookups served from the cache.
    pub cache_hits: u64,
    /// Identifiers written by `key`.
    pub keys_stamped: u64,
    /// `key` calls on already keyed records.
    pub keys_skipped: u64,
    /// Successful `compute` calls.
    pub computes: u64,
    /// Refused `compute` calls.
    pub compute_rejections: u64,
}
